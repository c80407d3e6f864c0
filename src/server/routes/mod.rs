mod categories;
mod questions;
mod quizzes;
mod users;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;
pub use users::users_router;

use std::collections::BTreeMap;

use crate::db::Category;

// Categories are served as an {id: name} object across endpoints
pub(super) fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.name)).collect()
}
