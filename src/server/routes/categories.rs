use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::categories::{self, title_case};
use crate::db::queries::questions;
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{ApiJson, ApiQuery};
use crate::server::pagination::{paginate, resolve_page};

use super::category_map;

#[derive(Deserialize)]
struct NewCategory {
    name: Option<String>,
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<i64>,
}

#[derive(Serialize)]
struct CategoryCreated {
    success: bool,
    created: i64,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryDeleted {
    success: bool,
    deleted: i64,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn create_category(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<NewCategory>,
) -> ApiResult<CategoryCreated> {
    let name = body.name.unwrap_or_default();
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest);
    }

    let name = title_case(name);
    if categories::get_category_by_name(&pool, &name).await?.is_some() {
        return Err(ApiError::Conflict);
    }
    let created = categories::create_category(&pool, &name).await?;
    tracing::info!("Created category {created} ({name})");

    let all = categories::get_categories(&pool).await?;
    Ok(Json(CategoryCreated {
        success: true,
        created,
        categories: category_map(all),
    }))
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResult<CategoriesList> {
    let all = categories::get_categories(&pool).await?;
    if all.is_empty() {
        return Err(ApiError::NotFound);
    }
    let total_categories = all.len();
    Ok(Json(CategoriesList {
        success: true,
        categories: category_map(all),
        total_categories,
    }))
}

async fn delete_category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<CategoryDeleted> {
    categories::delete_category(&pool, id).await?;
    tracing::info!("Deleted category {id} and its questions");

    let remaining = categories::get_categories(&pool).await?;
    Ok(Json(CategoryDeleted {
        success: true,
        deleted: id,
        categories: category_map(remaining),
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<CategoryQuestions> {
    let page = resolve_page(query.page)?;
    let category = categories::get_category(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let selection = questions::get_questions_for_category(&pool, id).await?;
    let current = paginate(&selection, page);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestions {
        success: true,
        questions: current.to_vec(),
        total_questions: selection.len(),
        current_category: category.name,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
