use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{ApiJson, ApiQuery};
use crate::server::pagination::{paginate, resolve_page};

use super::category_map;

#[derive(Deserialize)]
struct QuestionsQuery {
    page: Option<i64>,
    category: Option<i64>,
}

/// Create and search share the POST /questions route and are told apart by
/// the body shape: a present `search_term` means search, otherwise all four
/// creation fields are required.
#[derive(Deserialize)]
struct QuestionPayload {
    question: Option<String>,
    answer: Option<String>,
    category: Option<i64>,
    difficulty: Option<i64>,
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    current_category: String,
    categories: BTreeMap<i64, String>,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct QuestionCreated {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

#[derive(Serialize)]
struct QuestionDeleted {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<QuestionsQuery>,
) -> ApiResult<QuestionsPage> {
    let page = resolve_page(query.page)?;
    let (selection, current_category) = match query.category {
        Some(id) => {
            let category = categories::get_category(&pool, id)
                .await?
                .ok_or(ApiError::NotFound)?;
            (
                questions::get_questions_for_category(&pool, id).await?,
                category.name,
            )
        }
        None => (questions::get_questions(&pool).await?, "All".to_owned()),
    };

    let current = paginate(&selection, page);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    let all_categories = categories::get_categories(&pool).await?;
    Ok(Json(QuestionsPage {
        success: true,
        current_category,
        categories: category_map(all_categories),
        questions: current.to_vec(),
        total_questions: selection.len(),
    }))
}

async fn create_or_search(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<QuestionsQuery>,
    ApiJson(payload): ApiJson<QuestionPayload>,
) -> Result<Response, ApiError> {
    if let Some(term) = payload.search_term.as_deref() {
        let page = resolve_page(query.page)?;
        let selection = questions::search_questions(&pool, term).await?;
        let current = paginate(&selection, page);
        if current.is_empty() {
            return Err(ApiError::NotFound);
        }
        return Ok(Json(SearchResults {
            success: true,
            questions: current.to_vec(),
            total_questions: selection.len(),
            current_category: "All".to_owned(),
        })
        .into_response());
    }

    match (
        payload.question,
        payload.answer,
        payload.category,
        payload.difficulty,
    ) {
        (Some(question), Some(answer), Some(category), Some(difficulty))
            if !question.trim().is_empty() && !answer.trim().is_empty() =>
        {
            let created =
                questions::create_question(&pool, &question, &answer, category, difficulty)
                    .await?;
            tracing::info!("Created question {created}");
            Ok(Json(QuestionCreated {
                success: true,
                created,
            })
            .into_response())
        }
        _ => Err(ApiError::BadRequest),
    }
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResult<QuestionDeleted> {
    questions::delete_question(&pool, id).await?;
    tracing::info!("Deleted question {id}");

    let remaining = questions::get_questions(&pool).await?;
    Ok(Json(QuestionDeleted {
        success: true,
        deleted: id,
        questions: paginate(&remaining, 1).to_vec(),
        total_questions: remaining.len(),
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_or_search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
