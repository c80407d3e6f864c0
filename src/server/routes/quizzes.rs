use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::ApiJson;
use crate::server::quiz::next_question;
use crate::telemetry::QUIZ_CNTR;

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    quiz_category: Option<i64>,
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Question,
}

async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuizRequest>,
) -> ApiResult<QuizResponse> {
    let previous = body.previous_questions.unwrap_or_default();
    // id 0 is the client convention for "all categories"
    let category = body.quiz_category.filter(|id| *id > 0);

    let (candidates, label) = match category {
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

    let question = next_question(&candidates, &previous)
        .ok_or(ApiError::NotFound)?
        .clone();
    QUIZ_CNTR.with_label_values(&[label.as_str()]).inc();
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_quiz_question))
        .with_state(state)
}
