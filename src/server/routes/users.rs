use axum::{extract::State, routing::post, Json, Router};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth;
use crate::db::queries::users;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::ApiJson;

#[derive(Deserialize)]
struct Credentials {
    email: Option<String>,
    password: Option<SecretString>,
}

#[derive(Serialize)]
struct UserCreated {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct UserView {
    id: i64,
    email: String,
    score: i64,
}

#[derive(Serialize)]
struct LoginOk {
    success: bool,
    user: UserView,
}

fn validate(body: Credentials) -> Result<(String, SecretString), ApiError> {
    let email = body
        .email
        .map(|e| e.trim().to_owned())
        .filter(|e| !e.is_empty())
        .ok_or(ApiError::BadRequest)?;
    let password = body
        .password
        .filter(|p| !p.expose_secret().is_empty())
        .ok_or(ApiError::BadRequest)?;
    Ok((email, password))
}

async fn register(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<Credentials>,
) -> ApiResult<UserCreated> {
    let (email, password) = validate(body)?;
    if users::get_user_by_email(&pool, &email).await?.is_some() {
        return Err(ApiError::Conflict);
    }
    let hash = auth::hash_password(password.expose_secret()).map_err(|e| {
        tracing::error!("password hashing failed: {e}");
        ApiError::Unprocessable
    })?;
    let created = users::create_user(&pool, &email, &hash).await?;
    tracing::info!("Registered user {created}");
    Ok(Json(UserCreated {
        success: true,
        created,
    }))
}

async fn login(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<Credentials>,
) -> ApiResult<LoginOk> {
    let (email, password) = validate(body)?;
    let user = users::get_user_by_email(&pool, &email)
        .await?
        .ok_or(ApiError::NotFound)?;
    if !auth::verify_password(&user.password, password.expose_secret()) {
        return Err(ApiError::BadRequest);
    }
    Ok(Json(LoginOk {
        success: true,
        user: UserView {
            id: user.id,
            email: user.email,
            score: user.score,
        },
    }))
}

pub fn users_router(state: AppState) -> Router {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .with_state(state)
}
