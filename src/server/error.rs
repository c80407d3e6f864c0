use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Error taxonomy of the API. Every failure surfaces to the caller as the
/// matching status code and the `{success, error, message}` envelope.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    Conflict,
    Unprocessable,
    MethodNotAllowed,
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "bad request"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "resource not found"),
            ApiError::Conflict => (StatusCode::CONFLICT, "resource exists"),
            ApiError::Unprocessable => (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable"),
            ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.parts();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        if matches!(&error, sqlx::Error::RowNotFound) {
            return ApiError::NotFound;
        }
        if is_unique_violation(&error) {
            return ApiError::Conflict;
        }
        tracing::error!("database error: {error}");
        ApiError::Unprocessable
    }
}

// SQLite extended result code for a UNIQUE constraint violation
fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("2067")
    )
}

impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        ApiError::BadRequest
    }
}

impl From<QueryRejection> for ApiError {
    fn from(_: QueryRejection) -> Self {
        ApiError::BadRequest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert_eq!(ApiError::from(sqlx::Error::RowNotFound), ApiError::NotFound);
    }

    #[test]
    fn unexpected_store_errors_map_to_unprocessable() {
        assert_eq!(
            ApiError::from(sqlx::Error::PoolClosed),
            ApiError::Unprocessable
        );
    }
}
