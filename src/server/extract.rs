use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

/// JSON body extractor whose rejection is the API error envelope instead of
/// axum's plain-text default.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query-string extractor with the same rejection behavior.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
