//! JSON body extractor whose rejections are reported as 400 Bad Request.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Like `axum::Json`, but malformed JSON, wrong field types and a missing
/// `Content-Type: application/json` all become `AppError::BadRequest`. Bodies that cannot
/// be read (over the size limit) keep their own status.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: JsonRejection) -> AppError {
    tracing::debug!(status = %rejection.status(), "rejected request body");
    match rejection {
        JsonRejection::BytesRejection(_) => AppError::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        },
        _ => AppError::BadRequest(rejection.body_text()),
    }
}
