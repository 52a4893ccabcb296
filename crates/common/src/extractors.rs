//! Custom axum extractors for Keystone

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::Error;

/// JSON body extractor that ignores the `Content-Type` header.
///
/// The body is decoded with `serde_json` whatever the client declared;
/// only unreadable bodies and JSON syntax or type errors are rejected.
/// Handlers that need their own wording take
/// `Result<JsonBody<T>, JsonBodyRejection>` and map the error.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

/// Rejection type for `JsonBody`
#[derive(Debug, thiserror::Error)]
pub enum JsonBodyRejection {
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    #[error("failed to decode JSON payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejected request payload");
        Error::Validation("malformed JSON payload".to_string()).into_response()
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(JsonBody(value))
    }
}
