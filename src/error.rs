//! Unified error handling for the purchases server.
//!
//! Two tiers of failure exist. Business rejections (nonexistent customer,
//! invalid quantity) are values the handlers return at HTTP 200 with
//! `status: "failed"`. Everything else funnels through [`AppError`], the
//! single response-shaping boundary, which answers HTTP 400 with
//! `{"status":"failed","reason":"..."}`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::PurchaseId;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Malformed body or missing required field.
    #[error("{0}")]
    BadRequest(String),

    /// Post-update re-fetch found no such purchase.
    #[error("Purchase {0} doesn't exist")]
    PurchaseNotFound(PurchaseId),
}

/// Error envelope body: `{"status":"failed","reason":"..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    reason: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Repository(_)) {
            tracing::error!(error = %self, "request failed against the store");
        }

        let body = ErrorBody {
            status: "failed",
            reason: self.to_string(),
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// JSON extractor whose rejection shares the error envelope.
///
/// `axum::Json` answers rejections with its own plain-text bodies; wrapping
/// it keeps malformed bodies and missing required fields on the same
/// `{"status":"failed","reason":...}` shape as every other failure.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::PurchaseNotFound(PurchaseId::new(5));
        assert_eq!(err.to_string(), "Purchase 5 doesn't exist");

        let err = AppError::BadRequest("missing field `name`".to_string());
        assert_eq!(err.to_string(), "missing field `name`");
    }

    #[test]
    fn test_every_error_maps_to_bad_request() {
        let errors = [
            AppError::BadRequest("bad body".to_string()),
            AppError::PurchaseNotFound(PurchaseId::new(1)),
            AppError::Repository(RepositoryError::Database(sqlx::Error::RowNotFound)),
        ];

        for err in errors {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }
}
