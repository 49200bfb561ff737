use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::error;

use crate::users::repo::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request body")]
    InvalidBody(String),
    #[error("Missing fields")]
    MissingFields,
    #[error("User already exists")]
    AlreadyExists,
    #[error("User not found")]
    NotFound,
    /// Registration failed; the cause is logged, never returned.
    #[error("Failed to create user")]
    CreateFailed(anyhow::Error),
    /// Lookup failed; the cause is logged, never returned.
    #[error("Failed to fetch user(s)")]
    FetchFailed(anyhow::Error),
}

impl AppError {
    /// Store failure while registering, keeping duplicate emails as a conflict.
    pub fn on_create(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::AlreadyExists,
            StoreError::Backend(cause) => Self::CreateFailed(cause),
        }
    }

    /// Store failure while looking users up.
    pub fn on_fetch(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => {
                Self::FetchFailed(anyhow::anyhow!("duplicate email reported on read"))
            }
            StoreError::Backend(cause) => Self::FetchFailed(cause),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::CreateFailed(_) | Self::FetchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Registration errors answer with `message`, lookup errors with `error`.
    fn body_key(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) | Self::MissingFields | Self::AlreadyExists | Self::CreateFailed(_) => {
                "message"
            }
            Self::NotFound | Self::FetchFailed(_) => "error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::CreateFailed(cause) | Self::FetchFailed(cause) => {
                error!(error = ?cause, "{}", self);
            }
            Self::InvalidBody(detail) => {
                tracing::debug!(%detail, "rejected request body");
            }
            _ => {}
        }
        let status = self.status_code();
        let mut body = Map::new();
        body.insert(self.body_key().to_owned(), Value::String(self.to_string()));
        (status, Json(Value::Object(body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(AppError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidBody("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::AlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::FetchFailed(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_email_from_store_is_a_conflict() {
        let err = AppError::on_create(StoreError::DuplicateEmail);
        assert!(matches!(err, AppError::AlreadyExists));
    }

    #[tokio::test]
    async fn create_failure_answers_under_message_key() {
        let err = AppError::on_create(StoreError::Backend(anyhow::anyhow!("pool timed out")));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "message": "Failed to create user" }));
    }

    #[tokio::test]
    async fn fetch_failure_answers_under_error_key_and_hides_cause() {
        let err = AppError::on_fetch(StoreError::Backend(anyhow::anyhow!("pool timed out")));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Failed to fetch user(s)" }));
    }
}
