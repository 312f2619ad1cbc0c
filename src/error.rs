use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::notifications::NotificationError;

/// Errors returned by the JSON API routes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    BadRequest(#[from] NotificationError),

    #[error("Email provider error: {0:#}")]
    EmailProvider(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::EmailProvider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::BadRequest(e) => e.to_string(),
            ApiError::EmailProvider(_) => {
                error!("{}", self);
                "Failed to send email".to_string()
            }
        };

        let body = serde_json::json!({ "error": message });
        (self.status(), axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body");
        serde_json::from_slice(&bytes).expect("Should be JSON")
    }

    #[tokio::test]
    async fn test_bad_request_response() {
        let err = ApiError::from(NotificationError::Invalid {
            field: "email",
            reason: "must be an email address",
        });
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid field 'email': must be an email address");
    }

    #[tokio::test]
    async fn test_provider_error_is_generic() {
        let err = ApiError::EmailProvider(anyhow::anyhow!("Resend API error (401): bad key re_secret"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to send email");
        assert!(!json.to_string().contains("re_secret"));
    }
}
