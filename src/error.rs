use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure of a request, rendered as `{ "message": ..., "error"?: ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad input shape, malformed identifier or missing required field.
    #[error("{message}")]
    Validation {
        message: String,
        detail: Option<String>,
    },

    /// Duplicate value for a unique field.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Bad credentials or a token that does not check out.
    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            detail: None,
        }
    }

    /// Validation failure that also reports the underlying cause.
    pub fn rejected(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        ApiError::Validation {
            message: message.into(),
            detail: Some(cause.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::Conflict(_) | ApiError::Auth(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation { message, detail } => ErrorBody {
                message,
                error: detail,
            },
            ApiError::Conflict(message)
            | ApiError::NotFound(message)
            | ApiError::Auth(message)
            | ApiError::Internal(message) => ErrorBody {
                message,
                error: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Failure reported by a credential or property store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("duplicate value for {0}")]
    Duplicate(&'static str),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        let unique = e
            .as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false);
        if unique {
            StoreError::Duplicate("unique key")
        } else {
            StoreError::Backend(anyhow::Error::new(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn taxonomy_maps_to_status_codes() {
        assert_eq!(ApiError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Auth("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn body_carries_message_and_optional_cause() {
        let (status, json) = body_json(ApiError::NotFound("Property not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Property not found");
        assert!(json.get("error").is_none());

        let err = ApiError::rejected("Failed to create Property", "missing field `title`");
        let (_, json) = body_json(err).await;
        assert_eq!(json["message"], "Failed to create Property");
        assert_eq!(json["error"], "missing field `title`");
    }
}
