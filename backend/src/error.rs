//! One error type for every handler, rendered as a `{ "message": ... }` JSON
//! body with the matching status code.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::progress::NotFound;
use log::{error, warn};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    /// A trainer/year/form lookup that came up empty at a known step.
    #[error(transparent)]
    Unresolved(#[from] NotFound),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload error: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),
}

impl ApiError {
    pub fn not_found(what: &str, id: &str) -> Self {
        ApiError::NotFound(format!("{} {} not found", what, id))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) | ApiError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) | ApiError::Unresolved(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ApiError::Validation(errors) => {
                json!({ "message": self.to_string(), "errors": errors })
            }
            ApiError::Unresolved(not_found) => {
                json!({ "message": self.to_string(), "reason": not_found.reason() })
            }
            ApiError::Store(_) | ApiError::Io(_) => {
                error!("{}", self);
                json!({ "message": "internal server error" })
            }
            _ => {
                if status == StatusCode::FORBIDDEN {
                    warn!("{}", self);
                }
                json!({ "message": self.to_string() })
            }
        };
        HttpResponse::build(status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use common::model::form_kind::FormKind;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn resolver_misses_carry_their_reason() {
        let (status, body) = body_of(ApiError::from(NotFound::FormNotCreated {
            kind: FormKind::E,
            year: "سال اول".into(),
        }))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["reason"], "form_not_created");
    }

    #[actix_web::test]
    async fn internal_errors_do_not_leak_details() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/secret/path");
        let (status, body) = body_of(ApiError::from(io)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
    }
}
