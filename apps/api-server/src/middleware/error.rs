//! Error handling - maps failures onto HTTP responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::error::{DomainError, RepoError};
use quill_shared::ErrorResponse;
use std::fmt;

/// Application-level error type.
///
/// Every variant but `NotFound` renders an `{"error": ...}` body; not-found
/// responses are empty.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    BadRequest(String),
    Unauthorized,
    Forbidden,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Not found"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound => return HttpResponse::NotFound().finish(),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Forbidden => ErrorResponse::forbidden(),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound,
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Forbidden { .. } => AppError::Forbidden,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound,
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use uuid::Uuid;

    #[actix_web::test]
    async fn test_not_found_has_empty_body() {
        let resp = AppError::NotFound.error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_internal_error_hides_detail() {
        let resp = AppError::Internal("connection reset by peer".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed, ErrorResponse::new("Internal Server Error"));
    }

    #[test]
    fn test_domain_error_mapping() {
        let not_found = AppError::from(DomainError::NotFound {
            entity_type: "post",
            id: Uuid::nil(),
        });
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let invalid = AppError::from(DomainError::Validation("Title required".to_string()));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let forbidden = AppError::from(DomainError::Forbidden { entity_type: "post" });
        assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_repo_error_mapping() {
        assert_eq!(
            AppError::from(RepoError::Query("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(RepoError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
