//! Error handling - RFC 7807 problem responses and login redirects.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use blog_core::error::{DomainError, RepoError};
use blog_shared::ErrorResponse;

/// Where requests without a valid identity are sent.
pub const LOGIN_URL: &str = "/login/";

/// Application-level error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A protected page was requested without a login; answered with a redirect.
    #[error("Login required")]
    LoginRequired { next: Option<String> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation errors: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Record `path` as the page to return to after logging in.
    pub fn returning_to(self, path: &str) -> Self {
        match self {
            AppError::LoginRequired { .. } => AppError::LoginRequired {
                next: Some(path.to_string()),
            },
            other => other,
        }
    }

    /// `Location` of the login redirect.
    pub fn login_location(next: Option<&str>) -> String {
        match next.and_then(|path| serde_urlencoded::to_string([("next", path)]).ok()) {
            Some(query) => format!("{LOGIN_URL}?{query}"),
            None => LOGIN_URL.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::LoginRequired { .. } => StatusCode::FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::LoginRequired { next } => {
                let location = Self::login_location(next.as_deref());
                let body = ErrorResponse::new(401, "Authentication Required")
                    .with_detail("Log in to continue.")
                    .with_instance(location.clone());
                return HttpResponse::Found()
                    .insert_header((header::LOCATION, location))
                    .json(body);
            }
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Forbidden => ErrorResponse::forbidden()
                .with_detail("You do not have permission to perform this action."),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone()),
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
            DomainError::NotFound { entity_type, key } => {
                AppError::NotFound(format!("{entity_type} {key} not found"))
            }
            DomainError::Unauthenticated => AppError::LoginRequired { next: None },
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Repo(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
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
