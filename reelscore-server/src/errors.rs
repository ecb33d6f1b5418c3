//! HTTP error mapping
//!
//! Translates the core error taxonomy into status codes: not-found maps to
//! 404, conflicts (duplicate nick, self-friending) to 409, validation
//! failures to 400, everything else to 500.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use reelscore_core::Error as CoreError;

/// Wrapper turning core errors into HTTP responses.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] CoreError);

impl ApiError {
    /// A 404 raised at the handler layer, for lookups the core reports as
    /// plain absence.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(CoreError::not_found(msg))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.0.to_string(),
        })
    }
}

/// Result type alias for handlers
pub type ApiResult<T> = Result<T, ApiError>;
