use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use aiengine_common::AiEngineError;
use std::fmt;
use tracing::{error, warn};

use crate::types::ErrorResponse;

/// Handler error mapped onto an HTTP response with a `{"detail": ...}` body
#[derive(Debug)]
pub struct ApiError(pub AiEngineError);

impl ApiError {
    /// Log a failure with its endpoint before it is surfaced
    pub fn logged(endpoint: &str, err: AiEngineError) -> Self {
        if err.is_invalid_input() {
            warn!(endpoint, "Rejected request: {}", err);
        } else {
            error!(endpoint, error = ?err, "Request failed: {}", err);
        }
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AiEngineError> for ApiError {
    fn from(err: AiEngineError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.0.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError(AiEngineError::invalid_input("Text content is empty."));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ApiError(AiEngineError::model("connection refused"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
