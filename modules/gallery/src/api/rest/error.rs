use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    ProblemResponse(
        Problem::new(status, title, detail)
            .with_type(format!("https://errors.gallery.local/{code}"))
            .with_code(code)
            .with_instance(instance),
    )
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::InvalidRequest { message } => from_parts(
            StatusCode::BAD_REQUEST,
            "GALLERY_INVALID_REQUEST",
            "Invalid request",
            message.clone(),
            instance,
        ),
        DomainError::Validation { message } => from_parts(
            StatusCode::UNPROCESSABLE_ENTITY,
            "GALLERY_VALIDATION",
            "Validation error",
            message.clone(),
            instance,
        ),
        DomainError::Timeout { after } => from_parts(
            StatusCode::SERVICE_UNAVAILABLE,
            "GALLERY_TIMEOUT",
            "Store timeout",
            format!("The store did not answer within {} ms", after.as_millis()),
            instance,
        ),
        DomainError::Database { .. } => {
            // Details stay in the logs.
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "GALLERY_INTERNAL",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}
