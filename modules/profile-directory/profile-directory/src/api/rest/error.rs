use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ValidationViolation};
use crate::domain::error::DomainError;

/// Static description of one kind of HTTP error.
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: StatusCode,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(self.status, self.title, detail)
            .with_code(self.code)
            .with_type(self.type_url)
    }

    pub fn with_context(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        let mut p = self.as_problem(detail).with_instance(instance);
        if let Some(tid) = trace_id {
            p = p.with_trace_id(tid);
        }
        p
    }
}

/// Error catalog of the profile directory.
pub struct ErrorCode;

impl ErrorCode {
    pub const VALIDATION: ErrDef = ErrDef {
        status: StatusCode::BAD_REQUEST,
        title: "Validation Failed",
        code: "profile_directory.validation",
        type_url: "urn:profile-directory:error:validation",
    };

    pub const INVALID_ID: ErrDef = ErrDef {
        status: StatusCode::BAD_REQUEST,
        title: "Bad Request",
        code: "profile_directory.invalid_id",
        type_url: "urn:profile-directory:error:invalid_id",
    };

    pub const MALFORMED_BODY: ErrDef = ErrDef {
        status: StatusCode::BAD_REQUEST,
        title: "Bad Request",
        code: "profile_directory.malformed_body",
        type_url: "urn:profile-directory:error:malformed_body",
    };

    pub const PROFILE_NOT_FOUND: ErrDef = ErrDef {
        status: StatusCode::NOT_FOUND,
        title: "Not Found",
        code: "profile_directory.profile_not_found",
        type_url: "urn:profile-directory:error:profile_not_found",
    };

    pub const USERNAME_TAKEN: ErrDef = ErrDef {
        status: StatusCode::CONFLICT,
        title: "Conflict",
        code: "profile_directory.username_taken",
        type_url: "urn:profile-directory:error:username_taken",
    };

    pub const INTERNAL: ErrDef = ErrDef {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        title: "Internal Server Error",
        code: "profile_directory.internal",
        type_url: "urn:profile-directory:error:internal",
    };
}

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

/// Map domain error to RFC9457 Problem using the catalog
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = current_trace_id();

    match e {
        DomainError::Validation { violations } => ErrorCode::VALIDATION
            .with_context(e.to_string(), instance, trace_id)
            .with_errors(
                violations
                    .iter()
                    .map(|v| ValidationViolation {
                        field: v.field.clone(),
                        message: v.message.clone(),
                    })
                    .collect(),
            ),
        DomainError::ProfileNotFound { .. } => {
            ErrorCode::PROFILE_NOT_FOUND.with_context(e.to_string(), instance, trace_id)
        }
        DomainError::UsernameTaken { .. } => {
            ErrorCode::USERNAME_TAKEN.with_context(e.to_string(), instance, trace_id)
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            ErrorCode::INTERNAL.with_context(
                "An internal database error occurred",
                instance,
                trace_id,
            )
        }
        DomainError::Internal { .. } => {
            tracing::error!(error = ?e, "Internal error occurred");
            ErrorCode::INTERNAL.with_context("An internal error occurred", instance, trace_id)
        }
    }
}

pub fn invalid_id_problem(raw: &str, instance: &str) -> Problem {
    tracing::debug!(raw_id = raw, "Rejecting non-numeric profile id");
    ErrorCode::INVALID_ID.with_context("Invalid profile ID", instance, current_trace_id())
}

pub fn malformed_body_problem(rejection: &JsonRejection, instance: &str) -> Problem {
    ErrorCode::MALFORMED_BODY.with_context(rejection.body_text(), instance, current_trace_id())
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
