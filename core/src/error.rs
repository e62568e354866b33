//! Error types for the job board client.
//!
//! # Design
//! `NotFound` gets its own variant so logs tell a missing job apart from a
//! broken server. Every other non-2xx response lands in `HttpError` with
//! the raw status and body. Callers never show these to users directly;
//! every failure is logged and surfaces as the generic message from
//! `Operation::failure_message`.

use std::fmt;

use thiserror::Error;

/// Errors returned by `JobClient` build and parse methods, and by hosts
/// executing requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The host could not complete the round-trip (DNS, connect, read).
    #[error("transport failed: {0}")]
    Transport(String),

    /// Input was rejected before any request was built.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Field errors collected by client-side validation, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Message for `field`, if it was rejected.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub(crate) fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

/// User-facing operation, used to pick the generic failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadListings,
    LoadJob,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::LoadListings => "Failed to load job listings. Please try again later.",
            Operation::LoadJob => "Failed to load job. Please try again.",
            Operation::Create => "Failed to create job listing. Please try again.",
            Operation::Update => "Failed to save job. Please try again.",
            Operation::Delete => "Failed to delete job. Please try again.",
        }
    }
}
