//! Error types for the library layer.

use std::fmt;

use crate::validation::FieldErrors;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding form validation, input coercion and configuration failures.
#[derive(Debug)]
pub enum SchoolError {
    /// An error from the underlying API client.
    Api(schoolroll_api::Error),
    /// A draft failed its rule table. Never reaches the network.
    Validation(FieldErrors),
    /// User-provided input could not be applied (unknown field, bad number).
    InvalidInput(String),
    /// Environment configuration is unusable.
    Config(String),
}

impl SchoolError {
    /// Message to show the user for a failed backend call: the backend's own
    /// `message` when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(e) => e.backend_message().unwrap_or(fallback).to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => match e.backend_message() {
                Some(msg) => write!(f, "API error: {}: {}", e, msg),
                None => write!(f, "API error: {}", e),
            },
            Self::Validation(errors) => write!(f, "Validation failed: {}", errors),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SchoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<schoolroll_api::Error> for SchoolError {
    fn from(e: schoolroll_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<FieldErrors> for SchoolError {
    fn from(e: FieldErrors) -> Self {
        Self::Validation(e)
    }
}
