//! Cloud provider error types
//!
//! Expected verification outcomes are never errors; they are carried by
//! [`VerificationResult`](crate::VerificationResult). These variants cover
//! programmer errors and the validation stage.

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Provider not implemented: {0}")]
    UnimplementedProvider(String),

    #[error("Unknown provider type: {0}")]
    UnknownProvider(String),

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("Invalid request: {0}")]
    Validation(ValidationErrors),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
