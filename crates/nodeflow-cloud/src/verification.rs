//! Outcome of a credential verification

use crate::retry::is_retryable_status;
use serde::Serialize;
use std::collections::BTreeMap;

/// Immutable outcome of one verification attempt sequence.
///
/// A successful result never carries an HTTP status code or an error map.
/// Only `message` and `attempt_count` are meant for user-facing output; the
/// provider message and raw payload are for server-side logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationResult {
    success: bool,
    message: String,
    errors: Option<BTreeMap<String, String>>,
    http_status_code: Option<u16>,
    provider_message: Option<String>,
    raw_response: Option<serde_json::Value>,
    attempt_count: u32,
}

impl VerificationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
            http_status_code: None,
            provider_message: None,
            raw_response: None,
            attempt_count: 1,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
            http_status_code: None,
            provider_message: None,
            raw_response: None,
            attempt_count: 1,
        }
    }

    /// Attach an error entry. Ignored on successful results.
    pub fn with_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        if !self.success {
            self.errors
                .get_or_insert_with(BTreeMap::new)
                .insert(field.into(), message.into());
        }
        self
    }

    /// Attach the HTTP status code. Ignored on successful results.
    pub fn with_status(mut self, status: u16) -> Self {
        if !self.success {
            self.http_status_code = Some(status);
        }
        self
    }

    pub fn with_provider_message(mut self, message: Option<String>) -> Self {
        self.provider_message = message;
        self
    }

    pub fn with_raw_response(mut self, raw: Option<serde_json::Value>) -> Self {
        self.raw_response = raw;
        self
    }

    /// Set the attempt count, clamped to at least one.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempt_count = attempts.max(1);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> Option<&BTreeMap<String, String>> {
        self.errors.as_ref()
    }

    pub fn http_status_code(&self) -> Option<u16> {
        self.http_status_code
    }

    pub fn provider_message(&self) -> Option<&str> {
        self.provider_message.as_deref()
    }

    pub fn raw_response(&self) -> Option<&serde_json::Value> {
        self.raw_response.as_ref()
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Whether the failure was classified as transient by its HTTP status.
    pub fn is_retryable(&self) -> bool {
        !self.success && self.http_status_code.is_some_and(is_retryable_status)
    }

    /// Message enriched with the status code and provider message, for logs.
    pub fn detailed_message(&self) -> String {
        let mut detailed = self.message.clone();
        if let Some(status) = self.http_status_code {
            detailed.push_str(&format!(" (HTTP {})", status));
        }
        if let Some(provider_message) = self.provider_message.as_deref() {
            detailed.push_str(&format!(": {}", provider_message));
        }
        detailed
    }
}
