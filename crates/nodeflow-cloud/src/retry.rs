//! Retrying HTTP executor
//!
//! Executes a single provider call, classifies the response and retries
//! transient failures with exponential backoff. Every outcome is returned as
//! a [`VerificationResult`]; nothing here returns `Err`.

use crate::redact::redact_headers;
use crate::transport::{HttpMethod, HttpRequest, HttpTransport, RequestOptions, TransportError};
use crate::verification::VerificationResult;
use std::time::Duration;
use tokio::time::sleep;

/// Statuses treated as transient
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Extracts the provider's human readable error from a failure body
pub type ErrorExtractor = fn(&serde_json::Value) -> Option<String>;

pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Fixed status → message table shared by every provider
pub fn status_message(status: u16) -> String {
    match status {
        401 => "Invalid credentials".to_string(),
        403 => "Insufficient permissions".to_string(),
        404 => "Resource not found".to_string(),
        429 => "Rate limited by provider".to_string(),
        500 | 502 | 503 | 504 => "Provider is experiencing issues".to_string(),
        _ => format!("Request failed with status {}", status),
    }
}

/// Retry configuration for provider calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Delay before the first retry, doubled for each following one
    pub base_delay_ms: u64,

    /// Upper bound for a single delay
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 1000,
            max_delay_ms: 10_000,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms,
            ..Self::default()
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay after the given 1-based attempt failed
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32);
        let delay = self
            .base_delay_ms
            .saturating_mul(1u64 << exponent)
            .min(self.max_delay_ms);
        Duration::from_millis(delay)
    }
}

/// Runs provider requests under a [`RetryPolicy`]
pub struct RetryExecutor<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: HttpTransport> RetryExecutor<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
        extract_error: ErrorExtractor,
    ) -> VerificationResult {
        let request = HttpRequest {
            method,
            url: url.to_string(),
            options,
        };
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 1;

        loop {
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                attempt,
                max_attempts,
                headers = ?redact_headers(&request.options.headers),
                "Sending provider request"
            );

            match self.transport.send(&request).await {
                Ok(response) if response.is_success() => {
                    tracing::info!(
                        url = %request.url,
                        status = response.status,
                        attempt,
                        "Provider request succeeded"
                    );
                    return VerificationResult::success("Request succeeded")
                        .with_raw_response(response.document())
                        .with_attempts(attempt);
                }
                Ok(response) => {
                    let status = response.status;
                    let raw = response.document();
                    let provider_message = raw.as_ref().and_then(extract_error);

                    if is_retryable_status(status) && attempt < max_attempts {
                        let delay = self.policy.delay(attempt);
                        tracing::warn!(
                            url = %request.url,
                            status,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "Transient provider error, retrying"
                        );
                        sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    tracing::warn!(
                        url = %request.url,
                        status,
                        attempt,
                        provider_message = provider_message.as_deref().unwrap_or(""),
                        "Provider request failed"
                    );
                    return VerificationResult::failure(status_message(status))
                        .with_status(status)
                        .with_provider_message(provider_message)
                        .with_raw_response(raw)
                        .with_attempts(attempt);
                }
                Err(TransportError::Network(detail)) => {
                    if attempt < max_attempts {
                        let delay = self.policy.delay(attempt);
                        tracing::warn!(
                            url = %request.url,
                            attempt,
                            error = %detail,
                            delay_ms = delay.as_millis() as u64,
                            "Network error, retrying"
                        );
                        sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    tracing::warn!(
                        url = %request.url,
                        attempt,
                        error = %detail,
                        "Network error, giving up"
                    );
                    return VerificationResult::failure("Network error")
                        .with_error("network", detail)
                        .with_attempts(attempt);
                }
                Err(TransportError::Other(detail)) => {
                    tracing::error!(
                        url = %request.url,
                        attempt,
                        error = %detail,
                        "Unexpected error during provider request"
                    );
                    return VerificationResult::failure("Unexpected error while contacting provider")
                        .with_error("unexpected", detail)
                        .with_attempts(attempt);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use crate::transport::HttpResponse;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    fn no_extract(_: &serde_json::Value) -> Option<String> {
        None
    }

    fn message_extract(body: &serde_json::Value) -> Option<String> {
        body.get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
    }

    fn fast_executor(script: ScriptedTransport) -> RetryExecutor<ScriptedTransport> {
        RetryExecutor::new(script, RetryPolicy::new(2, 1))
    }

    /// Backoff doubles per attempt and stops at the cap
    #[test]
    fn test_delay_calculation() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay(1), Duration::from_millis(1000));
        assert_eq!(policy.delay(2), Duration::from_millis(2000));
        assert_eq!(policy.delay(3), Duration::from_millis(4000));
        assert_eq!(policy.delay(4), Duration::from_millis(8000));
        assert_eq!(policy.delay(5), Duration::from_millis(10000)); // capped
        assert_eq!(policy.delay(64), Duration::from_millis(10000));
    }

    /// Each status maps to its user message and retry class
    #[test]
    fn test_status_table() {
        assert_eq!(status_message(401), "Invalid credentials");
        assert_eq!(status_message(403), "Insufficient permissions");
        assert_eq!(status_message(404), "Resource not found");
        assert_eq!(status_message(429), "Rate limited by provider");
        assert_eq!(status_message(502), "Provider is experiencing issues");
        assert_eq!(status_message(418), "Request failed with status 418");
    }

    /// Two 429s then a 200 succeed on the third attempt
    #[tokio::test]
    async fn test_rate_limited_then_success() {
        let executor = fast_executor(ScriptedTransport::new(vec![
            Ok(HttpResponse::new(429, "")),
            Ok(HttpResponse::new(429, "")),
            Ok(HttpResponse::new(200, r#"{"servers":[]}"#)),
        ]));

        let result = executor
            .execute(HttpMethod::Get, "https://api.test/servers", RequestOptions::new(), no_extract)
            .await;

        assert!(result.is_success());
        assert_eq!(result.attempt_count(), 3);
        assert_eq!(result.raw_response(), Some(&serde_json::json!({"servers": []})));
        assert_eq!(executor.transport().request_count(), 3);
    }

    /// Repeated 503s return the last failure after every attempt
    #[tokio::test]
    async fn test_retries_exhausted() {
        let executor = fast_executor(ScriptedTransport::new(vec![
            Ok(HttpResponse::new(503, "")),
            Ok(HttpResponse::new(503, "")),
            Ok(HttpResponse::new(503, r#"{"message":"maintenance"}"#)),
        ]));

        let result = executor
            .execute(
                HttpMethod::Get,
                "https://api.test/servers",
                RequestOptions::new(),
                message_extract,
            )
            .await;

        assert!(!result.is_success());
        assert_eq!(result.attempt_count(), 3);
        assert_eq!(result.http_status_code(), Some(503));
        assert_eq!(result.provider_message(), Some("maintenance"));
        assert!(result.is_retryable());
        assert_eq!(executor.transport().request_count(), 3);
    }

    /// Retries wait out the backoff delays
    #[tokio::test(start_paused = true)]
    async fn test_backoff_timing() {
        let executor = RetryExecutor::new(
            ScriptedTransport::new(vec![
                Ok(HttpResponse::new(503, "")),
                Ok(HttpResponse::new(503, "")),
                Ok(HttpResponse::new(503, "")),
            ]),
            RetryPolicy::default(),
        );

        let start = tokio::time::Instant::now();
        executor
            .execute(HttpMethod::Get, "https://api.test/servers", RequestOptions::new(), no_extract)
            .await;

        // 1s + 2s of backoff
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_secs(4));
    }

    /// A 401 is returned without retrying
    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let executor = fast_executor(ScriptedTransport::new(vec![Ok(HttpResponse::new(
            401,
            r#"{"message":"unable to authenticate"}"#,
        ))]));

        let result = executor
            .execute(
                HttpMethod::Get,
                "https://api.test/servers",
                RequestOptions::new(),
                message_extract,
            )
            .await;

        assert!(!result.is_success());
        assert_eq!(result.attempt_count(), 1);
        assert_eq!(result.http_status_code(), Some(401));
        assert_eq!(result.message(), "Invalid credentials");
        assert_eq!(result.provider_message(), Some("unable to authenticate"));
        assert_eq!(executor.transport().request_count(), 1);
    }

    /// Network errors are retried, then reported as a network failure
    #[tokio::test]
    async fn test_network_error_retried_then_reported() {
        let executor = fast_executor(ScriptedTransport::new(vec![
            Err(TransportError::Network("connection refused".into())),
            Err(TransportError::Network("connection refused".into())),
            Err(TransportError::Network("dns failure".into())),
        ]));

        let result = executor
            .execute(HttpMethod::Get, "https://api.test/servers", RequestOptions::new(), no_extract)
            .await;

        assert!(!result.is_success());
        assert_eq!(result.message(), "Network error");
        assert_eq!(result.http_status_code(), None);
        assert_eq!(result.attempt_count(), 3);
        assert_eq!(
            result.errors().and_then(|e| e.get("network")).map(String::as_str),
            Some("dns failure")
        );
    }

    /// A network error followed by a 200 succeeds
    #[tokio::test]
    async fn test_network_error_recovers() {
        let executor = fast_executor(ScriptedTransport::new(vec![
            Err(TransportError::Network("timeout".into())),
            Ok(HttpResponse::new(200, "{}")),
        ]));

        let result = executor
            .execute(HttpMethod::Get, "https://api.test/servers", RequestOptions::new(), no_extract)
            .await;

        assert!(result.is_success());
        assert_eq!(result.attempt_count(), 2);
    }

    /// Unexpected transport errors fail immediately
    #[tokio::test]
    async fn test_unexpected_error_not_retried() {
        let executor = fast_executor(ScriptedTransport::new(vec![
            Err(TransportError::Other("invalid body".into())),
            Ok(HttpResponse::new(200, "{}")),
        ]));

        let result = executor
            .execute(HttpMethod::Get, "https://api.test/servers", RequestOptions::new(), no_extract)
            .await;

        assert!(!result.is_success());
        assert_eq!(result.attempt_count(), 1);
        assert_eq!(executor.transport().request_count(), 1);
    }

    /// With no retries configured only one attempt is made
    #[tokio::test]
    async fn test_zero_retries() {
        let executor = RetryExecutor::new(
            ScriptedTransport::new(vec![Ok(HttpResponse::new(429, ""))]),
            RetryPolicy::new(0, 1),
        );

        let result = executor
            .execute(HttpMethod::Get, "https://api.test/servers", RequestOptions::new(), no_extract)
            .await;

        assert_eq!(result.attempt_count(), 1);
        assert_eq!(result.http_status_code(), Some(429));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Request logs never contain the secret part of the token
    #[tokio::test]
    async fn test_logs_never_contain_token() {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let executor = fast_executor(ScriptedTransport::new(vec![
            Ok(HttpResponse::new(500, "")),
            Ok(HttpResponse::new(401, "")),
        ]));
        executor
            .execute(
                HttpMethod::Get,
                "https://api.test/servers",
                RequestOptions::bearer("abcdefgh12345678"),
                no_extract,
            )
            .await;

        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("abcdefgh"));
        assert!(!logs.contains("12345678"));
    }
}
