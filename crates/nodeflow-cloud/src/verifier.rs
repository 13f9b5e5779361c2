//! Two-step token verification shared by single-secret providers

use crate::retry::{ErrorExtractor, RetryExecutor, RetryPolicy};
use crate::transport::{HttpMethod, HttpTransport, RequestOptions};
use crate::verification::VerificationResult;

/// Endpoints probed to prove read and write access
#[derive(Debug, Clone)]
pub struct ProbeSet {
    /// Low-privilege listing, e.g. servers
    pub read_url: String,

    /// Higher-privilege listing, e.g. SSH keys
    pub write_url: String,
}

/// Verifies a single bearer token against a [`ProbeSet`].
///
/// The write probe is only issued once the read probe has succeeded.
pub struct TokenVerifier<T> {
    executor: RetryExecutor<T>,
    probes: ProbeSet,
    extract_error: ErrorExtractor,
}

impl<T: HttpTransport> TokenVerifier<T> {
    pub fn new(
        transport: T,
        policy: RetryPolicy,
        probes: ProbeSet,
        extract_error: ErrorExtractor,
    ) -> Self {
        Self {
            executor: RetryExecutor::new(transport, policy),
            probes,
            extract_error,
        }
    }

    pub fn probes(&self) -> &ProbeSet {
        &self.probes
    }

    pub fn transport(&self) -> &T {
        self.executor.transport()
    }

    pub async fn verify(&self, credential_parts: &[String]) -> VerificationResult {
        let token = match single_secret(credential_parts) {
            Some(token) => token,
            None => {
                tracing::debug!(parts = credential_parts.len(), "Rejected credential shape");
                return VerificationResult::failure("A single API token is required")
                    .with_error("token", "exactly one non-empty API token must be supplied");
            }
        };

        let read = self
            .executor
            .execute(
                HttpMethod::Get,
                &self.probes.read_url,
                RequestOptions::bearer(token),
                self.extract_error,
            )
            .await;
        if !read.is_success() {
            return read;
        }

        let write = self
            .executor
            .execute(
                HttpMethod::Get,
                &self.probes.write_url,
                RequestOptions::bearer(token),
                self.extract_error,
            )
            .await;
        if !write.is_success() {
            return write;
        }

        let attempts = read.attempt_count().max(write.attempt_count());
        let raw = serde_json::json!({
            "read_access": read.raw_response(),
            "write_access": write.raw_response(),
        });

        VerificationResult::success("Credential verified with read and write access")
            .with_raw_response(Some(raw))
            .with_attempts(attempts)
    }
}

fn single_secret(parts: &[String]) -> Option<&str> {
    match parts {
        [token] if !token.trim().is_empty() => Some(token.trim()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    fn extract(body: &serde_json::Value) -> Option<String> {
        body.get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
    }

    fn verifier(script: ScriptedTransport) -> TokenVerifier<ScriptedTransport> {
        TokenVerifier::new(
            script,
            RetryPolicy::new(2, 1),
            ProbeSet {
                read_url: "https://api.test/servers".to_string(),
                write_url: "https://api.test/keys".to_string(),
            },
            extract,
        )
    }

    /// Exactly one non-blank secret is accepted
    #[test]
    fn test_single_secret() {
        assert_eq!(single_secret(&["tok".to_string()]), Some("tok"));
        assert_eq!(single_secret(&[]), None);
        assert_eq!(single_secret(&["  ".to_string()]), None);
        assert_eq!(single_secret(&["a".to_string(), "b".to_string()]), None);
    }

    /// A malformed credential fails without a request
    #[tokio::test]
    async fn test_invalid_shape_makes_no_requests() {
        let verifier = verifier(ScriptedTransport::default());

        for parts in [vec![], vec![String::new()], vec!["a".into(), "b".into()]] {
            let result = verifier.verify(&parts).await;
            assert!(!result.is_success());
            assert!(result.errors().unwrap().contains_key("token"));
        }
        assert_eq!(verifier.transport().request_count(), 0);
    }

    /// A read failure is returned as is and the write probe is skipped
    #[tokio::test]
    async fn test_read_failure_skips_write_probe() {
        let verifier = verifier(ScriptedTransport::responses(&[(
            403,
            r#"{"message":"forbidden"}"#,
        )]));

        let result = verifier.verify(&["token".to_string()]).await;

        assert!(!result.is_success());
        assert_eq!(result.http_status_code(), Some(403));
        assert_eq!(result.provider_message(), Some("forbidden"));
        assert_eq!(verifier.transport().requested_urls(), vec!["https://api.test/servers"]);
    }

    /// A write probe failure is returned as is
    #[tokio::test]
    async fn test_write_failure_returned() {
        let verifier = verifier(ScriptedTransport::responses(&[
            (200, "{}"),
            (401, r#"{"message":"read only token"}"#),
        ]));

        let result = verifier.verify(&["token".to_string()]).await;

        assert!(!result.is_success());
        assert_eq!(result.http_status_code(), Some(401));
        assert_eq!(verifier.transport().request_count(), 2);
    }

    /// Success combines both payloads and reports the larger attempt count
    #[tokio::test]
    async fn test_combined_success() {
        let verifier = verifier(ScriptedTransport::responses(&[
            (200, r#"{"servers":[]}"#),
            (429, ""),
            (200, r#"{"keys":[]}"#),
        ]));

        let result = verifier.verify(&["token".to_string()]).await;

        assert!(result.is_success());
        assert_eq!(result.attempt_count(), 2);
        assert_eq!(
            result.raw_response(),
            Some(&serde_json::json!({
                "read_access": {"servers": []},
                "write_access": {"keys": []},
            }))
        );

        let requests = verifier.transport().requests();
        let auth = requests[0]
            .options
            .headers
            .iter()
            .find(|(name, _)| name == "Authorization")
            .map(|(_, value)| value.as_str());
        assert_eq!(auth, Some("Bearer token"));
    }
}
