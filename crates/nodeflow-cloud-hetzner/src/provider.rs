//! Hetzner Cloud provider implementation

use async_trait::async_trait;
use nodeflow_cloud::{
    HttpTransport, ProbeSet, ProviderAdapter, ProviderType, RetryPolicy, TokenVerifier,
    VerificationResult,
};

pub const HETZNER_API_BASE: &str = "https://api.hetzner.cloud/v1";

/// Hetzner Cloud provider
pub struct HetznerProvider<T> {
    verifier: TokenVerifier<T>,
}

impl<T: HttpTransport> HetznerProvider<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self::with_base_url(transport, policy, HETZNER_API_BASE)
    }

    pub fn with_base_url(transport: T, policy: RetryPolicy, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let probes = ProbeSet {
            read_url: format!("{}/servers?per_page=1", base),
            write_url: format!("{}/ssh_keys?per_page=1", base),
        };
        Self {
            verifier: TokenVerifier::new(transport, policy, probes, extract_error_message),
        }
    }

    pub fn transport(&self) -> &T {
        self.verifier.transport()
    }
}

#[async_trait]
impl<T: HttpTransport> ProviderAdapter for HetznerProvider<T> {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Hetzner
    }

    async fn verify(&self, credential_parts: &[String]) -> VerificationResult {
        tracing::debug!("Verifying Hetzner Cloud API token");
        self.verifier.verify(credential_parts).await
    }
}

/// Hetzner nests errors as `{"error": {"code": "...", "message": "..."}}`
pub fn extract_error_message(body: &serde_json::Value) -> Option<String> {
    let error = body.get("error")?;
    error
        .get("message")
        .or_else(|| error.get("code"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
