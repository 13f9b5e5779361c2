//! DigitalOcean provider implementation

use async_trait::async_trait;
use nodeflow_cloud::{
    HttpTransport, ProbeSet, ProviderAdapter, ProviderType, RetryPolicy, TokenVerifier,
    VerificationResult,
};

pub const DIGITALOCEAN_API_BASE: &str = "https://api.digitalocean.com/v2";

/// DigitalOcean provider
pub struct DigitalOceanProvider<T> {
    verifier: TokenVerifier<T>,
}

impl<T: HttpTransport> DigitalOceanProvider<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self::with_base_url(transport, policy, DIGITALOCEAN_API_BASE)
    }

    pub fn with_base_url(transport: T, policy: RetryPolicy, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let probes = ProbeSet {
            read_url: format!("{}/droplets?per_page=1", base),
            write_url: format!("{}/account/keys?per_page=1", base),
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
impl<T: HttpTransport> ProviderAdapter for DigitalOceanProvider<T> {
    fn provider_type(&self) -> ProviderType {
        ProviderType::DigitalOcean
    }

    async fn verify(&self, credential_parts: &[String]) -> VerificationResult {
        tracing::debug!("Verifying DigitalOcean API token");
        self.verifier.verify(credential_parts).await
    }
}

/// DigitalOcean returns flat errors: `{"id": "unauthorized", "message": "..."}`
pub fn extract_error_message(body: &serde_json::Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("id"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
