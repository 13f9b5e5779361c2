//! Provider onboarding
//!
//! Verifies a credential and only persists it once verification succeeded.
//! Users get a single generic message on failure; the detailed provider
//! response is logged server-side only.

use crate::error::Result;
use crate::factory::ProviderFactory;
use crate::queue::TaskQueue;
use crate::vault::{SecretStore, provider_key};
use nodeflow_cloud::{HttpTransport, ProviderAdapter, ProviderType, VerificationResult};
use std::sync::Arc;

pub const VERIFICATION_FAILED_MESSAGE: &str =
    "The provider credentials could not be verified. Please check your credentials and try again.";

/// Result of connecting or re-verifying a provider
#[derive(Debug, Clone)]
pub struct OnboardingOutcome {
    pub verified: bool,

    /// Safe to show to the user
    pub message: String,

    /// Vault key the credential was stored under, if it was stored
    pub vault_key: Option<String>,

    /// Full verification detail, for logs only
    pub result: VerificationResult,
}

pub struct ProviderOnboarding<T> {
    factory: ProviderFactory<T>,
    vault: Arc<dyn SecretStore>,
    queue: Option<Arc<dyn TaskQueue>>,
}

impl<T: HttpTransport + Clone + 'static> ProviderOnboarding<T> {
    pub fn new(factory: ProviderFactory<T>, vault: Arc<dyn SecretStore>) -> Self {
        Self {
            factory,
            vault,
            queue: None,
        }
    }

    pub fn with_queue(mut self, queue: Arc<dyn TaskQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Verify and, on success, store the credential for `provider_id`.
    ///
    /// Returns `Err` only for unimplemented providers or a vault failure.
    pub async fn connect(
        &self,
        provider_id: &str,
        provider: ProviderType,
        credential_parts: Vec<String>,
    ) -> Result<OnboardingOutcome> {
        let adapter = self.factory.create(provider)?;
        self.onboard(adapter.as_ref(), provider_id, credential_parts)
            .await
    }

    /// [`connect`](Self::connect) with an already built adapter
    pub async fn onboard(
        &self,
        adapter: &dyn ProviderAdapter,
        provider_id: &str,
        credential_parts: Vec<String>,
    ) -> Result<OnboardingOutcome> {
        let result = adapter.verify(&credential_parts).await;

        if !result.is_success() {
            return Ok(rejected(adapter, provider_id, result));
        }

        let key = provider_key(provider_id);
        self.vault
            .store(&key, serde_json::to_value(&credential_parts)?)
            .await?;

        for job in adapter.cleanup_jobs(&result) {
            if let Some(queue) = &self.queue {
                if let Err(e) = queue.enqueue(job).await {
                    tracing::warn!(provider_id, error = %e, "Failed to queue cleanup job");
                }
            }
        }

        tracing::info!(
            provider = %adapter.provider_type(),
            provider_id,
            attempts = result.attempt_count(),
            "Provider credentials verified and stored"
        );

        Ok(OnboardingOutcome {
            verified: true,
            message: format!("{} connected", adapter.display_name()),
            vault_key: Some(key),
            result,
        })
    }

    /// Read the stored credential back and verify it again
    pub async fn reverify(
        &self,
        provider_id: &str,
        provider: ProviderType,
    ) -> Result<OnboardingOutcome> {
        let stored = self.vault.read(&provider_key(provider_id)).await?;
        let credential_parts: Vec<String> = serde_json::from_value(stored)?;

        let adapter = self.factory.create(provider)?;
        let result = adapter.verify(&credential_parts).await;
        if !result.is_success() {
            return Ok(rejected(adapter.as_ref(), provider_id, result));
        }

        tracing::info!(
            provider = %provider,
            provider_id,
            "Stored provider credentials still valid"
        );
        Ok(OnboardingOutcome {
            verified: true,
            message: format!("{} credentials are valid", adapter.display_name()),
            vault_key: Some(provider_key(provider_id)),
            result,
        })
    }
}

fn rejected(
    adapter: &dyn ProviderAdapter,
    provider_id: &str,
    result: VerificationResult,
) -> OnboardingOutcome {
    tracing::warn!(
        provider = %adapter.provider_type(),
        provider_id,
        attempts = result.attempt_count(),
        detail = %result.detailed_message(),
        "Provider credential verification failed"
    );
    OnboardingOutcome {
        verified: false,
        message: VERIFICATION_FAILED_MESSAGE.to_string(),
        vault_key: None,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use crate::queue::MemoryTaskQueue;
    use crate::vault::MemoryVault;
    use async_trait::async_trait;
    use nodeflow_cloud::testing::ScriptedTransport;
    use nodeflow_cloud::{CleanupJob, RetryPolicy};

    fn onboarding(
        transport: Arc<ScriptedTransport>,
        vault: Arc<MemoryVault>,
    ) -> ProviderOnboarding<Arc<ScriptedTransport>> {
        ProviderOnboarding::new(ProviderFactory::new(transport, RetryPolicy::new(2, 1)), vault)
    }

    fn idle_onboarding() -> ProviderOnboarding<Arc<ScriptedTransport>> {
        onboarding(
            Arc::new(ScriptedTransport::default()),
            Arc::new(MemoryVault::new()),
        )
    }

    /// Verified credentials are stored under the provider key
    #[tokio::test]
    async fn test_verified_credentials_are_stored() {
        let transport = Arc::new(ScriptedTransport::responses(&[
            (200, r#"{"servers":[]}"#),
            (200, r#"{"ssh_keys":[]}"#),
        ]));
        let vault = Arc::new(MemoryVault::new());

        let outcome = onboarding(transport, vault.clone())
            .connect("42", ProviderType::Hetzner, vec!["token".to_string()])
            .await
            .unwrap();

        assert!(outcome.verified);
        assert_eq!(outcome.vault_key.as_deref(), Some("providers/42"));
        assert_eq!(
            vault.read("providers/42").await.unwrap(),
            serde_json::json!(["token"])
        );
    }

    /// Rejected credentials are not stored and users get the generic message
    #[tokio::test]
    async fn test_rejected_credentials_not_stored() {
        let transport = Arc::new(ScriptedTransport::responses(&[(
            401,
            r#"{"id":"unauthorized","message":"Unable to authenticate you."}"#,
        )]));
        let vault = Arc::new(MemoryVault::new());

        let outcome = onboarding(transport, vault.clone())
            .connect("7", ProviderType::DigitalOcean, vec!["bad".to_string()])
            .await
            .unwrap();

        assert!(!outcome.verified);
        assert_eq!(outcome.message, VERIFICATION_FAILED_MESSAGE);
        assert!(!outcome.message.contains("Unable to authenticate"));
        assert_eq!(
            outcome.result.provider_message(),
            Some("Unable to authenticate you.")
        );
        assert!(!vault.contains("providers/7").await);
    }

    /// Onboarding a provider without an adapter is an error
    #[tokio::test]
    async fn test_unimplemented_provider_is_an_error() {
        let outcome = idle_onboarding()
            .connect("1", ProviderType::Aws, vec!["token".to_string()])
            .await;

        assert!(matches!(outcome, Err(ProvisionError::Cloud(_))));
    }

    /// Re-verification uses the stored token
    #[tokio::test]
    async fn test_reverify_reads_vault() {
        let transport = Arc::new(ScriptedTransport::responses(&[(200, "{}"), (200, "{}")]));
        let vault = Arc::new(MemoryVault::new());
        vault
            .store("providers/9", serde_json::json!(["stored-token"]))
            .await
            .unwrap();

        let outcome = onboarding(transport.clone(), vault)
            .reverify("9", ProviderType::Hetzner)
            .await
            .unwrap();

        assert!(outcome.verified);
        let auth = transport.requests()[0]
            .options
            .headers
            .iter()
            .find(|(name, _)| name == "Authorization")
            .map(|(_, value)| value.clone());
        assert_eq!(auth.as_deref(), Some("Bearer stored-token"));
    }

    /// Re-verifying without a stored secret is an error
    #[tokio::test]
    async fn test_reverify_missing_secret() {
        let outcome = idle_onboarding()
            .reverify("404", ProviderType::Hetzner)
            .await;

        assert!(matches!(outcome, Err(ProvisionError::SecretNotFound(_))));
    }

    /// A stored secret that is not a token list is a JSON error
    #[tokio::test]
    async fn test_reverify_malformed_secret() {
        let vault = Arc::new(MemoryVault::new());
        vault
            .store("providers/5", serde_json::json!({"token": "not-a-list"}))
            .await
            .unwrap();
        let transport = Arc::new(ScriptedTransport::default());

        let outcome = onboarding(transport.clone(), vault)
            .reverify("5", ProviderType::Hetzner)
            .await;

        assert!(matches!(outcome, Err(ProvisionError::Json(_))));
        assert_eq!(transport.request_count(), 0);
    }

    struct ArtifactAdapter;

    #[async_trait]
    impl ProviderAdapter for ArtifactAdapter {
        fn provider_type(&self) -> ProviderType {
            ProviderType::Hetzner
        }

        async fn verify(&self, _credential_parts: &[String]) -> VerificationResult {
            VerificationResult::success("ok")
        }

        fn cleanup_jobs(&self, _result: &VerificationResult) -> Vec<CleanupJob> {
            vec![CleanupJob::DeleteSshKey {
                provider: ProviderType::Hetzner,
                key_id: "123".to_string(),
            }]
        }
    }

    struct BrokenQueue;

    #[async_trait]
    impl TaskQueue for BrokenQueue {
        async fn enqueue(&self, _job: CleanupJob) -> Result<()> {
            Err(ProvisionError::Queue("queue unavailable".to_string()))
        }
    }

    /// Adapter cleanup jobs are queued after success
    #[tokio::test]
    async fn test_cleanup_jobs_queued() {
        let queue = Arc::new(MemoryTaskQueue::new());
        let service = idle_onboarding()
            .with_queue(queue.clone());

        let outcome = service
            .onboard(&ArtifactAdapter, "1", vec!["token".to_string()])
            .await
            .unwrap();

        assert!(outcome.verified);
        assert_eq!(queue.jobs().await.len(), 1);
    }

    /// A queue failure does not change the outcome
    #[tokio::test]
    async fn test_queue_failure_does_not_change_result() {
        let service = idle_onboarding()
            .with_queue(Arc::new(BrokenQueue));

        let outcome = service
            .onboard(&ArtifactAdapter, "1", vec!["token".to_string()])
            .await
            .unwrap();

        assert!(outcome.verified);
        assert_eq!(outcome.vault_key.as_deref(), Some("providers/1"));
    }
}
