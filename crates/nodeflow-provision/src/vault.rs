//! Secret store boundary
//!
//! Accepted credentials are stored under deterministic keys and read back for
//! re-verification.

use crate::error::{ProvisionError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Key for a compute provider's credential parts
pub fn provider_key(provider_id: &str) -> String {
    format!("providers/{}", provider_id)
}

/// Key for a source-control integration's credential parts
pub fn source_code_key(provider_type: &str, id: &str) -> String {
    format!("source-code/{}/{}", provider_type, id)
}

#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn store(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Fails with [`ProvisionError::SecretNotFound`] for unknown keys
    async fn read(&self, key: &str) -> Result<serde_json::Value>;
}

/// Process-local secret store
#[derive(Default)]
pub struct MemoryVault {
    secrets: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.secrets.read().await.contains_key(key)
    }
}

#[async_trait]
impl SecretStore for MemoryVault {
    async fn store(&self, key: &str, value: serde_json::Value) -> Result<()> {
        self.secrets.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<serde_json::Value> {
        self.secrets
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| ProvisionError::SecretNotFound(key.to_string()))
    }
}
