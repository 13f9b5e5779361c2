//! Provider adapter trait definition

use crate::error::{CloudError, Result};
use crate::verification::VerificationResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compute providers known to NodeFlow.
///
/// Not every variant has an adapter; see the provider factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderType {
    Hetzner,
    DigitalOcean,
    Vultr,
    Aws,
}

impl ProviderType {
    pub const ALL: [ProviderType; 4] = [
        ProviderType::Hetzner,
        ProviderType::DigitalOcean,
        ProviderType::Vultr,
        ProviderType::Aws,
    ];

    /// Identifier used in config, vault keys and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Hetzner => "hetzner",
            ProviderType::DigitalOcean => "digitalocean",
            ProviderType::Vultr => "vultr",
            ProviderType::Aws => "aws",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderType::Hetzner => "Hetzner Cloud",
            ProviderType::DigitalOcean => "DigitalOcean",
            ProviderType::Vultr => "Vultr",
            ProviderType::Aws => "Amazon Web Services",
        }
    }
}

impl FromStr for ProviderType {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hetzner" | "hetzner-cloud" => Ok(ProviderType::Hetzner),
            "digitalocean" | "digital-ocean" | "do" => Ok(ProviderType::DigitalOcean),
            "vultr" => Ok(ProviderType::Vultr),
            "aws" => Ok(ProviderType::Aws),
            other => Err(CloudError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Background work an adapter wants done after verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CleanupJob {
    /// Delete an SSH key created while probing write access
    DeleteSshKey {
        provider: ProviderType,
        key_id: String,
    },
}

/// Provider adapter abstraction
///
/// Every provider proves a credential the same way: a read-access probe,
/// then a write-access probe only if the first one passed.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider_type(&self) -> ProviderType;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str {
        self.provider_type().display_name()
    }

    /// Verify the credential parts. Never fails; failures are results.
    async fn verify(&self, credential_parts: &[String]) -> VerificationResult;

    /// Throwaway artifacts to delete after a successful verification
    fn cleanup_jobs(&self, _result: &VerificationResult) -> Vec<CleanupJob> {
        Vec::new()
    }
}
