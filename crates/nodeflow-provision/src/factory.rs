//! Provider factory
//!
//! Closed mapping from [`ProviderType`] to an adapter. Adding a provider
//! means adding its catalog tables and an arm here.

use crate::error::Result;
use nodeflow_cloud::{CloudError, HttpTransport, ProviderAdapter, ProviderType, RetryPolicy};
use nodeflow_cloud_digitalocean::DigitalOceanProvider;
use nodeflow_cloud_hetzner::HetznerProvider;
use nodeflow_config::{ProviderEndpoints, RetrySettings, Settings};

/// Build a [`RetryPolicy`] from configured retry settings
pub fn retry_policy(settings: &RetrySettings) -> RetryPolicy {
    RetryPolicy {
        max_retries: settings.max_retries,
        base_delay_ms: settings.base_delay_ms,
        max_delay_ms: settings.max_delay_ms,
    }
}

/// Creates provider adapters sharing one transport and retry policy
pub struct ProviderFactory<T> {
    transport: T,
    policy: RetryPolicy,
    endpoints: ProviderEndpoints,
}

impl<T: HttpTransport + Clone + 'static> ProviderFactory<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            endpoints: ProviderEndpoints::default(),
        }
    }

    pub fn from_settings(transport: T, settings: &Settings) -> Self {
        Self {
            transport,
            policy: retry_policy(&settings.retry),
            endpoints: settings.providers.clone(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: ProviderEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn create(&self, provider: ProviderType) -> Result<Box<dyn ProviderAdapter>> {
        let transport = self.transport.clone();

        match provider {
            ProviderType::Hetzner => Ok(Box::new(match &self.endpoints.hetzner {
                Some(base) => HetznerProvider::with_base_url(transport, self.policy, base),
                None => HetznerProvider::new(transport, self.policy),
            })),
            ProviderType::DigitalOcean => Ok(Box::new(match &self.endpoints.digitalocean {
                Some(base) => DigitalOceanProvider::with_base_url(transport, self.policy, base),
                None => DigitalOceanProvider::new(transport, self.policy),
            })),
            ProviderType::Vultr | ProviderType::Aws => Err(CloudError::UnimplementedProvider(
                provider.display_name().to_string(),
            )
            .into()),
        }
    }

    /// Parse a provider identifier and create its adapter
    pub fn create_from_str(&self, provider: &str) -> Result<Box<dyn ProviderAdapter>> {
        self.create(provider.parse()?)
    }
}
