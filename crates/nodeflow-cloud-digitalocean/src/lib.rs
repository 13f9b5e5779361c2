//! DigitalOcean provider for NodeFlow
//!
//! This crate implements the ProviderAdapter trait for DigitalOcean.
//!
//! # Verification
//!
//! - Read access: `GET /v2/droplets`
//! - Write access: `GET /v2/account/keys` (needs a token with write scope)
//!
//! # Example
//!
//! ```ignore
//! use nodeflow_cloud::{ProviderAdapter, ReqwestTransport, RetryPolicy};
//! use nodeflow_cloud_digitalocean::DigitalOceanProvider;
//!
//! let transport = ReqwestTransport::new(Duration::from_secs(10), "nodeflow")?;
//! let provider = DigitalOceanProvider::new(transport, RetryPolicy::default());
//! let result = provider.verify(&[token]).await;
//! ```

pub mod provider;

pub use provider::{DIGITALOCEAN_API_BASE, DigitalOceanProvider, extract_error_message};
