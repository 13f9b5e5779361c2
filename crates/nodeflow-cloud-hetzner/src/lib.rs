//! Hetzner Cloud provider for NodeFlow
//!
//! This crate implements the ProviderAdapter trait for Hetzner Cloud.
//!
//! # Verification
//!
//! - Read access: `GET /v1/servers`
//! - Write access: `GET /v1/ssh_keys` (requires a read & write API token)
//!
//! # Example
//!
//! ```ignore
//! use nodeflow_cloud::{ProviderAdapter, ReqwestTransport, RetryPolicy};
//! use nodeflow_cloud_hetzner::HetznerProvider;
//!
//! let transport = ReqwestTransport::new(Duration::from_secs(10), "nodeflow")?;
//! let provider = HetznerProvider::new(transport, RetryPolicy::default());
//!
//! let result = provider.verify(&[token]).await;
//! if !result.is_success() {
//!     eprintln!("{}", result.detailed_message());
//! }
//! ```

pub mod provider;

pub use provider::{HETZNER_API_BASE, HetznerProvider, extract_error_message};
