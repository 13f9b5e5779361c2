//! NodeFlow Cloud core
//!
//! This crate holds the provider-independent half of NodeFlow: proving that
//! a provider credential is good enough to trust, and turning a cluster
//! request into the node records to provision.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  NodeFlow CLI                    │
//! │           (nodeflow verify / topology)           │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               nodeflow-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   trait ProviderAdapter { verify(..) }   │   │
//! │  │   TokenVerifier → RetryExecutor          │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────────────┐     │
//! │  │   Catalog    │  │ Validation → Topology │     │
//! │  └──────────────┘  └──────────────────────┘     │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │    hetzner    │ │ digitalocean  │
//! │    adapter    │ │    adapter    │
//! └───────────────┘ └───────────────┘
//! ```

pub mod catalog;
pub mod error;
pub mod provider;
pub mod redact;
pub mod retry;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod topology;
pub mod transport;
pub mod validation;
pub mod verification;
pub mod verifier;

// Re-exports
pub use catalog::{ServerSpecs, ServerType};
pub use error::{CloudError, Result};
pub use provider::{CleanupJob, ProviderAdapter, ProviderType};
pub use retry::{ErrorExtractor, RetryExecutor, RetryPolicy};
pub use topology::{ClusterTopologyRequest, NodeRecord, NodeRole, NodeStatus};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestOptions, ReqwestTransport,
    TransportError,
};
pub use validation::{ClusterRequest, ValidationErrors};
pub use verification::VerificationResult;
pub use verifier::{ProbeSet, TokenVerifier};
