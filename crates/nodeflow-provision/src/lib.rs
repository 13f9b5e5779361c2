//! NodeFlow provisioning services
//!
//! Wires the provider adapters to the collaborators around them:
//!
//! - [`factory`]: provider type → adapter
//! - [`onboarding`]: verify a credential, then store it in the vault
//! - [`cluster`]: validate a cluster request, generate nodes, bulk insert
//! - [`vault`], [`store`], [`queue`]: collaborator traits with in-memory
//!   implementations

pub mod cluster;
pub mod error;
pub mod factory;
pub mod onboarding;
pub mod queue;
pub mod store;
pub mod vault;

pub use cluster::ClusterProvisioner;
pub use error::{ProvisionError, Result};
pub use factory::{ProviderFactory, retry_policy};
pub use onboarding::{OnboardingOutcome, ProviderOnboarding, VERIFICATION_FAILED_MESSAGE};
pub use queue::{MemoryTaskQueue, TaskQueue};
pub use store::{MemoryNodeStore, NodeStore};
pub use vault::{MemoryVault, SecretStore};
