//! Cluster request validation
//!
//! Owns the business rules the topology generator relies on but does not
//! check itself: minimum node counts and catalog membership.

use crate::catalog;
use crate::error::{CloudError, Result};
use crate::provider::ProviderType;
use crate::topology::{ClusterTopologyRequest, slugify};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const MIN_WORKERS: u32 = 3;
pub const MIN_STORAGE: u32 = 3;

/// Field → message map of rejected input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", joined.join("; "))
    }
}

/// What an operator asks for when creating a cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterRequest {
    pub name: String,
    pub provider: ProviderType,
    pub region: String,
    pub server_type_id: String,
    pub worker_count: u32,
    #[serde(default)]
    pub storage_count: u32,
    #[serde(default)]
    pub shared_storage_worker: bool,
}

/// Check every business rule, collecting all violations.
pub fn validate_cluster_request(
    request: &ClusterRequest,
) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if request.name.trim().is_empty() {
        errors.add("name", "Cluster name is required");
    } else if slugify(&request.name).is_empty() {
        errors.add("name", "Cluster name must contain letters or digits");
    }

    if catalog::catalog(request.provider).is_none() {
        errors.add(
            "provider",
            format!("{} has no region or server catalog", request.provider.display_name()),
        );
    } else {
        if !catalog::valid_region_slugs(request.provider).contains(&request.region.as_str()) {
            errors.add("region", format!("Unknown region: {}", request.region));
        }
        if !catalog::valid_server_type_ids(request.provider)
            .contains(&request.server_type_id.as_str())
        {
            errors.add(
                "server_type_id",
                format!("Unknown server type: {}", request.server_type_id),
            );
        }
    }

    if request.worker_count < MIN_WORKERS {
        errors.add(
            "worker_count",
            format!("At least {} worker nodes are required", MIN_WORKERS),
        );
    }

    if !request.shared_storage_worker && request.storage_count < MIN_STORAGE {
        errors.add(
            "storage_count",
            format!(
                "At least {} storage nodes are required unless workers share storage",
                MIN_STORAGE
            ),
        );
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

impl ClusterRequest {
    /// Validate and turn into generator input backed by the provider catalog
    pub fn into_topology_request(self) -> Result<ClusterTopologyRequest> {
        validate_cluster_request(&self).map_err(CloudError::Validation)?;

        Ok(ClusterTopologyRequest {
            worker_count: self.worker_count,
            storage_count: self.storage_count,
            shared_storage_worker: self.shared_storage_worker,
            cluster_slug: slugify(&self.name),
            provider_server_catalog: catalog::server_catalog(self.provider),
            server_type_id: self.server_type_id,
        })
    }
}
