//! Cluster topology generation
//!
//! Turns a small declarative request into the node records persisted for a
//! new cluster. The generator is a pure function over *already validated*
//! input: minimum node counts and catalog membership are enforced by
//! [`crate::validation`] before a request reaches this module, and must not
//! be re-checked here.

use crate::catalog::ServerSpecs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Operating system image installed on every generated node
pub const NODE_OS: &str = "ubuntu-24.04";

/// Specs used when the server type is missing from the catalog.
// Kept so node creation never hard-fails on an unrecognized type. This can
// hide validation bugs upstream; a warning is logged whenever it is used.
pub const DEFAULT_SPECS: ServerSpecs = ServerSpecs::new(2, 4, 40);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Worker,
    Storage,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Worker => write!(f, "worker"),
            NodeRole::Storage => write!(f, "storage"),
        }
    }
}

/// Lifecycle status of a node. Only `Pending` is produced here; the rest are
/// set by provisioning machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Pending,
    Provisioning,
    Running,
    Failed,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeStatus::Pending => write!(f, "pending"),
            NodeStatus::Provisioning => write!(f, "provisioning"),
            NodeStatus::Running => write!(f, "running"),
            NodeStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Input of [`generate`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterTopologyRequest {
    pub worker_count: u32,
    pub storage_count: u32,

    /// Workers double as storage nodes; `storage_count` is ignored
    pub shared_storage_worker: bool,
    pub server_type_id: String,
    pub cluster_slug: String,
    pub provider_server_catalog: HashMap<String, ServerSpecs>,
}

/// A node ready for bulk insertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: Uuid,

    /// `{cluster_slug}-{role}-{index}`, unique within the cluster
    pub node_label: String,
    pub role: NodeRole,
    pub status: NodeStatus,
    pub server_type_id: String,
    pub cpu_cores: u32,
    pub ram_gb: u32,
    pub disk_gb: u32,
    pub os: String,
    pub created_at: DateTime<Utc>,
}

impl NodeRecord {
    pub fn specs(&self) -> ServerSpecs {
        ServerSpecs::new(self.cpu_cores, self.ram_gb, self.disk_gb)
    }
}

/// Generate the node batch for a cluster: workers first, then storage nodes
/// unless workers share the storage role.
pub fn generate(request: &ClusterTopologyRequest) -> Vec<NodeRecord> {
    let specs = match request.provider_server_catalog.get(&request.server_type_id) {
        Some(specs) => *specs,
        None => {
            tracing::warn!(
                server_type = %request.server_type_id,
                "Unknown server type, falling back to default specs"
            );
            DEFAULT_SPECS
        }
    };

    let storage_count = if request.shared_storage_worker {
        0
    } else {
        request.storage_count
    };
    let created_at = Utc::now();

    let workers = (1..=request.worker_count).map(|index| (NodeRole::Worker, index));
    let storage = (1..=storage_count).map(|index| (NodeRole::Storage, index));

    let nodes: Vec<NodeRecord> = workers
        .chain(storage)
        .map(|(role, index)| NodeRecord {
            id: Uuid::new_v4(),
            node_label: node_label(&request.cluster_slug, role, index),
            role,
            status: NodeStatus::Pending,
            server_type_id: request.server_type_id.clone(),
            cpu_cores: specs.cpu,
            ram_gb: specs.ram_gb,
            disk_gb: specs.disk_gb,
            os: NODE_OS.to_string(),
            created_at,
        })
        .collect();

    tracing::debug!(
        cluster = %request.cluster_slug,
        nodes = nodes.len(),
        "Generated cluster topology"
    );
    nodes
}

pub fn node_label(cluster_slug: &str, role: NodeRole, index: u32) -> String {
    format!("{}-{}-{}", cluster_slug, role, index)
}

/// URL-safe slug of a cluster name: lowercase ASCII alphanumerics joined by
/// single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
