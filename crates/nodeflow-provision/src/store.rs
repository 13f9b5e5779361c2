//! Node record persistence boundary

use crate::error::{ProvisionError, Result};
use async_trait::async_trait;
use nodeflow_cloud::NodeRecord;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Durable storage for generated nodes.
///
/// Implementations must insert a batch atomically and enforce uniqueness of
/// `(cluster_id, node_label)`.
#[async_trait]
pub trait NodeStore: Send + Sync {
    async fn bulk_insert(&self, cluster_id: Uuid, nodes: &[NodeRecord]) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryNodeStore {
    clusters: RwLock<HashMap<Uuid, Vec<NodeRecord>>>,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn nodes(&self, cluster_id: Uuid) -> Vec<NodeRecord> {
        self.clusters
            .read()
            .await
            .get(&cluster_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl NodeStore for MemoryNodeStore {
    async fn bulk_insert(&self, cluster_id: Uuid, nodes: &[NodeRecord]) -> Result<()> {
        let mut clusters = self.clusters.write().await;
        let existing = clusters.entry(cluster_id).or_default();

        let mut labels: HashSet<&str> = existing.iter().map(|n| n.node_label.as_str()).collect();
        for node in nodes {
            if !labels.insert(node.node_label.as_str()) {
                return Err(ProvisionError::DuplicateNode {
                    cluster_id,
                    label: node.node_label.clone(),
                });
            }
        }

        existing.extend_from_slice(nodes);
        Ok(())
    }
}
