//! Cluster creation
//!
//! validate → generate → one bulk insert.

use crate::error::Result;
use crate::store::NodeStore;
use nodeflow_cloud::topology;
use nodeflow_cloud::{ClusterRequest, NodeRecord};
use std::sync::Arc;
use uuid::Uuid;

/// Validate a request and generate its nodes without persisting them
pub fn plan(request: ClusterRequest) -> Result<Vec<NodeRecord>> {
    let topology_request = request.into_topology_request()?;
    Ok(topology::generate(&topology_request))
}

pub struct ClusterProvisioner {
    store: Arc<dyn NodeStore>,
}

impl ClusterProvisioner {
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Generate the node batch for a new cluster and persist it in one insert
    pub async fn create(
        &self,
        cluster_id: Uuid,
        request: ClusterRequest,
    ) -> Result<Vec<NodeRecord>> {
        let name = request.name.clone();
        let nodes = plan(request)?;

        self.store.bulk_insert(cluster_id, &nodes).await?;

        tracing::info!(%cluster_id, cluster = %name, nodes = nodes.len(), "Cluster nodes created");
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use crate::store::MemoryNodeStore;
    use nodeflow_cloud::{CloudError, NodeRole, ProviderType, ServerSpecs};

    fn request() -> ClusterRequest {
        ClusterRequest {
            name: "Demo".to_string(),
            provider: ProviderType::Hetzner,
            region: "nbg1".to_string(),
            server_type_id: "cx42".to_string(),
            worker_count: 5,
            storage_count: 0,
            shared_storage_worker: true,
        }
    }

    /// Creating a cluster stores every generated node
    #[tokio::test]
    async fn test_create_persists_batch() {
        let store = Arc::new(MemoryNodeStore::new());
        let provisioner = ClusterProvisioner::new(store.clone());
        let cluster_id = Uuid::new_v4();

        let nodes = provisioner.create(cluster_id, request()).await.unwrap();

        assert_eq!(nodes.len(), 5);
        assert!(nodes.iter().all(|n| n.role == NodeRole::Worker));
        assert!(nodes.iter().all(|n| n.specs() == ServerSpecs::new(8, 16, 160)));
        assert_eq!(nodes[0].node_label, "demo-worker-1");
        assert_eq!(store.nodes(cluster_id).await, nodes);
    }

    /// An invalid request stores nothing
    #[tokio::test]
    async fn test_invalid_request_persists_nothing() {
        let store = Arc::new(MemoryNodeStore::new());
        let provisioner = ClusterProvisioner::new(store.clone());
        let cluster_id = Uuid::new_v4();

        let result = provisioner
            .create(
                cluster_id,
                ClusterRequest {
                    shared_storage_worker: false,
                    ..request()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(ProvisionError::Cloud(CloudError::Validation(_)))
        ));
        assert!(store.nodes(cluster_id).await.is_empty());
    }

    /// Creating the same cluster twice is rejected and the first batch is kept
    #[tokio::test]
    async fn test_second_create_for_same_cluster_rejected() {
        let store = Arc::new(MemoryNodeStore::new());
        let provisioner = ClusterProvisioner::new(store.clone());
        let cluster_id = Uuid::new_v4();

        provisioner.create(cluster_id, request()).await.unwrap();
        let second = provisioner.create(cluster_id, request()).await;

        assert!(matches!(second, Err(ProvisionError::DuplicateNode { .. })));
        assert_eq!(store.nodes(cluster_id).await.len(), 5);
    }

    /// Planning without shared mode adds storage nodes after workers
    #[test]
    fn test_plan_storage_nodes() {
        let nodes = plan(ClusterRequest {
            shared_storage_worker: false,
            storage_count: 3,
            worker_count: 3,
            ..request()
        })
        .unwrap();

        assert_eq!(nodes.iter().filter(|n| n.role == NodeRole::Storage).count(), 3);
        assert_eq!(nodes.last().unwrap().node_label, "demo-storage-3");
    }
}
