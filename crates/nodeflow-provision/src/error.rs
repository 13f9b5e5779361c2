//! Provisioning error types

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error(transparent)]
    Cloud(#[from] nodeflow_cloud::CloudError),

    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    #[error("Node {label} already exists in cluster {cluster_id}")]
    DuplicateNode { cluster_id: Uuid, label: String },

    #[error("Task queue error: {0}")]
    Queue(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
