//! Background task queue boundary

use crate::error::Result;
use async_trait::async_trait;
use nodeflow_cloud::CleanupJob;
use tokio::sync::Mutex;

/// Fire-and-forget job submission
#[async_trait]
pub trait TaskQueue: Send + Sync {
    async fn enqueue(&self, job: CleanupJob) -> Result<()>;
}

/// Queue that only records submitted jobs
#[derive(Default)]
pub struct MemoryTaskQueue {
    jobs: Mutex<Vec<CleanupJob>>,
}

impl MemoryTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn jobs(&self) -> Vec<CleanupJob> {
        self.jobs.lock().await.clone()
    }
}

#[async_trait]
impl TaskQueue for MemoryTaskQueue {
    async fn enqueue(&self, job: CleanupJob) -> Result<()> {
        tracing::debug!(?job, "Queued cleanup job");
        self.jobs.lock().await.push(job);
        Ok(())
    }
}
