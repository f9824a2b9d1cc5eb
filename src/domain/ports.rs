use crate::domain::model::GraphSnapshot;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Backing store the engine loads its graph from on `open` and writes it
/// back to on `flush`/`close`.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Returns an empty snapshot when nothing has been persisted yet.
    async fn load(&self) -> Result<GraphSnapshot>;
    async fn save(&self, snapshot: &GraphSnapshot) -> Result<()>;
}
