//! Process-wide load-once cache for the reference layer set.

use std::sync::Arc;

use tokio::sync::OnceCell;

use super::load_all;
use crate::config::Sources;
use crate::models::ReferenceLayerSet;

/// Owns the layer set for the process lifetime. Boundary datasets change
/// rarely, so the policy is load once, never invalidate; callers after the
/// first get the shared populated set.
#[derive(Default)]
pub struct LayerCache {
    cell: OnceCell<Arc<ReferenceLayerSet>>,
}

impl LayerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate on first call, reuse afterwards. The sedimentation opt-in
    /// is fixed by whichever call populates the cache.
    pub async fn get_or_load(
        &self,
        sources: &Sources,
        sedimentation_opt_in: bool,
    ) -> Arc<ReferenceLayerSet> {
        self.cell
            .get_or_init(|| async {
                Arc::new(load_all(sources, sedimentation_opt_in).await)
            })
            .await
            .clone()
    }

    /// Whether the cache has been populated.
    pub fn loaded(&self) -> bool {
        self.cell.initialized()
    }
}
