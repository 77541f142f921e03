//! Persistence factory for snapshots and the timeseries.

use std::sync::Arc;

use crate::adapter::outbound::store::FileSnapshotStore;
use crate::infrastructure::config::settings::Config;
use crate::port::SnapshotStore;

/// Filesystem store rooted at the configured paths.
pub fn build_snapshot_store(config: &Config) -> Arc<dyn SnapshotStore> {
    Arc::new(FileSnapshotStore::new(
        config.paths.snapshot_dir.clone(),
        config.paths.timeseries.clone(),
    ))
}
