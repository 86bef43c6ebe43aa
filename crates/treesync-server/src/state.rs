use std::sync::Arc;

use tokio::sync::RwLock;
use treesync_core::SyncTree;

/// Shared application state.
///
/// A single `RwLock` around the whole tree gives readers and writers a
/// clean ordering guarantee: the write side is held across `add_node`,
/// payload mutation, and `refresh_tree`, so a query only ever observes a
/// fully pre-refresh or fully post-refresh tree, never a half-refreshed
/// one.
#[derive(Clone)]
pub struct AppState {
    pub tree: Arc<RwLock<SyncTree>>,
}

impl AppState {
    pub fn new(tree: SyncTree) -> Self {
        Self {
            tree: Arc::new(RwLock::new(tree)),
        }
    }
}
