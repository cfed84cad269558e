//! Graceful shutdown handling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::client::PersistenceManager;

/// Tracks the shutdown request and performs cleanup. In-flight simulation
/// ticks always complete; only pending persistence work is cancelled.
pub struct ShutdownManager {
    shutdown_requested: Arc<AtomicBool>,
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        tracing::info!("shutdown requested");
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    /// Cancels pending persistence operations en masse.
    pub fn cleanup(&self, persistence: &mut PersistenceManager) {
        tracing::info!("cancelling pending persistence operations");
        persistence.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_flag_round_trip() {
        let manager = ShutdownManager::new();
        assert!(!manager.is_shutdown_requested());
        manager.request_shutdown();
        assert!(manager.is_shutdown_requested());
    }
}
