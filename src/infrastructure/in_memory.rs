use crate::domain::config::CommissionConfig;
use crate::domain::ports::ConfigSource;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory holder for the commission configuration.
///
/// Uses `Arc<RwLock<CommissionConfig>>` so a host can swap the configuration
/// while other tasks keep loading snapshots. Each `load` returns an owned copy;
/// evaluations already running against an older snapshot are unaffected.
#[derive(Default, Clone)]
pub struct InMemoryConfigSource {
    config: Arc<RwLock<CommissionConfig>>,
}

impl InMemoryConfigSource {
    /// Creates a source serving `config`.
    pub fn new(config: CommissionConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Replaces the configuration served by subsequent loads.
    pub async fn replace(&self, config: CommissionConfig) {
        let mut current = self.config.write().await;
        *current = config;
    }
}

#[async_trait]
impl ConfigSource for InMemoryConfigSource {
    async fn load(&self) -> Result<CommissionConfig> {
        let config = self.config.read().await;
        Ok(config.clone())
    }
}
