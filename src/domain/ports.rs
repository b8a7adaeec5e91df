use super::config::CommissionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Supplies the commission configuration to the host application.
///
/// Loading may touch the filesystem; evaluation never does.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn load(&self) -> Result<CommissionConfig>;
}

pub type ConfigSourceBox = Box<dyn ConfigSource>;
pub type ConfigSourceFactory = Box<dyn Fn() -> ConfigSourceBox + Send + Sync>;
