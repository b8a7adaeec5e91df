//! Configuration sources: a JSON file on disk and a shared in-memory holder.

pub mod in_memory;
pub mod json_file;

use crate::domain::config::{CommissionConfig, ConfigIssue};
use crate::error::{EngineError, Result};
use tracing::warn;

/// Checks a freshly loaded configuration before it is handed out.
///
/// Missing sections are logged and kept. Invalid values are clamped, or reject
/// the load when `strict` is set.
pub(crate) fn admit(config: CommissionConfig, strict: bool) -> Result<CommissionConfig> {
    let (fatal, missing): (Vec<ConfigIssue>, Vec<ConfigIssue>) = config
        .validate()
        .into_iter()
        .partition(ConfigIssue::is_fatal);

    for issue in &missing {
        warn!(%issue, "Configuration section missing");
    }

    if fatal.is_empty() {
        Ok(config)
    } else if strict {
        Err(EngineError::InvalidConfig(fatal))
    } else {
        for issue in &fatal {
            warn!(%issue, "Tolerating invalid configuration value");
        }
        Ok(config.sanitize())
    }
}
