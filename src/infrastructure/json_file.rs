use super::admit;
use crate::domain::config::CommissionConfig;
use crate::domain::ports::ConfigSource;
use crate::error::Result;
use crate::interfaces::json::config_document::ConfigDocument;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Loads the commission configuration from a JSON document on disk.
///
/// The file is read on every `load`, so edits are picked up by the next call.
/// Non-numeric values fail the load. Negative rates are clamped to zero unless
/// the source is strict, in which case they fail the load as well.
#[derive(Debug, Clone)]
pub struct JsonFileConfigSource {
    path: PathBuf,
    strict: bool,
}

impl JsonFileConfigSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            strict: false,
        }
    }

    /// Rejects configurations with invalid values instead of clamping them.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[async_trait]
impl ConfigSource for JsonFileConfigSource {
    async fn load(&self) -> Result<CommissionConfig> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let config: CommissionConfig = ConfigDocument::from_json(&raw)?.into();
        info!(path = %self.path.display(), "Loaded commission configuration");
        admit(config, self.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Rate;
    use crate::error::EngineError;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn document(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{body}").unwrap();
        file
    }

    #[tokio::test]
    async fn test_loads_document_from_disk() {
        let file = document(
            r#"{ "AFFILIATE_SYSTEM": { "COMMISSION_TIERS": [{ "level": 0, "rate": 0.1 }] } }"#,
        );

        let config = JsonFileConfigSource::new(file.path()).load().await.unwrap();
        let tiers = config.commission_tiers.unwrap();
        assert_eq!(tiers[0].rate, Rate::new(dec!(0.1)));
    }

    #[tokio::test]
    async fn test_negative_rate_clamped_by_default() {
        let file = document(r#"{ "AFFILIATE_SYSTEM": { "PERMANENT_LOYALTY_BONUS": { "RATE": -0.05 } } }"#);

        let config = JsonFileConfigSource::new(file.path()).load().await.unwrap();
        assert_eq!(config.loyalty_bonus_rate, Some(Rate::ZERO));
    }

    #[tokio::test]
    async fn test_negative_rate_rejected_when_strict() {
        let file = document(r#"{ "AFFILIATE_SYSTEM": { "PERMANENT_LOYALTY_BONUS": { "RATE": -0.05 } } }"#);

        let result = JsonFileConfigSource::new(file.path())
            .strict(true)
            .load()
            .await;
        match result {
            Err(EngineError::InvalidConfig(issues)) => assert_eq!(issues.len(), 1),
            other => panic!("expected invalid configuration, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_sections_pass_strict_load() {
        let file = document("{}");

        let config = JsonFileConfigSource::new(file.path())
            .strict(true)
            .load()
            .await
            .unwrap();
        assert_eq!(config, CommissionConfig::default());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = JsonFileConfigSource::new("does/not/exist.json").load().await;
        assert!(matches!(result, Err(EngineError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let file = document("{ not json");
        let result = JsonFileConfigSource::new(file.path()).load().await;
        assert!(matches!(result, Err(EngineError::ConfigParse(_))));
    }
}
