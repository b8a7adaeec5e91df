use crate::domain::config::ConfigIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid configuration: {}", describe(.0))]
    InvalidConfig(Vec<ConfigIssue>),
}

fn describe(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, EngineError>;
