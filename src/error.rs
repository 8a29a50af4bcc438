use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by ledger operations.
///
/// A missing record is not an error: `delete` reports it as `Ok(false)`.
/// Read failures while loading degrade to an empty ledger and never show up here.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Failed to write ledger {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn storage_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageWrite {
            path: path.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T, E = LedgerError> = std::result::Result<T, E>;
