use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use time::UtcOffset;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::constants::*;
use crate::error::{LedgerError, Result};
use crate::models::{LedgerDocument, StoredLedger};

/// Where ledger files live: a preferred mount (e.g. a persistent volume)
/// and a local fallback used when the mount is absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub preferred: PathBuf,
    pub fallback: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR, DEFAULT_FALLBACK_DATA_DIR)
    }
}

impl StorageConfig {
    pub fn new(preferred: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            preferred: preferred.into(),
            fallback: fallback.into(),
        }
    }

    /// Uses a single directory for both choices.
    pub fn single(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::new(dir.clone(), dir)
    }

    /// Picks the preferred directory when it exists, otherwise the fallback,
    /// and makes sure the chosen directory is there.
    pub async fn resolve(&self) -> PathBuf {
        let chosen = match tokio::fs::metadata(&self.preferred).await {
            Ok(meta) if meta.is_dir() => self.preferred.clone(),
            _ => self.fallback.clone(),
        };

        // A failure here resurfaces as a StorageWrite on the first mutation
        if let Err(e) = tokio::fs::create_dir_all(&chosen).await {
            warn!(dir = %chosen.display(), error = %e, "could not create data directory");
        }
        chosen
    }
}

pub fn ledger_file_name(user_id: i64) -> String {
    format!(
        "{}{}.{}",
        LEDGER_FILE_PREFIX, user_id, LEDGER_FILE_EXTENSION
    )
}

/// Per-user ledger file (`expenses_{id}.json`)
pub fn ledger_path(data_dir: &Path, user_id: i64) -> PathBuf {
    data_dir.join(ledger_file_name(user_id))
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}", file_name, suffix))
}

/// Reads a ledger document. Any failure yields an empty ledger; a file that
/// exists but does not decode is copied aside first. `offset` pins the dates
/// of legacy records that were stored without one.
pub async fn load_document(path: &Path, offset: UtcOffset) -> LedgerDocument {
    let contents = match tokio::fs::read(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no ledger file yet");
            return LedgerDocument::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read ledger, starting empty");
            return LedgerDocument::default();
        }
    };

    if contents.iter().all(u8::is_ascii_whitespace) {
        return LedgerDocument::default();
    }

    match serde_json::from_slice::<StoredLedger>(&contents) {
        Ok(stored) => stored.into_document(offset),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ledger file is not valid, starting empty");
            preserve_unreadable(path).await;
            LedgerDocument::default()
        }
    }
}

/// Keeps a copy of a file that failed to decode before the next save replaces it.
async fn preserve_unreadable(path: &Path) {
    let copy = sibling_path(path, CORRUPT_FILE_SUFFIX);
    if let Err(e) = tokio::fs::copy(path, &copy).await {
        warn!(path = %copy.display(), error = %e, "failed to keep copy of unreadable ledger");
    }
}

/// Replaces the document at `path` atomically: write a temporary sibling,
/// flush it to disk, then rename it over the target.
pub async fn write_document(path: &Path, document: &LedgerDocument) -> Result<()> {
    let data = serde_json::to_string_pretty(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| LedgerError::storage_write(path, e))?;
    }

    let tmp_path = sibling_path(path, &format!("{}.{}", Uuid::new_v4(), TMP_FILE_SUFFIX));

    let written = match write_synced(&tmp_path, data.as_bytes()).await {
        Ok(()) => tokio::fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(LedgerError::storage_write(path, e));
    }

    debug!(path = %path.display(), records = document.records.len(), "saved ledger");
    Ok(())
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}
