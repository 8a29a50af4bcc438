use std::path::{Path, PathBuf};

use pocket_ledger::models::{LedgerDocument, Record};
use pocket_ledger::{LedgerService, LedgerStore, StorageConfig, storage};
use tempfile::TempDir;
use time::UtcOffset;

pub struct TestConfig {
    // Held so the directory lives as long as the test
    _temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl TestConfig {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let data_path = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            data_path,
        })
    }

    #[allow(dead_code)]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub async fn open_store(&self, user_id: i64) -> LedgerStore {
        LedgerStore::open_with_offset(&self.data_path, user_id, UtcOffset::UTC).await
    }

    #[allow(dead_code)]
    pub fn service(&self) -> LedgerService {
        LedgerService::with_offset(StorageConfig::single(&self.data_path), UtcOffset::UTC)
    }

    #[allow(dead_code)]
    pub fn ledger_path(&self, user_id: i64) -> PathBuf {
        storage::ledger_path(&self.data_path, user_id)
    }

    /// Writes a ledger file directly, bypassing the store.
    #[allow(dead_code)]
    pub async fn seed(&self, user_id: i64, records: Vec<Record>) -> anyhow::Result<()> {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let document = LedgerDocument { next_id, records };
        storage::write_document(&self.ledger_path(user_id), &document).await?;
        Ok(())
    }
}

#[allow(dead_code)]
pub fn record(id: u64, date: &str, amount: f64, category: &str) -> Record {
    Record {
        id,
        date: date.to_string(),
        amount,
        category: category.to_string(),
        description: String::new(),
    }
}
