use time::UtcOffset;

use crate::error::Result;
use crate::ledger::{LedgerStore, local_offset};
use crate::models::{Period, Record, Summary};
use crate::storage::StorageConfig;
use crate::utils::validate_recent_limit;

/// User-keyed entry point for the chat layer.
///
/// Every call opens a fresh [`LedgerStore`] for the user, so the data
/// directory is resolved per call and no state is shared between users.
#[derive(Clone, Debug)]
pub struct LedgerService {
    storage: StorageConfig,
    offset: UtcOffset,
}

impl LedgerService {
    pub fn new(storage: StorageConfig) -> Self {
        Self::with_offset(storage, local_offset())
    }

    pub fn with_offset(storage: StorageConfig, offset: UtcOffset) -> Self {
        Self { storage, offset }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub async fn open(&self, user_id: i64) -> LedgerStore {
        let data_dir = self.storage.resolve().await;
        LedgerStore::open_with_offset(data_dir, user_id, self.offset).await
    }

    pub async fn add(
        &self,
        user_id: i64,
        amount: f64,
        category: &str,
        description: Option<&str>,
    ) -> Result<Record> {
        let mut store = self.open(user_id).await;
        store.add(amount, category, description).await
    }

    pub async fn summarize(&self, user_id: i64, period: Period) -> Summary {
        self.open(user_id).await.summarize(period)
    }

    /// Newest records first. A `limit` of zero asks for the default page;
    /// larger requests are capped.
    pub async fn list_recent(&self, user_id: i64, limit: usize) -> Vec<Record> {
        self.open(user_id)
            .await
            .list_recent(validate_recent_limit(limit))
    }

    pub async fn delete(&self, user_id: i64, id: u64) -> Result<bool> {
        let mut store = self.open(user_id).await;
        store.delete(id).await
    }
}
