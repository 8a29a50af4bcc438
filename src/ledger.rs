use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tracing::info;

use crate::error::{LedgerError, Result};
use crate::models::{LedgerDocument, Period, Record, Summary};
use crate::storage;
use crate::summary::summarize_records;
use crate::utils::{validate_amount, validate_category, validate_description};

/// Offset of the process clock, or UTC when it cannot be determined.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// One user's ledger, loaded in full and written back in full after every change.
///
/// A store assumes it is the only writer for its user while it is alive.
#[derive(Debug)]
pub struct LedgerStore {
    user_id: i64,
    path: PathBuf,
    document: LedgerDocument,
    offset: UtcOffset,
}

impl LedgerStore {
    /// Opens the ledger for `user_id` under `data_dir`. A missing or unreadable
    /// file gives an empty ledger.
    pub async fn open(data_dir: impl AsRef<Path>, user_id: i64) -> Self {
        Self::open_with_offset(data_dir, user_id, local_offset()).await
    }

    /// Same as `open` with an explicit offset for new timestamps, calendar
    /// windows and legacy dates stored without one.
    pub async fn open_with_offset(
        data_dir: impl AsRef<Path>,
        user_id: i64,
        offset: UtcOffset,
    ) -> Self {
        let path = storage::ledger_path(data_dir.as_ref(), user_id);
        let document = storage::load_document(&path, offset).await;
        info!(
            user_id,
            records = document.records.len(),
            "loaded ledger"
        );

        Self {
            user_id,
            path,
            document,
            offset,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Record] {
        &self.document.records
    }

    pub fn len(&self) -> usize {
        self.document.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.records.is_empty()
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }

    /// Appends a record stamped with the current time and saves the ledger.
    pub async fn add(
        &mut self,
        amount: f64,
        category: &str,
        description: Option<&str>,
    ) -> Result<Record> {
        let category = category.trim();
        let description = description.map(str::trim).unwrap_or_default();
        validate_amount(amount)?;
        validate_category(category)?;
        validate_description(description)?;

        let date = self
            .now()
            .format(&Rfc3339)
            .map_err(|e| LedgerError::validation(format!("Invalid timestamp: {}", e)))?;

        let record = Record {
            id: self.document.next_id,
            date,
            amount,
            category: category.to_string(),
            description: description.to_string(),
        };

        self.document.records.push(record.clone());
        self.document.next_id += 1;

        if let Err(e) = self.save().await {
            self.document.records.pop();
            self.document.next_id -= 1;
            return Err(e);
        }

        info!(
            user_id = self.user_id,
            id = record.id,
            category = %record.category,
            amount = record.amount,
            "added record"
        );
        Ok(record)
    }

    pub fn summarize(&self, period: Period) -> Summary {
        self.summarize_at(period, self.now())
    }

    /// Same as `summarize` with an explicit reference instant.
    pub fn summarize_at(&self, period: Period, now: OffsetDateTime) -> Summary {
        summarize_records(&self.document.records, period, now)
    }

    /// Up to `limit` records, newest first. Records sharing a timestamp come
    /// back most recently added first. Undated records are skipped.
    pub fn list_recent(&self, limit: usize) -> Vec<Record> {
        let mut dated: Vec<(OffsetDateTime, usize, &Record)> = self
            .document
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| record.timestamp().map(|ts| (ts, index, record)))
            .collect();

        dated.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
        dated
            .into_iter()
            .take(limit)
            .map(|(_, _, record)| record.clone())
            .collect()
    }

    /// Removes the first record with `id`. Returns `false` when there is none.
    pub async fn delete(&mut self, id: u64) -> Result<bool> {
        let Some(index) = self.document.records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        let removed = self.document.records.remove(index);
        if let Err(e) = self.save().await {
            self.document.records.insert(index, removed);
            return Err(e);
        }

        info!(user_id = self.user_id, id, "deleted record");
        Ok(true)
    }

    async fn save(&self) -> Result<()> {
        storage::write_document(&self.path, &self.document).await
    }
}
