use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::constants::*;

/// One transaction in a user's ledger.
///
/// `date` is kept as the stored RFC 3339 text so a single malformed value
/// cannot prevent the rest of the ledger from loading.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Record {
    pub id: u64,
    pub date: String,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl Record {
    /// Parsed creation instant, `None` when the stored text is not RFC 3339.
    pub fn timestamp(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.date, &Rfc3339).ok()
    }
}

/// Persisted layout of one user's ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LedgerDocument {
    #[serde(default)]
    pub next_id: u64,
    pub records: Vec<Record>,
}

impl Default for LedgerDocument {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

/// Shapes accepted when reading a ledger file. Older files hold a bare record array.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum StoredLedger {
    Document(LedgerDocument),
    Legacy(Vec<Record>),
}

impl StoredLedger {
    /// Normalizes either layout into the current document. Legacy records
    /// with local, offset-less dates are pinned to `offset` so the next save
    /// writes RFC 3339.
    pub fn into_document(self, offset: UtcOffset) -> LedgerDocument {
        match self {
            StoredLedger::Document(mut document) => {
                // Counter must stay above every stored id
                let floor = document.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
                document.next_id = document.next_id.max(floor);
                document
            }
            StoredLedger::Legacy(mut records) => {
                for record in &mut records {
                    if record.timestamp().is_none()
                        && let Some(date) = upgrade_local_date(&record.date, offset)
                    {
                        record.date = date;
                    }
                }
                let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
                LedgerDocument { next_id, records }
            }
        }
    }
}

/// `2024-05-01T10:00:00[.123456]` read as wall time at `offset`, rendered as RFC 3339.
fn upgrade_local_date(date: &str, offset: UtcOffset) -> Option<String> {
    let with_fraction = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    let whole_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

    let local = PrimitiveDateTime::parse(date, with_fraction)
        .or_else(|_| PrimitiveDateTime::parse(date, whole_seconds))
        .ok()?;
    local.assume_offset(offset).format(&Rfc3339).ok()
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    /// Unrecognized names select every record.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            PERIOD_DAY => Period::Day,
            PERIOD_WEEK => Period::Week,
            PERIOD_MONTH => Period::Month,
            PERIOD_YEAR => Period::Year,
            _ => Period::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => PERIOD_DAY,
            Period::Week => PERIOD_WEEK,
            Period::Month => PERIOD_MONTH,
            Period::Year => PERIOD_YEAR,
            Period::All => PERIOD_ALL,
        }
    }
}

/// Aggregate of the records that fall inside a period window.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub count: usize,
    pub by_category: HashMap<String, f64>,
}

impl Summary {
    /// Categories ordered by amount, largest first. Equal amounts fall back to name order.
    pub fn categories_by_amount(&self) -> Vec<(&str, f64)> {
        let mut categories: Vec<(&str, f64)> = self
            .by_category
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        categories.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        categories
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
