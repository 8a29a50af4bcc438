pub mod config;
pub mod constants;
pub mod error;
pub mod health;
pub mod ledger;
pub mod models;
pub mod service;
pub mod storage;
pub mod summary;
pub mod telemetry;
pub mod utils;

// Re-export types at crate root for convenient importing
pub use crate::error::{LedgerError, Result};
pub use crate::ledger::LedgerStore;
pub use crate::models::{Period, Record, Summary};
pub use crate::service::LedgerService;
pub use crate::storage::StorageConfig;
