use std::collections::HashMap;
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;

use pocket_ledger::LedgerService;

use crate::constants::DRAFT_TTL_SECONDS;

// ---------------------------------------------------------------------------
// Bot state
// ---------------------------------------------------------------------------

pub type BotError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone)]
pub struct BotState {
    pub ledgers: LedgerService,
    pub admin_chat_id: Option<i64>,
    pub drafts: Arc<RwLock<HashMap<ContextKey, Draft>>>,
}

// ---------------------------------------------------------------------------
// Add-transaction dialogue
// ---------------------------------------------------------------------------

/// (chat id, telegram user id)
pub type ContextKey = (i64, i64);

#[derive(Clone, Debug, PartialEq)]
pub enum DraftStep {
    ChooseCategory,
    EnterAmount {
        category: String,
    },
    EnterDescription {
        category: String,
        amount: f64,
    },
    Confirm {
        category: String,
        amount: f64,
        description: Option<String>,
    },
}

#[derive(Clone, Debug)]
pub struct Draft {
    pub step: DraftStep,
    pub updated_at: i64,
}

impl Draft {
    pub fn new(step: DraftStep) -> Self {
        Self {
            step,
            updated_at: OffsetDateTime::now_utc().unix_timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        now - self.updated_at > DRAFT_TTL_SECONDS
    }
}
