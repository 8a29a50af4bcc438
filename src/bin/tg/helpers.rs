use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use time::OffsetDateTime;
use time::macros::format_description;

use pocket_ledger::constants::PRESET_CATEGORIES;
use pocket_ledger::{Period, Record, Summary};

use crate::constants::{
    CANCEL_CALLBACK, CATEGORY_CALLBACK_PREFIX, CONFIRM_NO_CALLBACK, CONFIRM_YES_CALLBACK,
    NO_DESCRIPTION,
};
use crate::models::{BotState, ContextKey, Draft};

// ---------------------------------------------------------------------------
// Telegram user helpers
// ---------------------------------------------------------------------------

pub fn telegram_user_id(msg: &Message) -> Result<i64, String> {
    let user = msg
        .from
        .as_ref()
        .ok_or_else(|| "Unable to read Telegram user id.".to_string())?;

    i64::try_from(user.id.0).map_err(|_| "Invalid Telegram user id.".to_string())
}

// ---------------------------------------------------------------------------
// Command parsing
// ---------------------------------------------------------------------------

/// Splits `/cmd@bot args` into a lowercase command name and optional arguments.
pub fn parse_command(text: &str) -> Option<(String, Option<&str>)> {
    let trimmed = text.trim();
    let rest = trimmed.strip_prefix('/')?;

    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, Some(args.trim()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };
    let command = head.split('@').next().unwrap_or_default().to_ascii_lowercase();

    if command.is_empty() {
        return None;
    }
    Some((command, args))
}

// ---------------------------------------------------------------------------
// Keyboards
// ---------------------------------------------------------------------------

pub fn category_keyboard() -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = PRESET_CATEGORIES
        .iter()
        .map(|row| {
            row.iter()
                .map(|category| {
                    InlineKeyboardButton::callback(
                        *category,
                        format!("{}{}", CATEGORY_CALLBACK_PREFIX, category),
                    )
                })
                .collect()
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback("Cancel", CANCEL_CALLBACK)]);
    InlineKeyboardMarkup::new(rows)
}

pub fn confirm_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "Confirm & Save",
            CONFIRM_YES_CALLBACK,
        )],
        vec![InlineKeyboardButton::callback("Cancel", CONFIRM_NO_CALLBACK)],
    ])
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn period_label(period: Period) -> &'static str {
    match period {
        Period::Day => "Today",
        Period::Week => "This Week",
        Period::Month => "This Month",
        Period::Year => "This Year",
        Period::All => "All Time",
    }
}

pub fn format_summary(period: Period, summary: &Summary) -> String {
    let label = period_label(period);
    if summary.is_empty() {
        return format!(
            "{} Summary\n\nNo transactions for {} yet.\n\nUse /add to record your first expense!",
            label,
            label.to_lowercase()
        );
    }

    let mut lines = vec![
        format!("{} Summary", label),
        String::new(),
        format!("Total: {}", format_amount(summary.total)),
        format!("Transactions: {}", summary.count),
        String::new(),
        "Breakdown by category:".to_string(),
    ];

    for (category, amount) in summary.categories_by_amount() {
        let percentage = if summary.total > 0.0 {
            amount / summary.total * 100.0
        } else {
            0.0
        };
        lines.push(format!(
            "- {}: {} ({:.1}%)",
            category,
            format_amount(amount),
            percentage
        ));
    }

    lines.join("\n")
}

fn short_date(record: &Record) -> String {
    record
        .timestamp()
        .and_then(|ts| {
            ts.format(format_description!("[month repr:short] [day]"))
                .ok()
        })
        .unwrap_or_else(|| "Unknown date".to_string())
}

fn description_or_default(description: &str) -> &str {
    if description.trim().is_empty() {
        NO_DESCRIPTION
    } else {
        description
    }
}

pub fn format_recent(records: &[Record]) -> String {
    if records.is_empty() {
        return "Recent Transactions\n\nNo transactions yet!\n\nUse /add to record your first expense."
            .to_string();
    }

    let mut text = String::from("Recent Transactions\n");
    for record in records {
        text.push_str(&format!(
            "\n#{} - {}\n  {}: {}\n  {}\n",
            record.id,
            short_date(record),
            record.category,
            format_amount(record.amount),
            description_or_default(&record.description)
        ));
    }
    text
}

pub fn format_confirmation(category: &str, amount: f64, description: Option<&str>) -> String {
    format!(
        "Confirm transaction\n\n\
         - Category: {}\n\
         - Amount: {}\n\
         - Description: {}\n\n\
         Press Confirm to save.",
        category,
        format_amount(amount),
        description_or_default(description.unwrap_or_default())
    )
}

pub fn format_saved(record: &Record) -> String {
    let day = record.date.get(..10).unwrap_or(&record.date);
    format!(
        "Transaction saved!\n\n\
         - ID: #{}\n\
         - Category: {}\n\
         - Amount: {}\n\
         - Date: {}\n\n\
         Use /recent to view all.",
        record.id,
        record.category,
        format_amount(record.amount),
        day
    )
}

pub fn format_server_time(now: OffsetDateTime) -> String {
    now.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| now.to_string())
}

// ---------------------------------------------------------------------------
// Draft management
// ---------------------------------------------------------------------------

pub async fn cleanup_expired_drafts(state: &BotState) {
    let mut drafts = state.drafts.write().await;
    drafts.retain(|_, draft| !draft.is_expired());
}

pub async fn get_draft(state: &BotState, key: ContextKey) -> Option<Draft> {
    let drafts = state.drafts.read().await;
    drafts.get(&key).filter(|draft| !draft.is_expired()).cloned()
}

pub async fn put_draft(state: &BotState, key: ContextKey, draft: Draft) {
    state.drafts.write().await.insert(key, draft);
}

pub async fn take_draft(state: &BotState, key: ContextKey) -> Option<Draft> {
    state
        .drafts
        .write()
        .await
        .remove(&key)
        .filter(|draft| !draft.is_expired())
}
