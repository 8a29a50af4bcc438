use crate::constants::*;
use crate::error::{LedgerError, Result};

pub fn validate_string_length(value: &str, field_name: &str, max_length: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LedgerError::validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    validate_max_length(value, field_name, max_length)
}

fn validate_max_length(value: &str, field_name: &str, max_length: usize) -> Result<()> {
    if value.chars().count() > max_length {
        return Err(LedgerError::validation(format!(
            "{} must be less than {} characters",
            field_name, max_length
        )));
    }
    Ok(())
}

pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(LedgerError::validation(ERR_AMOUNT_NOT_FINITE));
    }
    if amount <= 0.0 {
        return Err(LedgerError::validation(ERR_AMOUNT_NOT_POSITIVE));
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<()> {
    validate_string_length(category, "Category", MAX_CATEGORY_LENGTH)
}

/// Descriptions are optional, so only the upper bound applies.
pub fn validate_description(description: &str) -> Result<()> {
    validate_max_length(description, "Description", MAX_DESCRIPTION_LENGTH)
}

/// Parses an amount typed by a user, e.g. `15.50`, `100` or `$7`.
pub fn parse_amount(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    let amount: f64 = digits
        .parse()
        .map_err(|_| LedgerError::validation(ERR_AMOUNT_NOT_NUMBER))?;
    validate_amount(amount)?;
    Ok(amount)
}

pub fn parse_record_id(text: &str) -> Result<u64> {
    match text.trim().trim_start_matches('#').parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(LedgerError::validation(ERR_INVALID_RECORD_ID)),
    }
}

/// Zero means "use the default"; anything above the cap is clamped.
pub fn validate_recent_limit(limit: usize) -> usize {
    match limit {
        0 => DEFAULT_RECENT_LIMIT,
        l => l.min(MAX_RECENT_LIMIT),
    }
}
