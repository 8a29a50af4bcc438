use time::UtcOffset;
use time::macros::format_description;

use crate::constants::*;
use crate::ledger::local_offset;
use crate::storage::StorageConfig;

/// Process configuration read from the environment (and `.env` via dotenv).
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    pub admin_chat_id: Option<i64>,
    pub utc_offset: Option<UtcOffset>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = value("BOT_TOKEN")
            .or_else(|| value("TELEGRAM_BOT_TOKEN"))
            .ok_or("BOT_TOKEN environment variable is required")?;

        let host = value("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port_text = value("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port = port_text
            .trim()
            .parse::<u16>()
            .map_err(|_| format!("Invalid PORT '{}'", port_text))?;

        let storage = StorageConfig::new(
            value("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            value("FALLBACK_DATA_DIR").unwrap_or_else(|| DEFAULT_FALLBACK_DATA_DIR.to_string()),
        );

        let admin_chat_id = value("ADMIN_ID")
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| format!("Invalid ADMIN_ID '{}'", raw))
            })
            .transpose()?;

        let utc_offset = value("LEDGER_UTC_OFFSET")
            .map(|raw| parse_utc_offset(&raw))
            .transpose()?;

        Ok(Self {
            bot_token,
            host,
            port,
            storage,
            admin_chat_id,
            utc_offset,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configured offset, or the process clock's offset.
    pub fn offset(&self) -> UtcOffset {
        self.utc_offset.unwrap_or_else(local_offset)
    }
}

/// Accepts `UTC`, `Z` or a signed `+HH:MM` offset.
pub fn parse_utc_offset(raw: &str) -> Result<UtcOffset, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
        return Ok(UtcOffset::UTC);
    }

    UtcOffset::parse(
        trimmed,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .map_err(|_| format!("Invalid LEDGER_UTC_OFFSET '{}'", raw))
}
