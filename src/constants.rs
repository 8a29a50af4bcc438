// Server configuration
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "8080";
pub const HEALTH_PATH: &str = "/health";

// Storage configuration
pub const DEFAULT_DATA_DIR: &str = "/data";
pub const DEFAULT_FALLBACK_DATA_DIR: &str = ".";
pub const LEDGER_FILE_PREFIX: &str = "expenses_";
pub const LEDGER_FILE_EXTENSION: &str = "json";
pub const CORRUPT_FILE_SUFFIX: &str = "corrupt";
pub const TMP_FILE_SUFFIX: &str = "tmp";

// Ledger limits and defaults
pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const MAX_RECENT_LIMIT: usize = 100;
pub const MAX_CATEGORY_LENGTH: usize = 64;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

// Period names accepted by `Period::from_name`
pub const PERIOD_DAY: &str = "day";
pub const PERIOD_WEEK: &str = "week";
pub const PERIOD_MONTH: &str = "month";
pub const PERIOD_YEAR: &str = "year";
pub const PERIOD_ALL: &str = "all";

// Preset categories offered by the chat layer, two per keyboard row
pub const PRESET_CATEGORIES: [[&str; 2]; 10] = [
    ["Food", "Dining"],
    ["Transport", "Fuel"],
    ["Rent", "Utilities"],
    ["Shopping", "Clothing"],
    ["Healthcare", "Medicine"],
    ["Entertainment", "Movies"],
    ["Education", "Tech"],
    ["Travel", "Hotel"],
    ["Income", "Salary"],
    ["Other", "Gifts"],
];

// Error messages
pub const ERR_AMOUNT_NOT_NUMBER: &str = "Amount must be a number";
pub const ERR_AMOUNT_NOT_POSITIVE: &str = "Amount must be positive";
pub const ERR_AMOUNT_NOT_FINITE: &str = "Amount must be a valid finite number";
pub const ERR_INVALID_RECORD_ID: &str = "Record id must be a positive whole number";
