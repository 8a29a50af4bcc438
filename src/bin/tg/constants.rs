pub const DRAFT_TTL_SECONDS: i64 = 600;

pub const CATEGORY_CALLBACK_PREFIX: &str = "cat_";
pub const CANCEL_CALLBACK: &str = "cancel";
pub const CONFIRM_YES_CALLBACK: &str = "confirm_yes";
pub const CONFIRM_NO_CALLBACK: &str = "confirm_no";

pub const NO_DESCRIPTION: &str = "No description";

pub const BOT_COMMANDS: [(&str, &str); 10] = [
    ("start", "Start the bot"),
    ("add", "Add new transaction"),
    ("today", "Today's summary"),
    ("week", "Weekly summary"),
    ("month", "Monthly summary"),
    ("year", "Yearly summary"),
    ("recent", "Recent transactions"),
    ("delete", "Delete transaction"),
    ("help", "Show help"),
    ("status", "Bot status"),
];

pub const WELCOME_TEXT: &str = "Expenses Tracker\n\n\
    Quick commands:\n\
    /add - Record expense or income\n\
    /today - Today's spending\n\
    /week - Weekly summary\n\
    /month - Monthly overview\n\
    /year - Yearly overview\n\
    /recent - Recent transactions\n\
    /delete <id> - Remove transaction\n\
    /help - Detailed guide\n\n\
    Your data is saved automatically.";

pub const HELP_TEXT: &str = "Bot guide\n\n\
    1. Add a transaction\n\
    Use /add, then:\n\
    - pick a category\n\
    - enter the amount (like 15.50)\n\
    - add a description, or /skip\n\
    - confirm to save\n\n\
    2. View reports\n\
    /today - today's total\n\
    /week - last 7 days\n\
    /month - current month\n\
    /year - current year\n\n\
    3. Manage data\n\
    /recent - last 10 entries\n\
    /delete 5 - remove item #5\n\
    /cancel - abort the current /add\n\n\
    Tip: use the Income category for money received.";

pub const DELETE_USAGE_TEXT: &str = "Delete transaction\n\n\
    Usage: /delete <ID>\n\
    Example: /delete 5\n\n\
    Use /recent to see transaction IDs.";

pub const GENERIC_FAILURE_TEXT: &str = "Something went wrong. Please try again.";
