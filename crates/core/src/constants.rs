/// Milliseconds in one hour, used to derive whole worked hours
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Decimal places kept when displaying money
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Select keys that match every record instead of filtering by name
pub const SELECT_ALL_KEYS: [&str; 2] = ["all", "*"];

/// Date format used by list endpoints (`dd/MM/yy HH:mm`)
pub const DISPLAY_DATETIME_FORMAT: &str = "%d/%m/%y %H:%M";

/// Largest amount, rate or revenue accepted on input
pub const MAX_MONEY_VALUE: i64 = 1_000_000_000_000;

/// Longest loan term accepted, in months
pub const MAX_LOAN_MONTHS: i32 = 1_200;
