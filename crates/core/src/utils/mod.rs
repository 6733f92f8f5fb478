pub mod money;
pub mod time_utils;

pub use money::{check_money, format_brl, money_violation};
pub use time_utils::{deserialize_datetime, format_datetime, hours_between, parse_datetime};
