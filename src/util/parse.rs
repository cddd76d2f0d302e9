use std::str::FromStr;

use crate::error::config::ConfigError;

/// Splits a comma-separated environment value into trimmed, non-empty entries.
///
/// Order is preserved, which matters for `INCLUDED_LABELS` where the order of the
/// list is the label priority.
///
/// # Arguments
/// - `value` - Raw environment value, e.g. `"bug, enhancement,,docs"`
///
/// # Returns
/// - `Vec<String>` - Entries in their given order, e.g. `["bug", "enhancement", "docs"]`
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a boolean flag from an environment value.
///
/// Accepts `true`/`false`, `1`/`0` and `yes`/`no`, case-insensitively.
///
/// # Arguments
/// - `key` - Environment variable name, used in the error
/// - `value` - Raw environment value
///
/// # Returns
/// - `Ok(bool)` - Parsed flag
/// - `Err(ConfigError::InvalidValue)` - Value is not a recognized boolean
pub fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Parses a number from an environment value.
///
/// # Arguments
/// - `key` - Environment variable name, used in the error
/// - `value` - Raw environment value
///
/// # Returns
/// - `Ok(T)` - Parsed number
/// - `Err(ConfigError::InvalidValue)` - Value is not a valid `T`
pub fn parse_number<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}
