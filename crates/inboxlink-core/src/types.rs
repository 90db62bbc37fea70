//! Shared datetime aliases and conversions

use chrono::{DateTime as ChronoDateTime, TimeZone, Utc};

/// Database DateTime type used across all Inboxlink crates
///
/// # Example
/// ```rust
/// use inboxlink_core::DBDateTime;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// pub struct Response {
///     pub created_at: DBDateTime,
/// }
/// ```
pub type DBDateTime = ChronoDateTime<Utc>;

/// Convert an epoch-milliseconds value, as returned by Google APIs, into a UTC timestamp.
pub fn from_epoch_millis(millis: i64) -> Option<DBDateTime> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Parse epoch milliseconds carried as a decimal string.
pub fn parse_epoch_millis(value: &str) -> Option<DBDateTime> {
    value.trim().parse::<i64>().ok().and_then(from_epoch_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_epoch_millis() {
        let parsed = parse_epoch_millis("1700000000000").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_parse_epoch_millis_rejects_garbage() {
        assert!(parse_epoch_millis("soon").is_none());
        assert!(parse_epoch_millis("").is_none());
    }

    #[test]
    fn test_from_epoch_millis_out_of_range() {
        assert!(from_epoch_millis(i64::MAX).is_none());
    }
}
