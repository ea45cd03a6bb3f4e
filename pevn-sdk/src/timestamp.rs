//! ISO-8601 timestamps in the millisecond UTC form (`2024-01-01T00:00:00.000Z`).

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Format a point in time as a millisecond-precision UTC ISO-8601 string.
pub fn iso8601(at: OffsetDateTime) -> String {
    let format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    let at = at.to_offset(UtcOffset::UTC);
    at.format(&format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

/// The current wall-clock time as an ISO-8601 string.
pub fn now_iso8601() -> String {
    iso8601(OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_iso8601_millis() {
        assert_eq!(
            iso8601(datetime!(2024-01-01 00:00:00.123456 UTC)),
            "2024-01-01T00:00:00.123Z"
        );
    }

    #[test]
    fn test_iso8601_converts_to_utc() {
        assert_eq!(
            iso8601(datetime!(2024-03-05 10:30:00 +2)),
            "2024-03-05T08:30:00.000Z"
        );
    }
}
