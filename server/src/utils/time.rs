//! Time utility functions

use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC time truncated to millisecond precision.
///
/// CQL `timestamp` columns hold milliseconds, so truncating up front keeps
/// values read back from any backend identical to the ones written.
pub fn now_millis() -> DateTime<Utc> {
    truncate_to_millis(Utc::now())
}

/// Drop sub-millisecond precision from a timestamp
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_to_millis() {
        let ts = Utc
            .timestamp_opt(1_704_067_200, 123_456_789)
            .single()
            .unwrap();
        let truncated = truncate_to_millis(ts);
        assert_eq!(truncated.timestamp(), 1_704_067_200);
        assert_eq!(truncated.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_now_millis_has_no_sub_millisecond_part() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
