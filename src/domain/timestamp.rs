use time::OffsetDateTime;
use time::macros::format_description;

fn datetime(epoch_millis: u64) -> OffsetDateTime {
    let nanos = i128::from(epoch_millis) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

// ISO-8601 UTC with millisecond precision, e.g. 2025-06-01T12:30:05.120Z.
pub fn iso_timestamp(epoch_millis: u64) -> String {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );
    datetime(epoch_millis)
        .format(&format)
        .unwrap_or_else(|_| epoch_millis.to_string())
}

// Wall clock label used by the activity log.
pub fn clock_label(epoch_millis: u64) -> String {
    let format = format_description!("[hour]:[minute]:[second]");
    datetime(epoch_millis)
        .format(&format)
        .unwrap_or_else(|_| epoch_millis.to_string())
}

// Calendar date (YYYY-MM-DD) of an instant.
pub fn calendar_date(epoch_millis: u64) -> String {
    let format = format_description!("[year]-[month]-[day]");
    datetime(epoch_millis)
        .format(&format)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-06-01T12:30:05.120Z
    const INSTANT: u64 = 1_748_781_005_120;

    #[test]
    fn when_formatting_iso_timestamp_then_milliseconds_and_zulu_are_kept() {
        assert_eq!(iso_timestamp(INSTANT), "2025-06-01T12:30:05.120Z");
        assert_eq!(iso_timestamp(0), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn when_formatting_clock_label_then_only_time_of_day_is_shown() {
        assert_eq!(clock_label(INSTANT), "12:30:05");
    }

    #[test]
    fn when_formatting_calendar_date_then_it_is_hyphenated() {
        assert_eq!(calendar_date(INSTANT), "2025-06-01");
    }
}
