use chrono::{NaiveDate, NaiveTime};

/// Parses a `YYYY-MM-DD` date, requiring an exact round-trip so that
/// out-of-range values (`2024-02-30`) and loosely formatted input
/// (`2024-1-1`) are both rejected.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    (date.format("%Y-%m-%d").to_string() == input).then_some(date)
}

/// Parses a `HH:MM` time (hour 00-23, minute 00-59), round-trip checked.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let time = NaiveTime::parse_from_str(input, "%H:%M").ok()?;
    (time.format("%H:%M").to_string() == input).then_some(time)
}

pub fn is_valid_date(input: &str) -> bool {
    parse_date(input).is_some()
}

pub fn is_valid_time(input: &str) -> bool {
    parse_time(input).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_dates() {
        assert!(is_valid_date("2024-02-29"));
        assert!(is_valid_date("2025-12-31"));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(!is_valid_date("2024-02-30"));
        assert!(!is_valid_date("2024-13-01"));
        assert!(!is_valid_date("2023-02-29"));
    }

    #[test]
    fn rejects_loose_date_formats() {
        assert!(!is_valid_date("2024-1-1"));
        assert!(!is_valid_date("2024/01/01"));
        assert!(!is_valid_date("01-01-2024"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn accepts_well_formed_times() {
        assert!(is_valid_time("00:00"));
        assert!(is_valid_time("09:30"));
        assert!(is_valid_time("23:59"));
    }

    #[test]
    fn rejects_out_of_range_times() {
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("25:61"));
        assert!(!is_valid_time("12:60"));
    }

    #[test]
    fn rejects_loose_time_formats() {
        assert!(!is_valid_time("9:00"));
        assert!(!is_valid_time("10:5"));
        assert!(!is_valid_time("10:00:00"));
        assert!(!is_valid_time(""));
    }
}
