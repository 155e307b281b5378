use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Timestamp layouts found in plant exports, tried in order.
const DATE_TIME_FORMATS: [&str; 9] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y/%m/%d %I:%M:%S %p",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

#[must_use]
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Parse either a full timestamp, or a bare time of day which is then placed on `date`.
#[must_use]
pub fn parse_on_date(text: &str, date: NaiveDate) -> Option<NaiveDateTime> {
    parse_date_time(text).or_else(|| {
        TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(text.trim(), format).ok())
            .map(|time| date.and_time(time))
    })
}

#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y/%m/%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 4).unwrap().and_hms_opt(13, 30, 0).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        for text in [
            "2024-01-04 13:30:00",
            "2024/01/04 13:30:00",
            "2024-01-04 01:30:00 PM",
            "2024/01/04 01:30:00 PM",
            "2024-01-04T13:30:00",
            " 2024-01-04 13:30 ",
        ] {
            assert_eq!(parse_date_time(text), Some(expected()), "{text}");
        }
    }

    #[test]
    fn test_parse_fractional_seconds() {
        for text in
            ["2024-01-04 13:30:00.000", "2024/01/04 13:30:00.0", "2024-01-04T13:30:00.000000"]
        {
            assert_eq!(parse_date_time(text), Some(expected()), "{text}");
        }
        assert_eq!(
            parse_date_time("2024-01-04 13:30:00.250"),
            expected().checked_add_signed(chrono::TimeDelta::milliseconds(250)),
        );
    }

    #[test]
    fn test_parse_bare_time() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        assert_eq!(parse_on_date("13:30", date), Some(expected()));
        assert_eq!(parse_on_date("noon", date), None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024/01/04"), NaiveDate::from_ymd_opt(2024, 1, 4));
        assert_eq!(parse_date("04.01.2024"), None);
    }
}
