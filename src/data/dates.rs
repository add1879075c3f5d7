//! Order Date Parsing
//! Coerce-style date parsing: anything that does not parse becomes `None`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Date-time layouts, month first where day/month is ambiguous.
const DATE_TIME_FORMATS: [&str; 7] = [
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 5] = ["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d", "%d-%b-%Y", "%b %d, %Y"];

/// Two-digit years up to this value land in the 2000s, later ones in the 1900s.
const TWO_DIGIT_YEAR_PIVOT: i32 = 68;

/// Parse a raw order date, returning `None` for anything unrecognised.
///
/// `%Y` accepts any number of digits, so `2/24/03` first parses as year 3.
/// Years below 100 are read as two-digit years; three-digit years are rejected.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
        .and_then(expand_short_year)
}

fn expand_short_year(date: NaiveDate) -> Option<NaiveDate> {
    match date.year() {
        y @ 0..=TWO_DIGIT_YEAR_PIVOT => date.with_year(2000 + y),
        y @ 0..=99 => date.with_year(1900 + y),
        100..=999 => None,
        _ => Some(date),
    }
}

/// Calendar month bucket, formatted `YYYY-MM`.
pub fn month_bucket(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Days since the Unix epoch, the physical representation of a polars `Date`.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parses_us_datetime_without_padding() {
        assert_eq!(parse_order_date("2/24/2003 0:00"), Some(ymd(2003, 2, 24)));
        assert_eq!(parse_order_date("12/1/2004 13:45"), Some(ymd(2004, 12, 1)));
    }

    #[test]
    fn test_parses_iso_forms() {
        assert_eq!(parse_order_date("2005-05-31"), Some(ymd(2005, 5, 31)));
        assert_eq!(
            parse_order_date("2005-05-31 10:20:30.000000"),
            Some(ymd(2005, 5, 31))
        );
        assert_eq!(
            parse_order_date("2005-05-31T10:20:30+02:00"),
            Some(ymd(2005, 5, 31))
        );
    }

    #[test]
    fn test_month_first_when_ambiguous() {
        assert_eq!(parse_order_date("03/04/2004"), Some(ymd(2004, 3, 4)));
    }

    #[test]
    fn test_garbage_coerces_to_none() {
        assert_eq!(parse_order_date("not a date"), None);
        assert_eq!(parse_order_date(""), None);
        assert_eq!(parse_order_date("13/45/2003"), None);
    }

    #[test]
    fn test_two_digit_years_are_expanded() {
        assert_eq!(parse_order_date("2/24/03 0:00"), Some(ymd(2003, 2, 24)));
        assert_eq!(parse_order_date("2/24/03"), Some(ymd(2003, 2, 24)));
        assert_eq!(parse_order_date("1/5/68"), Some(ymd(2068, 1, 5)));
        assert_eq!(parse_order_date("1/5/99 10:30"), Some(ymd(1999, 1, 5)));
        assert_eq!(
            parse_order_date("2/24/03 0:00").map(month_bucket).as_deref(),
            Some("2003-02")
        );
    }

    #[test]
    fn test_three_digit_years_coerce_to_none() {
        assert_eq!(parse_order_date("2/24/203"), None);
        assert_eq!(parse_order_date("0203-02-24"), None);
    }

    #[test]
    fn test_month_bucket_is_zero_padded() {
        assert_eq!(month_bucket(ymd(2003, 2, 24)), "2003-02");
        assert_eq!(month_bucket(ymd(2004, 11, 1)), "2004-11");
    }

    #[test]
    fn test_days_since_epoch() {
        assert_eq!(days_since_epoch(ymd(1970, 1, 1)), 0);
        assert_eq!(days_since_epoch(ymd(1970, 1, 2)), 1);
        assert_eq!(days_since_epoch(ymd(1969, 12, 31)), -1);
    }
}
