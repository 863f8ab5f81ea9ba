//! Lenient due-date parsing and day arithmetic.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

/// Date-only layouts seen in hand-edited exports, tried in order. `%m/%d/%y`
/// must precede the other slash layouts since `%Y` also accepts two digits.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y%m%d",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Trailing `HH:MM[:SS[.fff]]` after whitespace or `T`.
static TIME_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<date>.+?)(?:\s+|T)(?P<time>\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?)$").unwrap()
});

/// Parses a due-date cell to a calendar date. Anything unrecognised is `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let date_part = match TIME_SUFFIX.captures(s) {
        Some(caps) => {
            let time = &caps["time"];
            if !TIME_FORMATS
                .iter()
                .any(|f| NaiveTime::parse_from_str(time, f).is_ok())
            {
                return None;
            }
            caps.name("date").map_or(s, |m| m.as_str().trim_end())
        }
        None => s,
    };

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(date_part, f).ok())
}

/// Signed whole days from `run_date` to `due`.
pub fn days_until(due: Option<NaiveDate>, run_date: NaiveDate) -> Option<i64> {
    due.map(|d| (d - run_date).num_days())
}
