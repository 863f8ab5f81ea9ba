//! Year-end bucket scheme keyed to fiscal and calendar deadlines.
//!
//! Kept alongside the day-threshold [`bucket`](super::bucket) scheme so
//! reports can be cut against budget years. The CLI does not use it.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Fiscal years start on July 1.
pub const FISCAL_YEAR_START_MONTH: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FiscalBucket {
    Overdue,
    ByFiscalYearEnd,
    ByCalendarYearEnd,
    BeyondYearEnds,
    NoDate,
}

impl FiscalBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            FiscalBucket::Overdue => "OVERDUE",
            FiscalBucket::ByFiscalYearEnd => "BY_FISCAL_YEAR_END",
            FiscalBucket::ByCalendarYearEnd => "BY_CALENDAR_YEAR_END",
            FiscalBucket::BeyondYearEnds => "BEYOND_YEAR_ENDS",
            FiscalBucket::NoDate => "NO_DATE",
        }
    }
}

impl fmt::Display for FiscalBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// June 30 closing the fiscal year that contains `today`.
pub fn fiscal_year_end(today: NaiveDate) -> NaiveDate {
    let end_year = if today.month() >= FISCAL_YEAR_START_MONTH {
        today.year() + 1
    } else {
        today.year()
    };
    NaiveDate::from_ymd_opt(end_year, 6, 30).unwrap_or(NaiveDate::MAX)
}

pub fn calendar_year_end(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(NaiveDate::MAX)
}

/// When a date falls before both year ends, the earlier deadline wins.
pub fn fiscal_bucket(due: Option<NaiveDate>, today: NaiveDate) -> FiscalBucket {
    let Some(due) = due else {
        return FiscalBucket::NoDate;
    };
    if due < today {
        return FiscalBucket::Overdue;
    }

    let fy_end = fiscal_year_end(today);
    let cal_end = calendar_year_end(today);

    if due <= fy_end.min(cal_end) {
        return if cal_end <= fy_end {
            FiscalBucket::ByCalendarYearEnd
        } else {
            FiscalBucket::ByFiscalYearEnd
        };
    }
    if due <= fy_end {
        FiscalBucket::ByFiscalYearEnd
    } else if due <= cal_end {
        FiscalBucket::ByCalendarYearEnd
    } else {
        FiscalBucket::BeyondYearEnds
    }
}
