//! One classified device row.

use chrono::NaiveDate;

use crate::classify::{
    Bucket, ClosetType, Suppression, bucket, days_until, is_noc_contact, parse_date,
};
use crate::columns::ColumnMap;
use crate::config::Field;
use crate::filter::is_blank;
use crate::table::Cell;

pub const UNASSIGNED: &str = "UNASSIGNED";

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub contact: String,
    pub location: String,
    pub closet_type: ClosetType,
    pub ip: Option<String>,
    pub mac: Option<String>,
    pub battery_type: Option<String>,
    pub unit_model: Option<String>,
    pub unit_serial: Option<String>,
    pub battery_due: Option<NaiveDate>,
    pub unit_due: Option<NaiveDate>,
    pub battery_days: Option<i64>,
    pub unit_days: Option<i64>,
    pub battery_bucket: Bucket,
    pub unit_bucket: Bucket,
    pub suppression: Suppression,
    pub is_noc: bool,
}

/// Raw due-date text failed to parse even though the cell was filled in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DateIssues {
    pub battery: bool,
    pub unit: bool,
}

impl Record {
    /// Builds and classifies a record from a filtered row. `run_date` is the
    /// single reference day shared by every row of a run.
    pub fn from_row(row: &[Cell], columns: &ColumnMap, run_date: NaiveDate) -> (Self, DateIssues) {
        let text = |field: Field| -> Option<String> {
            columns
                .index(field)
                .and_then(|i| row.get(i))
                .and_then(|c| c.clone())
        };

        let contact = text(Field::Contact)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| UNASSIGNED.to_string());
        let location = text(Field::Location).unwrap_or_default();

        let raw_battery_due = text(Field::BatteryDue);
        let raw_unit_due = text(Field::UnitDue);
        let battery_due = raw_battery_due.as_deref().and_then(parse_date);
        let unit_due = raw_unit_due.as_deref().and_then(parse_date);
        let issues = DateIssues {
            battery: battery_due.is_none() && !is_blank(&raw_battery_due),
            unit: unit_due.is_none() && !is_blank(&raw_unit_due),
        };

        let battery_days = days_until(battery_due, run_date);
        let unit_days = days_until(unit_due, run_date);

        let record = Self {
            closet_type: ClosetType::from_location(&location),
            is_noc: is_noc_contact(&contact),
            contact,
            location,
            ip: text(Field::Ip),
            mac: text(Field::Mac),
            battery_type: text(Field::BatteryType),
            unit_model: text(Field::UnitModel),
            unit_serial: text(Field::UnitSerial),
            battery_due,
            unit_due,
            battery_days,
            unit_days,
            battery_bucket: bucket(battery_days),
            unit_bucket: bucket(unit_days),
            suppression: Suppression::evaluate(battery_due, unit_due, battery_days, unit_days),
        };
        (record, issues)
    }

    pub fn suppress_battery(&self) -> bool {
        self.suppression.suppresses_battery()
    }

    /// Counts toward battery outputs: dated and not suppressed.
    pub fn in_battery_view(&self) -> bool {
        self.battery_due.is_some() && !self.suppress_battery()
    }

    /// Battery or unit (before suppression) is due within twelve months.
    pub fn is_actionable(&self) -> bool {
        self.battery_bucket.is_actionable() || self.unit_bucket.is_actionable()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::fixtures::today;
    use crate::config::ColumnCandidates;

    fn columns() -> ColumnMap {
        let headers: Vec<String> = [
            "Contact",
            "UPS Location and Hostname",
            "Battery Type",
            "Next Battery Replacement Date",
            "Unit replacement Date",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        ColumnMap::resolve(&headers, &ColumnCandidates::default()).unwrap()
    }

    fn row(contact: Option<&str>, location: &str, battery: &str, unit: &str) -> Vec<Cell> {
        vec![
            contact.map(str::to_string),
            Some(location.to_string()),
            Some("RBC7".to_string()),
            Some(battery.to_string()),
            Some(unit.to_string()),
        ]
    }

    #[test]
    fn test_battery_soon_unit_far() {
        let (r, _) = Record::from_row(
            &row(Some("Jane"), "MDF-3 Closet", "2026-10-24", "2027-11-18"),
            &columns(),
            today(),
        );
        assert_eq!(r.battery_days, Some(10));
        assert_eq!(r.unit_days, Some(400));
        assert_eq!(r.battery_bucket, Bucket::ZeroToThreeMonths);
        assert_eq!(r.unit_bucket, Bucket::TwelvePlusMonths);
        assert!(!r.suppress_battery());
        assert!(r.in_battery_view());
        assert_eq!(r.closet_type, ClosetType::Mdf);
    }

    #[test]
    fn test_both_overdue_leaves_battery_view() {
        let (r, _) = Record::from_row(
            &row(Some("NOC"), "2nd Floor IDF", "2026-10-09", "2026-09-24"),
            &columns(),
            today(),
        );
        assert_eq!(r.battery_bucket, Bucket::Overdue);
        assert_eq!(r.unit_bucket, Bucket::Overdue);
        assert!(r.suppression.both_overdue);
        assert!(!r.in_battery_view());
        assert!(r.is_noc);
        assert_eq!(r.closet_type, ClosetType::Idf);
    }

    #[test]
    fn test_blank_contact_and_bad_dates() {
        let (r, issues) =
            Record::from_row(&row(Some("   "), "Server Room", "soon", ""), &columns(), today());
        assert_eq!(r.contact, UNASSIGNED);
        assert_eq!(r.battery_bucket, Bucket::NoDate);
        assert_eq!(r.unit_bucket, Bucket::NoDate);
        assert!(!r.in_battery_view());
        assert!(!r.is_actionable());
        assert_eq!(issues, DateIssues { battery: true, unit: false });

        let (r, _) = Record::from_row(&row(None, "", "", ""), &columns(), today());
        assert_eq!(r.contact, UNASSIGNED);
        assert_eq!(r.closet_type, ClosetType::Unknown);
    }
}
