//! Rules that hide a battery replacement behind its unit replacement.

use chrono::NaiveDate;

/// Battery and unit due dates this close collapse into one unit replacement.
pub const PROXIMITY_DAYS: i64 = 365;

/// Which suppression rules fired for a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Suppression {
    /// Both dates present and within [`PROXIMITY_DAYS`] of each other.
    pub proximity: bool,
    /// Battery and unit are both past due.
    pub both_overdue: bool,
}

impl Suppression {
    pub fn evaluate(
        battery_due: Option<NaiveDate>,
        unit_due: Option<NaiveDate>,
        battery_days: Option<i64>,
        unit_days: Option<i64>,
    ) -> Self {
        let proximity = match (battery_due, unit_due) {
            (Some(b), Some(u)) => (u - b).num_days().abs() <= PROXIMITY_DAYS,
            _ => false,
        };
        let both_overdue = matches!((battery_days, unit_days), (Some(b), Some(u)) if b < 0 && u < 0);

        Self {
            proximity,
            both_overdue,
        }
    }

    /// Battery record is left out of battery outputs. Unit outputs ignore this.
    pub fn suppresses_battery(self) -> bool {
        self.proximity || self.both_overdue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::dates::days_until;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn eval(battery_offset: Option<i64>, unit_offset: Option<i64>) -> Suppression {
        let t = today();
        let b = battery_offset.map(|d| t + Duration::days(d));
        let u = unit_offset.map(|d| t + Duration::days(d));
        Suppression::evaluate(b, u, days_until(b, t), days_until(u, t))
    }

    #[test]
    fn test_far_apart_dates_are_not_suppressed() {
        let s = eval(Some(10), Some(400));
        assert_eq!(s, Suppression::default());
        assert!(!s.suppresses_battery());
    }

    #[test]
    fn test_both_overdue_suppresses() {
        let s = eval(Some(-5), Some(-20));
        assert!(s.both_overdue);
        assert!(s.suppresses_battery());
    }

    #[test]
    fn test_proximity_suppresses_without_overdue() {
        let s = eval(Some(30), Some(200));
        assert!(s.proximity);
        assert!(!s.both_overdue);
        assert!(s.suppresses_battery());
    }

    #[test]
    fn test_proximity_boundary() {
        assert!(eval(Some(0), Some(365)).proximity);
        assert!(!eval(Some(0), Some(366)).proximity);
        assert!(eval(Some(365), Some(0)).proximity);
    }

    #[test]
    fn test_both_overdue_far_apart_still_suppresses() {
        let s = eval(Some(-1000), Some(-1));
        assert!(!s.proximity);
        assert!(s.both_overdue);
        assert!(s.suppresses_battery());
    }

    #[test]
    fn test_missing_dates_disqualify_rules() {
        assert!(!eval(None, Some(-3)).suppresses_battery());
        assert!(!eval(Some(-3), None).suppresses_battery());
        assert!(!eval(None, None).suppresses_battery());
    }

    #[test]
    fn test_single_overdue_only_suppressed_by_proximity() {
        assert!(!eval(Some(-400), Some(10)).suppresses_battery());
        assert!(eval(Some(-10), Some(10)).suppresses_battery());
    }
}
