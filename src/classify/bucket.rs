use std::fmt;

/// Urgency bucket derived from days until a due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Overdue,
    ZeroToThreeMonths,
    ThreeToSixMonths,
    SixToTwelveMonths,
    TwelvePlusMonths,
    NoDate,
}

impl Bucket {
    /// Order used for output files and report rows. `NoDate` is never shown;
    /// `Overdue` deliberately comes last.
    pub const DISPLAY_ORDER: [Bucket; 5] = [
        Bucket::ZeroToThreeMonths,
        Bucket::ThreeToSixMonths,
        Bucket::SixToTwelveMonths,
        Bucket::TwelvePlusMonths,
        Bucket::Overdue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Overdue => "OVERDUE",
            Bucket::ZeroToThreeMonths => "0_3_MONTHS",
            Bucket::ThreeToSixMonths => "3_6_MONTHS",
            Bucket::SixToTwelveMonths => "6_12_MONTHS",
            Bucket::TwelvePlusMonths => "12_PLUS_MONTHS",
            Bucket::NoDate => "NO_DATE",
        }
    }

    /// Output file name, e.g. `0_3_months.csv`.
    pub fn file_name(self) -> String {
        format!("{}.csv", self.as_str().to_lowercase())
    }

    /// Due within twelve months or already overdue.
    pub fn is_actionable(self) -> bool {
        !matches!(self, Bucket::TwelvePlusMonths | Bucket::NoDate)
    }

    pub fn is_dated(self) -> bool {
        self != Bucket::NoDate
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps days until due to a [`Bucket`].
///
/// | Days          | Bucket           |
/// |---------------|------------------|
/// | none          | `NO_DATE`        |
/// | < 0           | `OVERDUE`        |
/// | 0 ..= 90      | `0_3_MONTHS`     |
/// | 91 ..= 180    | `3_6_MONTHS`     |
/// | 181 ..= 365   | `6_12_MONTHS`    |
/// | > 365         | `12_PLUS_MONTHS` |
pub fn bucket(days: Option<i64>) -> Bucket {
    match days {
        None => Bucket::NoDate,
        Some(d) if d < 0 => Bucket::Overdue,
        Some(0..=90) => Bucket::ZeroToThreeMonths,
        Some(91..=180) => Bucket::ThreeToSixMonths,
        Some(181..=365) => Bucket::SixToTwelveMonths,
        Some(_) => Bucket::TwelvePlusMonths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(bucket(None), Bucket::NoDate);
        assert_eq!(bucket(Some(i64::MIN)), Bucket::Overdue);
        assert_eq!(bucket(Some(-1)), Bucket::Overdue);
        assert_eq!(bucket(Some(0)), Bucket::ZeroToThreeMonths);
        assert_eq!(bucket(Some(90)), Bucket::ZeroToThreeMonths);
        assert_eq!(bucket(Some(91)), Bucket::ThreeToSixMonths);
        assert_eq!(bucket(Some(180)), Bucket::ThreeToSixMonths);
        assert_eq!(bucket(Some(181)), Bucket::SixToTwelveMonths);
        assert_eq!(bucket(Some(365)), Bucket::SixToTwelveMonths);
        assert_eq!(bucket(Some(366)), Bucket::TwelvePlusMonths);
        assert_eq!(bucket(Some(i64::MAX)), Bucket::TwelvePlusMonths);
    }

    #[test]
    fn test_bucket_is_total_over_a_wide_range() {
        for d in -1000..=1000 {
            let b = bucket(Some(d));
            assert!(b.is_dated());
            assert_eq!(b == Bucket::Overdue, d < 0);
        }
    }

    #[test]
    fn test_display_order_puts_overdue_last() {
        let names: Vec<_> = Bucket::DISPLAY_ORDER.iter().map(|b| b.as_str()).collect();
        assert_eq!(
            names,
            vec!["0_3_MONTHS", "3_6_MONTHS", "6_12_MONTHS", "12_PLUS_MONTHS", "OVERDUE"]
        );
        assert!(!Bucket::DISPLAY_ORDER.contains(&Bucket::NoDate));
    }

    #[test]
    fn test_file_name_is_lowercase() {
        assert_eq!(Bucket::TwelvePlusMonths.file_name(), "12_plus_months.csv");
        assert_eq!(Bucket::Overdue.file_name(), "overdue.csv");
    }

    #[test]
    fn test_actionable() {
        assert!(Bucket::Overdue.is_actionable());
        assert!(Bucket::SixToTwelveMonths.is_actionable());
        assert!(!Bucket::TwelvePlusMonths.is_actionable());
        assert!(!Bucket::NoDate.is_actionable());
    }
}
