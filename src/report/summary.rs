//! Plain-text run summary with a NOC-focused section.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::classify::{Bucket, ClosetType};
use crate::record::Record;
use crate::report::aggregate::{BucketCounts, battery_view, crosstab};

#[derive(Debug)]
pub struct NocSection {
    pub battery_crosstab: BTreeMap<ClosetType, BucketCounts>,
    pub unit_crosstab: BTreeMap<ClosetType, BucketCounts>,
    /// `(closet, location)` sorted by closet then location. Blank locations
    /// count as overdue but are left out of the printed list.
    pub battery_overdue: Vec<(ClosetType, String)>,
    pub unit_overdue: Vec<(ClosetType, String)>,
}

#[derive(Debug)]
pub enum OtherContacts {
    /// Every row belongs to a NOC contact.
    NoRows,
    NothingActionable,
    /// `(contact, actionable rows)` sorted by count descending, then contact.
    Actionable(Vec<(String, usize)>),
}

#[derive(Debug)]
pub struct Summary {
    pub run_date: NaiveDate,
    pub input: String,
    pub battery_counts: BucketCounts,
    pub unit_counts: BucketCounts,
    pub suppressed: usize,
    pub noc: Option<NocSection>,
    pub other: OtherContacts,
}

impl Summary {
    pub fn build(records: &[Record], run_date: NaiveDate, input: &Path) -> Self {
        let battery: Vec<&Record> = battery_view(records).collect();

        let noc_all: Vec<&Record> = records.iter().filter(|r| r.is_noc).collect();
        let noc = (!noc_all.is_empty()).then(|| {
            let noc_battery: Vec<&Record> = battery.iter().copied().filter(|r| r.is_noc).collect();
            NocSection {
                battery_crosstab: crosstab(noc_battery.iter().copied(), |r| r.battery_bucket),
                unit_crosstab: crosstab(noc_all.iter().copied(), |r| r.unit_bucket),
                battery_overdue: overdue_locations(&noc_battery, |r| r.battery_bucket),
                unit_overdue: overdue_locations(&noc_all, |r| r.unit_bucket),
            }
        });

        Self {
            run_date,
            input: input.display().to_string(),
            battery_counts: BucketCounts::from_buckets(battery.iter().map(|r| r.battery_bucket)),
            unit_counts: BucketCounts::from_buckets(records.iter().map(|r| r.unit_bucket)),
            suppressed: records.iter().filter(|r| r.suppress_battery()).count(),
            noc,
            other: other_contacts(records),
        }
    }

    pub fn render(&self) -> String {
        let mut lines: Vec<String> = vec![
            format!("Run date: {}", self.run_date.format("%Y-%m-%d")),
            format!("Input: {}", self.input),
            String::new(),
            "=== OVERALL COUNTS (ALL CONTACTS) ===".into(),
            format_counts("Battery buckets", &self.battery_counts),
            String::new(),
            format_counts("Unit buckets", &self.unit_counts),
            String::new(),
            format!("Battery rows suppressed: {}", self.suppressed),
            String::new(),
            "=== NOC ONLY ===".into(),
        ];

        match &self.noc {
            None => {
                lines.push("No rows detected as NOC (Contact did not contain 'noc').".into());
                lines.push(String::new());
            }
            Some(noc) => {
                lines.push("NOC Battery buckets by MDF/IDF:".into());
                lines.push(format_crosstab(&noc.battery_crosstab));
                lines.push(String::new());
                lines.push("NOC Unit buckets by MDF/IDF:".into());
                lines.push(format_crosstab(&noc.unit_crosstab));
                lines.push(String::new());
                lines.push(format!("NOC Batteries OVERDUE: {}", noc.battery_overdue.len()));
                lines.push(format!("NOC Units OVERDUE: {}", noc.unit_overdue.len()));
                lines.push(String::new());
                list_locations(&mut lines, "NOC Battery OVERDUE locations", &noc.battery_overdue);
                lines.push(String::new());
                list_locations(&mut lines, "NOC Unit OVERDUE locations", &noc.unit_overdue);
                lines.push(String::new());
            }
        }

        lines.push("=== OTHER CONTACTS ===".into());
        match &self.other {
            OtherContacts::NoRows => lines.push("None (all rows are NOC or UNASSIGNED).".into()),
            OtherContacts::NothingActionable => lines.push(
                "No actionable items for non-NOC contacts (everything is 12+ months out).".into(),
            ),
            OtherContacts::Actionable(counts) => {
                lines.push("Actionable rows by Contact (within 12 months or overdue):".into());
                let width = counts.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
                for (contact, n) in counts {
                    lines.push(format!("{contact:<width$}  {n}"));
                }
            }
        }

        lines.join("\n")
    }
}

fn overdue_locations<F>(records: &[&Record], key: F) -> Vec<(ClosetType, String)>
where
    F: Fn(&Record) -> Bucket,
{
    let mut out: Vec<(ClosetType, String)> = records
        .iter()
        .filter(|r| key(**r) == Bucket::Overdue)
        .map(|r| (r.closet_type, r.location.clone()))
        .collect();
    out.sort();
    out
}

fn other_contacts(records: &[Record]) -> OtherContacts {
    let others: Vec<&Record> = records.iter().filter(|r| !r.is_noc).collect();
    if others.is_empty() {
        return OtherContacts::NoRows;
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in others.iter().filter(|r| r.is_actionable()) {
        *counts.entry(r.contact.as_str()).or_default() += 1;
    }
    if counts.is_empty() {
        return OtherContacts::NothingActionable;
    }

    let mut counts: Vec<(String, usize)> =
        counts.into_iter().map(|(c, n)| (c.to_string(), n)).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    OtherContacts::Actionable(counts)
}

fn format_counts(title: &str, counts: &BucketCounts) -> String {
    let mut lines = vec![format!("{title}:")];
    for (bucket, n) in counts.iter() {
        lines.push(format!("{:<16}{:>6}", bucket.as_str(), n));
    }
    lines.join("\n")
}

fn format_crosstab(table: &BTreeMap<ClosetType, BucketCounts>) -> String {
    if table.is_empty() {
        return "None".into();
    }

    let label = "closet_type";
    let mut out = format!("{label:<12}");
    for bucket in Bucket::DISPLAY_ORDER {
        let _ = write!(out, "  {}", bucket.as_str());
    }
    for (closet, counts) in table {
        let _ = write!(out, "\n{:<12}", closet.as_str());
        for (bucket, n) in counts.iter() {
            let _ = write!(out, "  {:>w$}", n, w = bucket.as_str().len());
        }
    }
    out
}

fn list_locations(lines: &mut Vec<String>, title: &str, locations: &[(ClosetType, String)]) {
    let locations: Vec<_> = locations
        .iter()
        .filter(|(_, location)| !location.trim().is_empty())
        .collect();
    if locations.is_empty() {
        lines.push(format!("{title}: None"));
        return;
    }
    lines.push(format!("{title}:"));
    for (closet, location) in locations {
        lines.push(format!("- {closet}: {location}"));
    }
}
