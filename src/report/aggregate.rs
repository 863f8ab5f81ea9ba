use std::collections::BTreeMap;

use crate::classify::{Bucket, ClosetType};
use crate::output::sanitize_contact;
use crate::record::Record;

/// Per-bucket tallies in [`Bucket::DISPLAY_ORDER`]. Undated rows are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts([usize; 5]);

impl BucketCounts {
    pub fn from_buckets<I: IntoIterator<Item = Bucket>>(buckets: I) -> Self {
        let mut counts = Self::default();
        for b in buckets {
            counts.add(b);
        }
        counts
    }

    pub fn add(&mut self, bucket: Bucket) {
        if let Some(i) = Bucket::DISPLAY_ORDER.iter().position(|&b| b == bucket) {
            self.0[i] += 1;
        }
    }

    pub fn get(&self, bucket: Bucket) -> usize {
        Bucket::DISPLAY_ORDER
            .iter()
            .position(|&b| b == bucket)
            .map_or(0, |i| self.0[i])
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, usize)> + '_ {
        Bucket::DISPLAY_ORDER.iter().copied().zip(self.0.iter().copied())
    }
}

/// Records sharing a contact folder.
#[derive(Debug, Default)]
pub struct ContactGroup<'a> {
    pub records: Vec<&'a Record>,
}

impl<'a> ContactGroup<'a> {
    /// Battery view rows in `bucket`, in input order.
    pub fn batteries(&self, bucket: Bucket) -> impl Iterator<Item = &'a Record> + '_ {
        self.records
            .iter()
            .copied()
            .filter(move |r| r.in_battery_view() && r.battery_bucket == bucket)
    }

    /// Unit rows in `bucket`, in input order. Suppression never applies.
    pub fn units(&self, bucket: Bucket) -> impl Iterator<Item = &'a Record> + '_ {
        self.records
            .iter()
            .copied()
            .filter(move |r| r.unit_bucket == bucket)
    }
}

/// Groups records by sanitized contact folder name. Contacts that sanitize
/// to the same name share one folder.
pub fn group_by_contact(records: &[Record]) -> BTreeMap<String, ContactGroup<'_>> {
    let mut groups: BTreeMap<String, ContactGroup<'_>> = BTreeMap::new();
    for record in records {
        groups
            .entry(sanitize_contact(&record.contact))
            .or_default()
            .records
            .push(record);
    }
    groups
}

/// Dated, unsuppressed battery rows.
pub fn battery_view(records: &[Record]) -> impl Iterator<Item = &Record> {
    records.iter().filter(|r| r.in_battery_view())
}

/// Closet type by bucket cross-tabulation. Closets with no dated rows are omitted.
pub fn crosstab<'a, I, F>(records: I, key: F) -> BTreeMap<ClosetType, BucketCounts>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> Bucket,
{
    let mut table: BTreeMap<ClosetType, BucketCounts> = BTreeMap::new();
    for record in records {
        let b = key(record);
        if b.is_dated() {
            table.entry(record.closet_type).or_default().add(b);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::record;

    #[test]
    fn test_bucket_counts_skip_no_date() {
        let counts = BucketCounts::from_buckets([
            Bucket::Overdue,
            Bucket::Overdue,
            Bucket::NoDate,
            Bucket::TwelvePlusMonths,
        ]);
        assert_eq!(counts.get(Bucket::Overdue), 2);
        assert_eq!(counts.get(Bucket::NoDate), 0);
        assert_eq!(counts.total(), 3);
        let order: Vec<_> = counts.iter().map(|(b, _)| b).collect();
        assert_eq!(order, Bucket::DISPLAY_ORDER.to_vec());
    }

    #[test]
    fn test_group_by_contact_keys_on_folder_name() {
        let records = vec![
            record("Jane O'Brien", "MDF", Some(10), Some(400)),
            record("Jane OBrien", "IDF", Some(10), Some(400)),
            record("", "IDF", Some(10), Some(400)),
            record("UNASSIGNED", "IDF", Some(10), Some(400)),
        ];
        let groups = group_by_contact(&records);
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(keys, vec!["Jane_OBrien", "UNASSIGNED"]);
        assert_eq!(groups["Jane_OBrien"].records.len(), 2);
        assert_eq!(groups["UNASSIGNED"].records.len(), 2);
    }

    #[test]
    fn test_group_views_respect_suppression() {
        let records = vec![
            record("NOC", "MDF", Some(-5), Some(-20)),
            record("NOC", "MDF", Some(10), Some(400)),
            record("NOC", "MDF", None, Some(-1)),
        ];
        let groups = group_by_contact(&records);
        let noc = &groups["NOC"];

        assert_eq!(noc.batteries(Bucket::Overdue).count(), 0);
        assert_eq!(noc.batteries(Bucket::ZeroToThreeMonths).count(), 1);
        assert_eq!(noc.units(Bucket::Overdue).count(), 2);
        assert_eq!(noc.units(Bucket::TwelvePlusMonths).count(), 1);

        let battery_total: usize = Bucket::DISPLAY_ORDER
            .iter()
            .map(|&b| noc.batteries(b).count())
            .sum();
        assert_eq!(battery_total, battery_view(&records).count());
    }

    #[test]
    fn test_crosstab_by_closet() {
        let records = vec![
            record("NOC", "MDF-1", Some(-5), Some(-20)),
            record("NOC", "IDF-2", Some(-5), Some(500)),
            record("NOC", "Lobby", None, None),
        ];
        let units = crosstab(&records, |r| r.unit_bucket);
        assert_eq!(units.len(), 2);
        assert_eq!(units[&ClosetType::Mdf].get(Bucket::Overdue), 1);
        assert_eq!(units[&ClosetType::Idf].get(Bucket::TwelvePlusMonths), 1);
        assert!(!units.contains_key(&ClosetType::Unknown));
    }
}
