//! Grouping of classified records and the plain-text summary report.
//!
//! [`aggregate`] partitions records by contact folder and tallies buckets;
//! [`summary`] turns those tallies into `summary.txt`.

pub mod aggregate;
pub mod summary;

pub use aggregate::{BucketCounts, ContactGroup, group_by_contact};
pub use summary::Summary;
