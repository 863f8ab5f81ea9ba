//! Per-row classification: due-date parsing, urgency buckets, closet type
//! and the battery suppression rules.

pub mod bucket;
pub mod closet;
pub mod dates;
pub mod fiscal;
pub mod suppress;

pub use bucket::{Bucket, bucket};
pub use closet::{ClosetType, is_noc_contact};
pub use dates::{days_until, parse_date};
pub use suppress::Suppression;
