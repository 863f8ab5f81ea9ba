//! Output layout and CSV persistence for bucketed records.
//!
//! ```text
//! <outdir>/<MM-DD-YYYY>/by_contact/<contact>/batteries/<bucket>.csv
//! <outdir>/<MM-DD-YYYY>/by_contact/<contact>/units/<bucket>.csv
//! <outdir>/<MM-DD-YYYY>/summary.txt
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDate;
use csv::WriterBuilder;
use regex::Regex;
use tracing::debug;

use crate::classify::Bucket;
use crate::columns::ColumnMap;
use crate::config::Field;
use crate::error::Result;
use crate::record::{Record, UNASSIGNED};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").unwrap());

/// Turns a contact into a folder name: whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_-]` is dropped, and empty or `nan` becomes
/// `UNASSIGNED`. Applying it twice changes nothing.
pub fn sanitize_contact(raw: &str) -> String {
    let s = raw.trim();
    let s = WHITESPACE.replace_all(s, "_");
    let s = DISALLOWED.replace_all(&s, "");
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        UNASSIGNED.to_string()
    } else {
        s.into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(outdir: &Path, run_date: NaiveDate) -> Self {
        Self {
            root: outdir.join(run_date.format("%m-%d-%Y").to_string()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contact_dir(&self, folder: &str) -> PathBuf {
        self.root.join("by_contact").join(folder)
    }

    pub fn battery_csv(&self, folder: &str, bucket: Bucket) -> PathBuf {
        self.contact_dir(folder).join("batteries").join(bucket.file_name())
    }

    pub fn unit_csv(&self, folder: &str, bucket: Bucket) -> PathBuf {
        self.contact_dir(folder).join("units").join(bucket.file_name())
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root.join("summary.txt")
    }
}

/// Resolved columns written to a bucket file, in output order.
#[derive(Debug, Clone)]
pub struct OutputColumns {
    fields: Vec<(Field, String)>,
}

impl OutputColumns {
    pub fn battery(columns: &ColumnMap) -> Self {
        Self::pick(
            columns,
            &[Field::Contact, Field::Location, Field::BatteryType, Field::BatteryDue],
        )
    }

    /// Model and serial sit between location and due date when present.
    pub fn unit(columns: &ColumnMap) -> Self {
        Self::pick(
            columns,
            &[
                Field::Contact,
                Field::Location,
                Field::UnitModel,
                Field::UnitSerial,
                Field::UnitDue,
            ],
        )
    }

    fn pick(columns: &ColumnMap, wanted: &[Field]) -> Self {
        let fields = wanted
            .iter()
            .filter_map(|&f| columns.name(f).map(|name| (f, name.to_string())))
            .collect();
        Self { fields }
    }

    pub fn headers(&self) -> Vec<&str> {
        self.fields.iter().map(|(_, name)| name.as_str()).collect()
    }

    pub fn values(&self, record: &Record) -> Vec<String> {
        self.fields
            .iter()
            .map(|(f, _)| field_value(record, *f))
            .collect()
    }
}

fn field_value(record: &Record, field: Field) -> String {
    let date = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
    let text = |t: &Option<String>| t.clone().unwrap_or_default();

    match field {
        Field::Contact => record.contact.clone(),
        Field::Location => record.location.clone(),
        Field::Ip => text(&record.ip),
        Field::Mac => text(&record.mac),
        Field::BatteryType => text(&record.battery_type),
        Field::BatteryDue => date(record.battery_due),
        Field::UnitModel => text(&record.unit_model),
        Field::UnitSerial => text(&record.unit_serial),
        Field::UnitDue => date(record.unit_due),
    }
}

/// Writes `records` under `columns` to a fresh CSV at `path`, creating parent
/// directories. An existing file is replaced.
pub fn write_bucket_csv<'a, I>(path: &Path, columns: &OutputColumns, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(columns.headers())?;

    let mut rows = 0;
    for record in records {
        writer.write_record(columns.values(record))?;
        rows += 1;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows, "Bucket CSV written");
    Ok(rows)
}
