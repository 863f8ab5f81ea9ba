//! End-to-end run: load, resolve, filter, classify, write.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::classify::Bucket;
use crate::columns::ColumnMap;
use crate::config::ColumnCandidates;
use crate::error::Result;
use crate::filter::filter_device_rows;
use crate::output::{OutputColumns, OutputLayout, write_bucket_csv};
use crate::record::Record;
use crate::report::{Summary, group_by_contact};
use crate::table::{Table, load_table};

/// Records ready for output, plus what happened on the way.
#[derive(Debug)]
pub struct Classified {
    pub columns: ColumnMap,
    pub records: Vec<Record>,
    pub rows_loaded: usize,
    pub rows_dropped: usize,
}

/// Files written per contact and bucket.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Written {
    pub battery_files: Vec<PathBuf>,
    pub unit_files: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct RunReport {
    pub out_root: PathBuf,
    pub summary_path: PathBuf,
    pub rows_loaded: usize,
    pub rows_dropped: usize,
    pub records: usize,
    pub suppressed: usize,
    pub suppressed_by_proximity: usize,
    pub suppressed_both_overdue: usize,
    pub written: Written,
}

/// Resolves columns, drops non-device rows and classifies the rest against
/// `run_date`.
#[tracing::instrument(skip_all, fields(rows = table.len(), run_date = %run_date))]
pub fn classify_table(
    table: Table,
    candidates: &ColumnCandidates,
    run_date: NaiveDate,
) -> Result<Classified> {
    let columns = ColumnMap::resolve(&table.headers, candidates)?;
    let rows_loaded = table.len();
    let filtered = filter_device_rows(table, &columns);

    let mut bad_battery_dates = 0;
    let mut bad_unit_dates = 0;
    let records: Vec<Record> = filtered
        .rows
        .iter()
        .map(|row| {
            let (record, issues) = Record::from_row(row, &columns, run_date);
            bad_battery_dates += usize::from(issues.battery);
            bad_unit_dates += usize::from(issues.unit);
            record
        })
        .collect();

    if bad_battery_dates > 0 || bad_unit_dates > 0 {
        warn!(
            bad_battery_dates,
            bad_unit_dates, "Unparseable due dates treated as NO_DATE"
        );
    }

    Ok(Classified {
        columns,
        records,
        rows_loaded,
        rows_dropped: filtered.dropped,
    })
}

/// Writes every non-empty (contact, bucket) CSV for both views.
#[tracing::instrument(skip_all, fields(root = %layout.root().display()))]
pub fn write_contact_files(classified: &Classified, layout: &OutputLayout) -> Result<Written> {
    let battery_columns = OutputColumns::battery(&classified.columns);
    let unit_columns = OutputColumns::unit(&classified.columns);
    let mut written = Written::default();

    for (folder, group) in group_by_contact(&classified.records) {
        for bucket in Bucket::DISPLAY_ORDER {
            let batteries: Vec<&Record> = group.batteries(bucket).collect();
            if !batteries.is_empty() {
                let path = layout.battery_csv(&folder, bucket);
                write_bucket_csv(&path, &battery_columns, batteries)?;
                written.battery_files.push(path);
            }
        }

        for bucket in Bucket::DISPLAY_ORDER {
            let units: Vec<&Record> = group.units(bucket).collect();
            if !units.is_empty() {
                let path = layout.unit_csv(&folder, bucket);
                write_bucket_csv(&path, &unit_columns, units)?;
                written.unit_files.push(path);
            }
        }
    }

    info!(
        battery_files = written.battery_files.len(),
        unit_files = written.unit_files.len(),
        "Contact files written"
    );
    Ok(written)
}

/// Runs the whole batch for `input`, writing under `outdir/<MM-DD-YYYY>`.
#[tracing::instrument(skip_all, fields(input = %input.display(), outdir = %outdir.display()))]
pub fn run(
    input: &Path,
    outdir: &Path,
    candidates: &ColumnCandidates,
    run_date: NaiveDate,
) -> Result<RunReport> {
    let table = load_table(input)?;
    let classified = classify_table(table, candidates, run_date)?;

    let layout = OutputLayout::new(outdir, run_date);
    fs::create_dir_all(layout.root())?;

    let written = write_contact_files(&classified, &layout)?;

    let summary = Summary::build(&classified.records, run_date, input);
    let summary_path = layout.summary_path();
    fs::write(&summary_path, summary.render())?;

    let records = &classified.records;
    let report = RunReport {
        out_root: layout.root().to_path_buf(),
        summary_path,
        rows_loaded: classified.rows_loaded,
        rows_dropped: classified.rows_dropped,
        records: records.len(),
        suppressed: summary.suppressed,
        suppressed_by_proximity: records.iter().filter(|r| r.suppression.proximity).count(),
        suppressed_both_overdue: records.iter().filter(|r| r.suppression.both_overdue).count(),
        written,
    };

    info!(
        records = report.records,
        suppressed = report.suppressed,
        proximity = report.suppressed_by_proximity,
        both_overdue = report.suppressed_both_overdue,
        "Run complete"
    );
    Ok(report)
}
