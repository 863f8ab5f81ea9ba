//! Logical fields of the export and the header names accepted for each.
//!
//! Defaults match the production export. An override file is a plain JSON
//! object keyed by field name:
//! ```json
//! {
//!   "contact": ["Contact", "Owner"],
//!   "unit_due": ["Unit EOL Date"]
//! }
//! ```
//! Listed fields replace their default candidates; the rest keep defaults.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Contact,
    Location,
    Ip,
    Mac,
    BatteryType,
    BatteryDue,
    UnitModel,
    UnitSerial,
    UnitDue,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Contact,
        Field::Location,
        Field::Ip,
        Field::Mac,
        Field::BatteryType,
        Field::BatteryDue,
        Field::UnitModel,
        Field::UnitSerial,
        Field::UnitDue,
    ];

    /// Columns whose presence marks a row as a real device row.
    pub const IDENTIFIERS: [Field; 5] = [
        Field::Ip,
        Field::Mac,
        Field::UnitSerial,
        Field::UnitModel,
        Field::BatteryType,
    ];

    /// Name used when reporting an unresolved column.
    pub fn display_name(self) -> &'static str {
        match self {
            Field::Contact => "Contact",
            Field::Location => "UPS Location and Hostname",
            Field::Ip => "IP Address",
            Field::Mac => "MAC Address",
            Field::BatteryType => "Battery Type",
            Field::BatteryDue => "Next Battery Replacement Date",
            Field::UnitModel => "Unit Model",
            Field::UnitSerial => "Unit Serial #",
            Field::UnitDue => "Unit replacement Date",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Field::Contact
                | Field::Location
                | Field::BatteryType
                | Field::BatteryDue
                | Field::UnitDue
        )
    }

    fn default_candidates(self) -> &'static [&'static str] {
        match self {
            Field::Contact => &["Contact"],
            Field::Location => &[
                "UPS Location and Hostname",
                "UPS Location & Hostname",
                "Location and Hostname",
            ],
            Field::Ip => &["IP Address", "IP"],
            Field::Mac => &["MAC Address", "MAC"],
            Field::BatteryType => &["Battery Type", "Battery Model"],
            Field::BatteryDue => &["Next Battery Replacement Date", "Next Battery Replacement"],
            Field::UnitModel => &["Unit Model"],
            Field::UnitSerial => &["Unit Serial #", "Unit Serial", "Serial #", "Serial"],
            Field::UnitDue => &[
                "Unit replacement Date",
                "Unit Replacement Date",
                "Replacement Date",
            ],
        }
    }
}

/// Acceptable header names per [`Field`], tried in order.
#[derive(Debug, Clone)]
pub struct ColumnCandidates {
    entries: HashMap<Field, Vec<String>>,
}

impl Default for ColumnCandidates {
    fn default() -> Self {
        let entries = Field::ALL
            .iter()
            .map(|&f| {
                let names = f.default_candidates().iter().map(|s| s.to_string()).collect();
                (f, names)
            })
            .collect();
        Self { entries }
    }
}

impl ColumnCandidates {
    /// Loads overrides from a JSON file at `path` on top of the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let overrides: HashMap<Field, Vec<String>> = serde_json::from_str(content)?;
        let mut candidates = Self::default();
        for (field, names) in overrides {
            if names.is_empty() {
                return Err(Error::Config(format!(
                    "candidate list for {:?} is empty",
                    field
                )));
            }
            candidates.entries.insert(field, names);
        }
        Ok(candidates)
    }

    pub fn get(&self, field: Field) -> &[String] {
        self.entries.get(&field).map(Vec::as_slice).unwrap_or_default()
    }
}
