//! Resolves loosely-named spreadsheet headers to logical [`Field`]s.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::config::{ColumnCandidates, Field};
use crate::error::{Error, Result};

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lowercases and strips everything but ASCII letters and digits.
pub fn normalize(s: &str) -> String {
    NON_ALNUM
        .replace_all(&s.trim().to_lowercase(), "")
        .into_owned()
}

/// Returns the index of the first header matching any candidate, trying
/// candidates in order.
pub fn find_column<S: AsRef<str>>(headers: &[String], candidates: &[S]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize(h)).collect();
    candidates.iter().find_map(|cand| {
        let key = normalize(cand.as_ref());
        normalized.iter().position(|h| *h == key)
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Header text exactly as it appears in the export.
    pub name: String,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct ColumnMap {
    resolved: HashMap<Field, ResolvedColumn>,
}

impl ColumnMap {
    /// Resolves every field, failing if any required one is absent.
    pub fn resolve(headers: &[String], candidates: &ColumnCandidates) -> Result<Self> {
        let mut resolved = HashMap::new();
        let mut missing = Vec::new();

        for field in Field::ALL {
            match find_column(headers, candidates.get(field)) {
                Some(index) => {
                    debug!(?field, header = %headers[index], "Column resolved");
                    resolved.insert(
                        field,
                        ResolvedColumn {
                            name: headers[index].clone(),
                            index,
                        },
                    );
                }
                None if field.is_required() => missing.push(field.display_name().to_string()),
                None => debug!(?field, "Optional column absent"),
            }
        }

        if !missing.is_empty() {
            return Err(Error::MissingColumns {
                missing,
                found: headers.to_vec(),
            });
        }

        info!(resolved = resolved.len(), "Columns resolved");
        Ok(Self { resolved })
    }

    pub fn get(&self, field: Field) -> Option<&ResolvedColumn> {
        self.resolved.get(&field)
    }

    /// Header name for a field. Required fields are always present.
    pub fn name(&self, field: Field) -> Option<&str> {
        self.get(field).map(|c| c.name.as_str())
    }

    pub fn index(&self, field: Field) -> Option<usize> {
        self.get(field).map(|c| c.index)
    }

    /// Identifier columns that actually exist in this export.
    pub fn identifier_indices(&self) -> Vec<usize> {
        Field::IDENTIFIERS
            .iter()
            .filter_map(|&f| self.index(f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  UPS Location & Hostname "), "upslocationhostname");
        assert_eq!(normalize("Unit Serial #"), "unitserial");
        assert_eq!(normalize("IP-Address"), "ipaddress");
    }

    #[test]
    fn test_find_column_prefers_candidate_order() {
        let h = headers(&["Serial", "Unit Serial #"]);
        assert_eq!(find_column(&h, &["Unit Serial #", "Serial"]), Some(1));
        assert_eq!(find_column(&h, &["Serial #", "Serial"]), Some(0));
        assert_eq!(find_column(&h, &["MAC"]), None);
    }

    #[test]
    fn test_find_column_returns_first_matching_header() {
        let h = headers(&["Contact", "contact "]);
        assert_eq!(find_column(&h, &["CONTACT"]), Some(0));
    }

    #[test]
    fn test_resolve_with_loose_headers() {
        let h = headers(&[
            "contact",
            "UPS Location & Hostname",
            "battery type",
            "Next Battery Replacement",
            "Unit Replacement Date",
        ]);
        let map = ColumnMap::resolve(&h, &ColumnCandidates::default()).unwrap();
        assert_eq!(map.name(Field::Location), Some("UPS Location & Hostname"));
        assert_eq!(map.index(Field::UnitDue), Some(4));
        assert!(map.get(Field::Ip).is_none());
        assert_eq!(map.identifier_indices(), vec![2]);
    }

    #[test]
    fn test_resolve_reports_missing_and_found() {
        let h = headers(&["Contact", "Location and Hostname", "Battery Type"]);
        let err = ColumnMap::resolve(&h, &ColumnCandidates::default()).unwrap_err();
        match err {
            Error::MissingColumns { missing, found } => {
                assert_eq!(
                    missing,
                    vec!["Next Battery Replacement Date", "Unit replacement Date"]
                );
                assert_eq!(found, h);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
