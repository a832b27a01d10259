//! # Reference Data
//!
//! In-memory reference tables: the substance library and the n-alkane ladder.
//!
//! Both tables are exported from the reference workbook as delimited text
//! (one file per sheet) and loaded once into a [`ReferenceData`] value, which
//! is then shared read-only by every search and by the LRI calculator.
//!
//! ## Integrity checks
//!
//! The LRI calculator brackets an observed RT between neighbouring alkanes,
//! so the alkane table must be ordered by carbon number, and carbon number
//! must be monotonic with RT for every method. These assumptions are checked
//! when the data is loaded and a violation is reported as
//! [`ReferenceError::DataIntegrity`].

mod error;
mod loader;


use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub use error::ReferenceError;
pub use loader::LoadOptions;

use crate::fragments::parse_fragment_field;
use crate::method::{Method, MethodValues};

/// A substance from the reference library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceRecord {
    /// Substance name
    pub name: String,

    /// Retention time per method (minutes)
    pub retention_times: MethodValues,

    /// Published linear retention index per method
    pub reference_lri: MethodValues,

    /// Fragment field exactly as it appears in the table
    pub fragment_text: String,

    /// Parsed fragment list; `None` when the field is malformed
    pub fragments: Option<Vec<u32>>,

    /// Free-text notes
    pub notes: String,
}

impl SubstanceRecord {
    /// Create a record with the given name and no reference values
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            retention_times: MethodValues::new(),
            reference_lri: MethodValues::new(),
            fragment_text: String::new(),
            fragments: Some(Vec::new()),
            notes: String::new(),
        }
    }

    /// Set the retention time for a method
    pub fn with_rt(mut self, method: Method, rt: f64) -> Self {
        self.retention_times.set(method, Some(rt));
        self
    }

    /// Set the reference LRI for a method
    pub fn with_lri(mut self, method: Method, lri: f64) -> Self {
        self.reference_lri.set(method, Some(lri));
        self
    }

    /// Set the fragment field from its textual form
    pub fn with_fragment_text(mut self, text: &str) -> Self {
        self.fragments = parse_fragment_field(text).ok();
        self.fragment_text = text.to_string();
        self
    }

    /// Set free-text notes
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    /// Retention time for a method
    pub fn rt(&self, method: Method) -> Option<f64> {
        self.retention_times.get(method)
    }

    /// Reference LRI for a method
    pub fn lri(&self, method: Method) -> Option<f64> {
        self.reference_lri.get(method)
    }

    /// Whether the fragment field failed to parse
    pub fn has_malformed_fragments(&self) -> bool {
        self.fragments.is_none()
    }
}

/// An n-alkane reference point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlkaneRecord {
    /// Carbon count (C10 -> 10)
    pub carbon_count: u32,

    /// Retention time per method (minutes)
    pub retention_times: MethodValues,
}

impl AlkaneRecord {
    /// Create an alkane with no retention times
    pub fn new(carbon_count: u32) -> Self {
        Self {
            carbon_count,
            retention_times: MethodValues::new(),
        }
    }

    /// Set the retention time for a method
    pub fn with_rt(mut self, method: Method, rt: f64) -> Self {
        self.retention_times.set(method, Some(rt));
        self
    }

    /// Retention time for a method
    pub fn rt(&self, method: Method) -> Option<f64> {
        self.retention_times.get(method)
    }
}

/// The loaded reference tables.
///
/// Construct once and pass by reference; nothing in the crate mutates it.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    substances: Vec<SubstanceRecord>,
    alkanes: Vec<AlkaneRecord>,
}

impl ReferenceData {
    /// Build reference data from already-parsed records, checking integrity
    pub fn new(
        substances: Vec<SubstanceRecord>,
        alkanes: Vec<AlkaneRecord>,
    ) -> Result<Self, ReferenceError> {
        check_substances(&substances)?;
        check_alkanes(&alkanes)?;
        Ok(Self {
            substances,
            alkanes,
        })
    }

    /// Load both tables from delimited text files
    pub fn from_csv_files<P: AsRef<Path>, Q: AsRef<Path>>(
        substances: P,
        alkanes: Q,
        options: &LoadOptions,
    ) -> Result<Self, ReferenceError> {
        let substances = BufReader::new(File::open(substances)?);
        let alkanes = BufReader::new(File::open(alkanes)?);
        Self::from_readers(substances, alkanes, options)
    }

    /// Load both tables from readers
    pub fn from_readers<R: Read, S: Read>(
        substances: R,
        alkanes: S,
        options: &LoadOptions,
    ) -> Result<Self, ReferenceError> {
        let substances = loader::read_substances(substances, options)?;
        let alkanes = loader::read_alkanes(alkanes, options)?;
        Self::new(substances, alkanes)
    }

    /// All substances, in table order
    pub fn substances(&self) -> &[SubstanceRecord] {
        &self.substances
    }

    /// All alkanes, in table order
    pub fn alkanes(&self) -> &[AlkaneRecord] {
        &self.alkanes
    }
}

fn check_rt(value: f64, what: impl FnOnce() -> String) -> Result<(), ReferenceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ReferenceError::DataIntegrity(format!(
            "{} has invalid retention time {}",
            what(),
            value
        )))
    }
}

fn check_substances(substances: &[SubstanceRecord]) -> Result<(), ReferenceError> {
    for substance in substances {
        for (method, rt) in substance.retention_times.iter() {
            check_rt(rt, || format!("Substance '{}' ({})", substance.name, method))?;
        }
    }
    Ok(())
}

fn check_alkanes(alkanes: &[AlkaneRecord]) -> Result<(), ReferenceError> {
    for pair in alkanes.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.carbon_count <= prev.carbon_count {
            return Err(ReferenceError::DataIntegrity(format!(
                "Alkane table is not sorted by carbon number (C{} follows C{})",
                next.carbon_count, prev.carbon_count
            )));
        }
    }

    if let Some(alkane) = alkanes.iter().find(|a| a.carbon_count == 0) {
        return Err(ReferenceError::DataIntegrity(format!(
            "Alkane carbon count must be at least 1, found {}",
            alkane.carbon_count
        )));
    }

    for method in Method::ALL {
        let mut previous: Option<(u32, f64)> = None;
        for alkane in alkanes {
            let Some(rt) = alkane.rt(method) else {
                continue;
            };
            check_rt(rt, || format!("Alkane C{} ({})", alkane.carbon_count, method))?;

            if let Some((prev_n, prev_rt)) = previous {
                if rt < prev_rt {
                    return Err(ReferenceError::DataIntegrity(format!(
                        "{}: C{} elutes at {} before C{} at {}",
                        method, alkane.carbon_count, rt, prev_n, prev_rt
                    )));
                }
                if rt == prev_rt {
                    warn!(
                        "{}: C{} and C{} share retention time {}",
                        method, prev_n, alkane.carbon_count, rt
                    );
                }
            }
            previous = Some((alkane.carbon_count, rt));
        }
    }

    Ok(())
}
