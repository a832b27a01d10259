//! A single screening request.

use serde::Serialize;
use std::fmt;

use crate::method::Method;
use crate::search::RtWindow;

/// Errors raised when a query's parameters are out of range
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// Tolerance outside the 1-10 % range
    #[error("Tolerance must be between {min} and {max} %, got {0}", min = Tolerance::MIN, max = Tolerance::MAX)]
    ToleranceOutOfRange(u8),

    /// Retention time negative or not a number
    #[error("Retention time must be a non-negative number, got {0}")]
    InvalidRetentionTime(f64),
}

/// Symmetric RT tolerance in whole percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Tolerance(u8);

impl Tolerance {
    /// Smallest accepted tolerance
    pub const MIN: u8 = 1;
    /// Largest accepted tolerance
    pub const MAX: u8 = 10;

    /// Validate a tolerance percentage
    pub fn new(percent: u8) -> Result<Self, QueryError> {
        if (Self::MIN..=Self::MAX).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(QueryError::ToleranceOutOfRange(percent))
        }
    }

    /// Tolerance in percent
    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Tolerance as a fraction (4 % -> 0.04)
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Validate an observed retention time and round it to two decimals,
/// matching the precision of the interactive input.
pub fn observed_retention_time(retention_time: f64) -> Result<f64, QueryError> {
    if !retention_time.is_finite() || retention_time < 0.0 {
        return Err(QueryError::InvalidRetentionTime(retention_time));
    }
    let rounded = (retention_time * 100.0).round() / 100.0;
    if !rounded.is_finite() {
        return Err(QueryError::InvalidRetentionTime(retention_time));
    }
    Ok(rounded)
}

/// Method, observed RT, tolerance and optional diagnostic fragments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    /// Method whose reference columns apply
    pub method: Method,
    /// Observed retention time (minutes, two decimals)
    pub retention_time: f64,
    /// RT tolerance
    pub tolerance: Tolerance,
    /// Observed fragments, in entry order
    pub fragments: Vec<u32>,
}

impl Query {
    /// Create a query without fragments.
    ///
    /// The retention time goes through [`observed_retention_time`].
    pub fn new(method: Method, retention_time: f64, tolerance: Tolerance) -> Result<Self, QueryError> {
        Ok(Self {
            method,
            retention_time: observed_retention_time(retention_time)?,
            tolerance,
            fragments: Vec::new(),
        })
    }

    /// Attach observed fragments
    pub fn with_fragments(mut self, fragments: Vec<u32>) -> Self {
        self.fragments = fragments;
        self
    }

    /// RT window implied by the observed RT and tolerance
    pub fn window(&self) -> RtWindow {
        RtWindow::new(self.retention_time, self.tolerance)
    }

    /// One-line description used for the query log
    pub fn describe(&self) -> String {
        let fragments = if self.fragments.is_empty() {
            "-".to_string()
        } else {
            self.fragments
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        format!(
            "Method: {} | RT: {:.2} | Tolerance: {} | Fragments: {}",
            self.method, self.retention_time, self.tolerance, fragments
        )
    }
}
