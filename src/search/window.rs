use serde::Serialize;

use crate::method::Method;
use crate::query::Tolerance;
use crate::reference::{ReferenceData, SubstanceRecord};

/// Closed retention-time interval `[min, max]` around an observed RT
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RtWindow {
    /// Observed RT the window is centred on
    pub center: f64,
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl RtWindow {
    /// Window `[rt * (1 - tol), rt * (1 + tol)]`.
    ///
    /// At `rt = 0` this collapses to the single point 0.
    pub fn new(rt: f64, tolerance: Tolerance) -> Self {
        let fraction = tolerance.fraction();
        Self {
            center: rt,
            min: rt * (1.0 - fraction),
            max: rt * (1.0 + fraction),
        }
    }

    /// Whether `rt` lies inside the window, bounds included
    pub fn contains(&self, rt: f64) -> bool {
        self.min <= rt && rt <= self.max
    }
}

/// Substances whose RT for `method` lies inside `window`, in table order.
///
/// Substances without an RT for the method never match.
pub fn filter_by_window<'a>(
    reference: &'a ReferenceData,
    method: Method,
    window: &RtWindow,
) -> Vec<&'a SubstanceRecord> {
    reference
        .substances()
        .iter()
        .filter(|s| s.rt(method).is_some_and(|rt| window.contains(rt)))
        .collect()
}
