//! # Linear Retention Index
//!
//! The LRI of an observed retention time `t` is interpolated between the two
//! n-alkanes that bracket it on the same method:
//!
//! ```text
//! LRI = 100 * (n_k + (t - RT_k) / (RT_k+1 - RT_k))
//! ```
//!
//! where `k` is the latest-eluting alkane with `RT_k < t` and `k+1` is the
//! alkane that follows it in the full ladder. The ladder's `k+1` is taken
//! from the complete RT ordering, not from the subset below `t`, so an alkane
//! eluting exactly at `t` becomes the upper bracket and yields `100 * n`.
//!
//! Observed RTs outside the ladder are never extrapolated.

use serde::Serialize;

use crate::method::Method;
use crate::reference::ReferenceData;

/// Reasons no index value is produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, thiserror::Error)]
pub enum LriWarning {
    /// Fewer than two alkanes have an RT for the method
    #[error("No LRI computable: fewer than two reference alkanes for this method")]
    InsufficientAlkanes,

    /// No alkane elutes before the observed RT
    #[error("No LRI computable: retention time is below the first reference alkane")]
    BelowLowerBracket,

    /// The lower bracket is the last alkane in the ladder
    #[error("Retention time is above the upper alkane bracket")]
    AboveUpperBracket,

    /// The bracketing alkanes do not span a positive, finite RT interval
    #[error("No LRI computable: bracketing alkanes do not span a valid retention time interval")]
    DegenerateBracket,
}

impl LriWarning {
    /// Whether this is the "above upper bracket" case rather than
    /// "no LRI computable"
    pub fn is_above_upper_bracket(&self) -> bool {
        matches!(self, LriWarning::AboveUpperBracket)
    }
}

/// One rung of the alkane ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LadderPoint {
    /// Carbon count
    pub carbon_count: u32,
    /// Retention time on the ladder's method
    pub rt: f64,
}

/// An interpolated retention index with the alkanes used to derive it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetentionIndex {
    /// Index value
    pub value: f64,
    /// Lower bracketing alkane
    pub lower: LadderPoint,
    /// Upper bracketing alkane
    pub upper: LadderPoint,
}

/// Alkane reference points for one method, ascending by RT
#[derive(Debug, Clone, PartialEq)]
pub struct AlkaneLadder {
    method: Method,
    points: Vec<LadderPoint>,
}

impl AlkaneLadder {
    /// Build the ladder for `method`, dropping alkanes without an RT
    pub fn for_method(reference: &ReferenceData, method: Method) -> Self {
        let points = reference
            .alkanes()
            .iter()
            .filter_map(|a| {
                a.rt(method).map(|rt| LadderPoint {
                    carbon_count: a.carbon_count,
                    rt,
                })
            })
            .collect();
        Self::from_points(method, points)
    }

    /// Build a ladder from explicit points; they are sorted by RT (stable)
    pub fn from_points(method: Method, mut points: Vec<LadderPoint>) -> Self {
        points.sort_by(|a, b| a.rt.total_cmp(&b.rt));
        Self { method, points }
    }

    /// Method the ladder belongs to
    pub fn method(&self) -> Method {
        self.method
    }

    /// Ladder points, ascending by RT
    pub fn points(&self) -> &[LadderPoint] {
        &self.points
    }

    /// Interpolate the retention index of `rt`
    pub fn retention_index(&self, rt: f64) -> Result<RetentionIndex, LriWarning> {
        if self.points.len() < 2 {
            return Err(LriWarning::InsufficientAlkanes);
        }

        // Number of rungs eluting strictly before `rt`.
        let below = self.points.partition_point(|p| p.rt < rt);
        if below == 0 {
            return Err(LriWarning::BelowLowerBracket);
        }

        let lower = self.points[below - 1];
        let upper = *self
            .points
            .get(below)
            .ok_or(LriWarning::AboveUpperBracket)?;

        let span = upper.rt - lower.rt;
        if !span.is_finite() || span <= 0.0 {
            return Err(LriWarning::DegenerateBracket);
        }

        let value = 100.0 * (f64::from(lower.carbon_count) + (rt - lower.rt) / span);
        Ok(RetentionIndex {
            value,
            lower,
            upper,
        })
    }
}

/// Compute the LRI of `rt` on `method` against the reference alkanes
pub fn compute_lri(
    reference: &ReferenceData,
    method: Method,
    rt: f64,
) -> Result<RetentionIndex, LriWarning> {
    AlkaneLadder::for_method(reference, method).retention_index(rt)
}
