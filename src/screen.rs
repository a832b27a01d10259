//! # Screening Session
//!
//! [`Screener`] runs the user-facing queries against a loaded
//! [`ReferenceData`]:
//!
//! - name search
//! - RT window filter, then fragment filter, plus the LRI of the observed RT
//! - stand-alone LRI calculation
//!
//! Each query that actually runs appends one row to the query log. Outcomes
//! that need the user's attention (nothing found, LRI not computable, log
//! append failed) are reported as [`QueryWarning`]s rather than errors.

use serde::Serialize;
use std::fmt;

use crate::audit::{record_soft, QueryAction, QueryLogEntry, QueryRecorder};
use crate::lri::{compute_lri, LriWarning, RetentionIndex};
use crate::method::Method;
use crate::query::{observed_retention_time, Query, QueryError};
use crate::reference::{ReferenceData, SubstanceRecord};
use crate::search::{filter_by_window, search_by_name, FragmentFilter, NameSearch, RtWindow};

/// Non-fatal conditions to surface alongside a result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryWarning {
    /// Name search matched nothing
    NoNameMatch,
    /// No substance has an RT inside the window
    NoRtMatch,
    /// RT matches exist but none carries all observed fragments
    NoFragmentMatch,
    /// The observed RT has no index value
    Lri(LriWarning),
    /// The query log could not be written
    LogWrite(String),
}

impl fmt::Display for QueryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryWarning::NoNameMatch => write!(f, "No substance found with that name"),
            QueryWarning::NoRtMatch => {
                write!(f, "No substance found within the retention time window")
            }
            QueryWarning::NoFragmentMatch => {
                write!(f, "No substance in the window contains all given fragments")
            }
            QueryWarning::Lri(warning) => write!(f, "{}", warning),
            QueryWarning::LogWrite(msg) => write!(f, "Query log not updated: {}", msg),
        }
    }
}

/// Result of a name search
#[derive(Debug, Clone, Serialize)]
pub struct NameSearchReport<'a> {
    /// Text as entered
    pub query: String,
    /// Search outcome
    pub outcome: NameSearch<'a>,
    /// Log append failure, if any
    pub log_failure: Option<String>,
}

impl NameSearchReport<'_> {
    /// Warnings to show the user
    pub fn warnings(&self) -> Vec<QueryWarning> {
        let mut warnings = Vec::new();
        if matches!(self.outcome, NameSearch::NotFound) {
            warnings.push(QueryWarning::NoNameMatch);
        }
        if let Some(msg) = &self.log_failure {
            warnings.push(QueryWarning::LogWrite(msg.clone()));
        }
        warnings
    }
}

/// A substance that survived screening
#[derive(Debug, Clone, Serialize)]
pub struct Candidate<'a> {
    /// The reference record
    pub substance: &'a SubstanceRecord,
    /// Reference RT on the query's method
    pub rt: f64,
    /// Reference RT minus observed RT
    pub rt_offset: f64,
    /// Reference LRI on the query's method
    pub reference_lri: Option<f64>,
    /// Computed LRI minus reference LRI, when both are known
    pub lri_delta: Option<f64>,
}

/// Result of an RT/fragment screening query
#[derive(Debug, Clone, Serialize)]
pub struct ScreenReport<'a> {
    /// The query that was run
    pub query: Query,
    /// RT window used
    pub window: RtWindow,
    /// Substances passing both filters, closest RT first
    pub candidates: Vec<Candidate<'a>>,
    /// Substances inside the RT window before fragment filtering
    pub rt_matches: usize,
    /// RT matches dropped because their fragment field is malformed
    pub malformed_fragments: usize,
    /// LRI of the observed RT
    pub lri: Result<RetentionIndex, LriWarning>,
    /// Log append failure, if any
    pub log_failure: Option<String>,
}

impl ScreenReport<'_> {
    /// Whether no candidate survived
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Warnings to show the user
    pub fn warnings(&self) -> Vec<QueryWarning> {
        let mut warnings = Vec::new();
        if self.rt_matches == 0 {
            warnings.push(QueryWarning::NoRtMatch);
        } else if self.candidates.is_empty() {
            warnings.push(QueryWarning::NoFragmentMatch);
        }
        if let Err(warning) = self.lri {
            warnings.push(QueryWarning::Lri(warning));
        }
        if let Some(msg) = &self.log_failure {
            warnings.push(QueryWarning::LogWrite(msg.clone()));
        }
        warnings
    }
}

/// Result of a stand-alone LRI calculation
#[derive(Debug, Clone, Serialize)]
pub struct LriReport {
    /// Method used
    pub method: Method,
    /// Observed RT
    pub retention_time: f64,
    /// Index or the reason there is none
    pub lri: Result<RetentionIndex, LriWarning>,
    /// Log append failure, if any
    pub log_failure: Option<String>,
}

impl LriReport {
    /// Warnings to show the user
    pub fn warnings(&self) -> Vec<QueryWarning> {
        let mut warnings = Vec::new();
        if let Err(warning) = self.lri {
            warnings.push(QueryWarning::Lri(warning));
        }
        if let Some(msg) = &self.log_failure {
            warnings.push(QueryWarning::LogWrite(msg.clone()));
        }
        warnings
    }
}

/// Runs queries against reference data and records them
pub struct Screener<'a> {
    reference: &'a ReferenceData,
    recorder: &'a dyn QueryRecorder,
}

impl<'a> Screener<'a> {
    /// Bind reference data and a query recorder
    pub fn new(reference: &'a ReferenceData, recorder: &'a dyn QueryRecorder) -> Self {
        Self {
            reference,
            recorder,
        }
    }

    /// The reference data being queried
    pub fn reference(&self) -> &'a ReferenceData {
        self.reference
    }

    /// Search substances by name.
    ///
    /// An empty query performs no search and logs nothing.
    pub fn search_name(&self, text: &str) -> NameSearchReport<'a> {
        let outcome = search_by_name(self.reference, text);

        let log_failure = if outcome.was_performed() {
            let details = format!(
                "Query: {} | Results: {}",
                text.trim(),
                outcome.matches().len()
            );
            record_soft(
                self.recorder,
                &QueryLogEntry::now(QueryAction::NameSearch, details),
            )
        } else {
            None
        };

        NameSearchReport {
            query: text.to_string(),
            outcome,
            log_failure,
        }
    }

    /// Run the RT window and fragment filters and compute the LRI
    pub fn screen(&self, query: &Query) -> ScreenReport<'a> {
        let window = query.window();
        let in_window = filter_by_window(self.reference, query.method, &window);
        let filtered = FragmentFilter::new(&query.fragments).apply(&in_window);
        let lri = compute_lri(self.reference, query.method, query.retention_time);

        let computed = lri.as_ref().ok().map(|index| index.value);
        let mut candidates: Vec<Candidate<'a>> = filtered
            .matches
            .into_iter()
            .filter_map(|substance| {
                let rt = substance.rt(query.method)?;
                let reference_lri = substance.lri(query.method);
                Some(Candidate {
                    substance,
                    rt,
                    rt_offset: rt - query.retention_time,
                    reference_lri,
                    lri_delta: computed.zip(reference_lri).map(|(c, r)| c - r),
                })
            })
            .collect();
        candidates.sort_by(|a, b| a.rt_offset.abs().total_cmp(&b.rt_offset.abs()));

        let lri_text = match &lri {
            Ok(index) => format!("{:.1}", index.value),
            Err(warning) => warning.to_string(),
        };
        let details = format!(
            "{} | Results: {} | LRI: {}",
            query.describe(),
            candidates.len(),
            lri_text
        );
        let log_failure = record_soft(
            self.recorder,
            &QueryLogEntry::now(QueryAction::Screen, details),
        );

        ScreenReport {
            query: query.clone(),
            window,
            candidates,
            rt_matches: in_window.len(),
            malformed_fragments: filtered.malformed,
            lri,
            log_failure,
        }
    }

    /// Compute the LRI of an observed RT without screening substances.
    ///
    /// The RT is validated and rounded like a screening query's, so both
    /// paths give the same index for the same input.
    pub fn retention_index(
        &self,
        method: Method,
        retention_time: f64,
    ) -> Result<LriReport, QueryError> {
        let retention_time = observed_retention_time(retention_time)?;
        let lri = compute_lri(self.reference, method, retention_time);

        let lri_text = match &lri {
            Ok(index) => format!("{:.1}", index.value),
            Err(warning) => warning.to_string(),
        };
        let details = format!(
            "Method: {} | RT: {:.2} | LRI: {}",
            method, retention_time, lri_text
        );
        let log_failure = record_soft(self.recorder, &QueryLogEntry::now(QueryAction::Lri, details));

        Ok(LriReport {
            method,
            retention_time,
            lri,
            log_failure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryRecorder;
    use crate::query::Tolerance;
    use crate::reference::AlkaneRecord;

    fn reference() -> ReferenceData {
        ReferenceData::new(
            vec![
                SubstanceRecord::new("Cocaína")
                    .with_rt(Method::Db1ms, 10.0)
                    .with_lri(Method::Db1ms, 1150.0)
                    .with_fragment_text("82,182,303"),
                SubstanceRecord::new("Levamisol")
                    .with_rt(Method::Db1ms, 10.3)
                    .with_fragment_text("204,148,101"),
                SubstanceRecord::new("Fenacetina")
                    .with_rt(Method::Db1ms, 9.9)
                    .with_fragment_text("82;182"),
            ],
            vec![
                AlkaneRecord::new(10).with_rt(Method::Db1ms, 8.0),
                AlkaneRecord::new(11).with_rt(Method::Db1ms, 9.0),
                AlkaneRecord::new(12).with_rt(Method::Db1ms, 11.0),
            ],
        )
        .unwrap()
    }

    fn query(rt: f64, tolerance: u8) -> Query {
        Query::new(Method::Db1ms, rt, Tolerance::new(tolerance).unwrap()).unwrap()
    }

    #[test]
    fn test_screen_orders_by_rt_offset() {
        let data = reference();
        let recorder = MemoryRecorder::new();
        let report = Screener::new(&data, &recorder).screen(&query(10.0, 4));

        let names: Vec<_> = report
            .candidates
            .iter()
            .map(|c| c.substance.name.as_str())
            .collect();
        assert_eq!(names, vec!["Cocaína", "Fenacetina", "Levamisol"]);
        assert_eq!(report.rt_matches, 3);
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_screen_computes_lri_delta() {
        let data = reference();
        let recorder = MemoryRecorder::new();
        let report = Screener::new(&data, &recorder).screen(&query(10.0, 4));

        let lri = report.lri.unwrap();
        assert!((lri.value - 1150.0).abs() < 1e-9);

        let cocaine = &report.candidates[0];
        assert_eq!(cocaine.reference_lri, Some(1150.0));
        assert!(cocaine.lri_delta.unwrap().abs() < 1e-9);
        assert_eq!(report.candidates[1].lri_delta, None);
    }

    #[test]
    fn test_fragment_screen_counts_malformed() {
        let data = reference();
        let recorder = MemoryRecorder::new();
        let q = query(10.0, 4).with_fragments(vec![182, 82]);
        let report = Screener::new(&data, &recorder).screen(&q);

        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].substance.name, "Cocaína");
        assert_eq!(report.malformed_fragments, 1);
    }

    #[test]
    fn test_warnings() {
        let data = reference();
        let recorder = MemoryRecorder::new();
        let screener = Screener::new(&data, &recorder);

        let empty = screener.screen(&query(20.0, 1));
        assert_eq!(
            empty.warnings(),
            vec![
                QueryWarning::NoRtMatch,
                QueryWarning::Lri(LriWarning::AboveUpperBracket)
            ]
        );

        let no_fragment = screener.screen(&query(10.0, 4).with_fragments(vec![999]));
        assert_eq!(no_fragment.warnings(), vec![QueryWarning::NoFragmentMatch]);
    }

    #[test]
    fn test_each_query_logs_once() {
        let data = reference();
        let recorder = MemoryRecorder::new();
        let screener = Screener::new(&data, &recorder);

        screener.screen(&query(10.0, 4));
        screener.search_name("   ");
        screener.search_name("coca");
        screener.retention_index(Method::Db1ms, 7.0).unwrap();

        let entries = recorder.entries();
        let actions: Vec<_> = entries.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![QueryAction::Screen, QueryAction::NameSearch, QueryAction::Lri]
        );
        assert!(entries[0].details.contains("Results: 3"));
        assert!(entries[0].details.contains("LRI: 1150.0"));
        assert!(entries[2].details.contains("No LRI computable"));
    }

    #[test]
    fn test_lri_query_matches_screen_lri() {
        let data = reference();
        let recorder = MemoryRecorder::new();
        let screener = Screener::new(&data, &recorder);

        let screened = screener.screen(&query(9.557, 1)).lri.unwrap();
        let standalone = screener.retention_index(Method::Db1ms, 9.557).unwrap();
        assert_eq!(standalone.retention_time, 9.56);
        assert_eq!(standalone.lri.unwrap(), screened);

        let entries = recorder.entries();
        assert!(entries[0].details.contains("RT: 9.56"));
        assert!(entries[1].details.contains("RT: 9.56"));
        assert!(entries[1].details.contains(&format!("LRI: {:.1}", screened.value)));
    }

    #[test]
    fn test_lri_query_rejects_invalid_rt() {
        let data = reference();
        let recorder = MemoryRecorder::new();
        let screener = Screener::new(&data, &recorder);

        assert_eq!(
            screener.retention_index(Method::Db1ms, -3.0).unwrap_err(),
            QueryError::InvalidRetentionTime(-3.0)
        );
        assert!(matches!(
            screener.retention_index(Method::Db1ms, f64::NAN),
            Err(QueryError::InvalidRetentionTime(_))
        ));
        assert!(recorder.entries().is_empty());
    }

    #[test]
    fn test_name_search_not_found() {
        let data = reference();
        let recorder = MemoryRecorder::new();
        let report = Screener::new(&data, &recorder).search_name("morfina");
        assert_eq!(report.warnings(), vec![QueryWarning::NoNameMatch]);
    }
}
