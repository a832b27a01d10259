//! # lri-screen - Retention Index Screening for GC-MS
//!
//! `lri-screen` looks up candidate substances for an observed GC retention
//! time (RT) in a reference library and computes the observed peak's Linear
//! Retention Index (LRI) against an n-alkane ladder.
//!
//! ## Key Features
//!
//! - **Five GC methods**: every reference value is kept per method
//!   (DB-1ms, HP-5ms, DB-5ms(SID), DB-5ms(MARGGIE), DB1-ms-4m).
//!
//! - **RT window screening**: substances whose method RT lies within a
//!   symmetric 1-10 % window of the observed RT.
//!
//! - **Fragment confirmation**: optional diagnostic m/z values narrow the
//!   candidates to substances whose fragment list contains all of them.
//!
//! - **LRI interpolation**: linear interpolation between the bracketing
//!   n-alkanes; RTs outside the ladder are reported, never extrapolated.
//!
//! - **Name search**: case-insensitive substring search, accent-aware.
//!
//! - **Query log**: one CSV row per query, appended under a file lock.
//!
//! ## Quick Start
//!
//! ```rust
//! use lri_screen::prelude::*;
//!
//! let substances = "Substância,RT_DB1ms,RT_HP5ms,RT_DB5ms_SID,RT_DB5ms_MARGGIE,RT_4m,Fragmentos (m/z)\n\
//!                   Cocaína,10.0,,,,,\"82,182,303\"\n";
//! let alkanes = "n-Alcano,RT_DB1ms,RT_HP5ms,RT_DB5ms_SID,RT_DB5ms_MARGGIE,RT_4m\n\
//!                10,9.0,,,,\n\
//!                11,11.0,,,,\n";
//!
//! let data = ReferenceData::from_readers(
//!     substances.as_bytes(),
//!     alkanes.as_bytes(),
//!     &LoadOptions::default(),
//! )?;
//!
//! let recorder = NullRecorder;
//! let screener = Screener::new(&data, &recorder);
//!
//! let query = Query::new(Method::Db1ms, 10.0, Tolerance::new(4)?)?.with_fragments(vec![82, 182]);
//! let report = screener.screen(&query);
//!
//! assert_eq!(report.candidates.len(), 1);
//! assert_eq!(report.lri.unwrap().value, 1050.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`reference`]: reference tables and their loader
//! - [`search`]: name search, RT window and fragment filters
//! - [`lri`]: alkane ladder and LRI interpolation
//! - [`screen`]: query orchestration and reports
//! - [`audit`]: append-only query log
//! - [`validator`]: reference data quality report

pub mod audit;
pub mod fragments;
pub mod lri;
pub mod method;
pub mod query;
pub mod reference;
pub mod screen;
pub mod search;
pub mod validator;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::audit::{
        CsvAuditLog, MemoryRecorder, NullRecorder, QueryAction, QueryLogEntry, QueryRecorder,
    };
    pub use crate::fragments::{parse_fragment_field, parse_fragment_input};
    pub use crate::lri::{compute_lri, AlkaneLadder, LriWarning, RetentionIndex};
    pub use crate::method::{Method, MethodValues};
    pub use crate::query::{Query, QueryError, Tolerance};
    pub use crate::reference::{
        AlkaneRecord, LoadOptions, ReferenceData, ReferenceError, SubstanceRecord,
    };
    pub use crate::screen::{Candidate, QueryWarning, ScreenReport, Screener};
    pub use crate::search::{filter_by_window, search_by_name, FragmentFilter, NameSearch, RtWindow};
    pub use crate::validator::{validate_reference, ValidationReport};
}
