//! # Reference Data Validation
//!
//! Quality checks on loaded reference tables. Loading already rejects data
//! that would make results wrong (unsorted alkanes, negative RTs); the checks
//! here report gaps that make results incomplete.
//!
//! ## Validation Checklist
//!
//! 1. **Substances**: table not empty, per-method RT coverage, malformed
//!    fragment fields, duplicate names
//! 2. **Alkanes**: per-method ladder size, tied retention times
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lri_screen::reference::{LoadOptions, ReferenceData};
//! use lri_screen::validator::validate_reference;
//!
//! let data = ReferenceData::from_csv_files("substances.csv", "alkanes.csv", &LoadOptions::default())?;
//! let report = validate_reference(&data, "substances.csv + alkanes.csv");
//! println!("{}", report);
//! # Ok::<(), lri_screen::reference::ReferenceError>(())
//! ```

pub use report::{CheckArea, CheckCounts, CheckStatus, ValidationCheck, ValidationReport};

mod alkanes;
mod report;
mod substances;

use crate::reference::ReferenceData;

/// Main validation entry point
pub fn validate_reference(reference: &ReferenceData, source: &str) -> ValidationReport {
    let mut report = ValidationReport::new(source);

    // 1. Substance library
    substances::check_substances(reference, &mut report);

    // 2. Alkane ladders
    alkanes::check_alkanes(reference, &mut report);

    report
}

/// Join at most `limit` names, noting how many were left out
fn summarize_names<'a>(names: impl Iterator<Item = &'a str>, limit: usize) -> String {
    let names: Vec<&str> = names.collect();
    let shown = names.iter().take(limit).copied().collect::<Vec<_>>().join(", ");
    if names.len() > limit {
        format!("{} (and {} more)", shown, names.len() - limit)
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::reference::{AlkaneRecord, SubstanceRecord};

    #[test]
    fn test_validation_report_display() {
        let mut report = ValidationReport::new("test tables");
        report.add_check(ValidationCheck::ok(CheckArea::Substances, "Test check 1"));
        report.add_check(ValidationCheck::warning(
            CheckArea::Alkanes,
            "Test check 2",
            "This is a warning",
        ));
        report.add_check(ValidationCheck::failed(
            CheckArea::Substances,
            "Test check 3",
            "This failed",
        ));

        let output = format!("{}", report);
        assert!(output.contains("Source: test tables"));
        assert!(output.contains("  [✓] Test check 1"));
        assert!(output.contains("  [⚠] Test check 2 - WARNING: This is a warning"));
        assert!(output.contains("  [✗] Test check 3 - FAILED: This failed"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
        assert!(output.contains("Reference data unusable for screening"));

        // Checks are grouped by table, substances first
        let substances = output.find("Substance table").unwrap();
        let third = output.find("Test check 3").unwrap();
        let alkanes = output.find("Alkane table").unwrap();
        assert!(substances < third && third < alkanes);

        assert_eq!(
            report.counts(),
            CheckCounts {
                passed: 1,
                warnings: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn test_report_serializes_checks() {
        let mut report = ValidationReport::new("json");
        report.add_check(ValidationCheck::warning(
            CheckArea::Alkanes,
            "Alkane ladder HP-5ms",
            "1 reference alkane(s)",
        ));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["source"], "json");
        assert_eq!(json["checks"][0]["area"], "Alkanes");
        assert_eq!(json["checks"][0]["status"]["status"], "Warning");
        assert_eq!(json["checks"][0]["status"]["message"], "1 reference alkane(s)");
    }

    #[test]
    fn test_empty_library_fails() {
        let report = validate_reference(&ReferenceData::default(), "empty");
        assert!(report.has_failures());
    }

    #[test]
    fn test_complete_data_passes() {
        let mut substance = SubstanceRecord::new("Cafeína").with_fragment_text("194,109");
        let mut alkanes = vec![AlkaneRecord::new(10), AlkaneRecord::new(11)];
        for (i, method) in Method::ALL.into_iter().enumerate() {
            substance = substance.with_rt(method, 7.0 + i as f64);
            alkanes[0] = alkanes[0].clone().with_rt(method, 5.0);
            alkanes[1] = alkanes[1].clone().with_rt(method, 9.0);
        }

        let data = ReferenceData::new(vec![substance], alkanes).unwrap();
        let report = validate_reference(&data, "complete");
        assert!(!report.has_failures());
        assert!(!report.has_warnings(), "{}", report);
    }

    #[test]
    fn test_gaps_are_warnings() {
        let data = ReferenceData::new(
            vec![
                SubstanceRecord::new("Cafeína").with_rt(Method::Db1ms, 7.9),
                SubstanceRecord::new("cafeína").with_fragment_text("194;109"),
            ],
            vec![AlkaneRecord::new(10).with_rt(Method::Db1ms, 5.0)],
        )
        .unwrap();

        let report = validate_reference(&data, "gaps");
        assert!(!report.has_failures());

        let warned: Vec<_> = report
            .checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Warning(_)))
            .map(|c| c.name.as_str())
            .collect();
        assert!(warned.contains(&"Fragment fields parse"));
        assert!(warned.contains(&"Substance names unique"));
        assert!(warned.contains(&"Alkane ladder DB-1ms"));
    }

    #[test]
    fn test_summarize_names() {
        let names = ["a", "b", "c"];
        assert_eq!(summarize_names(names.into_iter(), 5), "a, b, c");
        assert_eq!(summarize_names(names.into_iter(), 2), "a, b (and 1 more)");
    }
}
