use std::collections::HashMap;

use crate::method::Method;
use crate::reference::ReferenceData;

use super::{summarize_names, CheckArea, ValidationCheck, ValidationReport};

const AREA: CheckArea = CheckArea::Substances;

const NAME_LIMIT: usize = 5;

/// Step 1: substance library checks
pub(crate) fn check_substances(reference: &ReferenceData, report: &mut ValidationReport) {
    let substances = reference.substances();

    if substances.is_empty() {
        report.add_check(ValidationCheck::failed(
            AREA,
            "Substance table not empty",
            "No substances loaded",
        ));
        return;
    }
    report.add_check(ValidationCheck::ok(AREA, "Substance table not empty"));

    for method in Method::ALL {
        let name = format!("RT coverage {}", method);
        let covered = substances.iter().filter(|s| s.rt(method).is_some()).count();
        if covered == 0 {
            report.add_check(ValidationCheck::warning(
                AREA,
                name,
                "No substance has a retention time for this method",
            ));
        } else {
            report.add_check(ValidationCheck::ok(AREA, format!(
                "{} ({}/{})",
                name,
                covered,
                substances.len()
            )));
        }
    }

    let malformed: Vec<&str> = substances
        .iter()
        .filter(|s| s.has_malformed_fragments())
        .map(|s| s.name.as_str())
        .collect();
    if malformed.is_empty() {
        report.add_check(ValidationCheck::ok(AREA, "Fragment fields parse"));
    } else {
        report.add_check(ValidationCheck::warning(
            AREA,
            "Fragment fields parse",
            format!(
                "{} substance(s) excluded from fragment searches: {}",
                malformed.len(),
                summarize_names(malformed.iter().copied(), NAME_LIMIT)
            ),
        ));
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    for substance in substances {
        *seen.entry(substance.name.trim().to_lowercase()).or_default() += 1;
    }
    let mut duplicates: Vec<&str> = seen
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(name, _)| name.as_str())
        .collect();
    duplicates.sort_unstable();

    if duplicates.is_empty() {
        report.add_check(ValidationCheck::ok(AREA, "Substance names unique"));
    } else {
        report.add_check(ValidationCheck::warning(
            AREA,
            "Substance names unique",
            format!(
                "Repeated names: {}",
                summarize_names(duplicates.into_iter(), NAME_LIMIT)
            ),
        ));
    }
}
