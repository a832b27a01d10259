use crate::lri::AlkaneLadder;
use crate::method::Method;
use crate::reference::ReferenceData;

use super::{CheckArea, ValidationCheck, ValidationReport};

const AREA: CheckArea = CheckArea::Alkanes;

/// Step 2: alkane ladder checks
pub(crate) fn check_alkanes(reference: &ReferenceData, report: &mut ValidationReport) {
    let mut ties = Vec::new();

    for method in Method::ALL {
        let ladder = AlkaneLadder::for_method(reference, method);
        let points = ladder.points();
        let name = format!("Alkane ladder {}", method);

        match points {
            [] | [_] => report.add_check(ValidationCheck::warning(
                AREA,
                name,
                format!(
                    "{} reference alkane(s); LRI cannot be computed for this method",
                    points.len()
                ),
            )),
            [first, .., last] => report.add_check(ValidationCheck::ok(AREA, format!(
                "{} (C{} to C{}, {:.2} to {:.2} min)",
                name, first.carbon_count, last.carbon_count, first.rt, last.rt
            ))),
        }

        for pair in points.windows(2) {
            if pair[0].rt == pair[1].rt {
                ties.push(format!(
                    "{}: C{}/C{} at {:.2}",
                    method, pair[0].carbon_count, pair[1].carbon_count, pair[0].rt
                ));
            }
        }
    }

    if ties.is_empty() {
        report.add_check(ValidationCheck::ok(AREA, "Alkane retention times distinct"));
    } else {
        report.add_check(ValidationCheck::warning(
            AREA,
            "Alkane retention times distinct",
            ties.join("; "),
        ));
    }
}
