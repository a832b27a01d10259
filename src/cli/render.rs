//! Plain-text rendering of query reports.

use std::fmt::Write;

use lri_screen::lri::{LriWarning, RetentionIndex};
use lri_screen::method::MethodValues;
use lri_screen::reference::SubstanceRecord;
use lri_screen::screen::{LriReport, NameSearchReport, QueryWarning, ScreenReport};
use lri_screen::search::NameSearch;

#[cfg(feature = "colorized_output")]
fn heading(text: &str) -> String {
    console::style(text).bold().cyan().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn heading(text: &str) -> String {
    text.to_string()
}

#[cfg(feature = "colorized_output")]
fn warning_line(warning: &QueryWarning) -> String {
    format!("{} {}", console::style("WARNING:").yellow().bold(), warning)
}

#[cfg(not(feature = "colorized_output"))]
fn warning_line(warning: &QueryWarning) -> String {
    format!("WARNING: {}", warning)
}

fn push_warnings(out: &mut String, warnings: &[QueryWarning]) {
    if warnings.is_empty() {
        return;
    }
    out.push('\n');
    for warning in warnings {
        let _ = writeln!(out, "{}", warning_line(warning));
    }
}

fn per_method(values: &MethodValues, precision: usize) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|(method, v)| format!("{} {:.*}", method, precision, v))
        .collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" | ")
    }
}

fn substance_block(out: &mut String, substance: &SubstanceRecord) {
    let _ = writeln!(out, "{}", heading(&substance.name));
    let _ = writeln!(out, "  RT (min):        {}", per_method(&substance.retention_times, 2));
    let _ = writeln!(out, "  LRI:             {}", per_method(&substance.reference_lri, 0));
    let fragments = if substance.fragment_text.is_empty() {
        "-"
    } else {
        substance.fragment_text.as_str()
    };
    let _ = writeln!(out, "  Fragments (m/z): {}", fragments);
    if !substance.notes.is_empty() {
        let _ = writeln!(out, "  Notes:           {}", substance.notes);
    }
}

fn lri_line(lri: &Result<RetentionIndex, LriWarning>) -> String {
    match lri {
        Ok(index) => format!(
            "LRI: {:.1} (between C{} at {:.2} min and C{} at {:.2} min)",
            index.value,
            index.lower.carbon_count,
            index.lower.rt,
            index.upper.carbon_count,
            index.upper.rt
        ),
        Err(_) => "LRI: not available".to_string(),
    }
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

/// Render a name search
pub fn name_search(report: &NameSearchReport<'_>) -> String {
    let mut out = String::new();
    match &report.outcome {
        NameSearch::Skipped => out.push_str("Enter part of a substance name to search.\n"),
        NameSearch::NotFound => {}
        NameSearch::Found(matches) => {
            let _ = writeln!(out, "Results found: {}\n", matches.len());
            for substance in matches {
                substance_block(&mut out, substance);
                out.push('\n');
            }
        }
    }
    push_warnings(&mut out, &report.warnings());
    out
}

/// Render a screening result
pub fn screen(report: &ScreenReport<'_>) -> String {
    let mut out = String::new();
    let query = &report.query;

    let _ = writeln!(
        out,
        "Method: {} | RT: {:.2} min | Tolerance: {} | Window: {:.2}-{:.2} min",
        query.method, query.retention_time, query.tolerance, report.window.min, report.window.max
    );
    if !query.fragments.is_empty() {
        let fragments: Vec<String> = query.fragments.iter().map(|f| f.to_string()).collect();
        let _ = writeln!(out, "Fragments: {}", fragments.join(", "));
    }
    let _ = writeln!(out, "{}", lri_line(&report.lri));
    out.push('\n');

    let _ = write!(
        out,
        "Candidates: {} of {} in RT window",
        report.candidates.len(),
        report.rt_matches
    );
    if report.malformed_fragments > 0 {
        let _ = write!(
            out,
            " ({} skipped: unreadable fragment field)",
            report.malformed_fragments
        );
    }
    out.push('\n');

    if !report.candidates.is_empty() {
        let width = report
            .candidates
            .iter()
            .map(|c| c.substance.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Substance".len());

        let _ = writeln!(
            out,
            "\n{}",
            heading(&format!(
                "{:<width$}  {:>7}  {:>7}  {:>7}  {:>7}  {}",
                "Substance",
                "RT",
                "dRT",
                "LRI ref",
                "dLRI",
                "Fragments (m/z)",
                width = width
            ))
        );
        for candidate in &report.candidates {
            let _ = writeln!(
                out,
                "{:<width$}  {:>7.2}  {:>+7.2}  {:>7}  {:>7}  {}",
                candidate.substance.name,
                candidate.rt,
                candidate.rt_offset,
                optional(candidate.reference_lri, 0),
                optional(candidate.lri_delta, 1),
                candidate.substance.fragment_text,
                width = width
            );
        }
    }

    push_warnings(&mut out, &report.warnings());
    out
}

/// Render a stand-alone LRI calculation
pub fn lri(report: &LriReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Method: {} | RT: {:.2} min",
        report.method, report.retention_time
    );
    let _ = writeln!(out, "{}", lri_line(&report.lri));
    push_warnings(&mut out, &report.warnings());
    out
}
