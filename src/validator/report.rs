use serde::Serialize;
use std::fmt;

/// Reference table a check looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckArea {
    /// Substance library
    Substances,
    /// n-alkane ladders
    Alkanes,
}

impl CheckArea {
    const ORDER: [CheckArea; 2] = [CheckArea::Substances, CheckArea::Alkanes];

    /// Section title in the rendered report
    pub fn title(&self) -> &'static str {
        match self {
            CheckArea::Substances => "Substance table",
            CheckArea::Alkanes => "Alkane table",
        }
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message")]
pub enum CheckStatus {
    /// Nothing to report
    Ok,
    /// Data usable, but some queries will be incomplete
    Warning(String),
    /// Data unusable for screening
    Failed(String),
}

/// One named check and its outcome
#[derive(Debug, Clone, Serialize)]
pub struct ValidationCheck {
    /// Table the check belongs to
    pub area: CheckArea,
    /// Short check name
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(area: CheckArea, name: impl Into<String>) -> Self {
        Self {
            area,
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    pub(crate) fn warning(area: CheckArea, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            area,
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    pub(crate) fn failed(area: CheckArea, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            area,
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Number of checks per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckCounts {
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
}

/// Quality report for a pair of reference tables
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// Where the tables came from
    pub source: String,
    /// Checks in the order they ran
    pub checks: Vec<ValidationCheck>,
}

#[derive(Clone, Copy)]
enum Tone {
    Heading,
    Strong,
    Pass,
    Warn,
    Fail,
}

fn paint(text: &str, tone: Tone, colored: bool) -> String {
    #[cfg(feature = "colorized_output")]
    {
        if colored {
            let styled = console::style(text);
            let styled = match tone {
                Tone::Heading => styled.bold().cyan(),
                Tone::Strong => styled.bold(),
                Tone::Pass => styled.green(),
                Tone::Warn => styled.yellow(),
                Tone::Fail => styled.red(),
            };
            return styled.to_string();
        }
    }
    #[cfg(not(feature = "colorized_output"))]
    let _ = (tone, colored);
    text.to_string()
}

fn symbol(status: &CheckStatus, colored: bool) -> String {
    #[cfg(feature = "colorized_output")]
    {
        if colored {
            use console::Emoji;
            let emoji = match status {
                CheckStatus::Ok => Emoji("✓", "[OK]"),
                CheckStatus::Warning(_) => Emoji("⚠", "[WARN]"),
                CheckStatus::Failed(_) => Emoji("✗", "[FAIL]"),
            };
            return emoji.to_string();
        }
    }
    #[cfg(not(feature = "colorized_output"))]
    let _ = colored;
    match status {
        CheckStatus::Ok => "✓",
        CheckStatus::Warning(_) => "⚠",
        CheckStatus::Failed(_) => "✗",
    }
    .to_string()
}

impl ValidationReport {
    /// Empty report for `source`
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            checks: Vec::new(),
        }
    }

    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Tally of outcomes
    pub fn counts(&self) -> CheckCounts {
        self.checks
            .iter()
            .fold(CheckCounts::default(), |mut counts, check| {
                match check.status {
                    CheckStatus::Ok => counts.passed += 1,
                    CheckStatus::Warning(_) => counts.warnings += 1,
                    CheckStatus::Failed(_) => counts.failed += 1,
                }
                counts
            })
    }

    pub fn has_failures(&self) -> bool {
        self.counts().failed > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.counts().warnings > 0
    }

    /// One-line conclusion for the end of the report
    pub fn verdict(&self) -> &'static str {
        let counts = self.counts();
        if counts.failed > 0 {
            "Reference data unusable for screening"
        } else if counts.warnings > 0 {
            "Reference data usable; some queries will be incomplete"
        } else {
            "Reference data complete"
        }
    }

    /// Render with terminal colors when the `colorized_output` feature is on
    pub fn format_colored(&self) -> String {
        self.render(true)
    }

    fn render(&self, colored: bool) -> String {
        let title = "Reference Data Check";
        let mut out = format!(
            "{}\n{}\n{}: {}\n",
            paint(title, Tone::Heading, colored),
            paint(&"=".repeat(title.len()), Tone::Heading, colored),
            paint("Source", Tone::Strong, colored),
            self.source
        );

        for area in CheckArea::ORDER {
            let mut checks = self.checks.iter().filter(|c| c.area == area).peekable();
            if checks.peek().is_none() {
                continue;
            }
            out.push_str(&format!("\n{}\n", paint(area.title(), Tone::Strong, colored)));

            for check in checks {
                let (tone, detail) = match &check.status {
                    CheckStatus::Ok => (Tone::Pass, None),
                    CheckStatus::Warning(msg) => (Tone::Warn, Some(("WARNING", msg))),
                    CheckStatus::Failed(msg) => (Tone::Fail, Some(("FAILED", msg))),
                };
                out.push_str(&format!(
                    "  [{}] {}",
                    symbol(&check.status, colored),
                    paint(&check.name, tone, colored)
                ));
                if let Some((label, msg)) = detail {
                    out.push_str(&format!(" - {}: {}", paint(label, tone, colored), msg));
                }
                out.push('\n');
            }
        }

        let counts = self.counts();
        out.push_str(&format!(
            "\n{}: {} passed, {} warnings, {} failed\n",
            paint("Summary", Tone::Strong, colored),
            paint(&counts.passed.to_string(), Tone::Pass, colored),
            paint(&counts.warnings.to_string(), Tone::Warn, colored),
            paint(&counts.failed.to_string(), Tone::Fail, colored)
        ));

        let verdict_tone = if counts.failed > 0 {
            Tone::Fail
        } else if counts.warnings > 0 {
            Tone::Warn
        } else {
            Tone::Pass
        };
        out.push_str(&paint(self.verdict(), verdict_tone, colored));
        out.push('\n');
        out
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
