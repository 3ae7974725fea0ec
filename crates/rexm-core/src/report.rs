//! Operation results and validation report rendering

use std::fmt;

use serde::Serialize;

use crate::record::ExampleRecord;
use crate::testing::TestResult;
use crate::validation::ValidationStatus;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Something an operation wants the caller to know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Example name or artifact path the diagnostic is about
    pub subject: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

/// Report from an engine operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    /// Whether the operation completed without error diagnostics
    pub success: bool,
    /// Actions taken during the operation
    pub actions: Vec<String>,
    /// Warnings and errors encountered during the operation
    pub diagnostics: Vec<Diagnostic>,
    /// Validated examples, for validate and update
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ExampleRecord>,
    /// Log analysis results, for testlog
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<TestResult>,
}

impl Default for OperationReport {
    fn default() -> Self {
        Self::success()
    }
}

impl OperationReport {
    /// Create a successful report
    pub fn success() -> Self {
        Self {
            success: true,
            actions: Vec::new(),
            diagnostics: Vec::new(),
            examples: Vec::new(),
            tests: Vec::new(),
        }
    }

    /// Create a report for an operation refused before any change was made
    pub fn rejected(diagnostic: Diagnostic) -> Self {
        let mut report = Self::success();
        report.push(diagnostic);
        report.success = false;
        report
    }

    /// Add an action to the report
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn action(&mut self, action: impl Into<String>) {
        let action = action.into();
        tracing::debug!(%action, "Action");
        self.actions.push(action);
    }

    /// Record a diagnostic. Error diagnostics mark the report as failed.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(subject = %diagnostic.subject, "{}", diagnostic.message),
            Severity::Error => {
                tracing::error!(subject = %diagnostic.subject, "{}", diagnostic.message);
                self.success = false;
            }
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn warn(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::warning(subject, message));
    }

    pub fn error(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::error(subject, message));
    }

    /// Fold another report into this one.
    pub fn merge(mut self, other: OperationReport) -> Self {
        self.success &= other.success;
        self.actions.extend(other.actions);
        self.diagnostics.extend(other.diagnostics);
        if !other.examples.is_empty() {
            self.examples = other.examples;
        }
        self.tests.extend(other.tests);
        self
    }

    /// Examples with at least one validation flag set.
    pub fn issues(&self) -> impl Iterator<Item = &ExampleRecord> {
        self.examples.iter().filter(|r| !r.status.is_clean())
    }
}

/// Which examples a rendered report includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFilter {
    All,
    IssuesOnly,
}

/// Default file name of the full report.
pub const REPORT_FILE: &str = "examples_validation.md";
/// Default file name of the issues-only report.
pub const ISSUES_REPORT_FILE: &str = "examples_issues.md";

struct Column {
    label: &'static str,
    legend: &'static str,
    flags: ValidationStatus,
}

const COLUMNS: &[Column] = &[
    Column {
        label: "[C]",
        legend: "Missing .c source file",
        flags: ValidationStatus::MISSING_SOURCE,
    },
    Column {
        label: "[CAT]",
        legend: "Not a recognized category",
        flags: ValidationStatus::INVALID_CATEGORY,
    },
    Column {
        label: "[INFO]",
        legend: "Inconsistent example header info (stars, author...)",
        flags: ValidationStatus::INCONSISTENT_INFO,
    },
    Column {
        label: "[PNG]",
        legend: "Missing screenshot .png",
        flags: ValidationStatus::MISSING_SCREENSHOT,
    },
    Column {
        label: "[WPNG]",
        legend: "Invalid png screenshot (using default one)",
        flags: ValidationStatus::INVALID_SCREENSHOT,
    },
    Column {
        label: "[RES]",
        legend: "Missing resources listed in the code, or too many of them",
        flags: ValidationStatus::from_bits(
            ValidationStatus::MISSING_RESOURCES.bits() | ValidationStatus::TOO_MANY_RESOURCES.bits(),
        ),
    },
    Column {
        label: "[MK]",
        legend: "Not listed in Makefile",
        flags: ValidationStatus::NOT_IN_BUILD_LIST,
    },
    Column {
        label: "[MKWEB]",
        legend: "Not listed in Makefile.Web",
        flags: ValidationStatus::NOT_IN_WEB_BUILD_LIST,
    },
    Column {
        label: "[VCX]",
        legend: "Missing Visual Studio project file",
        flags: ValidationStatus::MISSING_PROJECT,
    },
    Column {
        label: "[PRJ]",
        legend: "Project file does not reference the example",
        flags: ValidationStatus::NOT_IN_PROJECT,
    },
    Column {
        label: "[SOL]",
        legend: "Project not included in solution file",
        flags: ValidationStatus::NOT_IN_SOLUTION,
    },
    Column {
        label: "[RDME]",
        legend: "Not listed in README.md",
        flags: ValidationStatus::NOT_IN_README,
    },
    Column {
        label: "[JS]",
        legend: "Not listed in Web (examples.js)",
        flags: ValidationStatus::NOT_IN_WEB_DATA,
    },
    Column {
        label: "[WOUT]",
        legend: "Missing Web build (.html/.data/.wasm/.js)",
        flags: ValidationStatus::MISSING_WEB_OUTPUT,
    },
    Column {
        label: "[WMETA]",
        legend: "Missing Web .html example metadata",
        flags: ValidationStatus::MISSING_WEB_METADATA,
    },
];

const NAME_WIDTH: usize = 32;

/// Render the validation report as markdown.
///
/// Pure: the same records always produce the same text.
pub fn render_report<'a>(
    records: impl IntoIterator<Item = &'a ExampleRecord>,
    filter: ReportFilter,
) -> String {
    let mut out = String::from("# EXAMPLES COLLECTION - VALIDATION REPORT\n\n");

    out.push_str("```\nExample elements validated:\n\n");
    for column in COLUMNS {
        out.push_str(&format!(" - {:<8}: {}\n", column.label, column.legend));
    }
    out.push_str("```\n\n");

    out.push_str(&format!("| {:<NAME_WIDTH$} |", "**EXAMPLE NAME**"));
    for column in COLUMNS {
        out.push_str(&format!(" {} |", column.label));
    }
    out.push('\n');

    out.push_str(&format!("|:{}|", "-".repeat(NAME_WIDTH + 1)));
    for column in COLUMNS {
        out.push_str(&format!(":{}:|", "-".repeat(column.label.len())));
    }
    out.push('\n');

    for record in records {
        if filter == ReportFilter::IssuesOnly && record.status.is_clean() {
            continue;
        }
        out.push_str(&format!("| {:<NAME_WIDTH$} |", record.name));
        for column in COLUMNS {
            let mark = if record.status.intersects(column.flags) {
                "❌"
            } else {
                "✔"
            };
            out.push_str(&format!(" {:^width$} |", mark, width = column.label.len()));
        }
        out.push('\n');
    }

    out
}
