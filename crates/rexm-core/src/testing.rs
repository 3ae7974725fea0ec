//! Analysis of example build and run logs
//!
//! An automated test run leaves two logs per example under
//! `<examples_root>/<category>/logs/`:
//!
//! - `<name>.build.log`: compiler output, scanned for `warning:` lines
//! - `<name>.log`: the raylib trace log of one run, scanned for the
//!   messages every healthy example prints during startup and shutdown
//!
//! The results are rendered as a markdown testing report per platform.

use std::fmt;

use serde::Serialize;

/// Examples that never produce a complete run log.
pub const UNTESTED_EXAMPLES: &[&str] = &[
    "core_custom_logging",
    "core_window_should_close",
    "core_custom_frame_control",
];

/// Failed runtime checks of one example, OR-combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TestingStatus(u32);

impl TestingStatus {
    pub const FAIL_INIT: Self = Self(1 << 0);
    pub const FAIL_CLOSE: Self = Self(1 << 1);
    pub const FAIL_ASSETS: Self = Self(1 << 2);
    pub const FAIL_RLGL: Self = Self(1 << 3);
    pub const FAIL_PLATFORM: Self = Self(1 << 4);
    pub const FAIL_FONT: Self = Self(1 << 5);
    pub const FAIL_TIMER: Self = Self(1 << 6);

    /// Status of an example whose run log is missing.
    pub const ALL: Self = Self(0b111_1111);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_clean(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for TestingStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A message the run log must contain, or must not contain.
enum Check {
    Required(&'static str),
    Forbidden(&'static str),
}

const CHECKS: [(TestingStatus, Check); 7] = [
    (
        TestingStatus::FAIL_INIT,
        Check::Required("INFO: DISPLAY: Device initialized successfully"),
    ),
    (
        TestingStatus::FAIL_CLOSE,
        Check::Required("INFO: Window closed successfully"),
    ),
    (TestingStatus::FAIL_ASSETS, Check::Forbidden("WARNING: FILEIO:")),
    (
        TestingStatus::FAIL_RLGL,
        Check::Required("INFO: RLGL: Default OpenGL state initialized successfully"),
    ),
    (TestingStatus::FAIL_PLATFORM, Check::Required("INFO: PLATFORM:")),
    (
        TestingStatus::FAIL_FONT,
        Check::Required("INFO: FONT: Default font loaded successfully"),
    ),
    (
        TestingStatus::FAIL_TIMER,
        Check::Required("INFO: TIMER: Target time per frame:"),
    ),
];

/// Count compiler warnings in a build log.
pub fn count_build_warnings(log: &str) -> usize {
    log.lines().filter(|line| line.contains("warning:")).count()
}

/// Failed checks and the number of `WARNING` lines in a run log.
pub fn analyze_run_log(log: &str) -> (TestingStatus, usize) {
    let mut status = TestingStatus::empty();
    for (flag, check) in &CHECKS {
        let failed = match check {
            Check::Required(message) => !log.contains(message),
            Check::Forbidden(message) => log.contains(message),
        };
        if failed {
            status.insert(*flag);
        }
    }
    let warnings = log.lines().filter(|line| line.contains("WARNING")).count();
    (status, warnings)
}

/// Testing outcome of one example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub build_warnings: usize,
    pub log_warnings: usize,
    pub status: TestingStatus,
}

impl TestResult {
    pub fn has_issues(&self) -> bool {
        self.build_warnings > 0 || self.log_warnings > 0 || !self.status.is_clean()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} build warnings, {} log warnings, status {:#09b}",
            self.name,
            self.build_warnings,
            self.log_warnings,
            self.status.bits()
        )
    }
}

/// Display name of the platform this binary runs on.
pub fn host_platform() -> &'static str {
    match std::env::consts::OS {
        "windows" => "Windows",
        "linux" => "Linux",
        "freebsd" => "FreeBSD",
        "macos" => "macOS",
        other => other,
    }
}

/// File name of the testing report for `platform`.
pub fn testing_report_file(platform: &str) -> String {
    format!("examples_testing_{}.md", platform.to_lowercase())
}

const COLUMNS: [(&str, &str, TestingStatus); 7] = [
    ("[INIT]", "Initialization", TestingStatus::FAIL_INIT),
    ("[CLOSE]", "Closing", TestingStatus::FAIL_CLOSE),
    ("[ASSETS]", "Assets loading", TestingStatus::FAIL_ASSETS),
    ("[RLGL]", "OpenGL-wrapped initialization", TestingStatus::FAIL_RLGL),
    ("[PLAT]", "Platform initialization", TestingStatus::FAIL_PLATFORM),
    ("[FONT]", "Font default initialization", TestingStatus::FAIL_FONT),
    ("[TIMER]", "Timer initialization", TestingStatus::FAIL_TIMER),
];

/// Render the testing report. Only examples with issues get a row.
pub fn render_testing_report<'a>(
    results: impl IntoIterator<Item = &'a TestResult>,
    platform: &str,
) -> String {
    let mut out = String::from("# EXAMPLES COLLECTION - TESTING REPORT\n\n");
    out.push_str(&format!("## Tested Platform: {platform}\n\n"));

    out.push_str("```\nExample automated testing elements validated:\n");
    out.push_str(" - [CWARN]  : Compilation WARNING messages\n");
    out.push_str(" - [LWARN]  : Log WARNING messages count\n");
    for (label, legend, _) in COLUMNS {
        out.push_str(&format!(" - {label:<8} : {legend}\n"));
    }
    out.push_str("```\n");

    out.push_str(&format!("| {:<32} | [CWARN] | [LWARN] |", "**EXAMPLE NAME**"));
    for (label, _, _) in COLUMNS {
        out.push_str(&format!(" {label} |"));
    }
    out.push('\n');
    out.push_str(&format!("|:{}|:-------:|:-------:|", "-".repeat(33)));
    for (label, _, _) in COLUMNS {
        out.push_str(&format!(":{}:|", "-".repeat(label.len())));
    }
    out.push('\n');

    for result in results.into_iter().filter(|r| r.has_issues()) {
        out.push_str(&format!(
            "| {:<32} | {:^7} | {:^7} |",
            result.name, result.build_warnings, result.log_warnings
        ));
        for (label, _, flag) in COLUMNS {
            let mark = if result.status.contains(flag) { "❌" } else { "✔" };
            out.push_str(&format!(" {:^width$} |", mark, width = label.len()));
        }
        out.push('\n');
    }
    out.push('\n');
    out
}
