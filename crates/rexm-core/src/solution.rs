//! IDE solution and project file editing
//!
//! Only the handful of solution facts the engine needs are modelled: the
//! `Project(...)`/`EndProject` block, the per-configuration lines in
//! `ProjectConfigurationPlatforms` and the folder nesting line in
//! `NestedProjects`. Everything else in the file is left untouched.

use uuid::Uuid;

use crate::category::Category;
use crate::{Error, Result};

/// Project type GUID of C/C++ projects.
pub const PROJECT_TYPE_GUID: &str = "8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942";

/// Example whose project file serves as the template for new ones.
pub const TEMPLATE_PROJECT_NAME: &str = "core_basic_window";

/// Project GUID baked into the template project.
pub const TEMPLATE_PROJECT_GUID: &str = "0981CA98-E4A5-4DF1-987F-A41D09131EFC";

const TEMPLATE_SOURCE_DIR: &str = r"..\..\examples\core";

const CONFIGURATION_SECTION: &str = "GlobalSection(ProjectConfigurationPlatforms) = postSolution";
const NESTING_SECTION: &str = "GlobalSection(NestedProjects) = preSolution";
const SECTION_END: &str = "EndGlobalSection";

/// Solution configuration and the project configuration it maps to.
const CONFIGURATIONS: [(&str, &str); 12] = [
    ("Debug.DLL|ARM64", "Debug.DLL|ARM64"),
    ("Debug.DLL|x64", "Debug.DLL|x64"),
    ("Debug.DLL|x86", "Debug.DLL|Win32"),
    ("Debug|ARM64", "Debug|ARM64"),
    ("Debug|x64", "Debug|x64"),
    ("Debug|x86", "Debug|Win32"),
    ("Release.DLL|ARM64", "Release.DLL|ARM64"),
    ("Release.DLL|x64", "Release.DLL|x64"),
    ("Release.DLL|x86", "Release.DLL|Win32"),
    ("Release|ARM64", "Release|ARM64"),
    ("Release|x64", "Release|x64"),
    ("Release|x86", "Release|Win32"),
];

/// A fresh uppercase v4 GUID.
pub fn new_project_guid() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

/// Create a project file for `name` from the template project.
///
/// The template's example name, source directory and project GUID are
/// replaced.
pub fn instantiate_project(template: &str, category: Category, name: &str, guid: &str) -> String {
    template
        .replace(TEMPLATE_PROJECT_NAME, name)
        .replace(TEMPLATE_SOURCE_DIR, &format!(r"..\..\examples\{category}"))
        .replace(TEMPLATE_PROJECT_GUID, guid)
}

/// GUID declared by a project file's `<ProjectGuid>` element.
pub fn project_guid(project: &str) -> Option<String> {
    let start = project.find("<ProjectGuid>{")? + "<ProjectGuid>{".len();
    let len = project[start..].find('}')?;
    Some(project[start..start + len].to_string())
}

/// Whether a project file compiles the example's source.
pub fn project_references(project: &str, name: &str) -> bool {
    project.contains(&format!("{name}.c\""))
}

fn project_line(name: &str, guid: &str) -> String {
    format!(
        "Project(\"{{{PROJECT_TYPE_GUID}}}\") = \"{name}\", \"examples\\{name}.vcxproj\", \"{{{guid}}}\""
    )
}

fn project_marker(name: &str) -> String {
    format!("= \"{name}\", ")
}

/// Line-oriented view of a solution that keeps its line terminator.
struct SolutionText {
    lines: Vec<String>,
    eol: &'static str,
    trailing_eol: bool,
}

impl SolutionText {
    fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            eol: if text.contains("\r\n") { "\r\n" } else { "\n" },
            trailing_eol: text.ends_with('\n'),
        }
    }

    fn render(&self) -> String {
        let mut text = self.lines.join(self.eol);
        if self.trailing_eol {
            text.push_str(self.eol);
        }
        text
    }

    fn find(&self, from: usize, predicate: impl Fn(&str) -> bool) -> Option<usize> {
        self.lines[from..]
            .iter()
            .position(|line| predicate(line))
            .map(|i| i + from)
    }

    /// Index of the `EndGlobalSection` closing the section that starts
    /// with `header`.
    fn section_end(&self, header: &str) -> Result<usize> {
        let start = self
            .find(0, |line| line.trim() == header)
            .ok_or_else(|| Error::SolutionFormat {
                section: header.to_string(),
            })?;
        self.find(start, |line| line.trim() == SECTION_END)
            .ok_or_else(|| Error::SolutionFormat {
                section: format!("{SECTION_END} after {header}"),
            })
    }
}

/// Whether the solution declares a project for `name`.
pub fn contains_project(solution: &str, name: &str) -> bool {
    let marker = project_marker(name);
    solution
        .lines()
        .any(|line| line.starts_with("Project(") && line.contains(&marker))
}

/// Add the project of `name` to the solution.
///
/// The project block goes right before `Global`, configuration lines at
/// the end of `ProjectConfigurationPlatforms` and the nesting line at the
/// end of `NestedProjects`. A solution already declaring the project is
/// returned unchanged.
///
/// # Errors
///
/// Returns `Error::SolutionFormat` when one of those sections is missing.
pub fn add_project(solution: &str, name: &str, guid: &str, category: Category) -> Result<String> {
    if contains_project(solution, name) {
        tracing::debug!(name, "Project already in solution");
        return Ok(solution.to_string());
    }

    let mut sln = SolutionText::parse(solution);

    let global = sln
        .find(0, |line| line.trim() == "Global")
        .ok_or_else(|| Error::SolutionFormat {
            section: "Global".to_string(),
        })?;
    sln.lines.insert(global, "EndProject".to_string());
    sln.lines.insert(global, project_line(name, guid));

    let config_end = sln.section_end(CONFIGURATION_SECTION)?;
    let config_lines = CONFIGURATIONS.iter().flat_map(|(solution_cfg, project_cfg)| {
        [
            format!("\t\t{{{guid}}}.{solution_cfg}.ActiveCfg = {project_cfg}"),
            format!("\t\t{{{guid}}}.{solution_cfg}.Build.0 = {project_cfg}"),
        ]
    });
    sln.lines.splice(config_end..config_end, config_lines);

    let nesting_end = sln.section_end(NESTING_SECTION)?;
    sln.lines.insert(
        nesting_end,
        format!("\t\t{{{guid}}} = {{{}}}", category.solution_folder_guid()),
    );

    tracing::debug!(name, guid, "Added project to solution");
    Ok(sln.render())
}

/// Remove the project of `name` and every line mentioning its GUID.
///
/// Returns `None` when the solution does not declare the project.
pub fn remove_project(solution: &str, name: &str) -> Option<String> {
    let mut sln = SolutionText::parse(solution);
    let marker = project_marker(name);

    let index = sln.find(0, |line| line.starts_with("Project(") && line.contains(&marker))?;
    let guid = sln.lines[index]
        .rsplit_once("\"{")
        .and_then(|(_, tail)| tail.split_once('}'))
        .map(|(guid, _)| guid.to_string())?;

    let block_end = match sln.find(index, |line| line.trim() == "EndProject") {
        Some(end) => end + 1,
        None => index + 1,
    };
    sln.lines.drain(index..block_end);
    sln.lines.retain(|line| !line.contains(&guid));

    tracing::debug!(name, guid, "Removed project from solution");
    Some(sln.render())
}

/// Point the solution entry of `old` at the project of `new`.
pub fn rename_project(solution: &str, old: &str, new: &str) -> String {
    solution.replace(
        &format!("\"{old}\", \"examples\\{old}.vcxproj\""),
        &format!("\"{new}\", \"examples\\{new}.vcxproj\""),
    )
}
