//! Per-example integrity checks
//!
//! A file that does not exist counts as absent and sets the matching flag.
//! A file that exists but cannot be read is an error diagnostic instead.

use rexm_fs::checksum::compute_checksum;
use rexm_fs::{FileSystem, NormalizedPath};

use crate::config::EngineConfig;
use crate::header::HeaderInfo;
use crate::record::{ExampleRecord, Version};
use crate::report::Diagnostic;
use crate::resources::{self, MAX_RESOURCES};
use crate::solution;
use crate::sync::Listings;
use crate::validation::ValidationStatus;
use crate::web;

/// Outcome of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub status: ValidationStatus,
    /// Resource paths referenced by the source, in order of appearance
    pub resources: Vec<String>,
    /// Files of this example that exist but could not be read
    pub diagnostics: Vec<Diagnostic>,
    /// The source exists but could not be read, so its resources are unknown
    pub source_unreadable: bool,
}

/// Computes [`ValidationStatus`] for examples.
///
/// Artifacts shared by every example (listings, solution, template
/// screenshot) are read once at construction.
pub struct Validator<'a> {
    fs: &'a dyn FileSystem,
    config: &'a EngineConfig,
    listings: Listings,
    solution: Option<String>,
    template_checksum: Option<String>,
    default_version: Version,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Validator<'a> {
    pub fn new(fs: &'a dyn FileSystem, config: &'a EngineConfig) -> Self {
        let listings = Listings::read(fs, config);
        let mut diagnostics = listings.diagnostics().to_vec();

        let solution_file = config.solution_file();
        let solution = match fs.read_text_if_exists(&solution_file) {
            Ok(solution) => solution,
            Err(err) => {
                diagnostics.push(Diagnostic::error(solution_file.as_str(), err.to_string()));
                None
            }
        };
        if solution.is_none() {
            tracing::debug!(path = %solution_file, "Solution not readable");
        }

        let template = config.template_screenshot();
        let template_checksum = match fs.read_bytes_if_exists(&template) {
            Ok(bytes) => bytes.map(|bytes| compute_checksum(&bytes)),
            Err(err) => {
                diagnostics.push(Diagnostic::error(template.as_str(), err.to_string()));
                None
            }
        };

        Self {
            fs,
            config,
            listings,
            solution,
            template_checksum,
            default_version: config.version(),
            diagnostics,
        }
    }

    /// Read failures of the shared artifacts.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn example_file(&self, record: &ExampleRecord, extension: &str) -> NormalizedPath {
        self.config
            .examples_root()
            .join(&format!("{}.{extension}", record.relative_stem()))
    }

    /// Validate one record without modifying it.
    pub fn validate(&self, record: &ExampleRecord) -> Validation {
        let mut status = ValidationStatus::empty();
        let mut diagnostics = Vec::new();

        let source_path = self.example_file(record, "c");
        let (source, source_unreadable) = match self.fs.read_text_if_exists(&source_path) {
            Ok(source) => (source, false),
            Err(err) => {
                diagnostics.push(Diagnostic::error(
                    record.name.as_str(),
                    format!("source not readable: {err}"),
                ));
                (None, true)
            }
        };
        status.set(ValidationStatus::MISSING_SOURCE, source.is_none() && !source_unreadable);

        // The web output check needs the scanned resources, not the stored ones
        let mut scanned = record.clone();
        scanned.resources = source.as_deref().map(resources::scan).unwrap_or_default();

        status |= self.check_screenshot(&scanned, &mut diagnostics);
        status |= self.check_resources(&scanned);
        status |= self.listings.missing_flags(&scanned);
        status |= self.check_project(&scanned, &mut diagnostics);
        status |= self.check_web_output(&scanned, &mut diagnostics);

        status.set(ValidationStatus::INVALID_CATEGORY, !record.has_consistent_category());

        if let Some(source) = &source {
            let header = HeaderInfo::parse(source, &self.default_version);
            let mismatches = header.mismatches(record);
            if !mismatches.is_empty() {
                tracing::debug!(name = %record.name, fields = ?mismatches, "Header disagrees with collection");
            }
            let inconsistent = !mismatches.is_empty()
                || record.version_updated.cmp_numeric(&record.version_created).is_lt();
            status.set(ValidationStatus::INCONSISTENT_INFO, inconsistent);
        }

        if status.is_clean() && diagnostics.is_empty() {
            tracing::debug!(name = %record.name, "Validation result: OK");
        } else {
            tracing::debug!(name = %record.name, issues = %status, "Validation result: issues found");
        }
        Validation {
            status,
            resources: scanned.resources,
            diagnostics,
            source_unreadable,
        }
    }

    fn check_screenshot(
        &self,
        record: &ExampleRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ValidationStatus {
        let mut status = ValidationStatus::empty();
        let screenshot = self.example_file(record, "png");

        let bytes = match self.fs.read_bytes_if_exists(&screenshot) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                status.insert(ValidationStatus::MISSING_SCREENSHOT);
                return status;
            }
            Err(err) => {
                diagnostics.push(Diagnostic::error(screenshot.as_str(), err.to_string()));
                return status;
            }
        };

        let is_template = self
            .template_checksum
            .as_ref()
            .is_some_and(|template| compute_checksum(&bytes) == *template);
        status.set(ValidationStatus::INVALID_SCREENSHOT, is_template);
        status
    }

    fn check_resources(&self, record: &ExampleRecord) -> ValidationStatus {
        let mut status = ValidationStatus::empty();
        let base = self.config.examples_root().join(record.category.as_str());

        for path in record.resources.iter().flat_map(|p| resources::expand_all(p)) {
            if !self.fs.exists(&base.join(&path)) {
                tracing::warn!(name = %record.name, resource = %path, "Missing resource");
                status.insert(ValidationStatus::MISSING_RESOURCES);
            }
        }
        status.set(
            ValidationStatus::TOO_MANY_RESOURCES,
            record.resources.len() > MAX_RESOURCES,
        );
        status
    }

    fn check_project(
        &self,
        record: &ExampleRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ValidationStatus {
        let mut status = ValidationStatus::empty();
        if self.config.is_solution_excluded(&record.name) {
            return status;
        }

        let project_file = self.config.project_file(&record.name);
        match self.fs.read_text_if_exists(&project_file) {
            Ok(Some(project)) => status.set(
                ValidationStatus::NOT_IN_PROJECT,
                !solution::project_references(&project, &record.name),
            ),
            Ok(None) => status.insert(ValidationStatus::MISSING_PROJECT),
            Err(err) => diagnostics.push(Diagnostic::error(project_file.as_str(), err.to_string())),
        }

        let in_solution = self
            .solution
            .as_deref()
            .is_some_and(|sln| solution::contains_project(sln, &record.name));
        status.set(ValidationStatus::NOT_IN_SOLUTION, !in_solution);
        status
    }

    fn check_web_output(
        &self,
        record: &ExampleRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ValidationStatus {
        let mut status = ValidationStatus::empty();
        if !record.category.is_web_built() {
            return status;
        }

        let web_root = self.config.web_root();
        let missing = web::output_extensions(record)
            .into_iter()
            .any(|ext| !self.fs.exists(&web::output_path(&web_root, record, ext)));
        status.set(ValidationStatus::MISSING_WEB_OUTPUT, missing);

        let html_path = web::output_path(&web_root, record, "html");
        match self.fs.read_text_if_exists(&html_path) {
            Ok(Some(html)) => {
                status.set(ValidationStatus::MISSING_WEB_METADATA, web::has_placeholders(&html));
            }
            Ok(None) => {}
            Err(err) => diagnostics.push(Diagnostic::error(html_path.as_str(), err.to_string())),
        }
        status
    }
}
