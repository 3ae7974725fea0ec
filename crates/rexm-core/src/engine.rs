//! Engine entry points
//!
//! The [`Engine`] ties the collection store, validation, artifact
//! synchronization, IDE solution editing and web publishing together into
//! the operations exposed to the command line:
//!
//! - **create** / **add**: register a new example
//! - **rename** / **remove**: move or drop an existing example
//! - **validate**: compute the status of every example
//! - **update**: validate, then fix everything that can be fixed
//! - **build**: recompile for the desktop and the web
//! - **testlog**: analyze build and run logs of automated test runs
//!
//! Every operation loads the collection fresh and returns an
//! [`OperationReport`]. Only [`Engine::new`] returns an error.

use std::collections::BTreeSet;

use chrono::Datelike;
use rexm_fs::{FileSystem, LocalFs, NormalizedPath};

use crate::builder::{MakeWebBuilder, WebBuilder};
use crate::category::Category;
use crate::collection::{Collection, CollectionStore};
use crate::config::EngineConfig;
use crate::header::{self, HeaderInfo};
use crate::record::{ExampleRecord, is_valid_name};
use crate::report::{Diagnostic, OperationReport};
use crate::resources;
use crate::solution;
use crate::sync::Synchronizer;
use crate::testing::{self, TestResult, TestingStatus};
use crate::validation::{ValidationStatus, Validator};
use crate::web;
use crate::{Error, Result};

/// What `build` compiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildTarget {
    All,
    Category(Category),
    Example(String),
}

impl BuildTarget {
    /// Whether `record` is part of this target.
    pub fn selects(&self, record: &ExampleRecord) -> bool {
        match self {
            BuildTarget::All => true,
            BuildTarget::Category(category) => record.category == *category,
            BuildTarget::Example(name) => record.name == *name,
        }
    }
}

impl From<&str> for BuildTarget {
    /// `ALL` (any case), a category tag, or an example name.
    fn from(text: &str) -> Self {
        if text.eq_ignore_ascii_case("all") {
            BuildTarget::All
        } else if let Some(category) = Category::from_tag(text) {
            BuildTarget::Category(category)
        } else {
            BuildTarget::Example(text.to_string())
        }
    }
}

/// Engine for maintaining the examples collection
pub struct Engine {
    config: EngineConfig,
    /// Filesystem all reads and writes go through
    fs: Box<dyn FileSystem>,
    /// Compiles examples for the web platform
    builder: Box<dyn WebBuilder>,
    /// Year written to headers that carry none
    current_year: i32,
}

impl Engine {
    /// Create an engine on the local disk, building with `config.make_command`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootNotFound`] when the examples root or the
    /// collection file does not exist.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let fs: Box<dyn FileSystem> = Box::new(LocalFs::with_buffer_limit(config.max_buffer_size));
        let builder: Box<dyn WebBuilder> = Box::new(MakeWebBuilder::new(config.make_command.clone()));
        Self::with_parts(config, fs, builder)
    }

    /// Create an engine with explicit collaborators.
    ///
    /// # Arguments
    ///
    /// * `config` - Root paths and settings
    /// * `fs` - Filesystem every operation goes through
    /// * `builder` - Web builder used by add, rename, update and build
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootNotFound`] when a required root is missing.
    pub fn with_parts(
        config: EngineConfig,
        fs: Box<dyn FileSystem>,
        builder: Box<dyn WebBuilder>,
    ) -> Result<Self> {
        config.check_roots()?;
        Ok(Self {
            config,
            fs,
            builder,
            current_year: chrono::Local::now().year(),
        })
    }

    /// Use a fixed year when headers are rewritten.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn store(&self) -> CollectionStore<'_> {
        CollectionStore::new(self.fs.as_ref(), self.config.collection_file())
    }

    fn example_file(&self, category: Category, name: &str, extension: &str) -> NormalizedPath {
        self.config
            .examples_root()
            .join(&format!("{category}/{name}.{extension}"))
    }

    /// Load the collection, moving load diagnostics into `report`.
    fn load(&self, report: &mut OperationReport) -> Result<Collection> {
        let loaded = self.store().load()?;
        for diagnostic in loaded.diagnostics {
            report.push(diagnostic);
        }
        Ok(loaded.collection)
    }

    /// Save the store and regenerate every artifact.
    fn persist(&self, collection: &mut Collection, report: &mut OperationReport) {
        match self.store().save(collection) {
            Ok(()) => report.action(format!("Saved {}", self.config.collection_file())),
            Err(err) => report.error(self.config.collection_file().as_str(), err.to_string()),
        }
        let synced = Synchronizer::new(self.fs.as_ref(), &self.config).sync_all(collection);
        *report = std::mem::take(report).merge(synced);
    }

    // ------------------------------------------------------------------
    // create / add
    // ------------------------------------------------------------------

    /// Create a new example from the template and register it.
    pub fn create(&self, name: &str) -> OperationReport {
        tracing::info!(name, "Creating example");

        let category = match check_new_name(name) {
            Ok(category) => category,
            Err(err) => return rejected(name, err),
        };
        let mut report = OperationReport::success();
        let collection = match self.load(&mut report) {
            Ok(collection) => collection,
            Err(err) => return rejected(self.config.collection_file().as_str(), err),
        };
        if collection.contains(name) {
            return rejected(name, Error::DuplicateExample { name: name.to_string() });
        }

        let source_path = self.example_file(category, name, "c");
        if self.fs.exists(&source_path) {
            return rejected(name, format!("source already exists at {source_path}"));
        }
        let template = match self.fs.read_text(&self.config.template_source()) {
            Ok(template) => template,
            Err(err) => return rejected(self.config.template_source().as_str(), err),
        };

        let source = header::instantiate_template(&template, category, name);
        if let Err(err) = self.fs.write_text(&source_path, &source) {
            return rejected(source_path.as_str(), err);
        }
        report.action(format!("Created {source_path}"));

        self.register(collection, category, name, &source, None, report)
    }

    /// Add an existing example source to the collection.
    ///
    /// The source is copied into its category directory together with a
    /// screenshot next to it (or the template screenshot) and any assets it
    /// loads from `resources/`.
    pub fn add(&self, source_path: &NormalizedPath) -> OperationReport {
        tracing::info!(path = %source_path, "Adding example");

        if source_path.extension() != Some("c") {
            return rejected(source_path.as_str(), "not a .c source file");
        }
        let Some(name) = source_path.file_stem().map(str::to_string) else {
            return rejected(source_path.as_str(), "source file has no name");
        };
        let category = match check_new_name(&name) {
            Ok(category) => category,
            Err(err) => return rejected(&name, err),
        };

        let mut report = OperationReport::success();
        let collection = match self.load(&mut report) {
            Ok(collection) => collection,
            Err(err) => return rejected(self.config.collection_file().as_str(), err),
        };
        if collection.contains(&name) {
            return rejected(&name, Error::DuplicateExample { name: name.clone() });
        }
        let source = match self.fs.read_text(source_path) {
            Ok(source) => source,
            Err(err) => return rejected(source_path.as_str(), err),
        };

        let target = self.example_file(category, &name, "c");
        if target != *source_path {
            if let Err(err) = self.fs.copy(source_path, &target) {
                return rejected(target.as_str(), err);
            }
            report.action(format!("Copied {source_path} to {target}"));
        }

        if let Some(source_dir) = source_path.parent() {
            self.copy_resources(&source, &source_dir, category, &mut report);
        }

        let screenshot = source_path.with_extension("png");
        self.register(collection, category, &name, &source, Some(screenshot), report)
    }

    /// Copy assets referenced from `resources/` next to the source into the
    /// category directory. Missing assets are reported, never fatal.
    fn copy_resources(
        &self,
        source: &str,
        source_dir: &NormalizedPath,
        category: Category,
        report: &mut OperationReport,
    ) {
        let target_dir = self.config.examples_root().join(category.as_str());

        for path in resources::scan(source)
            .iter()
            .filter(|p| p.contains("resources/"))
            .flat_map(|p| resources::expand_all(p))
        {
            let from = source_dir.join(&path);
            let to = target_dir.join(&path);
            if from == to || self.fs.exists(&to) {
                continue;
            }
            if !self.fs.exists(&from) {
                report.warn(from.as_str(), "resource not found, not copied");
                continue;
            }
            match self.fs.copy(&from, &to) {
                Ok(()) => report.action(format!("Copied resource {path}")),
                Err(err) => report.error(to.as_str(), err.to_string()),
            }
        }
    }

    /// Shared tail of create and add: the source is in place, now record it
    /// everywhere.
    fn register(
        &self,
        mut collection: Collection,
        category: Category,
        name: &str,
        source: &str,
        screenshot: Option<NormalizedPath>,
        mut report: OperationReport,
    ) -> OperationReport {
        let target = self.example_file(category, name, "png");
        match screenshot.filter(|p| self.fs.exists(p)) {
            Some(from) if from != target => match self.fs.copy(&from, &target) {
                Ok(()) => report.action(format!("Copied screenshot to {target}")),
                Err(err) => report.error(target.as_str(), err.to_string()),
            },
            Some(_) => {}
            None if self.fs.exists(&target) => {}
            None => match self.fs.copy(&self.config.template_screenshot(), &target) {
                Ok(()) => report.warn(name, "no screenshot provided, using the template one"),
                Err(err) => report.error(target.as_str(), err.to_string()),
            },
        }

        let header = HeaderInfo::parse(source, &self.config.version());
        let record = header.to_record(category, name);
        if record.author.is_empty() {
            report.warn(name, "header carries no copyright line, author left empty");
        }
        if let Err(err) = collection.insert(record) {
            report.error(name, err.to_string());
            return report;
        }
        report.action(format!("Added {name} to the collection"));

        self.persist(&mut collection, &mut report);

        // Resources were filled in by the synchronizer
        let Some(record) = collection.get(name).cloned() else {
            return report;
        };
        if let Err(err) = self.ensure_project(&record, &mut report) {
            report.error(name, err.to_string());
        }
        if let Err(err) = self.publish(&record, &mut report) {
            report.warn(name, format!("web output not published: {err}"));
        }

        tracing::info!(name, success = report.success, "Example registered");
        report
    }

    // ------------------------------------------------------------------
    // IDE project and web output
    // ------------------------------------------------------------------

    /// Make sure the example has a project file and a solution entry.
    ///
    /// Examples excluded from the solution are left alone.
    fn ensure_project(&self, record: &ExampleRecord, report: &mut OperationReport) -> Result<()> {
        if self.config.is_solution_excluded(&record.name) {
            tracing::debug!(name = %record.name, "Excluded from solution");
            return Ok(());
        }

        let project_path = self.config.project_file(&record.name);
        let guid = if self.fs.exists(&project_path) {
            solution::project_guid(&self.fs.read_text(&project_path)?)
        } else {
            let template = self.fs.read_text(&self.config.project_template())?;
            let guid = solution::new_project_guid();
            let project = solution::instantiate_project(&template, record.category, &record.name, &guid);
            self.fs.write_text(&project_path, &project)?;
            report.action(format!("Created {project_path}"));
            Some(guid)
        };
        let Some(guid) = guid else {
            report.warn(project_path.as_str(), "project declares no GUID, not added to solution");
            return Ok(());
        };

        let solution_path = self.config.solution_file();
        let sln = self.fs.read_text(&solution_path)?;
        let updated = solution::add_project(&sln, &record.name, &guid, record.category)?;
        if updated != sln {
            self.fs.write_text(&solution_path, &updated)?;
            report.action(format!("Added {} to {solution_path}", record.name));
        }
        Ok(())
    }

    /// Drop the project file and solution entry of an example.
    fn drop_project(&self, name: &str, report: &mut OperationReport) -> Result<()> {
        let project_path = self.config.project_file(name);
        if self.fs.remove(&project_path)? {
            report.action(format!("Deleted {project_path}"));
        }

        let solution_path = self.config.solution_file();
        if !self.fs.exists(&solution_path) {
            return Ok(());
        }
        let sln = self.fs.read_text(&solution_path)?;
        if let Some(updated) = solution::remove_project(&sln, name) {
            self.fs.write_text(&solution_path, &updated)?;
            report.action(format!("Removed {name} from {solution_path}"));
        }
        Ok(())
    }

    /// Build the example for the web and copy the output to the web tree.
    fn publish(&self, record: &ExampleRecord, report: &mut OperationReport) -> Result<()> {
        if !record.category.is_web_built() {
            tracing::debug!(name = %record.name, "Category not built for web");
            return Ok(());
        }

        let examples_root = self.config.examples_root();
        self.builder.build(&examples_root, record)?;

        let source = self
            .fs
            .read_text(&self.example_file(record.category, &record.name, "c"))?;
        let published = web::publish(
            self.fs.as_ref(),
            &examples_root,
            &self.config.web_root(),
            record,
            &source,
            &self.config.web,
        )?;
        report.action(format!("Published {} web files for {}", published.len(), record.name));
        Ok(())
    }

    // ------------------------------------------------------------------
    // rename / remove
    // ------------------------------------------------------------------

    /// Rename an example, possibly moving it to another category.
    pub fn rename(&self, old: &str, new: &str) -> OperationReport {
        tracing::info!(old, new, "Renaming example");

        if old == new {
            return rejected(new, "new name equals the current one");
        }
        let category = match check_new_name(new) {
            Ok(category) => category,
            Err(err) => return rejected(new, err),
        };
        let mut report = OperationReport::success();
        let mut collection = match self.load(&mut report) {
            Ok(collection) => collection,
            Err(err) => return rejected(self.config.collection_file().as_str(), err),
        };
        let Some(current) = collection.get(old).cloned() else {
            return rejected(old, Error::ExampleNotFound { name: old.to_string() });
        };
        if collection.contains(new) {
            return rejected(new, Error::DuplicateExample { name: new.to_string() });
        }
        let new_source = self.example_file(category, new, "c");
        if self.fs.exists(&new_source) {
            return rejected(new, format!("source already exists at {new_source}"));
        }

        for extension in ["c", "png"] {
            let from = self.example_file(current.category, old, extension);
            let to = self.example_file(category, new, extension);
            if !self.fs.exists(&from) {
                report.warn(old, format!("{from} not found, not moved"));
                continue;
            }
            match self.fs.rename(&from, &to) {
                Ok(()) => report.action(format!("Moved {from} to {to}")),
                Err(err) => report.error(from.as_str(), err.to_string()),
            }
        }

        let mut record = current.clone();
        record.name = new.to_string();
        record.category = category;

        if let Ok(source) = self.fs.read_text(&new_source) {
            if category != current.category {
                // Shared assets stay where they are, the new category gets copies
                let old_dir = self.config.examples_root().join(current.category.as_str());
                self.copy_resources(&source, &old_dir, category, &mut report);
            }
            let rewritten = header::rewrite(&source, &record, self.current_year);
            if rewritten != source {
                match self.fs.write_text(&new_source, &rewritten) {
                    Ok(()) => report.action(format!("Rewrote header of {new_source}")),
                    Err(err) => report.error(new_source.as_str(), err.to_string()),
                }
            }
        }

        if let Err(err) = collection.replace(old, record) {
            report.error(old, err.to_string());
            return report;
        }
        self.persist(&mut collection, &mut report);

        let project_result = if category == current.category {
            self.rename_project(old, new, &mut report)
        } else {
            self.drop_project(old, &mut report).and_then(|()| match collection.get(new) {
                Some(record) => self.ensure_project(record, &mut report),
                None => Ok(()),
            })
        };
        if let Err(err) = project_result {
            report.error(new, err.to_string());
        }

        match web::unpublish(self.fs.as_ref(), &self.config.web_root(), &current) {
            Ok(0) => {}
            Ok(count) => report.action(format!("Deleted {count} web files of {old}")),
            Err(err) => report.warn(old, format!("old web output not deleted: {err}")),
        }
        if let Some(record) = collection.get(new).cloned()
            && let Err(err) = self.publish(&record, &mut report)
        {
            report.warn(new, format!("web output not published: {err}"));
        }

        tracing::info!(old, new, success = report.success, "Example renamed");
        report
    }

    /// Rename the project file and its solution entry in place, keeping the GUID.
    fn rename_project(&self, old: &str, new: &str, report: &mut OperationReport) -> Result<()> {
        if self.config.is_solution_excluded(old) {
            return Ok(());
        }
        let from = self.config.project_file(old);
        let to = self.config.project_file(new);
        if self.fs.exists(&from) {
            let project = self.fs.read_text(&from)?;
            self.fs.write_text(&to, &project.replace(old, new))?;
            self.fs.remove(&from)?;
            report.action(format!("Renamed {from} to {to}"));
        }

        let solution_path = self.config.solution_file();
        if self.fs.exists(&solution_path) {
            let sln = self.fs.read_text(&solution_path)?;
            let updated = solution::rename_project(&sln, old, new);
            if updated != sln {
                self.fs.write_text(&solution_path, &updated)?;
                report.action(format!("Renamed {old} in {solution_path}"));
            }
        }
        Ok(())
    }

    /// Remove an example and everything generated for it.
    pub fn remove(&self, name: &str) -> OperationReport {
        tracing::info!(name, "Removing example");

        let mut report = OperationReport::success();
        let mut collection = match self.load(&mut report) {
            Ok(collection) => collection,
            Err(err) => return rejected(self.config.collection_file().as_str(), err),
        };
        let Some(record) = collection.remove(name) else {
            return rejected(name, Error::ExampleNotFound { name: name.to_string() });
        };
        report.action(format!("Removed {name} from the collection"));
        self.persist(&mut collection, &mut report);

        for extension in ["c", "png"] {
            let path = self.example_file(record.category, name, extension);
            match self.fs.remove(&path) {
                Ok(true) => report.action(format!("Deleted {path}")),
                Ok(false) => {}
                Err(err) => report.error(path.as_str(), err.to_string()),
            }
        }
        if let Err(err) = self.drop_project(name, &mut report) {
            report.error(name, err.to_string());
        }
        match web::unpublish(self.fs.as_ref(), &self.config.web_root(), &record) {
            Ok(0) => {}
            Ok(count) => report.action(format!("Deleted {count} web files of {name}")),
            Err(err) => report.error(name, err.to_string()),
        }

        tracing::info!(name, success = report.success, "Example removed");
        report
    }

    // ------------------------------------------------------------------
    // validate / update / build
    // ------------------------------------------------------------------

    /// Validate every example.
    ///
    /// Example sources found on disk but missing from the store are
    /// appended to it first. The validated records end up in
    /// [`OperationReport::examples`].
    pub fn validate(&self) -> OperationReport {
        let mut report = OperationReport::success();
        if let Some((collection, _)) = self.load_and_validate(&mut report) {
            report.examples = collection.records().cloned().collect();
        }
        report
    }

    /// Load, discover and validate.
    ///
    /// Also returns the names of examples whose source exists but could not
    /// be read.
    fn load_and_validate(
        &self,
        report: &mut OperationReport,
    ) -> Option<(Collection, BTreeSet<String>)> {
        let mut collection = match self.load(report) {
            Ok(collection) => collection,
            Err(err) => {
                report.error(self.config.collection_file().as_str(), err.to_string());
                return None;
            }
        };

        if self.discover(&mut collection, report) > 0 {
            match self.store().save(&collection) {
                Ok(()) => report.action(format!("Saved {}", self.config.collection_file())),
                Err(err) => report.error(self.config.collection_file().as_str(), err.to_string()),
            }
        }

        let unreadable = self.validate_collection(&mut collection, report);
        Some((collection, unreadable))
    }

    /// Append example sources present on disk but absent from the store.
    ///
    /// Returns how many were appended.
    fn discover(&self, collection: &mut Collection, report: &mut OperationReport) -> usize {
        let root = self.config.examples_root();
        let template = self.config.template_source();
        let mut appended = 0;

        for category in Category::ALL {
            let dir = root.join(category.as_str());
            if !self.fs.exists(&dir) {
                continue;
            }
            let files = match self.fs.list_files(&dir, "c") {
                Ok(files) => files,
                Err(err) => {
                    report.warn(dir.as_str(), format!("not scanned: {err}"));
                    continue;
                }
            };

            for path in files {
                let Some(name) = path.file_stem() else { continue };
                if path == template
                    || path.parent().as_ref() != Some(&dir)
                    || Category::from_example_name(name) != Some(category)
                    || !is_valid_name(name)
                    || collection.contains(name)
                {
                    continue;
                }

                let source = match self.fs.read_text(&path) {
                    Ok(source) => source,
                    Err(err) => {
                        report.error(path.as_str(), format!("not appended: {err}"));
                        continue;
                    }
                };
                let record = HeaderInfo::parse(&source, &self.config.version()).to_record(category, name);
                let name = record.name.clone();
                if collection.insert(record).is_ok() {
                    report.warn(&name, "found on disk but not in the collection, appended");
                    appended += 1;
                }
            }
        }
        appended
    }

    /// Validate every record in place, moving read failures into `report`.
    ///
    /// Returns the names of examples whose source could not be read.
    fn validate_collection(
        &self,
        collection: &mut Collection,
        report: &mut OperationReport,
    ) -> BTreeSet<String> {
        let validator = Validator::new(self.fs.as_ref(), &self.config);
        for diagnostic in validator.diagnostics() {
            report.push(diagnostic.clone());
        }

        let mut unreadable = BTreeSet::new();
        let mut issues = 0;
        for record in collection.records_mut() {
            let validation = validator.validate(record);
            for diagnostic in validation.diagnostics {
                report.push(diagnostic);
            }
            if validation.source_unreadable {
                unreadable.insert(record.name.clone());
            }
            record.status = validation.status;
            record.resources = validation.resources;
            if !record.status.is_clean() {
                issues += 1;
            }
        }
        tracing::info!(examples = collection.len(), issues, "Validated collection");
        unreadable
    }

    /// Validate, fix whatever can be fixed, then validate again.
    ///
    /// Artifacts are regenerated, missing projects and solution entries are
    /// created, missing or placeholder-laden web output is rebuilt and
    /// headers disagreeing with the store are rewritten. Problems that need
    /// a human (screenshots, resources, categories) are reported as
    /// warnings.
    pub fn update(&self) -> OperationReport {
        let mut report = OperationReport::success();
        let Some((mut collection, unreadable)) = self.load_and_validate(&mut report) else {
            return report;
        };

        let synced = Synchronizer::new(self.fs.as_ref(), &self.config).sync_all(&mut collection);
        report = report.merge(synced);

        let records: Vec<ExampleRecord> = collection.records().cloned().collect();
        for record in &records {
            if unreadable.contains(&record.name) {
                continue;
            }
            self.fix(record, &mut report);
        }

        // Read failures were already reported by the first pass
        self.validate_collection(&mut collection, &mut OperationReport::success());
        report.examples = collection.records().cloned().collect();
        tracing::info!(success = report.success, "Update finished");
        report
    }

    fn fix(&self, record: &ExampleRecord, report: &mut OperationReport) {
        let name = record.name.as_str();
        let status = record.status;

        if status.missing_source() {
            report.warn(name, "missing source file, nothing to fix");
            return;
        }
        for (flag, message) in [
            (ValidationStatus::MISSING_SCREENSHOT, "missing screenshot"),
            (ValidationStatus::INVALID_SCREENSHOT, "screenshot is the template one"),
            (ValidationStatus::MISSING_RESOURCES, "missing resources"),
            (ValidationStatus::TOO_MANY_RESOURCES, "too many resources"),
            (ValidationStatus::INVALID_CATEGORY, "invalid category"),
            (ValidationStatus::NOT_IN_PROJECT, "project does not compile the example source"),
        ] {
            if status.contains(flag) {
                report.warn(name, message);
            }
        }

        if status.intersects(ValidationStatus::MISSING_PROJECT | ValidationStatus::NOT_IN_SOLUTION)
            && let Err(err) = self.ensure_project(record, report)
        {
            report.error(name, err.to_string());
        }

        if status.intersects(ValidationStatus::MISSING_WEB_OUTPUT | ValidationStatus::MISSING_WEB_METADATA)
            && let Err(err) = self.publish(record, report)
        {
            report.warn(name, format!("web output not rebuilt: {err}"));
        }

        if status.inconsistent_info() {
            let path = self.example_file(record.category, name, "c");
            let rewritten = self
                .fs
                .read_text(&path)
                .map(|source| (header::rewrite(&source, record, self.current_year), source));
            match rewritten {
                Ok((rewritten, source)) if rewritten != source => {
                    match self.fs.write_text(&path, &rewritten) {
                        Ok(()) => report.action(format!("Rewrote header of {path}")),
                        Err(err) => report.error(path.as_str(), err.to_string()),
                    }
                }
                Ok(_) => report.warn(name, "header inconsistent but could not be rewritten"),
                Err(err) => report.error(path.as_str(), err.to_string()),
            }
        }
    }

    /// Rebuild one example, a category, or all.
    ///
    /// Each example is compiled for the desktop first, then for the web,
    /// and its web output is published. `others` is never built here.
    pub fn build(&self, target: &BuildTarget) -> OperationReport {
        tracing::info!(?target, "Building web output");

        let mut report = OperationReport::success();
        let mut collection = match self.load(&mut report) {
            Ok(collection) => collection,
            Err(err) => return rejected(self.config.collection_file().as_str(), err),
        };
        if let BuildTarget::Example(name) = target
            && !collection.contains(name)
        {
            return rejected(name, Error::ExampleNotFound { name: name.clone() });
        }
        let unreadable = Synchronizer::new(self.fs.as_ref(), &self.config).scan_resources(&mut collection);

        let selected: Vec<&ExampleRecord> = collection
            .records()
            .filter(|r| target.selects(r))
            .collect();

        for record in selected {
            if !record.category.is_web_built() {
                if matches!(target, BuildTarget::Example(_)) {
                    report.warn(&record.name, "category is not built for web");
                }
                continue;
            }
            if let Err(err) = self.builder.build_desktop(&self.config.examples_root(), record) {
                report.error(&record.name, err.to_string());
            } else {
                report.action(format!("Built {} for desktop", record.name));
            }
            if let Some((_, err)) = unreadable.iter().find(|(name, _)| *name == record.name) {
                report.error(&record.name, format!("source not readable: {err}"));
                continue;
            }
            if let Err(err) = self.publish(record, &mut report) {
                report.error(&record.name, err.to_string());
            }
        }
        report
    }

    // ------------------------------------------------------------------
    // testlog
    // ------------------------------------------------------------------

    /// Analyze the build and run logs of one example, a category, or all.
    ///
    /// Logs are read from `<examples_root>/<category>/logs/`. A missing build
    /// log skips the example with a warning. A missing run log fails every
    /// runtime check. Results end up in [`OperationReport::tests`].
    pub fn testlog(&self, target: &BuildTarget) -> OperationReport {
        tracing::info!(?target, "Analyzing test logs");

        let mut report = OperationReport::success();
        let collection = match self.load(&mut report) {
            Ok(collection) => collection,
            Err(err) => return rejected(self.config.collection_file().as_str(), err),
        };
        if let BuildTarget::Example(name) = target
            && !collection.contains(name)
        {
            return rejected(name, Error::ExampleNotFound { name: name.clone() });
        }

        let examples_root = self.config.examples_root();
        for record in collection.records().filter(|r| target.selects(r)) {
            if !record.category.is_web_built()
                || testing::UNTESTED_EXAMPLES.contains(&record.name.as_str())
            {
                tracing::debug!(name = %record.name, "Not tested");
                continue;
            }

            let logs = examples_root.join(&format!("{}/logs", record.category));
            let build_log = logs.join(&format!("{}.build.log", record.name));
            let build_warnings = match self.fs.read_text_if_exists(&build_log) {
                Ok(Some(log)) => testing::count_build_warnings(&log),
                Ok(None) => {
                    report.warn(&record.name, "build log could not be loaded");
                    continue;
                }
                Err(err) => {
                    report.error(build_log.as_str(), err.to_string());
                    continue;
                }
            };

            let run_log = logs.join(&format!("{}.log", record.name));
            let (status, log_warnings) = match self.fs.read_text_if_exists(&run_log) {
                Ok(Some(log)) => testing::analyze_run_log(&log),
                Ok(None) => {
                    report.warn(&record.name, "execution log could not be loaded");
                    (TestingStatus::ALL, 0)
                }
                Err(err) => {
                    report.error(run_log.as_str(), err.to_string());
                    continue;
                }
            };

            report.tests.push(TestResult {
                name: record.name.clone(),
                build_warnings,
                log_warnings,
                status,
            });
        }

        let failing = report.tests.iter().filter(|r| r.has_issues()).count();
        tracing::info!(tested = report.tests.len(), failing, "Analyzed test logs");
        report
    }
}

/// Category of a name about to be created, or why it cannot be.
fn check_new_name(name: &str) -> Result<Category> {
    if !is_valid_name(name) {
        return Err(Error::InvalidName {
            name: name.to_string(),
            reason: "only letters, digits, '_' and '-' are allowed".to_string(),
        });
    }
    Category::from_example_name(name).ok_or_else(|| Error::UnknownCategory {
        name: name.to_string(),
    })
}

fn rejected(subject: &str, reason: impl std::fmt::Display) -> OperationReport {
    OperationReport::rejected(Diagnostic::error(subject, reason.to_string()))
}
