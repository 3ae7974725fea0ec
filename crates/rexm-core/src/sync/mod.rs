//! Regeneration of derived artifacts from the collection
//!
//! Each artifact (Makefile, Makefile.Web, README, web data file) owns one
//! sentinel-delimited region. The [`Synchronizer`] rewrites every region
//! from the collection; a failure on one artifact is reported and the
//! others are still processed.

mod render;

pub use render::{render_build_list, render_readme, render_web_data, render_web_rules};

use rexm_blocks::{MarkerPair, region_body, update_file};
use rexm_fs::{FileSystem, NormalizedPath};

use crate::collection::Collection;
use crate::config::EngineConfig;
use crate::record::ExampleRecord;
use crate::report::{Diagnostic, OperationReport};
use crate::resources;
use crate::validation::ValidationStatus;

pub const BUILD_LIST_MARKERS: MarkerPair<'static> =
    MarkerPair::new("#EXAMPLES_LIST_START", "#EXAMPLES_LIST_END");
pub const README_MARKERS: MarkerPair<'static> =
    MarkerPair::new("## EXAMPLES COLLECTION", "<!-- EXAMPLES_COLLECTION_END -->");
pub const WEB_DATA_MARKERS: MarkerPair<'static> =
    MarkerPair::new("//EXAMPLE_DATA_LIST_START", "//EXAMPLE_DATA_LIST_END");

/// The derived artifacts kept in sync with the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    BuildList,
    WebBuildRules,
    Readme,
    WebData,
}

impl Artifact {
    pub const ALL: [Artifact; 4] = [
        Artifact::BuildList,
        Artifact::WebBuildRules,
        Artifact::Readme,
        Artifact::WebData,
    ];

    pub fn markers(self) -> MarkerPair<'static> {
        match self {
            Artifact::BuildList | Artifact::WebBuildRules => BUILD_LIST_MARKERS,
            Artifact::Readme => README_MARKERS,
            Artifact::WebData => WEB_DATA_MARKERS,
        }
    }

    pub fn path(self, config: &EngineConfig) -> NormalizedPath {
        match self {
            Artifact::BuildList => config.makefile(),
            Artifact::WebBuildRules => config.makefile_web(),
            Artifact::Readme => config.readme_file(),
            Artifact::WebData => config.web_data_file(),
        }
    }

    /// Validation flag set when a record is not listed here.
    pub fn missing_flag(self) -> ValidationStatus {
        match self {
            Artifact::BuildList => ValidationStatus::NOT_IN_BUILD_LIST,
            Artifact::WebBuildRules => ValidationStatus::NOT_IN_WEB_BUILD_LIST,
            Artifact::Readme => ValidationStatus::NOT_IN_README,
            Artifact::WebData => ValidationStatus::NOT_IN_WEB_DATA,
        }
    }

    /// Whether records of this category belong in the artifact at all.
    pub fn covers(self, record: &ExampleRecord) -> bool {
        match self {
            Artifact::BuildList | Artifact::Readme => true,
            Artifact::WebBuildRules | Artifact::WebData => record.category.is_web_built(),
        }
    }

    /// Render the region body for `collection`.
    pub fn render(self, collection: &Collection) -> String {
        match self {
            Artifact::BuildList => render_build_list(collection),
            Artifact::WebBuildRules => render_web_rules(collection),
            Artifact::Readme => render_readme(collection),
            Artifact::WebData => render_web_data(collection),
        }
    }

    /// Whether a region body lists `record`.
    pub fn lists(self, body: &str, record: &ExampleRecord) -> bool {
        match self {
            Artifact::BuildList | Artifact::WebBuildRules => {
                mentions_token(body, &record.relative_stem())
            }
            Artifact::Readme => body.contains(&render::readme_link(record)),
            Artifact::WebData => body.contains(&render::web_data_key(record)),
        }
    }

    /// Whether the rendered region depends on each record's resources.
    pub fn uses_resources(self) -> bool {
        matches!(self, Artifact::WebBuildRules)
    }

    /// The web data file lives in the web site tree and may be absent.
    pub fn is_optional(self) -> bool {
        matches!(self, Artifact::WebData)
    }

    pub fn label(self) -> &'static str {
        match self {
            Artifact::BuildList => "Makefile",
            Artifact::WebBuildRules => "Makefile.Web",
            Artifact::Readme => "README.md",
            Artifact::WebData => "examples.js",
        }
    }
}

/// Whether `token` occurs in `text` delimited by non-identifier characters.
///
/// Keeps `core/core_input` from matching inside `core/core_input_keys`.
pub fn mentions_token(text: &str, token: &str) -> bool {
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    text.match_indices(token).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + token.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}

/// Region bodies of every artifact, read once per validation run.
#[derive(Debug, Default, Clone)]
pub struct Listings {
    bodies: Vec<(Artifact, Option<String>)>,
    diagnostics: Vec<Diagnostic>,
}

impl Listings {
    /// Read the current region of each artifact.
    ///
    /// Absent artifacts and missing sentinels leave the body empty, so
    /// nothing counts as listed. Artifacts that exist but cannot be read
    /// are recorded as error diagnostics.
    pub fn read(fs: &dyn FileSystem, config: &EngineConfig) -> Self {
        let mut diagnostics = Vec::new();
        let bodies = Artifact::ALL
            .into_iter()
            .map(|artifact| {
                let path = artifact.path(config);
                let body = match fs.read_text_if_exists(&path) {
                    Ok(Some(text)) => match region_body(&text, artifact.markers()) {
                        Ok(body) => Some(body.to_string()),
                        Err(err) => {
                            diagnostics.push(Diagnostic::warning(path.as_str(), err.to_string()));
                            None
                        }
                    },
                    Ok(None) => {
                        tracing::debug!(path = %path, "No generated region to check against");
                        None
                    }
                    Err(err) => {
                        diagnostics.push(Diagnostic::error(path.as_str(), err.to_string()));
                        None
                    }
                };
                (artifact, body)
            })
            .collect();
        Self { bodies, diagnostics }
    }

    /// Problems met while reading the artifacts.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Flags for every covering artifact that does not list `record`.
    pub fn missing_flags(&self, record: &ExampleRecord) -> ValidationStatus {
        let mut status = ValidationStatus::empty();
        for (artifact, body) in &self.bodies {
            if !artifact.covers(record) {
                continue;
            }
            let listed = body.as_deref().is_some_and(|b| artifact.lists(b, record));
            status.set(artifact.missing_flag(), !listed);
        }
        status
    }
}

/// Rewrites artifact regions from the collection.
pub struct Synchronizer<'a> {
    fs: &'a dyn FileSystem,
    config: &'a EngineConfig,
}

impl<'a> Synchronizer<'a> {
    pub fn new(fs: &'a dyn FileSystem, config: &'a EngineConfig) -> Self {
        Self { fs, config }
    }

    /// Fill each record's resource list by scanning its source.
    ///
    /// Records whose source does not exist keep an empty list. Records whose
    /// source exists but cannot be read are returned with the read error;
    /// their resource list is left untouched.
    pub fn scan_resources(&self, collection: &mut Collection) -> Vec<(String, rexm_fs::Error)> {
        let root = self.config.examples_root();
        let mut unreadable = Vec::new();
        for record in collection.records_mut() {
            let source = root.join(&format!("{}.c", record.relative_stem()));
            match self.fs.read_text_if_exists(&source) {
                Ok(Some(text)) => record.resources = resources::scan(&text),
                Ok(None) => {
                    tracing::debug!(name = %record.name, "Source missing, no resources");
                    record.resources.clear();
                }
                Err(err) => unreadable.push((record.name.clone(), err)),
            }
        }
        unreadable
    }

    /// Regenerate every artifact.
    ///
    /// The collection's resource lists are refreshed first. An artifact
    /// whose rendering depends on the resources of an example with an
    /// unreadable source is not rewritten, and the run fails.
    pub fn sync_all(&self, collection: &mut Collection) -> OperationReport {
        let unreadable = self.scan_resources(collection);

        let mut report = OperationReport::success();
        for artifact in Artifact::ALL {
            let blocked = artifact.uses_resources().then(|| {
                unreadable.iter().find(|(name, _)| {
                    collection.get(name).is_some_and(|record| artifact.covers(record))
                })
            });
            if let Some(Some((name, err))) = blocked {
                report.error(
                    artifact.path(self.config).as_str(),
                    format!("not regenerated, resources of {name} unknown: {err}"),
                );
                continue;
            }
            self.sync_artifact(artifact, collection, &mut report);
        }
        report
    }

    /// Regenerate one artifact, recording the outcome in `report`.
    pub fn sync_artifact(
        &self,
        artifact: Artifact,
        collection: &Collection,
        report: &mut OperationReport,
    ) {
        let path = artifact.path(self.config);

        if artifact.is_optional() && !self.fs.exists(&path) {
            report.warn(path.as_str(), format!("{} not found, skipping update", artifact.label()));
            return;
        }

        let body = artifact.render(collection);
        match update_file(self.fs, &path, artifact.markers(), &body) {
            Ok(true) => report.action(format!("Updated {path}")),
            Ok(false) => tracing::debug!(path = %path, "Artifact unchanged"),
            Err(err) => report.error(path.as_str(), err.to_string()),
        }
    }
}
