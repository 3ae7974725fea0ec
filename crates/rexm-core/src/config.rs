//! Engine configuration
//!
//! Every path the engine touches is derived from one [`EngineConfig`]
//! value passed in by the caller. Nothing is read from process globals
//! after construction.

use std::path::{Path, PathBuf};

use rexm_fs::{ConfigStore, MAX_BUFFER_SIZE, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::record::Version;
use crate::{Error, Result};

pub const ENV_EXAMPLES_BASE_PATH: &str = "REXM_EXAMPLES_BASE_PATH";
pub const ENV_EXAMPLES_WEB_PATH: &str = "REXM_EXAMPLES_WEB_PATH";
pub const ENV_TEMPLATE_FILE_PATH: &str = "REXM_EXAMPLES_TEMPLATE_FILE_PATH";
pub const ENV_TEMPLATE_SCREENSHOT_PATH: &str = "REXM_EXAMPLES_TEMPLATE_SCREENSHOT_PATH";
pub const ENV_COLLECTION_FILE_PATH: &str = "REXM_EXAMPLES_COLLECTION_FILE_PATH";
pub const ENV_SOLUTION_FILE: &str = "REXM_EXAMPLES_VS2022_SLN_FILE";

fn default_version() -> String {
    "5.6".to_string()
}

fn default_make_command() -> String {
    "make".to_string()
}

fn default_solution_exclusions() -> Vec<String> {
    vec![
        "web_basic_window".to_string(),
        "raylib_opengl_interop".to_string(),
    ]
}

fn default_max_buffer_size() -> u64 {
    MAX_BUFFER_SIZE
}

fn default_site_url() -> String {
    "https://www.raylib.com".to_string()
}

fn default_source_url() -> String {
    "https://github.com/raysan5/raylib".to_string()
}

fn default_raw_source_url() -> String {
    "https://raw.githubusercontent.com/raysan5/raylib/master".to_string()
}

/// Public URLs used when filling web page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSettings {
    /// Public site hosting the compiled examples
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// Repository browsed by the "source code" button
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Raw file host for screenshot previews
    #[serde(default = "default_raw_source_url")]
    pub raw_source_url: String,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            source_url: default_source_url(),
            raw_source_url: default_raw_source_url(),
        }
    }
}

/// Configuration of one examples collection.
///
/// The six root paths are required. Everything else derives from them
/// unless set explicitly.
///
/// # Example
///
/// ```
/// use rexm_core::EngineConfig;
///
/// let config: EngineConfig = toml::from_str(r#"
/// examples_root = "raylib/examples"
/// web_root = "raylib.com/examples"
/// template_source = "raylib/examples/examples_template.c"
/// template_screenshot = "raylib/examples/examples_template.png"
/// collection_file = "raylib/examples/examples_list.txt"
/// solution_file = "raylib/projects/VS2022/raylib.sln"
/// "#).unwrap();
///
/// assert_eq!(config.default_version, "5.6");
/// assert_eq!(config.makefile().as_str(), "raylib/examples/Makefile");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub examples_root: PathBuf,
    pub web_root: PathBuf,
    pub template_source: PathBuf,
    pub template_screenshot: PathBuf,
    pub collection_file: PathBuf,
    pub solution_file: PathBuf,

    /// Directory holding one IDE project per example
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects_dir: Option<PathBuf>,
    /// Project file copied for new examples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_template: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_data_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub makefile: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub makefile_web: Option<PathBuf>,
    /// Where validation reports are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_dir: Option<PathBuf>,

    /// Version assumed when a source header names none
    #[serde(default = "default_version")]
    pub default_version: String,
    #[serde(default = "default_make_command")]
    pub make_command: String,
    /// Examples never added to the IDE solution
    #[serde(default = "default_solution_exclusions")]
    pub solution_exclusions: Vec<String>,
    #[serde(default = "default_max_buffer_size")]
    pub max_buffer_size: u64,
    #[serde(default)]
    pub web: WebSettings,
}

impl EngineConfig {
    /// Build a configuration from the six required roots.
    pub fn new(
        examples_root: impl Into<PathBuf>,
        web_root: impl Into<PathBuf>,
        template_source: impl Into<PathBuf>,
        template_screenshot: impl Into<PathBuf>,
        collection_file: impl Into<PathBuf>,
        solution_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            examples_root: examples_root.into(),
            web_root: web_root.into(),
            template_source: template_source.into(),
            template_screenshot: template_screenshot.into(),
            collection_file: collection_file.into(),
            solution_file: solution_file.into(),
            projects_dir: None,
            project_template: None,
            web_data_file: None,
            readme_file: None,
            makefile: None,
            makefile_web: None,
            reports_dir: None,
            default_version: default_version(),
            make_command: default_make_command(),
            solution_exclusions: default_solution_exclusions(),
            max_buffer_size: default_max_buffer_size(),
            web: WebSettings::default(),
        }
    }

    /// Load a configuration file (TOML or JSON), then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fs`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: Self = ConfigStore::new().load(&NormalizedPath::new(path))?;
        config.apply_env(|key| std::env::var(key).ok());
        tracing::debug!(path = %path.display(), "Loaded engine configuration");
        Ok(config)
    }

    /// Build a configuration purely from `REXM_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first variable that is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key).filter(|v| !v.is_empty()).ok_or_else(|| Error::Config {
                message: format!("environment variable {key} is not set"),
            })
        };

        Ok(Self::new(
            require(ENV_EXAMPLES_BASE_PATH)?,
            require(ENV_EXAMPLES_WEB_PATH)?,
            require(ENV_TEMPLATE_FILE_PATH)?,
            require(ENV_TEMPLATE_SCREENSHOT_PATH)?,
            require(ENV_COLLECTION_FILE_PATH)?,
            require(ENV_SOLUTION_FILE)?,
        ))
    }

    /// Override roots with any `REXM_*` variable that is set.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let overrides: [(&str, &mut PathBuf); 6] = [
            (ENV_EXAMPLES_BASE_PATH, &mut self.examples_root),
            (ENV_EXAMPLES_WEB_PATH, &mut self.web_root),
            (ENV_TEMPLATE_FILE_PATH, &mut self.template_source),
            (ENV_TEMPLATE_SCREENSHOT_PATH, &mut self.template_screenshot),
            (ENV_COLLECTION_FILE_PATH, &mut self.collection_file),
            (ENV_SOLUTION_FILE, &mut self.solution_file),
        ];
        for (key, slot) in overrides {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                tracing::debug!(key, value = %value, "Environment override");
                *slot = PathBuf::from(value);
            }
        }
    }

    /// Fail when a root the engine cannot work without is missing.
    ///
    /// Other paths are checked when the artifact they point to is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootNotFound`] for a missing examples root or
    /// collection file.
    pub fn check_roots(&self) -> Result<()> {
        if !self.examples_root.is_dir() {
            return Err(Error::root_not_found("examples root", &self.examples_root));
        }
        if !self.collection_file.is_file() {
            return Err(Error::root_not_found("collection file", &self.collection_file));
        }
        Ok(())
    }

    pub fn examples_root(&self) -> NormalizedPath {
        NormalizedPath::new(&self.examples_root)
    }

    pub fn web_root(&self) -> NormalizedPath {
        NormalizedPath::new(&self.web_root)
    }

    pub fn template_source(&self) -> NormalizedPath {
        NormalizedPath::new(&self.template_source)
    }

    pub fn template_screenshot(&self) -> NormalizedPath {
        NormalizedPath::new(&self.template_screenshot)
    }

    pub fn collection_file(&self) -> NormalizedPath {
        NormalizedPath::new(&self.collection_file)
    }

    pub fn solution_file(&self) -> NormalizedPath {
        NormalizedPath::new(&self.solution_file)
    }

    pub fn projects_dir(&self) -> NormalizedPath {
        match &self.projects_dir {
            Some(dir) => NormalizedPath::new(dir),
            None => self
                .solution_file()
                .parent()
                .unwrap_or_else(|| NormalizedPath::new("."))
                .join("examples"),
        }
    }

    pub fn project_template(&self) -> NormalizedPath {
        match &self.project_template {
            Some(path) => NormalizedPath::new(path),
            None => self.projects_dir().join("core_basic_window.vcxproj"),
        }
    }

    /// Project file of one example.
    pub fn project_file(&self, name: &str) -> NormalizedPath {
        self.projects_dir().join(&format!("{name}.vcxproj"))
    }

    pub fn web_data_file(&self) -> NormalizedPath {
        match &self.web_data_file {
            Some(path) => NormalizedPath::new(path),
            None => self.web_root().join("../common/examples.js"),
        }
    }

    pub fn readme_file(&self) -> NormalizedPath {
        self.derived(&self.readme_file, "README.md")
    }

    pub fn makefile(&self) -> NormalizedPath {
        self.derived(&self.makefile, "Makefile")
    }

    pub fn makefile_web(&self) -> NormalizedPath {
        self.derived(&self.makefile_web, "Makefile.Web")
    }

    pub fn reports_dir(&self) -> NormalizedPath {
        match &self.reports_dir {
            Some(dir) => NormalizedPath::new(dir),
            None => self.examples_root(),
        }
    }

    fn derived(&self, explicit: &Option<PathBuf>, file_name: &str) -> NormalizedPath {
        match explicit {
            Some(path) => NormalizedPath::new(path),
            None => self.examples_root().join(file_name),
        }
    }

    /// Version assumed for headers that name none.
    pub fn version(&self) -> Version {
        Version::parse(&self.default_version).unwrap_or_default()
    }

    /// Whether `name` is kept out of the IDE solution.
    pub fn is_solution_excluded(&self, name: &str) -> bool {
        self.solution_exclusions.iter().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample() -> EngineConfig {
        EngineConfig::new(
            "raylib/examples",
            "raylib.com/examples",
            "raylib/examples/examples_template.c",
            "raylib/examples/examples_template.png",
            "raylib/examples/examples_list.txt",
            "raylib/projects/VS2022/raylib.sln",
        )
    }

    #[test]
    fn test_derived_paths() {
        let config = sample();
        assert_eq!(config.readme_file().as_str(), "raylib/examples/README.md");
        assert_eq!(config.makefile_web().as_str(), "raylib/examples/Makefile.Web");
        assert_eq!(
            config.project_file("core_basic_window").as_str(),
            "raylib/projects/VS2022/examples/core_basic_window.vcxproj"
        );
        assert_eq!(
            config.web_data_file().as_str(),
            "raylib.com/examples/../common/examples.js"
        );
        assert_eq!(config.reports_dir().as_str(), "raylib/examples");
    }

    #[test]
    fn test_from_lookup_requires_every_root() {
        let mut vars: HashMap<&str, &str> = HashMap::from([
            (ENV_EXAMPLES_BASE_PATH, "ex"),
            (ENV_EXAMPLES_WEB_PATH, "web"),
            (ENV_TEMPLATE_FILE_PATH, "ex/examples_template.c"),
            (ENV_TEMPLATE_SCREENSHOT_PATH, "ex/examples_template.png"),
            (ENV_COLLECTION_FILE_PATH, "ex/examples_list.txt"),
        ]);

        let err = EngineConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();
        assert!(err.to_string().contains(ENV_SOLUTION_FILE));

        vars.insert(ENV_SOLUTION_FILE, "raylib.sln");
        let config = EngineConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.examples_root, PathBuf::from("ex"));
        assert!(config.is_solution_excluded("web_basic_window"));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = sample();
        config.apply_env(|k| (k == ENV_EXAMPLES_WEB_PATH).then(|| "elsewhere".to_string()));
        assert_eq!(config.web_root, PathBuf::from("elsewhere"));
        assert_eq!(config.examples_root, PathBuf::from("raylib/examples"));
    }

    #[test]
    fn test_check_roots_reports_missing_examples_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = sample();
        config.examples_root = dir.path().join("missing");
        let err = config.check_roots().unwrap_err();
        assert!(matches!(err, Error::RootNotFound { role: "examples root", .. }));
    }
}
