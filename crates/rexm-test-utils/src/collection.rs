//! [`TestCollection`] builder for engine test scenarios.
//!
//! Lays out a miniature raylib checkout:
//!
//! ```text
//! raylib/examples/            examples root, store, template, Makefiles, README
//! raylib/projects/VS2022/     raylib.sln and examples/core_basic_window.vcxproj
//! raylib.com/examples/        web root
//! raylib.com/common/          examples.js
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rexm_core::{Engine, EngineConfig, WebBuilder};
use rexm_fs::LocalFs;
use tempfile::TempDir;

use crate::builder::FakeBuilder;
use crate::example::TestExample;

pub const EXAMPLES_DIR: &str = "raylib/examples";
pub const WEB_DIR: &str = "raylib.com/examples";
pub const STORE_FILE: &str = "raylib/examples/examples_list.txt";
pub const TEMPLATE_FILE: &str = "raylib/examples/examples_template.c";
pub const TEMPLATE_SCREENSHOT: &str = "raylib/examples/examples_template.png";
pub const SOLUTION_FILE: &str = "raylib/projects/VS2022/raylib.sln";
pub const PROJECT_TEMPLATE: &str = "raylib/projects/VS2022/examples/core_basic_window.vcxproj";
pub const WEB_DATA_FILE: &str = "raylib.com/common/examples.js";

/// Bytes of the template screenshot. Example screenshots differ from it.
pub const TEMPLATE_PNG: &[u8] = b"\x89PNG template screenshot";

const STORE: &str = "\
#
# raylib examples collection
#
# category;name;stars;version_created;version_updated;\"author\";@handle
#
";

const MAKEFILE: &str = "\
# raylib examples Makefile
CC = gcc

#EXAMPLES_LIST_START
#EXAMPLES_LIST_END

CURRENT_MAKEFILE = $(lastword $(MAKEFILE_LIST))
";

const MAKEFILE_WEB: &str = "\
# raylib examples Makefile for PLATFORM_WEB
CC = emcc

#EXAMPLES_LIST_START
#EXAMPLES_LIST_END
";

const README: &str = "\
# raylib examples

Hand-written introduction.

## EXAMPLES COLLECTION
<!-- EXAMPLES_COLLECTION_END -->

Hand-written footer.
";

const WEB_DATA: &str = "\
function exampleEntry(stars, category, name) { return { stars, category, name }; }

//EXAMPLE_DATA_LIST_START
//EXAMPLE_DATA_LIST_END
";

const TEMPLATE: &str = "\
/*******************************************************************************************
*
*   raylib [<module>] example - <name>
*
*   Example complexity rating: [★☆☆☆] 1/4
*
*   Example originally created with raylib 5.6, last time updated with raylib 5.6
*
*   Example contributed by <author_name> (@<user_github>) and reviewed by Ramon Santamaria (@raysan5)
*
*   Copyright (c) 2025 <author_name> (@<user_github>)
*
********************************************************************************************/

#include \"raylib.h\"

int main(void)
{
    InitWindow(800, 450, \"raylib [<module>] example - <name>\");
    CloseWindow();
    return 0;
}
";

const SOLUTION: &str = "\
Microsoft Visual Studio Solution File, Format Version 12.00
# Visual Studio Version 17
Global
\tGlobalSection(SolutionConfigurationPlatforms) = preSolution
\t\tDebug|x64 = Debug|x64
\tEndGlobalSection
\tGlobalSection(ProjectConfigurationPlatforms) = postSolution
\tEndGlobalSection
\tGlobalSection(NestedProjects) = preSolution
\tEndGlobalSection
EndGlobal
";

const PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project DefaultTargets="Build" ToolsVersion="17.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup Label="Globals">
    <ProjectGuid>{0981CA98-E4A5-4DF1-987F-A41D09131EFC}</ProjectGuid>
    <RootNamespace>core_basic_window</RootNamespace>
    <ProjectName>core_basic_window</ProjectName>
  </PropertyGroup>
  <ItemGroup>
    <ClCompile Include="..\..\..\examples\core\core_basic_window.c" />
  </ItemGroup>
</Project>
"#;

/// A temporary raylib tree with helpers for test setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use rexm_test_utils::{TestCollection, TestExample};
///
/// let tree = TestCollection::new();
/// tree.add(&TestExample::new("core_basic_window"));
/// let report = tree.engine().validate();
/// assert!(report.success);
/// ```
pub struct TestCollection {
    temp_dir: TempDir,
}

impl Default for TestCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCollection {
    /// Lay out an empty collection: every artifact exists with an empty
    /// generated region.
    pub fn new() -> Self {
        let tree = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        tree.write(STORE_FILE, STORE);
        tree.write(TEMPLATE_FILE, TEMPLATE);
        tree.write_bytes(TEMPLATE_SCREENSHOT, TEMPLATE_PNG);
        tree.write(&format!("{EXAMPLES_DIR}/Makefile"), MAKEFILE);
        tree.write(&format!("{EXAMPLES_DIR}/Makefile.Web"), MAKEFILE_WEB);
        tree.write(&format!("{EXAMPLES_DIR}/README.md"), README);
        tree.write(SOLUTION_FILE, SOLUTION);
        tree.write(PROJECT_TEMPLATE, PROJECT);
        tree.write(WEB_DATA_FILE, WEB_DATA);
        fs::create_dir_all(tree.path(WEB_DIR)).unwrap();
        tree
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Absolute path of a file of `example` in its category directory.
    pub fn example_path(&self, example: &TestExample, extension: &str) -> PathBuf {
        self.path(&format!("{EXAMPLES_DIR}/{}.{extension}", example.stem()))
    }

    /// Absolute path of a published web file of `example`.
    pub fn web_path(&self, example: &TestExample, extension: &str) -> PathBuf {
        self.path(&format!("{WEB_DIR}/{}.{extension}", example.stem()))
    }

    /// Engine configuration pointing at this tree.
    pub fn config(&self) -> EngineConfig {
        EngineConfig::new(
            self.path(EXAMPLES_DIR),
            self.path(WEB_DIR),
            self.path(TEMPLATE_FILE),
            self.path(TEMPLATE_SCREENSHOT),
            self.path(STORE_FILE),
            self.path(SOLUTION_FILE),
        )
    }

    /// Write `rexm.toml` for the command line and return its path.
    ///
    /// Reports go to `reports/` and the make command does not exist, so
    /// web builds fail fast instead of invoking a toolchain.
    pub fn write_config_file(&self) -> PathBuf {
        let literal = |relative: &str| format!("'{}'", self.path(relative).display());
        let config = format!(
            "examples_root = {}\nweb_root = {}\ntemplate_source = {}\ntemplate_screenshot = {}\n\
             collection_file = {}\nsolution_file = {}\nreports_dir = {}\n\
             make_command = \"rexm-no-such-make-command\"\n",
            literal(EXAMPLES_DIR),
            literal(WEB_DIR),
            literal(TEMPLATE_FILE),
            literal(TEMPLATE_SCREENSHOT),
            literal(STORE_FILE),
            literal(SOLUTION_FILE),
            literal("reports"),
        );
        self.write("rexm.toml", &config);
        self.path("rexm.toml")
    }

    /// Engine on this tree with a fresh [`FakeBuilder`].
    pub fn engine(&self) -> Engine {
        self.engine_with(FakeBuilder::new())
    }

    pub fn engine_with(&self, builder: impl WebBuilder + 'static) -> Engine {
        Engine::with_parts(self.config(), Box::new(LocalFs::new()), Box::new(builder))
            .unwrap()
            .with_current_year(2025)
    }

    /// Add an example to the store and write its source, screenshot and
    /// resources.
    pub fn add(&self, example: &TestExample) -> &Self {
        self.add_record_only(example);
        self.add_files_only(example)
    }

    /// Append the example's line to the store without creating any file.
    pub fn add_record_only(&self, example: &TestExample) -> &Self {
        let mut store = self.read(STORE_FILE);
        store.push_str(&example.store_line());
        store.push('\n');
        self.write(STORE_FILE, &store);
        self
    }

    /// Write source, screenshot and resources without touching the store.
    pub fn add_files_only(&self, example: &TestExample) -> &Self {
        let stem = format!("{EXAMPLES_DIR}/{}", example.stem());
        self.write(&format!("{stem}.c"), &example.source());
        self.write_bytes(
            &format!("{stem}.png"),
            format!("\u{89}PNG {}", example.name).as_bytes(),
        );
        for resource in &example.resources {
            self.write(
                &format!("{EXAMPLES_DIR}/{}/{resource}", example.category()),
                "resource",
            );
        }
        self
    }

    /// Read a file relative to the root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        self.write_bytes(relative, content.as_bytes());
    }

    pub fn write_bytes(&self, relative: &str, content: &[u8]) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Current store content.
    pub fn store(&self) -> String {
        self.read(STORE_FILE)
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(full_path.exists(), "Expected file to exist: {}", full_path.display());
    }

    /// Assert that `relative` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "File {relative} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }
}
