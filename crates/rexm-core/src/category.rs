//! The closed set of example categories

use std::fmt;

use serde::{Deserialize, Serialize};

/// Example category, in the fixed order used by every generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Core,
    Shapes,
    Textures,
    Text,
    Models,
    Shaders,
    Audio,
    Others,
}

impl Category {
    /// All categories in artifact order.
    pub const ALL: [Category; 8] = [
        Category::Core,
        Category::Shapes,
        Category::Textures,
        Category::Text,
        Category::Models,
        Category::Shaders,
        Category::Audio,
        Category::Others,
    ];

    /// The lowercase tag used in the store, directory names and name prefixes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Core => "core",
            Category::Shapes => "shapes",
            Category::Textures => "textures",
            Category::Text => "text",
            Category::Models => "models",
            Category::Shaders => "shaders",
            Category::Audio => "audio",
            Category::Others => "others",
        }
    }

    /// Parse a category tag. Matching is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }

    /// Derive the category from an example name prefix (`core_basic_window` -> `Core`).
    pub fn from_example_name(name: &str) -> Option<Self> {
        let (prefix, rest) = name.split_once('_')?;
        if rest.is_empty() {
            return None;
        }
        Self::from_tag(prefix)
    }

    /// Makefile variable holding this category's example list.
    pub fn variable_name(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// `others` holds examples that need external libraries and is never
    /// compiled for the web.
    pub fn is_web_built(&self) -> bool {
        !matches!(self, Category::Others)
    }

    /// Introductory paragraph rendered under the README category heading.
    pub fn description(&self) -> &'static str {
        match self {
            Category::Core => {
                "Examples using raylib [core](../src/rcore.c) module platform functionality: window creation, inputs, drawing modes and system functionality."
            }
            Category::Shapes => {
                "Examples using raylib shapes drawing functionality, provided by raylib [shapes](../src/rshapes.c) module."
            }
            Category::Textures => {
                "Examples using raylib textures functionality, including image/textures loading/generation and drawing, provided by raylib [textures](../src/rtextures.c) module."
            }
            Category::Text => {
                "Examples using raylib text functionality, including sprite fonts loading/generation and text drawing, provided by raylib [text](../src/rtext.c) module."
            }
            Category::Models => {
                "Examples using raylib models functionality, including models loading/generation and drawing, provided by raylib [models](../src/rmodels.c) module."
            }
            Category::Shaders => {
                "Examples using raylib shaders functionality, including shaders loading, parameters configuration and drawing using them (model shaders and postprocessing shaders). This functionality is directly provided by raylib [rlgl](../src/rlgl.c) module."
            }
            Category::Audio => {
                "Examples using raylib audio functionality, including sound/music loading and playing. This functionality is provided by raylib [raudio](../src/raudio.c) module. Note this module can be used standalone independently of raylib."
            }
            Category::Others => {
                "Examples showing raylib misc functionality that does not fit in other categories, like standalone modules usage or examples integrating external libraries."
            }
        }
    }

    /// GUID of the solution folder that nests this category's projects.
    pub fn solution_folder_guid(&self) -> &'static str {
        match self {
            Category::Core => "6C82BAAE-BDDF-457D-8FA8-7E2490B07035",
            Category::Shapes => "278D8859-20B1-428F-8448-064F46E1F021",
            Category::Textures => "DA049009-21FF-4AC0-84E4-830DD1BCD0CE",
            Category::Text => "8D3C83B7-F1E0-4C2E-9E34-EE5F6AB2502A",
            Category::Models => "AF5BEC5C-1F2B-4DA8-B12D-D09FE569237C",
            Category::Shaders => "5317807F-61D4-4E0F-B6DC-2D9F12621ED9",
            Category::Audio => "CC132A4D-D081-4C26-BFB9-AB11984054F8",
            Category::Others => "E9D708A5-9C1F-4B84-A795-C5F191801762",
        }
    }

    /// Categories that get web build rules, web data entries and web output.
    pub fn web_built() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(Category::is_web_built)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
