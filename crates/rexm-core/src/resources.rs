//! Resource path extraction from example sources
//!
//! An example's required assets are the quoted string literals in its
//! source that end in a known asset extension. Literals passed as the
//! destination of an export/save call are outputs and are skipped.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Extensions recognized as resources (compared case-insensitively).
pub const RESOURCE_EXTENSIONS: &[&str] = &[
    // images
    "png", "bmp", "jpg", "qoi", "gif", "raw", "hdr",
    // fonts
    "ttf", "fnt",
    // audio
    "wav", "ogg", "mp3", "flac", "mod", "qoa",
    // models
    "obj", "iqm", "glb", "m3d", "vox",
    // shaders
    "vs", "fs",
    // text
    "txt",
];

/// Calls whose string argument names an output file, with the number of
/// bytes before the literal in which the call name must start.
pub const OUTPUT_CALLS: &[(&str, usize)] = &[
    ("ExportImage", 40),
    ("ExportImageAsCode", 40),
    ("ExportWave", 40),
    ("ExportMesh", 40),
    ("ExportFontAsCode", 40),
    ("TakeScreenshot", 40),
    ("SaveFileData", 40),
    ("SaveFileText", 40),
    ("TraceLog", 10),
];

/// Placeholder standing for the GLSL version directory of a shader path.
pub const GLSL_PLACEHOLDER: &str = "glsl%i";

/// Concrete GLSL versions a placeholder path expands to.
pub const GLSL_VARIANTS: &[u32] = &[100, 120, 330];

/// The single GLSL version shipped with web builds.
pub const WEB_GLSL_VARIANT: u32 = 100;

/// Literals at least this long are not treated as paths.
pub const MAX_RESOURCE_PATH_LEN: usize = 256;

/// Sanity ceiling on resources referenced by one example.
pub const MAX_RESOURCES: usize = 256;

static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("Invalid string literal regex"));

/// Extract the resource paths referenced by `source`.
///
/// Results are deduplicated and kept in first-seen order. Placeholder
/// paths are returned unexpanded.
///
/// # Example
///
/// ```
/// use rexm_core::resources::scan;
///
/// let source = r#"
///     Texture2D logo = LoadTexture("shapes/resources/logo.png");
///     ExportImage(img, "out/cap.png");
/// "#;
/// assert_eq!(scan(source), vec!["shapes/resources/logo.png".to_string()]);
/// ```
pub fn scan(source: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for caps in STRING_LITERAL.captures_iter(source) {
        let Some(literal) = caps.get(1) else {
            continue;
        };
        let path = literal.as_str();

        if path.is_empty() || path.len() >= MAX_RESOURCE_PATH_LEN || !has_resource_extension(path) {
            continue;
        }

        // Opening quote sits one byte before the captured text
        let quote = literal.start() - 1;
        if is_output_argument(source, quote) {
            tracing::debug!(path, "Skipping output path");
            continue;
        }

        if seen.insert(path) {
            paths.push(path.to_string());
        }
    }

    paths
}

fn has_resource_extension(path: &str) -> bool {
    path.rsplit_once('.').is_some_and(|(_, ext)| {
        RESOURCE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    })
}

fn is_output_argument(source: &str, quote: usize) -> bool {
    OUTPUT_CALLS.iter().any(|(call, window)| {
        let mut start = quote.saturating_sub(*window);
        while !source.is_char_boundary(start) {
            start += 1;
        }
        source[start..quote].contains(call)
    })
}

/// Whether the path contains the GLSL placeholder.
pub fn is_templated(path: &str) -> bool {
    path.contains(GLSL_PLACEHOLDER)
}

/// Every concrete path a resource stands for, used by validation.
pub fn expand_all(path: &str) -> Vec<String> {
    if is_templated(path) {
        GLSL_VARIANTS
            .iter()
            .map(|v| path.replacen(GLSL_PLACEHOLDER, &format!("glsl{v}"), 1))
            .collect()
    } else {
        vec![path.to_string()]
    }
}

/// The one concrete path preloaded into web builds.
pub fn expand_web(path: &str) -> String {
    path.replacen(GLSL_PLACEHOLDER, &format!("glsl{WEB_GLSL_VARIANT}"), 1)
}
