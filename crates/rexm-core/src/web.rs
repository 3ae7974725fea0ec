//! Compiled web output: presence, page metadata and publishing

use rexm_fs::{FileSystem, NormalizedPath};

use crate::config::WebSettings;
use crate::header;
use crate::record::ExampleRecord;
use crate::Result;

/// Shell template text replaced with per-example metadata.
pub const TITLE_PLACEHOLDER: &str = "raylib web game";
pub const DESCRIPTION_PLACEHOLDER: &str =
    "New raylib web videogame, developed using raylib videogames library";
pub const IMAGE_PLACEHOLDER: &str = "https://www.raylib.com/common/raylib_logo.png";
pub const URL_PLACEHOLDER: &str = "https://www.raylib.com/games.html";
pub const SITE_NAME_PLACEHOLDER: &str = "raylib - example";
/// The source button link ends with a quote in the shell script.
pub const SOURCE_PLACEHOLDER: &str = "https://github.com/raysan5/raylib'";

const PLACEHOLDERS: [&str; 5] = [
    TITLE_PLACEHOLDER,
    DESCRIPTION_PLACEHOLDER,
    IMAGE_PLACEHOLDER,
    URL_PLACEHOLDER,
    SOURCE_PLACEHOLDER,
];

/// Extensions of the files a web build produces for an example.
///
/// The `.data` package only exists when resources are preloaded.
pub fn output_extensions(record: &ExampleRecord) -> Vec<&'static str> {
    let mut extensions = vec!["html", "wasm", "js"];
    if !record.resources.is_empty() {
        extensions.push("data");
    }
    extensions
}

/// Output file of `record` with `extension` under `root/<category>/`.
pub fn output_path(root: &NormalizedPath, record: &ExampleRecord, extension: &str) -> NormalizedPath {
    root.join(&format!("{}.{extension}", record.relative_stem()))
}

/// Whether published html still carries shell template text.
pub fn has_placeholders(html: &str) -> bool {
    PLACEHOLDERS.iter().any(|p| html.contains(p))
}

/// Replace the shell template text with the example's metadata.
///
/// `source` is the example source, whose third header line becomes the
/// page description.
pub fn apply_metadata(html: &str, record: &ExampleRecord, source: &str, web: &WebSettings) -> String {
    let stem = record.relative_stem();
    let title = record.name.replace('_', " ");
    let description = header::description(source).unwrap_or_else(|| title.clone());

    html.replace(TITLE_PLACEHOLDER, &title)
        .replace(DESCRIPTION_PLACEHOLDER, &description)
        .replace(
            IMAGE_PLACEHOLDER,
            &format!("{}/examples/{stem}.png", web.raw_source_url),
        )
        .replace(URL_PLACEHOLDER, &format!("{}/examples/{stem}.html", web.site_url))
        .replace(SITE_NAME_PLACEHOLDER, &format!("raylib - {}", record.name))
        .replace(
            SOURCE_PLACEHOLDER,
            &format!("{}/blob/master/examples/{stem}.c'", web.source_url),
        )
}

/// Copy freshly built output from the examples tree to the web tree,
/// filling in html metadata on the way.
///
/// Returns the published paths.
pub fn publish(
    fs: &dyn FileSystem,
    examples_root: &NormalizedPath,
    web_root: &NormalizedPath,
    record: &ExampleRecord,
    source: &str,
    web: &WebSettings,
) -> Result<Vec<NormalizedPath>> {
    let mut published = Vec::new();

    for extension in output_extensions(record) {
        let built = output_path(examples_root, record, extension);
        let target = output_path(web_root, record, extension);
        if !fs.exists(&built) {
            tracing::debug!(path = %built, "Build produced no such output");
            continue;
        }

        if extension == "html" {
            let html = fs.read_text(&built)?;
            fs.write_text(&target, &apply_metadata(&html, record, source, web))?;
        } else {
            fs.copy(&built, &target)?;
        }
        published.push(target);
    }

    tracing::debug!(name = %record.name, files = published.len(), "Published web output");
    Ok(published)
}

/// Delete published output of `record` from the web tree.
///
/// Returns how many files were deleted.
pub fn unpublish(fs: &dyn FileSystem, web_root: &NormalizedPath, record: &ExampleRecord) -> Result<usize> {
    let mut removed = 0;
    for extension in ["html", "wasm", "js", "data"] {
        if fs.remove(&output_path(web_root, record, extension))? {
            removed += 1;
        }
    }
    Ok(removed)
}
