//! Example source header metadata
//!
//! Every example starts with a comment block carrying its own metadata:
//!
//! ```text
//! *   raylib [core] example - 2D Camera system
//! *
//! *   Example complexity rating: [★★☆☆] 2/4
//! *
//! *   Example originally created with raylib 1.5, last time updated with raylib 3.0
//! *
//! *   Copyright (c) 2016-2025 Ramon Santamaria (@raysan5)
//! ```
//!
//! Validation re-derives the record fields from this block and compares
//! them with the store. `update` writes the store values back into it.

use serde::Serialize;

use crate::category::Category;
use crate::record::{
    ExampleRecord, FILLED_STAR, MAX_STARS, Version, count_filled_stars, render_stars,
};
use crate::validation::ValidationStatus;

const TITLE_MARKER: &str = "*   raylib [";
const RATING_MARKER: &str = "Example complexity rating: [";
const CREATED_MARKER: &str = "created with raylib ";
const UPDATED_MARKER: &str = "updated with raylib ";
const VERSIONS_MARKER: &str = "*   Example originally created with raylib ";
const COPYRIGHT_MARKER: &str = "Copyright (c) ";
const CONTRIBUTOR_MARKER: &str = "*   Example contributed by ";
const WINDOW_MARKER: &str = "InitWindow(screenWidth, screenHeight, \"";

/// Star glyph some headers use instead of [`FILLED_STAR`].
pub const ALTERNATE_STAR: &str = "⭐";

/// Start of the header comment in the example template.
pub const TEMPLATE_HEADER_START: &str = "/****************";

/// Metadata parsed from an example's header comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderInfo {
    /// Title after `example - ` on the first header line
    pub title: Option<String>,
    pub stars: u8,
    /// The rating uses [`ALTERNATE_STAR`] somewhere
    pub alternate_glyph: bool,
    pub version_created: Version,
    pub version_updated: Version,
    pub year_created: Option<i32>,
    pub year_reviewed: Option<i32>,
    pub author: String,
    pub author_handle: String,
}

impl HeaderInfo {
    /// Parse the header of `source`.
    ///
    /// Never fails: absent version markers fall back to `default_version`,
    /// an absent copyright line leaves author and handle empty.
    pub fn parse(source: &str, default_version: &Version) -> Self {
        let (stars, alternate_glyph) = parse_rating(source);
        let (year_created, year_reviewed, author, author_handle) = parse_copyright(source);

        Self {
            title: parse_title(source),
            stars,
            alternate_glyph,
            version_created: parse_version(source, CREATED_MARKER)
                .unwrap_or_else(|| default_version.clone()),
            version_updated: parse_version(source, UPDATED_MARKER)
                .unwrap_or_else(|| default_version.clone()),
            year_created,
            year_reviewed,
            author,
            author_handle,
        }
    }

    /// Build a store record for an example whose header this is.
    pub fn to_record(&self, category: Category, name: &str) -> ExampleRecord {
        ExampleRecord {
            category,
            name: name.to_string(),
            stars: self.stars,
            version_created: self.version_created.clone(),
            version_updated: self.version_updated.clone(),
            author: self.author.clone(),
            author_handle: self.author_handle.clone(),
            resources: Vec::new(),
            status: ValidationStatus::default(),
        }
    }

    /// Names of the record fields this header disagrees with.
    ///
    /// An alternate star glyph counts as a mismatch even when the numbers
    /// agree, so both read paths converge on one encoding.
    pub fn mismatches(&self, record: &ExampleRecord) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.stars != record.stars {
            fields.push("stars");
        }
        if self.alternate_glyph {
            fields.push("star glyph");
        }
        if self.version_created != record.version_created {
            fields.push("version created");
        }
        if self.version_updated != record.version_updated {
            fields.push("version updated");
        }
        if self.author != record.author {
            fields.push("author");
        }
        if self.author_handle != record.author_handle {
            fields.push("author handle");
        }
        fields
    }
}

fn line_at(source: &str, start: usize) -> &str {
    let rest = &source[start..];
    let line = rest.split('\n').next().unwrap_or(rest);
    line.strip_suffix('\r').unwrap_or(line)
}

fn parse_title(source: &str) -> Option<String> {
    let start = source.find(TITLE_MARKER)?;
    let line = line_at(source, start);
    let (_, title) = line.split_once("example - ")?;
    Some(title.trim().to_string())
}

fn parse_rating(source: &str) -> (u8, bool) {
    let rating = match source.find(RATING_MARKER) {
        Some(index) => {
            let rest = line_at(source, index + RATING_MARKER.len());
            rest.split(']').next().unwrap_or(rest)
        }
        // No rating line: count glyphs anywhere in the header comment
        None => source.split("*/").next().unwrap_or(source),
    };

    let stars = count_filled_stars(rating) + rating.matches(ALTERNATE_STAR).count();
    let stars = stars.min(usize::from(MAX_STARS)) as u8;
    (stars, rating.contains(ALTERNATE_STAR))
}

fn parse_version(source: &str, marker: &str) -> Option<Version> {
    let start = source.find(marker)? + marker.len();
    let token: String = source[start..]
        .chars()
        .take_while(|c| !matches!(c, ' ' | ',' | '\n' | '\r'))
        .collect();
    Version::parse(&token)
}

fn parse_copyright(source: &str) -> (Option<i32>, Option<i32>, String, String) {
    let Some(start) = source.find(COPYRIGHT_MARKER) else {
        return (None, None, String::new(), String::new());
    };
    let line = line_at(source, start + COPYRIGHT_MARKER.len());

    let (years, rest) = line.split_once(' ').unwrap_or((line, ""));
    let (created, reviewed) = match years.split_once('-') {
        Some((created, reviewed)) => (created.parse().ok(), reviewed.parse().ok()),
        None => {
            let year = years.parse().ok();
            (year, year)
        }
    };

    match rest.split_once(" (@") {
        Some((author, tail)) => {
            let handle = tail.split(')').next().unwrap_or(tail);
            (created, reviewed, author.trim().to_string(), handle.to_string())
        }
        None => (created, reviewed, rest.trim().to_string(), String::new()),
    }
}

/// Replace the text following `begin` on the same line, up to `end`
/// (exclusive) or the end of the line when `end` is `None`.
///
/// Returns `None` when `begin` (or `end` on that line) is absent.
fn replace_on_line(text: &str, begin: &str, end: Option<&str>, replacement: &str) -> Option<String> {
    let start = text.find(begin)? + begin.len();
    let line = line_at(text, start);
    let stop = match end {
        Some(end) => start + line.find(end)?,
        None => start + line.len(),
    };

    let mut updated = String::with_capacity(text.len() + replacement.len());
    updated.push_str(&text[..start]);
    updated.push_str(replacement);
    updated.push_str(&text[stop..]);
    Some(updated)
}

/// `basic_window` -> `basic window`, the title form used in headers and
/// window captions.
pub fn display_title(record: &ExampleRecord) -> String {
    record.short_name().replace('_', " ")
}

/// Rewrite the header fields of `source` from `record`.
///
/// Lines that are absent are left alone. Years come from the existing
/// copyright line, falling back to `current_year`.
pub fn rewrite(source: &str, record: &ExampleRecord, current_year: i32) -> String {
    let existing = HeaderInfo::parse(source, &record.version_created);
    let year_created = existing.year_created.unwrap_or(current_year);
    let year_reviewed = existing.year_reviewed.unwrap_or(year_created);
    let title = display_title(record);
    let mut text = source.to_string();

    apply(
        &mut text,
        TITLE_MARKER,
        None,
        &format!("{}] example - {}", record.category, title),
    );
    apply(
        &mut text,
        RATING_MARKER,
        Some("/4"),
        &format!("{}] {}", render_stars(record.stars, FILLED_STAR), record.stars),
    );
    apply(
        &mut text,
        VERSIONS_MARKER,
        None,
        &format!(
            "{}, last time updated with raylib {}",
            record.version_created, record.version_updated
        ),
    );

    let years = if year_created == year_reviewed {
        year_created.to_string()
    } else {
        format!("{year_created}-{year_reviewed}")
    };
    let copyright_has_handle = text
        .find(COPYRIGHT_MARKER)
        .is_some_and(|i| line_at(&text, i).contains(')'));
    let copyright = if copyright_has_handle {
        (Some(")"), format!("{years} {} (@{}", record.author, record.author_handle))
    } else if record.author_handle.is_empty() {
        (None, format!("{years} {}", record.author))
    } else {
        (None, format!("{years} {} (@{})", record.author, record.author_handle))
    };
    apply(&mut text, COPYRIGHT_MARKER, copyright.0, &copyright.1);

    apply(
        &mut text,
        WINDOW_MARKER,
        Some("\");"),
        &format!("raylib [{}] example - {}", record.category, title),
    );
    if !record.author_handle.is_empty() {
        apply(
            &mut text,
            CONTRIBUTOR_MARKER,
            Some(")"),
            &format!("{} (@{}", record.author, record.author_handle),
        );
    }

    text
}

fn apply(text: &mut String, begin: &str, end: Option<&str>, replacement: &str) {
    if let Some(updated) = replace_on_line(text, begin, end, replacement) {
        *text = updated;
    }
}

/// Instantiate the example template for a new example.
///
/// Anything before the header comment is dropped, `<module>` becomes the
/// category and `<name>` the name without its category prefix.
pub fn instantiate_template(template: &str, category: Category, name: &str) -> String {
    let body = template
        .find(TEMPLATE_HEADER_START)
        .map(|i| &template[i..])
        .unwrap_or(template);
    let short = name
        .strip_prefix(category.as_str())
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(name);
    body.replace("<module>", category.as_str())
        .replace("<name>", short)
}

/// Third line of the header without its comment prefix, used as the web
/// page description.
pub fn description(source: &str) -> Option<String> {
    let line = source.lines().nth(2)?;
    let text = line.trim_start_matches('*').trim();
    (!text.is_empty()).then(|| text.to_string())
}
