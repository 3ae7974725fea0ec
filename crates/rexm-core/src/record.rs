//! Example records and the canonical store line codec
//!
//! One line of the collection store describes one example:
//!
//! ```text
//! core;core_basic_window;★☆☆☆;1.0;1.0;"Ray";@raysan5
//! ```
//!
//! Fields are `category;name;stars;created;updated;"author";@handle`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::category::Category;
use crate::validation::ValidationStatus;

/// Filled star glyph used in the store and in source headers.
pub const FILLED_STAR: &str = "★";
/// Empty star glyph used in the store and in source headers.
pub const EMPTY_STAR: &str = "☆";
/// Star glyph used for rendering in the README and web data file.
pub const DISPLAY_STAR: &str = "⭐️";
/// Highest difficulty rating.
pub const MAX_STARS: u8 = 4;

/// Reasons a store line is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordParseError {
    #[error("expected 7 ';'-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("unknown category '{tag}'")]
    UnknownCategory { tag: String },

    #[error("invalid example name '{name}'")]
    InvalidName { name: String },

    #[error("{count} filled stars exceeds the maximum of 4")]
    TooManyStars { count: usize },

    #[error("invalid {field} version '{value}'")]
    InvalidVersion { field: &'static str, value: String },
}

/// A raylib version as written in the store, e.g. `5.5` or `1.0`.
///
/// The original text is kept so a record serializes back byte-for-byte;
/// comparisons use the numeric dot-separated components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Accepts non-empty dot-separated runs of ASCII digits.
    pub fn parse(text: &str) -> Option<Self> {
        let valid = !text.is_empty()
            && text
                .split('.')
                .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
        valid.then(|| Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn components(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.split('.').map(|part| part.parse().unwrap_or(u64::MAX))
    }

    /// Numeric ordering, so `5.10` sorts after `5.9` and `1.0 == 1.00`.
    pub fn cmp_numeric(&self, other: &Version) -> Ordering {
        let mut left = self.components();
        let mut right = other.components();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (l, r) => match l.unwrap_or(0).cmp(&r.unwrap_or(0)) {
                    Ordering::Equal => continue,
                    unequal => return unequal,
                },
            }
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self("1.0".to_string())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One example of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleRecord {
    pub category: Category,
    pub name: String,
    pub stars: u8,
    pub version_created: Version,
    pub version_updated: Version,
    pub author: String,
    pub author_handle: String,
    /// Resource paths referenced by the source, filled in by scanning.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    /// Computed by validation, never persisted.
    pub status: ValidationStatus,
}

impl ExampleRecord {
    /// Parse one store line.
    ///
    /// A trailing `\r` is ignored. Quotes around the author and the leading
    /// `@` of the handle are optional on input and always emitted by
    /// [`ExampleRecord::to_line`].
    ///
    /// # Errors
    ///
    /// Returns a [`RecordParseError`] describing the first malformed field.
    ///
    /// # Example
    ///
    /// ```
    /// use rexm_core::record::ExampleRecord;
    ///
    /// let line = r#"core;core_basic_window;★★☆☆;1.0;1.0;"Ray";@raysan5"#;
    /// let record = ExampleRecord::parse_line(line).unwrap();
    /// assert_eq!(record.stars, 2);
    /// assert_eq!(record.to_line(), line);
    /// ```
    pub fn parse_line(line: &str) -> Result<Self, RecordParseError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let fields: Vec<&str> = line.split(';').collect();
        let [category, name, stars, created, updated, author, handle] = fields[..] else {
            return Err(RecordParseError::FieldCount {
                found: fields.len(),
            });
        };

        let category = Category::from_tag(category).ok_or_else(|| {
            RecordParseError::UnknownCategory {
                tag: category.to_string(),
            }
        })?;

        if !is_valid_name(name) {
            return Err(RecordParseError::InvalidName {
                name: name.to_string(),
            });
        }

        let filled = count_filled_stars(stars);
        if filled > usize::from(MAX_STARS) {
            return Err(RecordParseError::TooManyStars { count: filled });
        }

        let version_created =
            Version::parse(created).ok_or_else(|| RecordParseError::InvalidVersion {
                field: "created",
                value: created.to_string(),
            })?;
        let version_updated =
            Version::parse(updated).ok_or_else(|| RecordParseError::InvalidVersion {
                field: "updated",
                value: updated.to_string(),
            })?;

        let author = author.strip_prefix('"').unwrap_or(author);
        let author = author.strip_suffix('"').unwrap_or(author);
        let handle = handle.strip_prefix('@').unwrap_or(handle);

        Ok(Self {
            category,
            name: name.to_string(),
            stars: filled as u8,
            version_created,
            version_updated,
            author: author.to_string(),
            author_handle: handle.to_string(),
            resources: Vec::new(),
            status: ValidationStatus::default(),
        })
    }

    /// Render the store line for this record, without a line terminator.
    pub fn to_line(&self) -> String {
        format!(
            "{};{};{};{};{};\"{}\";@{}",
            self.category,
            self.name,
            render_stars(self.stars, FILLED_STAR),
            self.version_created,
            self.version_updated,
            self.author,
            self.author_handle
        )
    }

    /// Name with the category prefix removed (`core_basic_window` -> `basic_window`).
    pub fn short_name(&self) -> &str {
        self.name
            .split_once('_')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.name)
    }

    /// `category/name`, the form used in build lists and README links.
    pub fn relative_stem(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }

    /// Whether the name prefix agrees with the stored category.
    pub fn has_consistent_category(&self) -> bool {
        Category::from_example_name(&self.name) == Some(self.category)
    }
}

impl FromStr for ExampleRecord {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s)
    }
}

impl fmt::Display for ExampleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Example names become file stems and Makefile targets.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Count occurrences of [`FILLED_STAR`]; any other glyph is unfilled.
pub fn count_filled_stars(field: &str) -> usize {
    field.matches(FILLED_STAR).count()
}

/// `stars` copies of `filled` followed by empty glyphs up to four.
pub fn render_stars(stars: u8, filled: &str) -> String {
    let stars = stars.min(MAX_STARS);
    let mut text = filled.repeat(usize::from(stars));
    text.push_str(&EMPTY_STAR.repeat(usize::from(MAX_STARS - stars)));
    text
}
