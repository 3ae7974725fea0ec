//! The canonical collection store
//!
//! The store is a plain text file with one record per line. Comment lines
//! (`#`), blank lines and anything not starting with a known category tag
//! are kept verbatim so the file survives a load/save cycle unchanged.

use std::collections::HashSet;

use rexm_fs::{FileSystem, NormalizedPath};

use crate::Result;
use crate::category::Category;
use crate::record::{ExampleRecord, RecordParseError};
use crate::report::Diagnostic;

/// Sanity ceiling on the number of examples in one collection.
pub const MAX_EXAMPLES: usize = 512;

/// One line of the store file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StoreLine {
    Verbatim(String),
    Record(ExampleRecord),
}

/// Ordered collection of example records.
///
/// Names are unique; [`Collection::insert`] refuses duplicates and loading
/// drops later duplicates with a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    lines: Vec<StoreLine>,
}

/// Result of parsing store text: the collection plus anything worth reporting.
#[derive(Debug, Clone, Default)]
pub struct LoadedCollection {
    pub collection: Collection,
    pub diagnostics: Vec<Diagnostic>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse store text.
    ///
    /// Malformed lines with a known category tag are kept verbatim (so the
    /// author can fix them) and reported. Lines that are not records at
    /// all are kept verbatim silently.
    pub fn parse(text: &str) -> LoadedCollection {
        let mut collection = Collection::new();
        let mut diagnostics = Vec::new();
        let mut names = HashSet::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let line_no = index + 1;

            if !looks_like_record(line) {
                collection.lines.push(StoreLine::Verbatim(line.to_string()));
                continue;
            }

            match ExampleRecord::parse_line(line) {
                Ok(record) if !names.insert(record.name.clone()) => {
                    tracing::warn!(name = %record.name, line = line_no, "Duplicate example dropped");
                    diagnostics.push(Diagnostic::warning(
                        &record.name,
                        format!("duplicate entry on line {line_no} dropped"),
                    ));
                }
                Ok(record) => collection.lines.push(StoreLine::Record(record)),
                Err(err) => {
                    tracing::warn!(line = line_no, error = %err, "Skipping malformed store line");
                    diagnostics.push(malformed(line_no, &err));
                    collection.lines.push(StoreLine::Verbatim(line.to_string()));
                }
            }
        }

        if collection.len() > MAX_EXAMPLES {
            diagnostics.push(Diagnostic::warning(
                "collection",
                format!(
                    "{} examples exceeds the supported maximum of {MAX_EXAMPLES}",
                    collection.len()
                ),
            ));
        }

        LoadedCollection {
            collection,
            diagnostics,
        }
    }

    /// Render the store text. Every line, including the last, ends in `\n`.
    pub fn render(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            match line {
                StoreLine::Verbatim(raw) => text.push_str(raw),
                StoreLine::Record(record) => text.push_str(&record.to_line()),
            }
            text.push('\n');
        }
        text
    }

    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records in store order.
    pub fn records(&self) -> impl Iterator<Item = &ExampleRecord> {
        self.lines.iter().filter_map(|line| match line {
            StoreLine::Record(record) => Some(record),
            StoreLine::Verbatim(_) => None,
        })
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut ExampleRecord> {
        self.lines.iter_mut().filter_map(|line| match line {
            StoreLine::Record(record) => Some(record),
            StoreLine::Verbatim(_) => None,
        })
    }

    /// Records of one category in store order.
    pub fn by_category(&self, category: Category) -> Vec<&ExampleRecord> {
        self.records().filter(|r| r.category == category).collect()
    }

    /// Records of one category sorted by name.
    pub fn sorted_by_category(&self, category: Category) -> Vec<&ExampleRecord> {
        let mut records = self.by_category(category);
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    pub fn get(&self, name: &str) -> Option<&ExampleRecord> {
        self.records().find(|r| r.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ExampleRecord> {
        self.records_mut().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert a record after the last record of its category.
    ///
    /// With no record of that category yet, it goes before the first record
    /// of a later category, or at the end of the file.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateExample` when the name is already taken;
    /// the collection is unchanged in that case.
    pub fn insert(&mut self, record: ExampleRecord) -> Result<()> {
        if self.contains(&record.name) {
            return Err(crate::Error::DuplicateExample { name: record.name });
        }

        let last_of_category = self.lines.iter().rposition(
            |line| matches!(line, StoreLine::Record(r) if r.category == record.category),
        );
        let first_of_later = self.lines.iter().position(
            |line| matches!(line, StoreLine::Record(r) if r.category > record.category),
        );

        let index = match (last_of_category, first_of_later) {
            (Some(last), _) => last + 1,
            (None, Some(later)) => later,
            (None, None) => self.lines.len(),
        };
        self.lines.insert(index, StoreLine::Record(record));
        Ok(())
    }

    /// Remove a record by name.
    pub fn remove(&mut self, name: &str) -> Option<ExampleRecord> {
        let index = self
            .lines
            .iter()
            .position(|line| matches!(line, StoreLine::Record(r) if r.name == name))?;
        match self.lines.remove(index) {
            StoreLine::Record(record) => Some(record),
            StoreLine::Verbatim(_) => None,
        }
    }

    /// Replace a record, keeping its position when the category is unchanged
    /// and moving it to the end of its new category otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::ExampleNotFound` for an unknown `old_name` and
    /// `Error::DuplicateExample` when the new name belongs to another record.
    pub fn replace(&mut self, old_name: &str, record: ExampleRecord) -> Result<()> {
        if record.name != old_name && self.contains(&record.name) {
            return Err(crate::Error::DuplicateExample { name: record.name });
        }
        let Some(current) = self.get_mut(old_name) else {
            return Err(crate::Error::ExampleNotFound {
                name: old_name.to_string(),
            });
        };

        if current.category == record.category {
            *current = record;
            return Ok(());
        }

        self.remove(old_name);
        self.insert(record)
    }
}

fn looks_like_record(line: &str) -> bool {
    if line.starts_with('#') {
        return false;
    }
    line.split_once(';')
        .is_some_and(|(tag, _)| Category::from_tag(tag).is_some())
}

fn malformed(line_no: usize, err: &RecordParseError) -> Diagnostic {
    Diagnostic::warning("collection", format!("line {line_no} skipped: {err}"))
}

/// Reads and writes the canonical store file.
pub struct CollectionStore<'a> {
    fs: &'a dyn FileSystem,
    path: NormalizedPath,
}

impl<'a> CollectionStore<'a> {
    pub fn new(fs: &'a dyn FileSystem, path: NormalizedPath) -> Self {
        Self { fs, path }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Load the collection fresh from disk.
    ///
    /// # Errors
    ///
    /// Returns a filesystem error when the store cannot be read.
    pub fn load(&self) -> Result<LoadedCollection> {
        let text = self.fs.read_text(&self.path)?;
        let loaded = Collection::parse(&text);
        tracing::debug!(
            path = %self.path,
            examples = loaded.collection.len(),
            "Loaded collection"
        );
        Ok(loaded)
    }

    /// Rewrite the whole store.
    pub fn save(&self, collection: &Collection) -> Result<()> {
        self.fs.write_text(&self.path, &collection.render())?;
        tracing::info!(path = %self.path, examples = collection.len(), "Saved collection");
        Ok(())
    }
}
