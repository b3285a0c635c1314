use mongodb::bson::{doc, Document};
use regex::{Regex, RegexBuilder};

use crate::error::StoreError;
use crate::records::BookRecord;

/// Conjunctive filter over the `books` collection.
///
/// An empty filter matches every book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    /// Keep books whose `read_status` equals one of these values.
    pub read_status_in: Option<Vec<String>>,
    /// Keep books whose `title` matches this pattern, case-insensitively.
    /// The pattern is a regular expression and is not escaped.
    pub title_pattern: Option<String>,
}

impl BookFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_read_status_in<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.read_status_in = Some(statuses.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_title_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.title_pattern = Some(pattern.into());
        self
    }

    /// Render as a MongoDB query document.
    pub fn to_document(&self) -> Document {
        let mut query = Document::new();
        if let Some(statuses) = &self.read_status_in {
            query.insert("read_status", doc! { "$in": statuses.clone() });
        }
        if let Some(pattern) = &self.title_pattern {
            query.insert("title", doc! { "$regex": pattern.as_str(), "$options": "i" });
        }
        query
    }

    /// Compile into a predicate usable against in-process records.
    pub fn compile(&self) -> Result<CompiledBookFilter<'_>, StoreError> {
        let title = self
            .title_pattern
            .as_deref()
            .map(|pattern| RegexBuilder::new(pattern).case_insensitive(true).build())
            .transpose()?;
        Ok(CompiledBookFilter {
            read_status_in: self.read_status_in.as_deref(),
            title,
        })
    }
}

/// A [`BookFilter`] with its title pattern compiled.
pub struct CompiledBookFilter<'a> {
    read_status_in: Option<&'a [String]>,
    title: Option<Regex>,
}

impl CompiledBookFilter<'_> {
    pub fn matches(&self, book: &BookRecord) -> bool {
        if let Some(statuses) = self.read_status_in {
            match &book.read_status {
                Some(status) if statuses.iter().any(|s| s == status) => {}
                _ => return false,
            }
        }
        if let Some(title) = &self.title {
            match &book.title {
                Some(value) if title.is_match(value) => {}
                _ => return false,
            }
        }
        true
    }
}
