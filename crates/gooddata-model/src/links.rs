//! Link entries returned by the platform, including MAQL DDL links.

use serde::{Deserialize, Serialize};

const TASKS_STATUS: &str = "tasks-status";

/// A categorized link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    category: String,
    #[serde(rename = "link", alias = "uri")]
    uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
}

impl LinkEntry {
    /// Creates an entry with just a category and URI.
    pub fn new(category: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            uri: uri.into(),
            title: None,
            summary: None,
            identifier: None,
        }
    }

    /// Link category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Link target.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Summary, if any.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Identifier of the linked object, if any.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

/// Ordered collection of link entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntries {
    #[serde(default)]
    entries: Vec<LinkEntry>,
}

impl LinkEntries {
    /// Wraps the entries.
    pub fn new(entries: Vec<LinkEntry>) -> Self {
        Self { entries }
    }

    /// Entries in payload order.
    pub fn entries(&self) -> &[LinkEntry] {
        &self.entries
    }

    /// URI of the first entry in `category`.
    pub fn find(&self, category: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.category() == category)
            .map(LinkEntry::uri)
    }
}

/// Links returned after posting MAQL DDL to the model management resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaqlDdlLinks(LinkEntries);

impl MaqlDdlLinks {
    /// Wraps the entries.
    pub fn new(entries: Vec<LinkEntry>) -> Self {
        Self(LinkEntries::new(entries))
    }

    /// All entries.
    pub fn entries(&self) -> &[LinkEntry] {
        self.0.entries()
    }

    /// URI of the task status to poll, or `None` when the response has none.
    pub fn status_uri(&self) -> Option<&str> {
        self.0.find(TASKS_STATUS)
    }

    /// Older name of [`status_uri`](Self::status_uri).
    #[deprecated(note = "use `status_uri` instead")]
    pub fn status_link(&self) -> Option<&str> {
        self.status_uri()
    }
}
