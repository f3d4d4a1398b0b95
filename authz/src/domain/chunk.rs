// Copyright (c) 2026 Contextgate Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # ChunkDescriptor Value Object
//!
//! The authorization-relevant projection of a retrieved content unit: an
//! optional single security label and a set of tags. Constructed by the
//! retrieval/indexing collaborator and read-only from this engine's
//! perspective. A chunk has at most one label but any number of tags.

use serde::{Deserialize, Serialize};

/// Access-control metadata for one retrieved chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkDescriptor {
    /// Opaque identifier, used only for traceability in logs and audit
    /// events, never by the decision rule.
    pub id: String,

    /// Single classification value. `None` and a blank string both mean
    /// "no label classification".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_label: Option<String>,

    /// Secondary classifications. Order is irrelevant to authorization,
    /// only membership matters.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ChunkDescriptor {
    /// An unrestricted chunk with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            security_label: None,
            tags: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.security_label = Some(label.into());
        self
    }

    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Effective classification: `None` when the label is absent or blank,
    /// so an indexer that writes `""` instead of omitting the field does not
    /// create a chunk no grant can ever match.
    pub fn label(&self) -> Option<&str> {
        self.security_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }

    /// Tags with blank entries skipped.
    pub fn effective_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
    }

    /// True when the chunk carries no access-control metadata at all.
    pub fn is_unrestricted(&self) -> bool {
        self.label().is_none() && self.effective_tags().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_label_means_unclassified() {
        assert_eq!(ChunkDescriptor::new("c1").label(), None);
        assert_eq!(ChunkDescriptor::new("c1").with_label("").label(), None);
        assert_eq!(ChunkDescriptor::new("c1").with_label("  ").label(), None);
        assert_eq!(
            ChunkDescriptor::new("c1").with_label("public").label(),
            Some("public"),
        );
    }

    #[test]
    fn test_unrestricted_requires_no_metadata() {
        assert!(ChunkDescriptor::new("c1").is_unrestricted());
        assert!(ChunkDescriptor::new("c1").with_tags(["", " "]).is_unrestricted());
        assert!(!ChunkDescriptor::new("c1").with_label("secret").is_unrestricted());
        assert!(!ChunkDescriptor::new("c1").with_tags(["hr"]).is_unrestricted());
    }

    #[test]
    fn test_deserializes_with_missing_fields() {
        let chunk: ChunkDescriptor =
            serde_json::from_value(serde_json::json!({"id": "c1"})).unwrap();
        assert!(chunk.is_unrestricted());

        let chunk: ChunkDescriptor = serde_json::from_value(serde_json::json!({
            "id": "c2",
            "security_label": "confidential",
            "tags": ["hr", "legal"]
        }))
        .unwrap();
        assert_eq!(chunk.label(), Some("confidential"));
        assert_eq!(chunk.effective_tags().count(), 2);
    }
}
