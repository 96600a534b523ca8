//! Derived manuscript versions.
//!
//! ## Content Invariant
//!
//! Content entries are unique by `(kind, url)`. Merges append only entries
//! not already present, in the order first seen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::evaluation::Evaluation;
use super::expression::ManifestationType;

/// Status label of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionStatus {
    /// Sent for review, reviews not yet in.
    #[serde(rename = "(Preview) Reviewed")]
    PreviewReviewed,
    /// Reviews received.
    #[serde(rename = "Reviewed")]
    Reviewed,
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreviewReviewed => write!(f, "(Preview) Reviewed"),
            Self::Reviewed => write!(f, "Reviewed"),
        }
    }
}

/// One content pointer of a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub kind: ManifestationType,
    pub url: String,
}

impl ContentEntry {
    /// Create a content entry.
    pub fn new(kind: ManifestationType, url: impl Into<String>) -> Self {
        Self { kind, url: url.into() }
    }
}

/// Append entries of `incoming` not already present in `existing`.
pub fn merge_content(existing: &mut Vec<ContentEntry>, incoming: &[ContentEntry]) {
    for entry in incoming {
        if !existing.contains(entry) {
            existing.push(entry.clone());
        }
    }
}

/// Reviews, summary and author response collected for a version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerReview {
    /// Individual reviews; accumulate across steps.
    pub reviews: Vec<Evaluation>,
    /// Last non-empty evaluation summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_summary: Option<Evaluation>,
    /// Last non-empty author response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_response: Option<Evaluation>,
}

/// The accumulated state of one manuscript version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_identifier: Option<String>,
    pub doi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Kind label, e.g. `Preprint`.
    #[serde(rename = "type")]
    pub version_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VersionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_review: Option<PeerReview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_for_review_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_response_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content: Vec<ContentEntry>,
    #[serde(default)]
    pub superseded: bool,
}

impl Version {
    /// Merge content entries into this version.
    pub fn merge_content(&mut self, incoming: &[ContentEntry]) {
        merge_content(&mut self.content, incoming);
    }

    /// Place `earlier` entries ahead of this version's own, de-duplicated.
    pub fn prepend_content(&mut self, earlier: &[ContentEntry]) {
        let mut merged = Vec::with_capacity(earlier.len() + self.content.len());
        merge_content(&mut merged, earlier);
        merge_content(&mut merged, &self.content);
        self.content = merged;
    }
}
