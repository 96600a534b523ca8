//! Timeline event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link attached to a timeline event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineLink {
    pub text: String,
    pub url: String,
}

/// A named, dated event in a manuscript's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub name: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<TimelineLink>,
}

impl TimelineEvent {
    /// Create an event without a link.
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self { name: name.into(), date, link: None }
    }

    /// Attach a link.
    pub fn with_link(mut self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.link = Some(TimelineLink { text: text.into(), url: url.into() });
        self
    }
}
