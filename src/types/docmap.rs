//! The DocMap envelope.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::step::Step;

/// JSON-LD context used by DocMaps.
pub const DOCMAP_CONTEXT: &str = "https://w3id.org/docmaps/context.jsonld";

/// Document kind marker.
pub const DOCMAP_TYPE: &str = "docmap";

/// `@context` is either a single IRI or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocMapContext {
    /// One context IRI.
    Single(String),
    /// Several context IRIs.
    Many(Vec<String>),
}

impl Default for DocMapContext {
    fn default() -> Self {
        Self::Single(DOCMAP_CONTEXT.to_string())
    }
}

/// Account of a publisher on some service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherAccount {
    /// Account id.
    pub id: String,
    /// Service hosting the account.
    pub service: String,
}

/// Who published the DocMap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<PublisherAccount>,
}

/// A DocMap document in canonical form.
///
/// Steps live in a dictionary keyed by identifier; links between them are
/// identifiers, never direct references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMap {
    #[serde(rename = "@context", default)]
    pub context: DocMapContext,
    /// Kind marker, `docmap`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub docmap_type: Option<String>,
    /// The document's own URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Publisher>,
    /// Entry point into `steps`.
    #[serde(rename = "first-step", default, skip_serializing_if = "Option::is_none")]
    pub first_step: Option<String>,
    /// Step dictionary.
    #[serde(default)]
    pub steps: BTreeMap<String, Step>,
}

impl DocMap {
    /// Look up a step by identifier.
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.get(id)
    }

    /// Number of steps in the dictionary.
    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_shape_decodes() {
        let docmap: DocMap =
            serde_json::from_str(r#"{"first-step": "_:b0", "steps": {"_:b0": {}}}"#).unwrap();
        assert_eq!(docmap.first_step.as_deref(), Some("_:b0"));
        assert!(docmap.step("_:b0").is_some());
        assert_eq!(docmap.context, DocMapContext::default());
    }

    #[test]
    fn test_context_list() {
        let docmap: DocMap =
            serde_json::from_str(r#"{"@context": ["a", "b"], "steps": {}}"#).unwrap();
        assert_eq!(
            docmap.context,
            DocMapContext::Many(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(docmap.num_steps(), 0);
    }
}
