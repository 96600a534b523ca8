//! DocMap parser.
//!
//! Runs the full derivation over one document:
//!
//! ```text
//! DocMap → StepWalker → interpret_step (per step) → VersionRegistry
//!                                                      ↓
//!                          derive_timeline(all versions)  +  without_superseded
//! ```
//!
//! Each parse owns a fresh registry, so a parser can be shared across
//! threads and used for many documents.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::deserialize::{docmap_from_str, DocMapError};
use crate::interpreter::interpret_step;
use crate::policy::ParsePolicyV1;
use crate::registry::{RegistryError, VersionRegistry};
use crate::timeline::{derive_timeline, without_superseded};
use crate::types::{DocMap, TimelineEvent, Version};
use crate::walker::StepWalker;

/// Error type for parser operations.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The document text could not be read.
    #[error(transparent)]
    Document(#[from] DocMapError),
    /// A version could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Output of a parse: the timeline and the surviving versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub timeline: Vec<TimelineEvent>,
    pub versions: Vec<Version>,
}

impl ParseResult {
    /// Whether nothing was derived.
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty() && self.versions.is_empty()
    }

    /// Content fingerprint of the result.
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(self)
    }
}

/// Interprets DocMaps under a [`ParsePolicyV1`].
#[derive(Debug, Clone, Default)]
pub struct DocMapParser {
    policy: ParsePolicyV1,
}

impl DocMapParser {
    /// Create a parser with the given policy.
    pub fn new(policy: ParsePolicyV1) -> Self {
        Self { policy }
    }

    /// The active policy.
    pub fn policy(&self) -> &ParsePolicyV1 {
        &self.policy
    }

    /// Run every step through the interpreter and return the registry.
    ///
    /// The registry still contains superseded versions.
    pub fn interpret(&self, docmap: &DocMap) -> Result<VersionRegistry, RegistryError> {
        let mut registry = VersionRegistry::with_policy(self.policy.clone());
        let walker = StepWalker::new(docmap).with_max_steps(self.policy.max_steps);

        let mut walked = 0usize;
        for (id, step) in walker {
            interpret_step(&mut registry, step).map_err(|e| {
                tracing::error!(step_id = %id, error = %e, "Step interpretation failed");
                e
            })?;
            walked += 1;
        }

        tracing::debug!(
            docmap = docmap.id.as_deref().unwrap_or("<anonymous>"),
            steps = walked,
            versions = registry.len(),
            "DocMap interpreted"
        );
        Ok(registry)
    }

    /// Parse an in-memory DocMap.
    pub fn parse(&self, docmap: &DocMap) -> Result<ParseResult, ParseError> {
        let registry = self.interpret(docmap)?;
        let timeline = derive_timeline(registry.versions(), &self.policy);
        let versions = without_superseded(registry.into_versions());
        Ok(ParseResult { timeline, versions })
    }

    /// Parse DocMap text.
    pub fn parse_str(&self, text: &str) -> Result<ParseResult, ParseError> {
        let docmap = docmap_from_str(text)?;
        self.parse(&docmap)
    }
}

/// Parse an in-memory DocMap with the default policy.
pub fn parse_docmap(docmap: &DocMap) -> Result<ParseResult, ParseError> {
    DocMapParser::default().parse(docmap)
}

/// Parse DocMap text with the default policy.
pub fn parse_docmap_str(text: &str) -> Result<ParseResult, ParseError> {
    DocMapParser::default().parse_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Expression, Step};

    #[test]
    fn test_empty_docmap() {
        let result = parse_docmap(&DocMap::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_doi_error_surfaces() {
        let mut docmap = DocMap {
            first_step: Some("_:b0".to_string()),
            ..Default::default()
        };
        docmap.steps.insert(
            "_:b0".to_string(),
            Step {
                inputs: vec![Expression::new(crate::types::ExpressionType::Preprint)],
                ..Default::default()
            },
        );
        let err = parse_docmap(&docmap).unwrap_err();
        assert!(matches!(err, ParseError::Registry(RegistryError::MissingDoi { .. })));
        assert!(err.to_string().contains("cannot identify item by DOI"));
    }

    #[test]
    fn test_malformed_text() {
        assert!(matches!(parse_docmap_str("not json"), Err(ParseError::Document(_))));
    }

    #[test]
    fn test_custom_resolver() {
        let parser = DocMapParser::new(ParsePolicyV1::default().with_doi_resolver("https://dx.doi.org/"));
        let result = parser
            .parse_str(r#"{"first-step": "a", "steps": {"a": {"inputs": [{"type": "preprint", "doi": "10.1/x", "published": "2020-01-01"}]}}}"#)
            .unwrap();
        assert_eq!(result.versions[0].url.as_deref(), Some("https://dx.doi.org/10.1/x"));
        assert_eq!(
            result.timeline[0].link.as_ref().unwrap().url,
            "https://dx.doi.org/10.1/x"
        );
    }

    #[test]
    fn test_fingerprint_stable() {
        let text = r#"{"first-step": "a", "steps": {"a": {"inputs": [{"type": "preprint", "doi": "10.1/x"}]}}}"#;
        let a = parse_docmap_str(text).unwrap();
        let b = parse_docmap_str(text).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
