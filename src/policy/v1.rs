//! ParsePolicy v1: link resolution and traversal bounds.

use serde::{Deserialize, Serialize};
use crate::canonical::canonical_hash_hex;
use crate::DEFAULT_POLICY_VERSION;

/// Default DOI resolver base URL.
pub const DEFAULT_DOI_RESOLVER: &str = "https://doi.org/";

/// DOI prefix registered to bioRxiv.
pub const BIORXIV_DOI_PREFIX: &str = "10.1101";

/// Parse policy version 1.
///
/// ## Parameters
///
/// - `doi_resolver`: Base URL prepended to a DOI when no URL is known
/// - `biorxiv_doi_prefix`: DOIs starting with this get "Go to BioRxiv" links
/// - `max_steps`: Optional hard bound on the number of walked steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsePolicyV1 {
    /// Policy version identifier.
    pub version: String,
    /// Base URL for DOI links.
    pub doi_resolver: String,
    /// DOI prefix identifying bioRxiv preprints.
    pub biorxiv_doi_prefix: String,
    /// Maximum number of steps to walk, unbounded if `None`.
    pub max_steps: Option<usize>,
}

impl ParsePolicyV1 {
    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Compute a hash of the policy parameters.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self)
    }

    /// Resolver URL for a DOI.
    pub fn doi_url(&self, doi: &str) -> String {
        format!("{}{}", self.doi_resolver, doi)
    }

    /// Whether the DOI was minted by bioRxiv.
    pub fn is_biorxiv(&self, doi: &str) -> bool {
        doi.starts_with(&self.biorxiv_doi_prefix)
    }

    /// Override the resolver base URL.
    pub fn with_doi_resolver(mut self, resolver: impl Into<String>) -> Self {
        self.doi_resolver = resolver.into();
        self
    }

    /// Bound the walk.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

impl Default for ParsePolicyV1 {
    fn default() -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            doi_resolver: DEFAULT_DOI_RESOLVER.to_string(),
            biorxiv_doi_prefix: BIORXIV_DOI_PREFIX.to_string(),
            max_steps: None,
        }
    }
}
