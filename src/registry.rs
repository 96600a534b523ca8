//! Version registry.
//!
//! Holds every version discovered during one interpretation pass, in
//! first-discovery order. Versions are created on first reference and
//! mutated in place afterwards; nothing is ever removed.
//!
//! ## Identity
//!
//! An item denotes a version iff the DOIs are equal and the item either
//! carries no version identifier or carries the version's one. An item
//! without a version identifier can therefore match a version that has one.

use crate::policy::ParsePolicyV1;
use crate::types::{ContentEntry, Expression, ManifestationType, Version};
use crate::types::version::merge_content;

/// Error type for registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The item has no DOI, so no version can be resolved for it.
    #[error("cannot identify item by DOI: {item}")]
    MissingDoi {
        /// Description of the offending item.
        item: String,
    },
}

/// Handle to a version inside a [`VersionRegistry`].
///
/// Two handles are equal iff they denote the same version record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionHandle(usize);

/// Registry of versions for a single interpretation pass.
///
/// Not shared across passes; each parse owns its own registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRegistry {
    versions: Vec<Version>,
    policy: ParsePolicyV1,
}

/// Whether `item` denotes `version`.
pub fn matches(version: &Version, item: &Expression) -> bool {
    let Some(doi) = item.doi.as_deref() else {
        return false;
    };
    version.doi == doi
        && item
            .version_identifier
            .as_deref()
            .map_or(true, |v| version.version_identifier.as_deref() == Some(v))
}

/// Content entries an item contributes: its own URL, then its manifestations.
pub fn content_of(item: &Expression) -> Vec<ContentEntry> {
    let own = item
        .url
        .iter()
        .map(|url| ContentEntry::new(ManifestationType::WebPage, url.clone()));
    let manifested = item.manifestations().iter().filter_map(|m| {
        m.url
            .as_ref()
            .map(|url| ContentEntry::new(m.manifestation_type, url.clone()))
    });
    let entries: Vec<ContentEntry> = own.chain(manifested).collect();

    let mut content = Vec::with_capacity(entries.len());
    merge_content(&mut content, &entries);
    content
}

impl VersionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry resolving DOI links with `policy`.
    pub fn with_policy(policy: ParsePolicyV1) -> Self {
        Self { versions: Vec::new(), policy }
    }

    /// Find the version `item` denotes, without creating one.
    pub fn find(&self, item: &Expression) -> Option<VersionHandle> {
        self.versions
            .iter()
            .position(|v| matches(v, item))
            .map(VersionHandle)
    }

    /// Find the version `item` denotes, creating it if absent.
    ///
    /// An existing version is refreshed: URL, kind and published date take the
    /// item's value when it has one, and the item's content is merged in.
    pub fn find_or_create(&mut self, item: &Expression) -> Result<VersionHandle, RegistryError> {
        let doi = item.doi.as_deref().ok_or_else(|| RegistryError::MissingDoi {
            item: item.describe(),
        })?;

        let content = content_of(item);

        if let Some(handle) = self.find(item) {
            let version = self.get_mut(handle);
            if let Some(url) = &item.url {
                version.url = Some(url.clone());
            }
            version.version_type = item.expression_type.label();
            if let Some(published) = item.published {
                version.published_date = Some(published);
            }
            version.merge_content(&content);
            return Ok(handle);
        }

        let version = Version {
            id: item.identifier.clone().unwrap_or_else(|| doi.to_string()),
            version_identifier: item.version_identifier.clone(),
            doi: doi.to_string(),
            url: Some(item.url.clone().unwrap_or_else(|| self.policy.doi_url(doi))),
            version_type: item.expression_type.label(),
            status: None,
            peer_review: None,
            published_date: item.published,
            sent_for_review_date: None,
            reviewed_date: None,
            author_response_date: None,
            content,
            superseded: false,
        };
        tracing::debug!(doi = %doi, id = %version.id, "Registered new version");
        self.versions.push(version);
        Ok(VersionHandle(self.versions.len() - 1))
    }

    /// Mark `replaced` superseded and move its content ahead of `replacement`'s.
    ///
    /// Both handles may denote the same version; it is then marked superseded
    /// and its content is left as is.
    pub fn supersede(&mut self, replaced: VersionHandle, replacement: VersionHandle) {
        let earlier = {
            let old = self.get_mut(replaced);
            old.superseded = true;
            old.content.clone()
        };
        let new = self.get_mut(replacement);
        new.prepend_content(&earlier);
        tracing::debug!(
            superseded = %self.get(replaced).id,
            by = %self.get(replacement).id,
            "Version superseded"
        );
    }

    /// Borrow a version.
    pub fn get(&self, handle: VersionHandle) -> &Version {
        &self.versions[handle.0]
    }

    /// Mutably borrow a version.
    pub fn get_mut(&mut self, handle: VersionHandle) -> &mut Version {
        &mut self.versions[handle.0]
    }

    /// All versions, superseded ones included, in discovery order.
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Number of versions.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Consume the registry, returning all versions.
    pub fn into_versions(self) -> Vec<Version> {
        self.versions
    }
}
