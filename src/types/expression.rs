//! Expression (item) types for the DocMap graph.
//!
//! An expression is a reference to a manuscript artifact or a review
//! artifact. Manifestations are the content pointers hanging off it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a DocMap expression.
///
/// Unrecognized wire values decode to [`ExpressionType::Other`] and are
/// ignored by every inference rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpressionType {
    /// A posted preprint.
    Preprint,
    /// A revised preprint.
    #[serde(rename = "postprint")]
    RevisedPreprint,
    /// A single peer review.
    #[serde(rename = "review-article")]
    PeerReview,
    /// An editorial evaluation summary.
    EvaluationSummary,
    /// An author response to reviews.
    #[serde(rename = "reply")]
    AuthorResponse,
    /// A summary of changes between versions.
    UpdateSummary,
    /// The version of record.
    VersionOfRecord,
    /// Any type this crate does not interpret.
    #[serde(other)]
    Other,
}

impl ExpressionType {
    /// Wire string for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preprint => "preprint",
            Self::RevisedPreprint => "postprint",
            Self::PeerReview => "review-article",
            Self::EvaluationSummary => "evaluation-summary",
            Self::AuthorResponse => "reply",
            Self::UpdateSummary => "update-summary",
            Self::VersionOfRecord => "version-of-record",
            Self::Other => "other",
        }
    }

    /// Human label used for versions and timeline events (`preprint` → `Preprint`).
    pub fn label(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Whether this kind is one of the three evaluation kinds.
    pub fn is_evaluation(&self) -> bool {
        matches!(
            self,
            Self::PeerReview | Self::EvaluationSummary | Self::AuthorResponse
        )
    }
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a manifestation (content pointer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestationType {
    /// HTML page.
    WebPage,
    /// Manuscript archive (MECA) or similar package.
    DigitalManuscript,
    /// Unrecognized manifestation kind.
    #[serde(other)]
    Other,
}

impl fmt::Display for ManifestationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WebPage => write!(f, "web-page"),
            Self::DigitalManuscript => write!(f, "digital-manuscript"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A content pointer for an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifestation {
    /// Manifestation kind.
    #[serde(rename = "type")]
    pub manifestation_type: ManifestationType,
    /// Where the content lives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// DOI of the content, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// When the content was published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl Manifestation {
    /// Create a web-page manifestation pointing at `url`.
    pub fn web_page(url: impl Into<String>) -> Self {
        Self {
            manifestation_type: ManifestationType::WebPage,
            url: Some(url.into()),
            doi: None,
            published: None,
        }
    }

    /// Create a digital-manuscript manifestation pointing at `url`.
    pub fn digital_manuscript(url: impl Into<String>) -> Self {
        Self {
            manifestation_type: ManifestationType::DigitalManuscript,
            ..Self::web_page(url)
        }
    }

    /// Whether this is a web page.
    pub fn is_web_page(&self) -> bool {
        self.manifestation_type == ManifestationType::WebPage
    }
}

/// A reference to a manuscript or review artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    /// Expression kind.
    #[serde(rename = "type")]
    pub expression_type: ExpressionType,
    /// Producer-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Version identifier within the DOI.
    #[serde(rename = "versionIdentifier", default, skip_serializing_if = "Option::is_none")]
    pub version_identifier: Option<String>,
    /// DOI, the identity anchor for versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// Landing URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Publication date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    /// Content manifestations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Manifestation>>,
}

impl Expression {
    /// Create a bare expression of the given kind.
    pub fn new(expression_type: ExpressionType) -> Self {
        Self {
            expression_type,
            identifier: None,
            version_identifier: None,
            doi: None,
            url: None,
            published: None,
            content: None,
        }
    }

    /// Create a preprint with the given DOI.
    pub fn preprint(doi: impl Into<String>) -> Self {
        Self::new(ExpressionType::Preprint).with_doi(doi)
    }

    /// Set the DOI.
    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    /// Set the identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set the version identifier.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version_identifier = Some(version.into());
        self
    }

    /// Set the URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the published date.
    pub fn with_published(mut self, published: DateTime<Utc>) -> Self {
        self.published = Some(published);
        self
    }

    /// Append a manifestation.
    pub fn with_manifestation(mut self, manifestation: Manifestation) -> Self {
        self.content.get_or_insert_with(Vec::new).push(manifestation);
        self
    }

    /// Manifestations, empty if none were given.
    pub fn manifestations(&self) -> &[Manifestation] {
        self.content.as_deref().unwrap_or(&[])
    }

    /// Web-page manifestations only.
    pub fn web_pages(&self) -> impl Iterator<Item = &Manifestation> {
        self.manifestations().iter().filter(|m| m.is_web_page())
    }

    /// Whether this expression is a preprint.
    pub fn is_preprint(&self) -> bool {
        self.expression_type == ExpressionType::Preprint
    }

    /// Whether this expression is a review, summary or author response.
    pub fn is_evaluation(&self) -> bool {
        self.expression_type.is_evaluation()
    }

    /// Short description for logs and errors.
    pub fn describe(&self) -> String {
        match (&self.identifier, &self.url) {
            (Some(id), _) => format!("{} {}", self.expression_type, id),
            (None, Some(url)) => format!("{} {}", self.expression_type, url),
            (None, None) => self.expression_type.to_string(),
        }
    }
}
