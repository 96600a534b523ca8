//! Derived evaluation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::expression::ExpressionType;

/// Institution recorded for participants; no affiliation is carried by DocMaps.
pub const UNKNOWN_INSTITUTION: &str = "unknown";

/// Kind of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewType {
    /// An individual peer review.
    ReviewArticle,
    /// An editorial evaluation summary.
    EvaluationSummary,
    /// The authors' response.
    AuthorResponse,
}

impl ReviewType {
    /// Map an expression kind to a review kind, if it is one.
    pub fn from_expression_type(expression_type: ExpressionType) -> Option<Self> {
        match expression_type {
            ExpressionType::PeerReview => Some(Self::ReviewArticle),
            ExpressionType::EvaluationSummary => Some(Self::EvaluationSummary),
            ExpressionType::AuthorResponse => Some(Self::AuthorResponse),
            _ => None,
        }
    }
}

/// A participant as recorded on an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationParticipant {
    pub name: String,
    pub role: String,
    pub institution: String,
}

/// A review, summary or response attached to a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub review_type: ReviewType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub participants: Vec<EvaluationParticipant>,
    /// Reference to the evaluation text; fetched by downstream collaborators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
