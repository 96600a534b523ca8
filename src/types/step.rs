//! Step types: assertions, actions and the canonical step record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expression::Expression;

/// Lifecycle status claimed by an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssertionStatus {
    /// Work in progress.
    Draft,
    /// Manuscript was posted.
    #[serde(rename = "manuscript-published")]
    Published,
    /// Manuscript was sent for review.
    UnderReview,
    /// Reviews were received.
    PeerReviewed,
    /// Additional evaluations were attached later.
    Enhanced,
    /// Version of record was produced.
    VersionOfRecord,
    /// A revision was posted.
    Revised,
    /// The manuscript was republished under a new identity.
    Republished,
    /// Any status this crate does not interpret.
    #[serde(other)]
    Other,
}

impl fmt::Display for AssertionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Published => "manuscript-published",
            Self::UnderReview => "under-review",
            Self::PeerReviewed => "peer-reviewed",
            Self::Enhanced => "enhanced",
            Self::VersionOfRecord => "version-of-record",
            Self::Revised => "revised",
            Self::Republished => "republished",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

/// A dated claim that an item reached a lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    /// Subject of the claim.
    pub item: Expression,
    /// Claimed status.
    pub status: AssertionStatus,
    /// When the claim became true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happened: Option<DateTime<Utc>>,
}

impl Assertion {
    /// Create an undated assertion.
    pub fn new(item: Expression, status: AssertionStatus) -> Self {
        Self { item, status, happened: None }
    }

    /// Set the date the claim became true.
    pub fn happened_at(mut self, happened: DateTime<Utc>) -> Self {
        self.happened = Some(happened);
        self
    }
}

/// Actor behind a participation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Display name.
    pub name: String,
    /// Actor kind, usually `person` or `organization`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub actor_type: Option<String>,
}

/// An actor playing a role in an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Who participated.
    pub actor: Actor,
    /// Role, e.g. `peer-reviewer` or `editor`.
    pub role: String,
}

impl Participant {
    /// Create a person participant.
    pub fn person(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            actor: Actor {
                name: name.into(),
                actor_type: Some("person".to_string()),
            },
            role: role.into(),
        }
    }
}

/// Participants producing a set of outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Who did the work.
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// What they produced.
    #[serde(default)]
    pub outputs: Vec<Expression>,
}

impl Action {
    /// Create an action.
    pub fn new(participants: Vec<Participant>, outputs: Vec<Expression>) -> Self {
        Self { participants, outputs }
    }
}

/// A canonical step: links are identifiers into the step dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Items consumed by the step.
    #[serde(default)]
    pub inputs: Vec<Expression>,
    /// Work performed.
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Claims made.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Identifier of the following step.
    #[serde(rename = "next-step", default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    /// Identifier of the preceding step.
    #[serde(rename = "previous-step", default, skip_serializing_if = "Option::is_none")]
    pub previous_step: Option<String>,
}

impl Step {
    /// First assertion with the given status.
    pub fn assertion(&self, status: AssertionStatus) -> Option<&Assertion> {
        self.assertions.iter().find(|a| a.status == status)
    }

    /// All outputs of all actions, in action order.
    pub fn outputs(&self) -> impl Iterator<Item = &Expression> {
        self.actions.iter().flat_map(|a| a.outputs.iter())
    }

    /// Preprint inputs.
    pub fn preprint_inputs(&self) -> Vec<&Expression> {
        self.inputs.iter().filter(|e| e.is_preprint()).collect()
    }

    /// Preprint outputs.
    pub fn preprint_outputs(&self) -> Vec<&Expression> {
        self.outputs().filter(|e| e.is_preprint()).collect()
    }

    /// Evaluation inputs.
    pub fn evaluation_inputs(&self) -> Vec<&Expression> {
        self.inputs.iter().filter(|e| e.is_evaluation()).collect()
    }

    /// Evaluation outputs.
    pub fn evaluation_outputs(&self) -> Vec<&Expression> {
        self.outputs().filter(|e| e.is_evaluation()).collect()
    }
}
