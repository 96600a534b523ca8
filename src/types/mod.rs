//! Core types for the DocMap kernel.

pub mod expression;
pub mod step;
pub mod docmap;
pub mod version;
pub mod evaluation;
pub mod timeline;

pub use expression::{Expression, ExpressionType, Manifestation, ManifestationType};
pub use step::{Action, Actor, Assertion, AssertionStatus, Participant, Step};
pub use docmap::{DocMap, DocMapContext, Publisher, PublisherAccount, DOCMAP_CONTEXT, DOCMAP_TYPE};
pub use version::{ContentEntry, PeerReview, Version, VersionStatus};
pub use evaluation::{Evaluation, EvaluationParticipant, ReviewType, UNKNOWN_INSTITUTION};
pub use timeline::{TimelineEvent, TimelineLink};
