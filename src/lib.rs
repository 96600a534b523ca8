//! # docmap-kernel
//!
//! Derives manuscript versions and an editorial timeline from DocMaps.
//!
//! A DocMap describes the lifecycle of a preprint as a chain of steps:
//! postings, review assertions, evaluation outputs, revisions and
//! republications. The kernel answers two questions about it:
//!
//! > Which manuscript versions exist, and what state is each one in?
//! > What happened to the manuscript, and when?
//!
//! ## Architecture
//!
//! ```text
//! text → deserialize → DocMap → StepWalker → interpret_step → VersionRegistry
//!                                                                  ↓
//!                                      derive_timeline + without_superseded
//!                                                                  ↓
//!                                                             ParseResult
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same document + same policy → identical `ParseResult`
//! - Versions appear in first-discovery order
//! - Timeline events are grouped per version and sorted by date within it
//!
//! The kernel is synchronous and performs no I/O. Each parse owns its own
//! registry, so documents may be parsed concurrently without coordination.

#![warn(clippy::all)]

pub mod types;
pub mod policy;
pub mod canonical;
pub mod builder;
pub mod deserialize;
pub mod walker;
pub mod registry;
pub mod evaluation;
pub mod interpreter;
pub mod timeline;
pub mod parser;

// Re-exports
pub use types::{
    Action, Actor, Assertion, AssertionStatus, ContentEntry, DocMap, DocMapContext, Evaluation,
    EvaluationParticipant, Expression, ExpressionType, Manifestation, ManifestationType,
    Participant, PeerReview, Publisher, PublisherAccount, ReviewType, Step, TimelineEvent,
    TimelineLink, Version, VersionStatus,
};
pub use policy::ParsePolicyV1;
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};
pub use builder::{BuildError, DocMapBuilder, DraftStep, DraftStepId, StepChain};
pub use deserialize::{docmap_from_str, docmap_to_string, DocMapError};
pub use walker::{walk_steps, StepWalker};
pub use registry::{RegistryError, VersionHandle, VersionRegistry};
pub use evaluation::{collect_evaluations, merge_evaluations};
pub use interpreter::interpret_step;
pub use timeline::{derive_timeline, without_superseded};
pub use parser::{parse_docmap, parse_docmap_str, DocMapParser, ParseError, ParseResult};

/// Schema version for all kernel output types.
/// Increment on breaking changes to any schema type.
pub const DOCMAP_KERNEL_SCHEMA_VERSION: &str = "1.0.0";

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "parse_policy_v1";
