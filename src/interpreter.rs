//! Assertion interpreter.
//!
//! Applies the inference rules of one step to the version registry. Rules
//! run in a fixed order and each sees the effects of the previous ones:
//!
//! 1. Register every preprint input, then every preprint output
//! 2. `manuscript-published`: refresh the asserted version
//! 3. `under-review`: mark sent for review; a single preprint input paired
//!    with a single preprint output is a republish for review
//! 4. `republished` supersedes the first input; otherwise one preprint in,
//!    evaluations in, one preprint out supersedes the input. Unlike rule 3
//!    this holds even when both sides resolve to the same version
//! 5. `peer-reviewed` attaches this step's evaluations to an existing
//!    version; otherwise one preprint in with evaluations out and no preprint
//!    out is a review in place
//! 6. `enhanced` attaches this step's evaluations to an existing version
//!
//! Rules never remove versions. They mark them superseded or mutate fields.

use crate::evaluation::{collect_evaluations, merge_evaluations};
use crate::registry::{RegistryError, VersionRegistry};
use crate::types::{AssertionStatus, Step, VersionStatus};

/// Apply one step's rules to `registry`.
pub fn interpret_step(registry: &mut VersionRegistry, step: &Step) -> Result<(), RegistryError> {
    let preprint_inputs = step.preprint_inputs();
    let preprint_outputs = step.preprint_outputs();
    let evaluation_inputs = step.evaluation_inputs();
    let evaluation_outputs = step.evaluation_outputs();

    for item in preprint_inputs.iter().chain(preprint_outputs.iter()) {
        registry.find_or_create(item)?;
    }

    if let Some(published) = step.assertion(AssertionStatus::Published) {
        registry.find_or_create(&published.item)?;
    }

    if let Some(under_review) = step.assertion(AssertionStatus::UnderReview) {
        let handle = registry.find_or_create(&under_review.item)?;
        let version = registry.get_mut(handle);
        version.sent_for_review_date = under_review.happened;
        version.status = Some(VersionStatus::PreviewReviewed);

        if let ([input], [output]) = (preprint_inputs.as_slice(), preprint_outputs.as_slice()) {
            let input = registry.find_or_create(input)?;
            let output = registry.find_or_create(output)?;
            if input != output {
                tracing::debug!(id = %registry.get(output).id, "Republished for review");
                registry.supersede(input, output);
                registry.get_mut(output).status = Some(VersionStatus::PreviewReviewed);
            }
        }
    }

    if let Some(republished) = step.assertion(AssertionStatus::Republished) {
        if let Some(first_input) = step.inputs.first() {
            let replaced = registry.find_or_create(first_input)?;
            let replacement = registry.find_or_create(&republished.item)?;
            registry.supersede(replaced, replacement);
        }
    } else if let ([input], [output]) = (preprint_inputs.as_slice(), preprint_outputs.as_slice()) {
        if !evaluation_inputs.is_empty() {
            let replaced = registry.find_or_create(input)?;
            let replacement = registry.find_or_create(output)?;
            registry.supersede(replaced, replacement);
        }
    }

    if let Some(peer_reviewed) = step.assertion(AssertionStatus::PeerReviewed) {
        if let Some(handle) = registry.find(&peer_reviewed.item) {
            let version = registry.get_mut(handle);
            version.version_type = "Preprint".to_string();
            version.reviewed_date = peer_reviewed.happened;
            version.status = Some(VersionStatus::Reviewed);
            merge_evaluations(version, collect_evaluations(&step.actions));
            tracing::debug!(id = %version.id, "Peer reviewed");
        }
    } else if let [input] = preprint_inputs.as_slice() {
        if !evaluation_outputs.is_empty() && preprint_outputs.is_empty() {
            let handle = registry.find_or_create(input)?;
            let version = registry.get_mut(handle);
            version.status = Some(VersionStatus::Reviewed);
            if version.reviewed_date.is_none() {
                version.reviewed_date = evaluation_outputs.iter().find_map(|e| e.published);
            }
            merge_evaluations(version, collect_evaluations(&step.actions));
            tracing::debug!(id = %version.id, "Reviewed in place");
        }
    }

    if let Some(enhanced) = step.assertion(AssertionStatus::Enhanced) {
        if let Some(handle) = registry.find(&enhanced.item) {
            let evaluations = collect_evaluations(&step.actions);
            if !evaluations.is_empty() {
                let version = registry.get_mut(handle);
                merge_evaluations(version, evaluations);
                tracing::debug!(id = %version.id, "Enhanced with late evaluations");
            }
        }
    }

    Ok(())
}
