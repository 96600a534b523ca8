//! Evaluation aggregation.
//!
//! Turns the evaluation outputs of a step's actions into [`Evaluation`]
//! records and merges them into a version's review bag.
//!
//! ## Merge Semantics
//!
//! - Reviews accumulate: every merge appends, nothing is deduplicated.
//! - Evaluation summary and author response are replaced only when the
//!   incoming batch carries one; otherwise the existing value is kept.
//!
//! ## Text References
//!
//! `text` records where the evaluation's text can be fetched. It is only
//! set when the output has exactly one web-page manifestation; outputs with
//! none or several are kept without `text`.

use crate::types::{
    Action, Evaluation, EvaluationParticipant, Expression, PeerReview, ReviewType, Version,
    UNKNOWN_INSTITUTION,
};

/// Marker recorded as `text` for a single web-page manifestation.
pub fn text_reference(url: &str) -> String {
    format!("fetched content for {url}")
}

fn evaluation_from_output(action: &Action, output: &Expression) -> Option<Evaluation> {
    let review_type = ReviewType::from_expression_type(output.expression_type)?;
    let web_pages: Vec<_> = output.web_pages().collect();
    if web_pages.is_empty() {
        return None;
    }

    let text = match web_pages.as_slice() {
        [only] => only.url.as_deref().map(text_reference),
        _ => None,
    };

    Some(Evaluation {
        review_type,
        date: output.published,
        participants: action
            .participants
            .iter()
            .map(|p| EvaluationParticipant {
                name: p.actor.name.clone(),
                role: p.role.clone(),
                institution: UNKNOWN_INSTITUTION.to_string(),
            })
            .collect(),
        text,
    })
}

/// Collect the evaluations produced by `actions`, in action then output order.
pub fn collect_evaluations(actions: &[Action]) -> Vec<Evaluation> {
    actions
        .iter()
        .flat_map(|action| {
            action
                .outputs
                .iter()
                .filter_map(move |output| evaluation_from_output(action, output))
        })
        .collect()
}

/// Merge evaluations into `version`'s review bag.
pub fn merge_evaluations(version: &mut Version, evaluations: Vec<Evaluation>) {
    let mut reviews = Vec::new();
    let mut summaries = Vec::new();
    let mut responses = Vec::new();
    for evaluation in evaluations {
        match evaluation.review_type {
            ReviewType::ReviewArticle => reviews.push(evaluation),
            ReviewType::EvaluationSummary => summaries.push(evaluation),
            ReviewType::AuthorResponse => responses.push(evaluation),
        }
    }

    let bag = version.peer_review.get_or_insert_with(PeerReview::default);
    bag.reviews.extend(reviews);
    if let Some(summary) = summaries.into_iter().next() {
        bag.evaluation_summary = Some(summary);
    }
    if let Some(response) = responses.into_iter().next() {
        version.author_response_date = response.date;
        bag.author_response = Some(response);
    }
}
