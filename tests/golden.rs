//! Golden tests for the DocMap kernel.
//!
//! These tests pin the observable contract of `ParseResult`: empty inputs,
//! version identity, status transitions, supersession and determinism.

use chrono::{DateTime, TimeZone, Utc};
use docmap_kernel::{
    parse_docmap, parse_docmap_str, docmap_from_str, docmap_to_string,
    Action, Assertion, AssertionStatus, DocMap, DocMapBuilder, DocMapParser, DraftStep,
    Expression, ExpressionType, Manifestation, Participant, StepChain, VersionStatus,
    TimelineEvent,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 11, d, 0, 0, 0).unwrap()
}

fn build(steps: Vec<DraftStep>) -> DocMap {
    let (chain, last) = StepChain::linear(steps);
    DocMapBuilder::new()
        .id("https://example.org/docmap/1")
        .build(&chain, last.unwrap())
        .unwrap()
}

fn names(timeline: &[TimelineEvent]) -> Vec<&str> {
    timeline.iter().map(|e| e.name.as_str()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// EMPTY INPUTS
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_no_steps_yields_empty_result() {
    let result = parse_docmap_str(r#"{"steps": {}}"#).unwrap();
    assert!(result.timeline.is_empty());
    assert!(result.versions.is_empty());
}

#[test]
fn test_unresolvable_entry_point_yields_empty_result() {
    let text = r#"{
        "first-step": "_:b9",
        "steps": {"_:b0": {"inputs": [{"type": "preprint", "doi": "10.1/a"}]}}
    }"#;
    let result = parse_docmap_str(text).unwrap();
    assert!(result.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// POSTING
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_single_posted_preprint() {
    let docmap = build(vec![DraftStep::new().input(
        Expression::preprint("10.7554/eLife.1")
            .with_url("https://example.org/preprint/1")
            .with_published(day(1)),
    )]);

    let result = parse_docmap(&docmap).unwrap();

    assert_eq!(result.versions.len(), 1);
    let v = &result.versions[0];
    assert_eq!(v.doi, "10.7554/eLife.1");
    assert_eq!(v.url.as_deref(), Some("https://example.org/preprint/1"));
    assert_eq!(v.version_type, "Preprint");

    assert_eq!(result.timeline.len(), 1);
    let event = &result.timeline[0];
    assert_eq!(event.name, "Preprint posted");
    assert_eq!(event.date, day(1));
    let link = event.link.as_ref().unwrap();
    assert_eq!(link.text, "Go to preprint");
    assert_eq!(link.url, "https://example.org/preprint/1");
}

#[test]
fn test_biorxiv_labelling() {
    let docmap = build(vec![DraftStep::new().input(
        Expression::preprint("10.1101/2022.11.08.515698").with_published(day(8)),
    )]);

    let result = parse_docmap(&docmap).unwrap();
    let link = result.timeline[0].link.as_ref().unwrap();
    assert_eq!(link.text, "Go to BioRxiv");
    assert_eq!(link.url, "https://doi.org/10.1101/2022.11.08.515698");
}

// ─────────────────────────────────────────────────────────────────────────────
// REVIEW FLOW
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_under_review_without_republish() {
    let preprint = Expression::preprint("10.1101/a").with_published(day(1));
    let docmap = build(vec![DraftStep::new()
        .input(preprint.clone())
        .assertion(Assertion::new(preprint, AssertionStatus::UnderReview).happened_at(day(5)))]);

    let result = parse_docmap(&docmap).unwrap();

    assert_eq!(result.versions.len(), 1);
    let v = &result.versions[0];
    assert_eq!(v.status, Some(VersionStatus::PreviewReviewed));
    assert_eq!(v.sent_for_review_date, Some(day(5)));
    assert!(!v.superseded);
    assert_eq!(names(&result.timeline), vec!["Preprint posted", "Preprint sent for review"]);
}

#[test]
fn test_republish_for_review() {
    let a = Expression::preprint("10.1101/a")
        .with_url("https://biorxiv.org/a")
        .with_published(day(1));
    let b = Expression::preprint("10.7554/eLife.b")
        .with_url("https://elifesciences.org/b")
        .with_published(day(10));

    let docmap = build(vec![
        DraftStep::new().assertion(Assertion::new(a.clone(), AssertionStatus::Published)),
        DraftStep::new()
            .input(a)
            .action(Action::new(vec![], vec![b.clone()]))
            .assertion(Assertion::new(b, AssertionStatus::UnderReview).happened_at(day(10))),
    ]);

    let result = parse_docmap(&docmap).unwrap();

    assert_eq!(result.versions.len(), 1);
    let b = &result.versions[0];
    assert_eq!(b.doi, "10.7554/eLife.b");
    assert_eq!(b.status, Some(VersionStatus::PreviewReviewed));
    let urls: Vec<_> = b.content.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(urls, vec!["https://biorxiv.org/a", "https://elifesciences.org/b"]);

    // A is gone from versions but its posting remains on the timeline.
    let first = &result.timeline[0];
    assert_eq!(first.name, "Preprint posted");
    assert_eq!(first.link.as_ref().unwrap().url, "https://biorxiv.org/a");
    assert_eq!(first.link.as_ref().unwrap().text, "Go to BioRxiv");
    assert_eq!(result.timeline.len(), 3);
}

#[test]
fn test_peer_reviewed_with_evaluations() {
    let preprint = Expression::preprint("10.1101/a").with_published(day(1));
    let review = |n: u32| {
        Expression::new(ExpressionType::PeerReview)
            .with_published(day(20))
            .with_manifestation(Manifestation::web_page(format!("https://reviews/{n}")))
    };
    let docmap = build(vec![
        DraftStep::new()
            .input(preprint.clone())
            .assertion(Assertion::new(preprint.clone(), AssertionStatus::UnderReview).happened_at(day(3))),
        DraftStep::new()
            .input(preprint.clone())
            .action(Action::new(vec![Participant::person("Reviewer 1", "peer-reviewer")], vec![review(1)]))
            .action(Action::new(vec![Participant::person("Reviewer 2", "peer-reviewer")], vec![review(2)]))
            .assertion(Assertion::new(preprint, AssertionStatus::PeerReviewed).happened_at(day(20))),
    ]);

    let result = parse_docmap(&docmap).unwrap();
    let v = &result.versions[0];
    assert_eq!(v.status, Some(VersionStatus::Reviewed));
    assert_eq!(v.reviewed_date, Some(day(20)));
    let bag = v.peer_review.as_ref().unwrap();
    assert_eq!(bag.reviews.len(), 2);
    assert_eq!(bag.reviews[1].participants[0].name, "Reviewer 2");
    assert_eq!(
        names(&result.timeline),
        vec!["Preprint posted", "Preprint sent for review", "Reviews received for Preprint"]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// DETERMINISM TESTS
// ─────────────────────────────────────────────────────────────────────────────

fn lifecycle() -> DocMap {
    let v1 = Expression::preprint("10.1101/a").with_version("1").with_published(day(1));
    let v2 = Expression::preprint("10.1101/a").with_version("2").with_published(day(25));
    let summary = Expression::new(ExpressionType::EvaluationSummary)
        .with_published(day(15))
        .with_manifestation(Manifestation::web_page("https://summary"));
    build(vec![
        DraftStep::new().input(v1.clone()),
        DraftStep::new()
            .input(v1.clone())
            .action(Action::new(vec![Participant::person("Editor", "editor")], vec![summary.clone()])),
        DraftStep::new()
            .input(v1)
            .input(summary)
            .action(Action::new(vec![], vec![v2])),
    ])
}

#[test]
fn test_same_document_same_result_100_runs() {
    let docmap = lifecycle();
    let parser = DocMapParser::default();
    let first = parser.parse(&docmap).unwrap();

    for i in 1..100 {
        let again = parser.parse(&docmap).unwrap();
        assert_eq!(first, again, "Run {} differs from run 0", i);
        assert_eq!(first.fingerprint(), again.fingerprint());
    }
}

#[test]
fn test_interpretation_is_idempotent_over_unchanged_steps() {
    let docmap = lifecycle();
    let parser = DocMapParser::default();
    let a = parser.interpret(&docmap).unwrap();
    let b = parser.interpret(&docmap).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_revision_supersedes_reviewed_version() {
    let result = parse_docmap(&lifecycle()).unwrap();

    assert_eq!(result.versions.len(), 1);
    assert_eq!(result.versions[0].version_identifier.as_deref(), Some("2"));
    assert_eq!(
        names(&result.timeline),
        vec!["Preprint v1 posted", "Reviews received for Preprint", "Preprint v2 posted"]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// ROUND TRIP
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_serialized_docmap_parses_identically() {
    let docmap = lifecycle();
    let direct = parse_docmap(&docmap).unwrap();

    let text = docmap_to_string(&docmap).unwrap();
    let reread = docmap_from_str(&text).unwrap();
    assert_eq!(reread, docmap);
    assert_eq!(parse_docmap_str(&text).unwrap(), direct);
}

#[test]
fn test_missing_doi_aborts_whole_parse() {
    let docmap = build(vec![
        DraftStep::new().input(Expression::preprint("10.1/ok")),
        DraftStep::new().input(Expression::new(ExpressionType::Preprint).with_identifier("no-doi")),
    ]);
    let err = parse_docmap(&docmap).unwrap_err();
    assert!(err.to_string().contains("cannot identify item by DOI"));
}
