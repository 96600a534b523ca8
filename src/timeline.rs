//! Timeline derivation and supersession filtering.
//!
//! The timeline is derived from every version in the registry, including
//! versions that were later superseded. Superseded versions are removed only
//! from the final version list, so a timeline may reference a version that
//! the returned list no longer contains.

use crate::policy::ParsePolicyV1;
use crate::types::{TimelineEvent, Version};

const BIORXIV_LINK_TEXT: &str = "Go to BioRxiv";
const PREPRINT_LINK_TEXT: &str = "Go to preprint";

/// Events for one version, sorted by date.
pub fn version_events(version: &Version, policy: &ParsePolicyV1) -> Vec<TimelineEvent> {
    let kind = &version.version_type;
    let mut events = Vec::with_capacity(3);

    if let Some(published) = version.published_date {
        let name = match &version.version_identifier {
            Some(v) => format!("{kind} v{v} posted"),
            None => format!("{kind} posted"),
        };
        let text = if policy.is_biorxiv(&version.doi) {
            BIORXIV_LINK_TEXT
        } else {
            PREPRINT_LINK_TEXT
        };
        let url = version
            .url
            .clone()
            .unwrap_or_else(|| policy.doi_url(&version.doi));
        events.push(TimelineEvent::new(name, published).with_link(text, url));
    }

    if let Some(sent) = version.sent_for_review_date {
        events.push(TimelineEvent::new(format!("{kind} sent for review"), sent));
    }

    if let Some(reviewed) = version.reviewed_date {
        events.push(TimelineEvent::new(format!("Reviews received for {kind}"), reviewed));
    }

    events.sort_by_key(|e| e.date);
    events
}

/// Timeline across `versions`, concatenated in version order.
pub fn derive_timeline(versions: &[Version], policy: &ParsePolicyV1) -> Vec<TimelineEvent> {
    versions
        .iter()
        .flat_map(|v| version_events(v, policy))
        .collect()
}

/// Versions that have not been superseded.
pub fn without_superseded(versions: Vec<Version>) -> Vec<Version> {
    versions.into_iter().filter(|v| !v.superseded).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VersionStatus;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, d, 0, 0, 0).unwrap()
    }

    fn version(doi: &str) -> Version {
        Version {
            id: doi.to_string(),
            version_identifier: None,
            doi: doi.to_string(),
            url: None,
            version_type: "Preprint".to_string(),
            status: None,
            peer_review: None,
            published_date: None,
            sent_for_review_date: None,
            reviewed_date: None,
            author_response_date: None,
            content: vec![],
            superseded: false,
        }
    }

    #[test]
    fn test_no_dates_no_events() {
        assert!(version_events(&version("10.1/a"), &ParsePolicyV1::default()).is_empty());
    }

    #[test]
    fn test_posted_event_link() {
        let mut v = version("10.1101/a");
        v.published_date = Some(day(1));
        let events = version_events(&v, &ParsePolicyV1::default());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Preprint posted");
        let link = events[0].link.as_ref().unwrap();
        assert_eq!(link.text, "Go to BioRxiv");
        assert_eq!(link.url, "https://doi.org/10.1101/a");
    }

    #[test]
    fn test_version_identifier_in_name() {
        let mut v = version("10.7554/x");
        v.version_identifier = Some("2".to_string());
        v.url = Some("https://x".to_string());
        v.published_date = Some(day(1));
        let events = version_events(&v, &ParsePolicyV1::default());

        assert_eq!(events[0].name, "Preprint v2 posted");
        assert_eq!(events[0].link.as_ref().unwrap().text, "Go to preprint");
        assert_eq!(events[0].link.as_ref().unwrap().url, "https://x");
    }

    #[test]
    fn test_events_sorted_within_version_only() {
        let mut a = version("10.1/a");
        a.published_date = Some(day(10));
        a.sent_for_review_date = Some(day(2));
        a.reviewed_date = Some(day(20));
        a.status = Some(VersionStatus::Reviewed);
        let mut b = version("10.1/b");
        b.published_date = Some(day(1));

        let timeline = derive_timeline(&[a, b], &ParsePolicyV1::default());
        let names: Vec<_> = timeline.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Preprint sent for review",
                "Preprint posted",
                "Reviews received for Preprint",
                "Preprint posted",
            ]
        );
    }

    #[test]
    fn test_filter_drops_superseded() {
        let mut a = version("10.1/a");
        a.superseded = true;
        let kept = without_superseded(vec![a, version("10.1/b")]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].doi, "10.1/b");
    }
}
