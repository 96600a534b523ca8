//! Step walker.
//!
//! Linearizes the step chain of a canonical [`DocMap`], starting at
//! `first-step` and following `next-step` identifiers through the step
//! dictionary. The walk ends at the first absent or unresolved link.
//!
//! ## Cycles
//!
//! Forward links are not guaranteed to be acyclic in malformed documents.
//! The walker remembers every identifier it has yielded and ends the walk,
//! with a warning, when a link points back at one of them. Acyclic
//! documents walk exactly as they would without the guard.

use std::collections::HashSet;

use crate::types::{DocMap, Step};

/// One-shot iterator over the steps of a DocMap, in chain order.
pub struct StepWalker<'a> {
    docmap: &'a DocMap,
    next: Option<&'a str>,
    visited: HashSet<&'a str>,
    max_steps: Option<usize>,
}

impl<'a> StepWalker<'a> {
    /// Create a walker starting at the DocMap's entry step.
    pub fn new(docmap: &'a DocMap) -> Self {
        Self {
            docmap,
            next: docmap.first_step.as_deref(),
            visited: HashSet::new(),
            max_steps: None,
        }
    }

    /// Stop after at most `max_steps` steps.
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }
}

impl<'a> Iterator for StepWalker<'a> {
    type Item = (&'a str, &'a Step);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;

        if self.max_steps.is_some_and(|max| self.visited.len() >= max) {
            tracing::warn!(step_id = %id, max_steps = ?self.max_steps, "Step limit reached, ending walk");
            return None;
        }

        if !self.visited.insert(id) {
            tracing::warn!(step_id = %id, "Cycle in next-step links, ending walk");
            return None;
        }

        // Resolve against the map so the yielded id borrows from the DocMap.
        let (id, step) = self.docmap.steps.get_key_value(id)?;
        self.next = step.next_step.as_deref();
        tracing::trace!(step_id = %id, "Walking step");
        Some((id.as_str(), step))
    }
}

/// Walk the steps of `docmap` in chain order.
pub fn walk_steps(docmap: &DocMap) -> StepWalker<'_> {
    StepWalker::new(docmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(links: &[(&str, Option<&str>)], first: Option<&str>) -> DocMap {
        let mut docmap = DocMap {
            first_step: first.map(str::to_string),
            ..Default::default()
        };
        for (id, next) in links {
            docmap.steps.insert(
                id.to_string(),
                Step {
                    next_step: next.map(str::to_string),
                    ..Default::default()
                },
            );
        }
        docmap
    }

    fn ids(docmap: &DocMap) -> Vec<&str> {
        walk_steps(docmap).map(|(id, _)| id).collect()
    }

    #[test]
    fn test_empty_docmap() {
        assert!(ids(&DocMap::default()).is_empty());
    }

    #[test]
    fn test_unresolved_entry() {
        let docmap = chain(&[("_:b0", None)], Some("_:missing"));
        assert!(ids(&docmap).is_empty());
    }

    #[test]
    fn test_follows_next_links() {
        let docmap = chain(
            &[("c", None), ("a", Some("b")), ("b", Some("c"))],
            Some("a"),
        );
        assert_eq!(ids(&docmap), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_stops_at_dangling_link() {
        let docmap = chain(&[("a", Some("b")), ("b", Some("gone"))], Some("a"));
        assert_eq!(ids(&docmap), vec!["a", "b"]);
    }

    #[test]
    fn test_cycle_terminates() {
        let docmap = chain(&[("a", Some("b")), ("b", Some("a"))], Some("a"));
        assert_eq!(ids(&docmap), vec!["a", "b"]);
    }

    #[test]
    fn test_self_loop_terminates() {
        let docmap = chain(&[("a", Some("a"))], Some("a"));
        assert_eq!(ids(&docmap), vec!["a"]);
    }

    #[test]
    fn test_max_steps() {
        let docmap = chain(
            &[("a", Some("b")), ("b", Some("c")), ("c", None)],
            Some("a"),
        );
        let walked: Vec<_> = walk_steps(&docmap).with_max_steps(Some(2)).collect();
        assert_eq!(walked.len(), 2);
    }
}
