//! DocMap builder.
//!
//! Steps are first assembled in a [`StepChain`], where they link to each
//! other by direct handles. [`DocMapBuilder::build`] converts a chain into a
//! canonical [`DocMap`]: it walks back from any step to the true first one,
//! assigns blank-node identifiers `_:b0`, `_:b1`, … in chain order, and
//! rewrites the links as identifiers into the step dictionary.
//!
//! The chain itself is left untouched.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use crate::types::{
    Action, Assertion, DocMap, DocMapContext, Expression, Publisher, Step, DOCMAP_TYPE,
};

/// Error type for building a DocMap.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The handle does not belong to this chain.
    #[error("Unknown draft step: {0}")]
    UnknownStep(usize),
    /// Following links returned to an already visited step.
    #[error("Step chain is cyclic at draft step {0}")]
    CyclicChain(usize),
}

/// Handle to a step inside a [`StepChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DraftStepId(usize);

/// A step under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftStep {
    pub inputs: Vec<Expression>,
    pub actions: Vec<Action>,
    pub assertions: Vec<Assertion>,
    previous: Option<DraftStepId>,
    next: Option<DraftStepId>,
}

impl DraftStep {
    /// Create an empty step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input.
    pub fn input(mut self, input: Expression) -> Self {
        self.inputs.push(input);
        self
    }

    /// Add an action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion.
    pub fn assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }
}

/// Arena of draft steps linked by handles.
#[derive(Debug, Clone, Default)]
pub struct StepChain {
    steps: Vec<DraftStep>,
}

impl StepChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a linear chain from `steps`, returning it with the last handle.
    pub fn linear(steps: impl IntoIterator<Item = DraftStep>) -> (Self, Option<DraftStepId>) {
        let mut chain = Self::new();
        let mut last: Option<DraftStepId> = None;
        for step in steps {
            let id = chain.add(step);
            if let Some(prev) = last {
                chain.steps[prev.0].next = Some(id);
                chain.steps[id.0].previous = Some(prev);
            }
            last = Some(id);
        }
        (chain, last)
    }

    /// Add an unlinked step.
    pub fn add(&mut self, mut step: DraftStep) -> DraftStepId {
        step.previous = None;
        step.next = None;
        self.steps.push(step);
        DraftStepId(self.steps.len() - 1)
    }

    /// Add a step linked after `after`.
    pub fn push_after(&mut self, after: DraftStepId, step: DraftStep) -> Result<DraftStepId, BuildError> {
        self.get(after)?;
        let id = self.add(step);
        self.link(after, id)?;
        Ok(id)
    }

    /// Link `previous` → `next`, replacing any existing links on those ends.
    pub fn link(&mut self, previous: DraftStepId, next: DraftStepId) -> Result<(), BuildError> {
        self.get(previous)?;
        self.get(next)?;
        self.steps[previous.0].next = Some(next);
        self.steps[next.0].previous = Some(previous);
        Ok(())
    }

    /// Borrow a draft step.
    pub fn get(&self, id: DraftStepId) -> Result<&DraftStep, BuildError> {
        self.steps.get(id.0).ok_or(BuildError::UnknownStep(id.0))
    }

    /// Number of draft steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the chain has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Walk `previous` links from `from` to the first step.
    pub fn first_step(&self, from: DraftStepId) -> Result<DraftStepId, BuildError> {
        let mut visited = HashSet::new();
        let mut current = from;
        loop {
            if !visited.insert(current) {
                return Err(BuildError::CyclicChain(current.0));
            }
            match self.get(current)?.previous {
                Some(previous) => current = previous,
                None => return Ok(current),
            }
        }
    }

    /// Handles of the whole chain containing `from`, in chain order.
    pub fn ordered(&self, from: DraftStepId) -> Result<Vec<DraftStepId>, BuildError> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(self.first_step(from)?);
        while let Some(id) = current {
            if !visited.insert(id) {
                return Err(BuildError::CyclicChain(id.0));
            }
            order.push(id);
            current = self.get(id)?.next;
        }
        Ok(order)
    }
}

/// Blank-node identifier for the step at `position`.
pub fn blank_node_id(position: usize) -> String {
    format!("_:b{position}")
}

/// Builder for the DocMap envelope.
#[derive(Debug, Clone, Default)]
pub struct DocMapBuilder {
    id: Option<String>,
    context: DocMapContext,
    publisher: Option<Publisher>,
    created: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
}

impl DocMapBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document URL.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the JSON-LD context.
    pub fn context(mut self, context: DocMapContext) -> Self {
        self.context = context;
        self
    }

    /// Set the publisher.
    pub fn publisher(mut self, publisher: Publisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Set the created timestamp.
    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Set the updated timestamp.
    pub fn updated(mut self, updated: DateTime<Utc>) -> Self {
        self.updated = Some(updated);
        self
    }

    /// Build a canonical DocMap from the chain containing `from`.
    pub fn build(self, chain: &StepChain, from: DraftStepId) -> Result<DocMap, BuildError> {
        let order = chain.ordered(from)?;
        let ids: Vec<String> = (0..order.len()).map(blank_node_id).collect();

        let mut steps = BTreeMap::new();
        for (position, handle) in order.iter().enumerate() {
            let draft = chain.get(*handle)?;
            let step = Step {
                inputs: draft.inputs.clone(),
                actions: draft.actions.clone(),
                assertions: draft.assertions.clone(),
                next_step: ids.get(position + 1).cloned(),
                previous_step: position.checked_sub(1).map(|p| ids[p].clone()),
            };
            steps.insert(ids[position].clone(), step);
        }

        tracing::debug!(steps = steps.len(), "DocMap built from step chain");

        Ok(DocMap {
            context: self.context,
            docmap_type: Some(DOCMAP_TYPE.to_string()),
            id: self.id,
            created: self.created,
            updated: self.updated,
            publisher: self.publisher,
            first_step: ids.first().cloned(),
            steps,
        })
    }
}
