//! Transition tables scoped to one composite state.

use super::state::StateId;
use serde::{Deserialize, Serialize};

/// One row of a transition table: in `from`, on `event`, go to `to`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition<E> {
    pub from: StateId,
    pub event: E,
    pub to: StateId,
}

impl<E> Transition<E> {
    pub fn new(from: StateId, event: E, to: StateId) -> Self {
        Self { from, event, to }
    }
}

impl<E> From<(StateId, E, StateId)> for Transition<E> {
    fn from((from, event, to): (StateId, E, StateId)) -> Self {
        Self::new(from, event, to)
    }
}

/// Ordered transition table owned by one composite.
///
/// Lookups are linear scans in registration order, so when a `(from, event)`
/// pair appears twice the first row wins.
#[derive(Clone, Debug)]
pub struct Resolver<E> {
    transitions: Vec<Transition<E>>,
}

impl<E> Default for Resolver<E> {
    fn default() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }
}

impl<E> Resolver<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table and make `owner` the parent of every source state.
    ///
    /// `parents` is the tree's parent-link arena, indexed by [`StateId`].
    /// States that were sources in the previous table but not in the new one
    /// keep whatever parent they had.
    pub fn set(
        &mut self,
        owner: StateId,
        transitions: Vec<Transition<E>>,
        parents: &mut [Option<StateId>],
    ) {
        for transition in &transitions {
            if let Some(slot) = parents.get_mut(transition.from.index()) {
                *slot = Some(owner);
            }
        }
        self.transitions = transitions;
    }

    /// Source of the first registered row: the owner's default child.
    pub fn resolve_first(&self) -> Option<StateId> {
        self.transitions.first().map(|t| t.from)
    }

    pub fn transitions(&self) -> &[Transition<E>] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<E: PartialEq> Resolver<E> {
    /// Target of the first row matching `(current, event)`.
    pub fn resolve(&self, current: StateId, event: &E) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.from == current && t.event == *event)
            .map(|t| t.to)
    }
}
