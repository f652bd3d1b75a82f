//! Finding the next state for an event.
//!
//! Events are handled innermost-first. When the table of the current
//! state's parent has no row for the event, the search moves one level up
//! and uses the composite that just failed as the source key, so a row
//! `(Active, SW_OFF) -> Sleeping` in the root table handles `SW_OFF` for
//! every state nested anywhere inside `Active`. A target that is itself a
//! composite is replaced by its default child until a leaf is reached.

use super::state::StateId;
use super::tree::StateTree;

impl<C, E: PartialEq> StateTree<C, E> {
    /// Resolve `event` against `current`, returning the leaf to move to.
    ///
    /// Returns `None` when no ancestor handles the event, and also when the
    /// descent reaches a composite whose table is empty.
    pub fn resolve(&self, current: StateId, event: &E) -> Option<StateId> {
        let mut key = current;
        let mut scope = self.parent(current)?;
        let mut target = self.resolve_in(scope, key, event);

        while target.is_none() {
            // Running out of parents means the root did not handle it either.
            let outer = self.parent(scope)?;
            key = scope;
            scope = outer;
            target = self.resolve_in(scope, key, event);
        }

        self.descend(target?)
    }

    /// Follow default children from `state` down to a leaf.
    pub fn descend(&self, state: StateId) -> Option<StateId> {
        let mut state = state;
        // Parent links are acyclic, so each step goes one level deeper; the
        // bound only guards against ids from a foreign tree.
        for _ in 0..=self.len() {
            if !self.is_composite(state) {
                return self.contains(state).then_some(state);
            }
            state = self.resolve_first(state)?;
        }
        None
    }
}
