//! Builder for constructing machines over a sealed tree.

use crate::builder::error::BuildError;
use crate::core::{StateId, StateTree, TransitionHistory, DEFAULT_HISTORY_CAPACITY};
use crate::machine::Machine;
use std::sync::Arc;

/// Builder for a [`Machine`] with a fluent API.
///
/// The tree is shared: build as many machines over one `Arc<StateTree>` as
/// needed, each with its own context and current state.
pub struct MachineBuilder<C, E> {
    tree: Arc<StateTree<C, E>>,
    initial: Option<StateId>,
    context: Option<C>,
    history_capacity: usize,
}

impl<C, E: PartialEq> MachineBuilder<C, E> {
    pub fn new(tree: impl Into<Arc<StateTree<C, E>>>) -> Self {
        Self {
            tree: tree.into(),
            initial: None,
            context: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Set the initial state (required).
    ///
    /// A composite is replaced by its default leaf.
    pub fn initial(mut self, state: StateId) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the context passed to every hook (required).
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Number of transitions to keep in the history; zero disables it.
    pub fn history(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing or the initial state
    /// cannot be reached by dispatch.
    pub fn build(self) -> Result<Machine<C, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if !self.tree.contains(initial) {
            return Err(BuildError::UnknownState { id: initial });
        }
        let leaf = self
            .tree
            .descend(initial)
            .ok_or_else(|| BuildError::EmptyInitial {
                state: self.tree.label(initial),
            })?;
        if self.tree.parent(leaf).is_none() {
            return Err(BuildError::DetachedInitial {
                state: self.tree.label(leaf),
            });
        }

        let context = self.context.ok_or(BuildError::MissingContext)?;

        Ok(Machine::from_parts(
            self.tree,
            leaf,
            context,
            TransitionHistory::with_capacity(self.history_capacity),
        ))
    }
}
