//! Exit and entry lists for a hierarchical transition.

use super::state::StateId;
use super::tree::StateTree;
use serde::{Deserialize, Serialize};

/// Composite states to leave and enter when moving between two leaves.
///
/// The leaves themselves are not listed: the machine exits the previous
/// leaf before `exits` and enters the new leaf after `entries`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPlan {
    /// Innermost first.
    pub exits: Vec<StateId>,
    /// Outermost first.
    pub entries: Vec<StateId>,
}

impl TransitionPlan {
    pub fn is_empty(&self) -> bool {
        self.exits.is_empty() && self.entries.is_empty()
    }
}

impl<C, E> StateTree<C, E> {
    /// Enclosing composites of `id`, root first, `id` itself excluded.
    pub fn ancestors(&self, id: StateId) -> Vec<StateId> {
        let mut chain: Vec<StateId> = std::iter::successors(self.parent(id), |&p| self.parent(p))
            .take(self.len())
            .collect();
        chain.reverse();
        chain
    }

    /// Whether `ancestor` strictly encloses `id`.
    pub fn is_ancestor(&self, ancestor: StateId, id: StateId) -> bool {
        std::iter::successors(self.parent(id), |&p| self.parent(p))
            .take(self.len())
            .any(|p| p == ancestor)
    }

    /// Compute which composites change when moving from `previous` to
    /// `current`.
    ///
    /// Both ancestor chains are compared position by position from the
    /// root; everything past their common prefix is exited on the previous
    /// side and entered on the current side. With no previous state every
    /// ancestor of `current` is entered.
    pub fn plan(&self, previous: Option<StateId>, current: StateId) -> TransitionPlan {
        if previous == Some(current) {
            return TransitionPlan::default();
        }

        let from = previous.map(|p| self.ancestors(p)).unwrap_or_default();
        let to = self.ancestors(current);

        let shared = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

        TransitionPlan {
            exits: from[shared..].iter().rev().copied().collect(),
            entries: to[shared..].to_vec(),
        }
    }
}
