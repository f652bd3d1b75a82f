//! The sealed state tree: an arena of state behaviours, parent links and
//! per-composite transition tables.

use super::resolver::Resolver;
use super::state::{State, StateId, StateKind};
use std::collections::HashMap;
use std::fmt;

pub(crate) struct Node<C, E> {
    pub(crate) behavior: Box<dyn State<C, E>>,
    pub(crate) kind: StateKind,
    pub(crate) resolver: Resolver<E>,
}

/// Immutable state hierarchy shared by any number of machines.
///
/// Built by [`TreeBuilder`](crate::builder::TreeBuilder); once built, neither
/// the parent links nor the transition tables can change. Every query
/// accepts ids from a different tree without panicking and treats them as
/// unknown.
pub struct StateTree<C, E> {
    nodes: Vec<Node<C, E>>,
    parents: Vec<Option<StateId>>,
    names: HashMap<String, StateId>,
}

impl<C, E> StateTree<C, E> {
    pub(crate) fn from_parts(nodes: Vec<Node<C, E>>, parents: Vec<Option<StateId>>) -> Self {
        let names = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.behavior.name().to_string(), StateId(index)))
            .collect();
        Self {
            nodes,
            parents,
            names,
        }
    }

    /// Number of states, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: StateId) -> bool {
        id.index() < self.nodes.len()
    }

    /// All ids in registration order, starting with [`StateId::ROOT`].
    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.nodes.len()).map(StateId)
    }

    pub fn parent(&self, id: StateId) -> Option<StateId> {
        self.parents.get(id.index()).copied().flatten()
    }

    pub fn kind(&self, id: StateId) -> Option<StateKind> {
        self.node(id).map(|n| n.kind)
    }

    pub fn is_composite(&self, id: StateId) -> bool {
        self.kind(id) == Some(StateKind::Composite)
    }

    pub fn name(&self, id: StateId) -> Option<&str> {
        self.node(id).map(|n| n.behavior.name())
    }

    /// Find a state by its behaviour's name.
    pub fn lookup(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Transition table of a composite; `None` for leaves and unknown ids.
    pub fn resolver(&self, id: StateId) -> Option<&Resolver<E>> {
        self.node(id)
            .filter(|n| n.kind == StateKind::Composite)
            .map(|n| &n.resolver)
    }

    /// Direct substates of a composite, in table order.
    pub fn children(&self, id: StateId) -> Vec<StateId> {
        let mut children: Vec<StateId> = Vec::new();
        if let Some(resolver) = self.resolver(id) {
            for transition in resolver.transitions() {
                if !children.contains(&transition.from) {
                    children.push(transition.from);
                }
            }
        }
        children
    }

    pub(crate) fn behavior(&self, id: StateId) -> Option<&dyn State<C, E>> {
        self.node(id).map(|n| n.behavior.as_ref())
    }

    fn node(&self, id: StateId) -> Option<&Node<C, E>> {
        self.nodes.get(id.index())
    }

    /// Human readable label for logs: the state's name, or its id when the
    /// id is foreign to this tree.
    pub(crate) fn label(&self, id: StateId) -> String {
        self.name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }
}

impl<C, E: PartialEq> StateTree<C, E> {
    /// Default child of a composite.
    pub fn resolve_first(&self, composite: StateId) -> Option<StateId> {
        self.resolver(composite)?.resolve_first()
    }

    /// Look up `(source, event)` in one composite's table only.
    pub fn resolve_in(&self, composite: StateId, source: StateId, event: &E) -> Option<StateId> {
        self.resolver(composite)?.resolve(source, event)
    }
}

impl<C, E> fmt::Debug for StateTree<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let states: Vec<(String, Option<StateId>)> = self
            .ids()
            .map(|id| (self.label(id), self.parent(id)))
            .collect();
        f.debug_struct("StateTree").field("states", &states).finish()
    }
}
