//! Two-phase construction of a [`StateTree`].
//!
//! Phase one registers every state's behaviour and hands back its
//! [`StateId`]. Phase two wires the transition tables with [`TreeBuilder::set`]
//! and [`TreeBuilder::root`]. [`TreeBuilder::build`] consumes the builder, so
//! the resulting tree can no longer change shape.

use crate::builder::error::{BuildError, BuildViolation};
use crate::builder::validate::{validate, warn_suspicious};
use crate::core::{Node, Resolver, Root, State, StateId, StateKind, StateTree, Transition};
use std::any::TypeId;
use std::collections::HashMap;
use stillwater::validation::Validation;
use tracing::debug;

/// Registry and wiring stage for a state tree.
///
/// The builder is also the identity provider: [`leaf_of`](Self::leaf_of) and
/// [`composite_of`](Self::composite_of) return the same id every time they
/// are called with the same type.
///
/// # Example
///
/// ```rust
/// use hfsm::builder::TreeBuilder;
/// use hfsm::core::{State, Transition};
///
/// #[derive(Default)]
/// struct Off;
/// #[derive(Default)]
/// struct On;
///
/// impl State<(), bool> for Off {}
/// impl State<(), bool> for On {}
///
/// let mut builder = TreeBuilder::<(), bool>::new();
/// let off = builder.leaf_of::<Off>();
/// let on = builder.leaf_of::<On>();
/// builder.root(vec![
///     Transition::new(off, true, on),
///     Transition::new(on, false, off),
/// ]);
///
/// let tree = builder.build().unwrap();
/// assert_eq!(tree.resolve(off, &true), Some(on));
/// assert_eq!(tree.lookup("On"), Some(on));
/// ```
pub struct TreeBuilder<C, E> {
    nodes: Vec<Node<C, E>>,
    parents: Vec<Option<StateId>>,
    by_type: HashMap<TypeId, StateId>,
    violations: Vec<BuildViolation>,
}

impl<C, E: PartialEq> TreeBuilder<C, E> {
    /// Create a builder holding only the root composite.
    pub fn new() -> Self {
        let mut builder = Self {
            nodes: Vec::new(),
            parents: Vec::new(),
            by_type: HashMap::new(),
            violations: Vec::new(),
        };
        builder.register(Root, StateKind::Composite);
        builder
    }

    /// Register a leaf state.
    pub fn leaf<B>(&mut self, behavior: B) -> StateId
    where
        B: State<C, E> + 'static,
    {
        self.register(behavior, StateKind::Leaf)
    }

    /// Register a composite state. Give it children with [`set`](Self::set).
    pub fn composite<B>(&mut self, behavior: B) -> StateId
    where
        B: State<C, E> + 'static,
    {
        self.register(behavior, StateKind::Composite)
    }

    /// The single leaf registered for type `T`, created on first use.
    pub fn leaf_of<T>(&mut self) -> StateId
    where
        T: State<C, E> + Default + 'static,
    {
        self.singleton::<T>(StateKind::Leaf)
    }

    /// The single composite registered for type `T`, created on first use.
    pub fn composite_of<T>(&mut self) -> StateId
    where
        T: State<C, E> + Default + 'static,
    {
        self.singleton::<T>(StateKind::Composite)
    }

    /// Replace the transition table of `composite`.
    ///
    /// Every source state becomes a child of `composite`. The first row's
    /// source is the default child entered when a transition targets the
    /// composite itself. Calling this again for the same composite replaces
    /// its table; states dropped from the new table keep their parent.
    pub fn set<I>(&mut self, composite: StateId, transitions: I) -> &mut Self
    where
        I: IntoIterator<Item = Transition<E>>,
    {
        let transitions: Vec<Transition<E>> = transitions.into_iter().collect();

        let Some(owner) = self.nodes.get(composite.index()) else {
            self.violations
                .push(BuildViolation::UnknownState { id: composite });
            return self;
        };
        if owner.kind != StateKind::Composite {
            self.violations.push(BuildViolation::NotComposite {
                state: owner.behavior.name().to_string(),
            });
            return self;
        }

        for transition in &transitions {
            if transition.from.is_root() {
                self.violations.push(BuildViolation::RootAsChild {
                    owner: self.name(composite),
                });
            }
            for id in [transition.from, transition.to] {
                if !self.contains(id) {
                    self.violations.push(BuildViolation::UnknownState { id });
                }
            }
            if let Some(Some(existing)) = self.parents.get(transition.from.index()) {
                if *existing != composite {
                    self.violations.push(BuildViolation::ParentConflict {
                        state: self.name(transition.from),
                        first: self.name(*existing),
                        second: self.name(composite),
                    });
                }
            }
        }

        debug!(
            composite = %self.name(composite),
            rows = transitions.len(),
            "transition table set"
        );
        self.nodes[composite.index()]
            .resolver
            .set(composite, transitions, &mut self.parents);
        self
    }

    /// Set the outermost transition table.
    pub fn root<I>(&mut self, transitions: I) -> &mut Self
    where
        I: IntoIterator<Item = Transition<E>>,
    {
        self.set(StateId::ROOT, transitions)
    }

    /// Find a registered state by name.
    pub fn lookup(&self, name: &str) -> Option<StateId> {
        self.nodes
            .iter()
            .position(|n| n.behavior.name() == name)
            .map(StateId)
    }

    pub fn kind(&self, id: StateId) -> Option<StateKind> {
        self.nodes.get(id.index()).map(|n| n.kind)
    }

    /// Number of registered states, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root is registered on construction.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Validate the wiring and seal the tree.
    ///
    /// All violations found are returned together in
    /// [`BuildError::Invalid`].
    pub fn build(self) -> Result<StateTree<C, E>, BuildError> {
        match validate(&self.nodes, &self.parents, &self.violations) {
            Validation::Success(()) => {
                warn_suspicious(&self.nodes, &self.parents);
                debug!(states = self.nodes.len(), "state tree sealed");
                Ok(StateTree::from_parts(self.nodes, self.parents))
            }
            Validation::Failure(errors) => Err(BuildError::Invalid(errors.iter().cloned().collect())),
        }
    }

    fn register<B>(&mut self, behavior: B, kind: StateKind) -> StateId
    where
        B: State<C, E> + 'static,
    {
        let id = StateId(self.nodes.len());
        self.nodes.push(Node {
            behavior: Box::new(behavior),
            kind,
            resolver: Resolver::new(),
        });
        self.parents.push(None);
        id
    }

    fn singleton<T>(&mut self, kind: StateKind) -> StateId
    where
        T: State<C, E> + Default + 'static,
    {
        if let Some(&id) = self.by_type.get(&TypeId::of::<T>()) {
            if self.kind(id) != Some(kind) {
                self.violations.push(BuildViolation::KindConflict {
                    state: self.name(id),
                });
            }
            return id;
        }
        let id = self.register(T::default(), kind);
        self.by_type.insert(TypeId::of::<T>(), id);
        id
    }

    fn contains(&self, id: StateId) -> bool {
        id.index() < self.nodes.len()
    }

    fn name(&self, id: StateId) -> String {
        self.nodes
            .get(id.index())
            .map(|n| n.behavior.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}

impl<C, E: PartialEq> Default for TreeBuilder<C, E> {
    fn default() -> Self {
        Self::new()
    }
}
