//! The running machine: current state, context and dispatch.
//!
//! A [`Machine`] pairs a shared, sealed [`StateTree`] with the per-instance
//! data that changes at runtime. Dispatch is synchronous and runs to
//! completion. Hooks receive the context and the event but never the
//! machine, so a hook cannot dispatch into the machine that is running it.

mod dispatch;

use crate::builder::MachineBuilder;
use crate::core::{StateId, StateTree, TransitionHistory};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A hierarchical state machine instance.
///
/// # Example
///
/// ```rust
/// use hfsm::builder::TreeBuilder;
/// use hfsm::core::State;
/// use hfsm::machine::Machine;
/// use hfsm::transitions;
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Event { Toggle }
///
/// struct Lamp(&'static str);
///
/// impl State<Vec<String>, Event> for Lamp {
///     fn name(&self) -> &str { self.0 }
///     fn on_entry(&self, log: &mut Vec<String>, _: &Event) {
///         log.push(format!("enter {}", self.0));
///     }
/// }
///
/// let mut builder = TreeBuilder::<Vec<String>, Event>::new();
/// let off = builder.leaf(Lamp("Off"));
/// let on = builder.leaf(Lamp("On"));
/// builder.root(transitions! {
///     off, Event::Toggle => on;
///     on, Event::Toggle => off;
/// });
///
/// let mut machine = Machine::builder(builder.build().unwrap())
///     .initial(off)
///     .context(Vec::new())
///     .build()
///     .unwrap();
///
/// assert!(machine.dispatch(&Event::Toggle));
/// assert_eq!(machine.current(), on);
/// assert_eq!(machine.context(), &vec!["enter On".to_string()]);
/// ```
pub struct Machine<C, E> {
    id: Uuid,
    tree: Arc<StateTree<C, E>>,
    previous: Option<StateId>,
    current: StateId,
    started: bool,
    context: C,
    history: TransitionHistory<E>,
}

impl<C, E: PartialEq> Machine<C, E> {
    /// Start building a machine over `tree`.
    pub fn builder(tree: impl Into<Arc<StateTree<C, E>>>) -> MachineBuilder<C, E> {
        MachineBuilder::new(tree)
    }
}

impl<C, E> Machine<C, E> {
    pub(crate) fn from_parts(
        tree: Arc<StateTree<C, E>>,
        initial: StateId,
        context: C,
        history: TransitionHistory<E>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tree,
            previous: None,
            current: initial,
            started: false,
            context,
            history,
        }
    }

    /// Unique id of this instance, attached to its log output.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tree(&self) -> &Arc<StateTree<C, E>> {
        &self.tree
    }

    /// The current leaf state.
    pub fn current(&self) -> StateId {
        self.current
    }

    /// The leaf state before the last transition, `None` until one happens.
    pub fn previous(&self) -> Option<StateId> {
        self.previous
    }

    /// Whether `state` is the current leaf or encloses it.
    pub fn is_in(&self, state: StateId) -> bool {
        self.current == state || self.tree.is_ancestor(state, self.current)
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    pub fn history(&self) -> &TransitionHistory<E> {
        &self.history
    }
}

impl<C: fmt::Debug, E> fmt::Debug for Machine<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("current", &self.tree.label(self.current))
            .field("previous", &self.previous.map(|p| self.tree.label(p)))
            .field("context", &self.context)
            .finish()
    }
}
