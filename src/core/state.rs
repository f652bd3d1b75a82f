//! State identity and state behaviour.
//!
//! A state in the tree is two things: a [`StateId`], the stable handle used
//! for every identity comparison, and a [`State`] behaviour object holding
//! the user's entry/perform/exit hooks. The tree stores one behaviour per id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a state within one [`StateTree`](super::StateTree).
///
/// Ids are handed out by the builder and never reused. Two states are the
/// same state exactly when their ids are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// The root composite every tree starts with.
    pub const ROOT: StateId = StateId(0);

    /// Arena index of this state.
    pub fn index(self) -> usize {
        self.0
    }

    /// Whether this is the tree's root.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a state can contain substates.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum StateKind {
    Leaf,
    Composite,
}

/// Behaviour attached to a state.
///
/// Hooks receive the machine's shared context and the event that triggered
/// the transition. Ancestor hooks fired during a hierarchical transition see
/// the same event as the leaf hooks.
///
/// Behaviours are shared by every machine built over the same tree, so they
/// take `&self`; all mutable data belongs in the context.
///
/// # Example
///
/// ```rust
/// use hfsm::core::State;
///
/// #[derive(Default)]
/// struct Counter;
///
/// impl State<u32, ()> for Counter {
///     fn on_entry(&self, count: &mut u32, _event: &()) {
///         *count += 1;
///     }
/// }
///
/// let mut count = 0;
/// Counter.on_entry(&mut count, &());
/// assert_eq!(count, 1);
/// assert_eq!(State::<u32, ()>::name(&Counter), "Counter");
/// ```
pub trait State<C, E>: Send + Sync {
    /// Name used in logs, config files and diagnostics.
    ///
    /// Defaults to the implementing type's name without its module path.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Called when the state is entered.
    fn on_entry(&self, _context: &mut C, _event: &E) {}

    /// Called once on the new leaf state after all entry hooks have run.
    fn perform(&self, _context: &mut C, _event: &E) {}

    /// Called when the state is exited.
    fn on_exit(&self, _context: &mut C, _event: &E) {}
}

/// Behaviour of the root composite: every hook is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct Root;

impl<C, E> State<C, E> for Root {
    fn name(&self) -> &str {
        "Root"
    }
}

fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sleeping;

    impl State<Vec<&'static str>, u8> for Sleeping {
        fn on_entry(&self, log: &mut Vec<&'static str>, _event: &u8) {
            log.push("enter");
        }

        fn on_exit(&self, log: &mut Vec<&'static str>, _event: &u8) {
            log.push("exit");
        }
    }

    struct Named;

    impl State<(), ()> for Named {
        fn name(&self) -> &str {
            "custom"
        }
    }

    #[test]
    fn default_name_strips_module_path() {
        assert_eq!(State::<Vec<&str>, u8>::name(&Sleeping), "Sleeping");
    }

    #[test]
    fn name_can_be_overridden() {
        assert_eq!(Named.name(), "custom");
    }

    #[test]
    fn default_hooks_do_nothing() {
        let mut log = Vec::new();
        Sleeping.perform(&mut log, &0);
        assert!(log.is_empty());

        Sleeping.on_entry(&mut log, &0);
        Sleeping.on_exit(&mut log, &0);
        assert_eq!(log, vec!["enter", "exit"]);
    }

    #[test]
    fn short_type_name_handles_generics() {
        assert_eq!(short_type_name("a::b::Foo<c::Bar>"), "Foo");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn root_id_is_zero() {
        assert!(StateId::ROOT.is_root());
        assert_eq!(StateId::ROOT.index(), 0);
        assert!(!StateId(3).is_root());
        assert_eq!(StateId(3).to_string(), "#3");
    }

    #[test]
    fn state_id_serializes_as_index() {
        let json = serde_json::to_string(&StateId(7)).unwrap();
        assert_eq!(json, "7");
        let back: StateId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StateId(7));
    }
}
