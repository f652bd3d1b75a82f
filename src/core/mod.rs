//! Core hierarchical state machine types and algorithms.
//!
//! This module contains the pieces every machine is built from:
//! - State identity and behaviour via [`StateId`] and the [`State`] trait
//! - Per-composite transition tables ([`Resolver`])
//! - The sealed [`StateTree`] with event resolution and exit/entry planning
//! - Bounded transition history
//!
//! Nothing here mutates a tree after it is built; the only state that
//! changes at runtime lives in [`Machine`](crate::machine::Machine).

mod history;
mod plan;
mod resolution;
mod resolver;
mod state;
mod tree;

pub use history::{TransitionHistory, TransitionRecord, DEFAULT_HISTORY_CAPACITY};
pub use plan::TransitionPlan;
pub use resolver::{Resolver, Transition};
pub use state::{Root, State, StateId, StateKind};
pub use tree::StateTree;

pub(crate) use tree::Node;
