//! Build errors for state trees and machines.

use crate::core::StateId;
use thiserror::Error;

/// A single problem found while sealing a [`TreeBuilder`](super::TreeBuilder).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildViolation {
    #[error("State '{state}' is a leaf and cannot own a transition table")]
    NotComposite { state: String },

    #[error("State {id} was not registered with this builder")]
    UnknownState { id: StateId },

    #[error("State '{state}' is already a child of '{first}' and cannot also belong to '{second}'")]
    ParentConflict {
        state: String,
        first: String,
        second: String,
    },

    #[error("State type '{state}' was registered as both a leaf and a composite")]
    KindConflict { state: String },

    #[error("The root cannot be a source in the transition table of '{owner}'")]
    RootAsChild { owner: String },

    #[error("State '{state}' is its own ancestor")]
    Cycle { state: String },

    #[error("State '{state}' is a transition target but does not appear as a source in any table")]
    DetachedTarget { state: String },

    #[error("State name '{name}' is used by more than one state")]
    DuplicateName { name: String },
}

/// Errors that can occur when building state trees and machines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid state tree ({} violation(s)): {}", .0.len(), join(.0))]
    Invalid(Vec<BuildViolation>),

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Context not specified. Call .context(value) before .build()")]
    MissingContext,

    #[error("Initial state {id} does not belong to this tree")]
    UnknownState { id: StateId },

    #[error("Initial state '{state}' is not part of any transition table")]
    DetachedInitial { state: String },

    #[error("Initial state '{state}' is a composite without a default child")]
    EmptyInitial { state: String },
}

impl BuildError {
    /// Violations carried by [`BuildError::Invalid`]; empty otherwise.
    pub fn violations(&self) -> &[BuildViolation] {
        match self {
            Self::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

fn join(violations: &[BuildViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
