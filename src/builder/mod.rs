//! Builder API for state trees and machines.
//!
//! A tree is built in two phases with [`TreeBuilder`]: register states, then
//! wire their transition tables. Building seals the tree; machines are then
//! created over it with [`MachineBuilder`].

pub mod error;
pub mod machine;
pub mod macros;
pub mod tree;
mod validate;

pub use error::{BuildError, BuildViolation};
pub use machine::MachineBuilder;
pub use tree::TreeBuilder;
