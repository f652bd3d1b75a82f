//! hfsm: a hierarchical finite state machine runtime
//!
//! States form a tree. Composite states own a transition table whose rows
//! make their sources into the composite's children; the first row's source
//! is the default child. An event is handled by the innermost table that
//! has a row for it, escalating outwards one composite at a time, and a
//! transition into a composite continues down its default children until a
//! leaf is reached. Only the composites whose ancestry actually changes are
//! exited and entered, innermost exits first and outermost entries first.
//!
//! # Core Concepts
//!
//! - **State**: behaviour hooks via the [`State`] trait, identity via [`StateId`]
//! - **Tree**: an immutable [`StateTree`] built in two phases with [`TreeBuilder`]
//! - **Machine**: a [`Machine`] holding the current state and a user context
//!
//! The runtime is single-threaded and synchronous. A sealed tree can be
//! shared by any number of machines.
//!
//! # Example
//!
//! ```rust
//! use hfsm::{transitions, Machine, State, TreeBuilder};
//!
//! #[derive(Clone, Copy, PartialEq, Debug)]
//! enum Event { SwOn, SwOff, Start, Stop }
//!
//! struct Named(&'static str);
//!
//! impl State<Vec<String>, Event> for Named {
//!     fn name(&self) -> &str { self.0 }
//!     fn on_entry(&self, log: &mut Vec<String>, _: &Event) {
//!         log.push(format!("enter {}", self.0));
//!     }
//!     fn on_exit(&self, log: &mut Vec<String>, _: &Event) {
//!         log.push(format!("exit {}", self.0));
//!     }
//! }
//!
//! let mut builder = TreeBuilder::<Vec<String>, Event>::new();
//! let sleeping = builder.leaf(Named("Sleeping"));
//! let active = builder.composite(Named("Active"));
//! let paused = builder.leaf(Named("Paused"));
//! let playing = builder.leaf(Named("Playing"));
//!
//! builder.root(transitions! {
//!     sleeping, Event::SwOn => active;
//!     active, Event::SwOff => sleeping;
//! });
//! builder.set(active, transitions! {
//!     paused, Event::Start => playing;
//!     playing, Event::Stop => paused;
//! });
//!
//! let mut machine = Machine::builder(builder.build().unwrap())
//!     .initial(sleeping)
//!     .context(Vec::new())
//!     .build()
//!     .unwrap();
//!
//! assert!(machine.dispatch(&Event::SwOn));
//! assert_eq!(machine.current(), paused);
//! assert_eq!(machine.context(), &["exit Sleeping", "enter Active", "enter Paused"]);
//!
//! // Playing has no SwOff row; Active does.
//! machine.dispatch(&Event::Start);
//! assert!(machine.dispatch(&Event::SwOff));
//! assert_eq!(machine.current(), sleeping);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, TreeBuilder};
pub use core::{State, StateId, StateTree, Transition, TransitionPlan};
pub use machine::Machine;
