//! Transition tables described by state name.
//!
//! States and their behaviour are always registered in code. Which state
//! moves to which on what event can instead be described as data and
//! applied to a [`TreeBuilder`] whose states are already registered.
//!
//! ```json
//! {
//!   "initial": "Sleeping",
//!   "root": [
//!     { "from": "Sleeping", "event": "SwOn", "to": "Active" },
//!     { "from": "Active", "event": "SwOff", "to": "Sleeping" }
//!   ],
//!   "tables": [
//!     { "state": "Active", "transitions": [
//!       { "from": "Paused", "event": "Start", "to": "Playing" }
//!     ] }
//!   ]
//! }
//! ```

use crate::builder::TreeBuilder;
use crate::core::{StateId, Transition};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ConfigError;

/// One row of a named table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig<E> {
    pub from: String,
    pub event: E,
    pub to: String,
}

/// The table of one composite state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositeTable<E> {
    pub state: String,
    pub transitions: Vec<TransitionConfig<E>>,
}

/// Every transition table of a tree, by state name.
///
/// Tables are applied root first, then in the order listed, so the order of
/// rows inside each table decides default children and duplicate
/// precedence exactly as it does in code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de>"))]
pub struct TableConfig<E> {
    /// Name of the state a machine should start in
    #[serde(default)]
    pub initial: Option<String>,

    /// Outermost table. When absent, a root table wired in code is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<Vec<TransitionConfig<E>>>,

    /// Tables of nested composites
    #[serde(default = "Vec::new")]
    pub tables: Vec<CompositeTable<E>>,
}

impl<E> TableConfig<E>
where
    E: PartialEq + for<'de> Deserialize<'de>,
{
    /// Parse a configuration from JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Wire every table into `builder`.
    ///
    /// All names are resolved before anything is applied, so on error the
    /// builder is left untouched. Returns the id of `initial`, if given.
    pub fn apply<C>(self, builder: &mut TreeBuilder<C, E>) -> Result<Option<StateId>, ConfigError> {
        let initial = self
            .initial
            .as_deref()
            .map(|name| resolve_name(builder, name, "initial"))
            .transpose()?;

        let root = self
            .root
            .map(|rows| resolve_rows(builder, rows, "root"))
            .transpose()?;
        let mut tables = Vec::with_capacity(self.tables.len());
        for table in self.tables {
            let owner = resolve_name(builder, &table.state, "composite")?;
            let rows = resolve_rows(builder, table.transitions, &table.state)?;
            tables.push((owner, rows));
        }

        if let Some(root) = root {
            builder.root(root);
        }
        for (owner, rows) in tables {
            builder.set(owner, rows);
        }
        Ok(initial)
    }
}

fn resolve_name<C, E: PartialEq>(
    builder: &TreeBuilder<C, E>,
    name: &str,
    table: &str,
) -> Result<StateId, ConfigError> {
    builder.lookup(name).ok_or_else(|| ConfigError::UnknownState {
        name: name.to_string(),
        table: table.to_string(),
    })
}

fn resolve_rows<C, E: PartialEq>(
    builder: &TreeBuilder<C, E>,
    rows: Vec<TransitionConfig<E>>,
    table: &str,
) -> Result<Vec<Transition<E>>, ConfigError> {
    rows.into_iter()
        .map(|row| {
            let from = resolve_name(builder, &row.from, table)?;
            let to = resolve_name(builder, &row.to, table)?;
            Ok(Transition::new(from, row.event, to))
        })
        .collect()
}
