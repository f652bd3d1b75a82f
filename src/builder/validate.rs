//! Structural validation of a state tree before it is sealed.
//!
//! Uses Stillwater's `Validation` so that every problem is reported in one
//! pass instead of stopping at the first.

use crate::builder::error::BuildViolation;
use crate::core::{Node, StateId, StateKind};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

type Check = Validation<(), NonEmptyVec<BuildViolation>>;

/// Run every structural check, accumulating all violations.
pub(crate) fn validate<C, E>(
    nodes: &[Node<C, E>],
    parents: &[Option<StateId>],
    recorded: &[BuildViolation],
) -> Check {
    let mut checks: Vec<Check> = recorded
        .iter()
        .cloned()
        .map(Validation::fail)
        .collect();

    checks.extend(unique_names(nodes));
    checks.extend(acyclic(nodes, parents));
    checks.extend(targets_attached(nodes, parents));

    Validation::all_vec(checks).map(|_| ())
}

fn name<C, E>(nodes: &[Node<C, E>], id: StateId) -> String {
    nodes
        .get(id.index())
        .map(|n| n.behavior.name().to_string())
        .unwrap_or_else(|| id.to_string())
}

fn unique_names<C, E>(nodes: &[Node<C, E>]) -> Vec<Check> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for node in nodes {
        *counts.entry(node.behavior.name()).or_default() += 1;
    }

    let mut duplicates: Vec<&str> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect();
    duplicates.sort_unstable();

    duplicates
        .into_iter()
        .map(|name| {
            Validation::fail(BuildViolation::DuplicateName {
                name: name.to_string(),
            })
        })
        .collect()
}

fn acyclic<C, E>(nodes: &[Node<C, E>], parents: &[Option<StateId>]) -> Vec<Check> {
    let parent = |id: StateId| parents.get(id.index()).copied().flatten();

    (0..nodes.len())
        .map(StateId)
        .filter(|&id| {
            std::iter::successors(parent(id), |&p| parent(p))
                .take(nodes.len())
                .any(|p| p == id)
        })
        .map(|id| {
            Validation::fail(BuildViolation::Cycle {
                state: name(nodes, id),
            })
        })
        .collect()
}

fn targets_attached<C, E>(nodes: &[Node<C, E>], parents: &[Option<StateId>]) -> Vec<Check> {
    let mut detached: Vec<StateId> = Vec::new();
    for node in nodes {
        for transition in node.resolver.transitions() {
            let target = transition.to;
            let known = target.index() < nodes.len();
            let parented = parents.get(target.index()).copied().flatten().is_some();
            if known && !parented && !detached.contains(&target) {
                detached.push(target);
            }
        }
    }

    detached
        .into_iter()
        .map(|id| {
            Validation::fail(BuildViolation::DetachedTarget {
                state: name(nodes, id),
            })
        })
        .collect()
}

/// Log configurations that are legal but almost certainly mistakes.
pub(crate) fn warn_suspicious<C, E>(nodes: &[Node<C, E>], parents: &[Option<StateId>]) {
    for (index, node) in nodes.iter().enumerate() {
        let id = StateId(index);
        if node.kind == StateKind::Composite && node.resolver.is_empty() {
            warn!(
                state = node.behavior.name(),
                "composite has an empty transition table; transitions into it will be ignored"
            );
        }
        if !id.is_root() && parents[index].is_none() {
            warn!(
                state = node.behavior.name(),
                "state is not a source in any transition table"
            );
        }
    }
}
