//! Transition history tracking.
//!
//! Every transition a machine performs can be recorded together with the
//! composites it exited and entered. The log is bounded: once full, the
//! oldest record is dropped.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;
use uuid::Uuid;

/// Default number of records a machine keeps.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Record of a single transition.
///
/// # Example
///
/// ```rust
/// use hfsm::core::{StateId, TransitionRecord};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let record = TransitionRecord {
///     machine: Uuid::nil(),
///     from: StateId::ROOT,
///     to: StateId::ROOT,
///     event: "tick",
///     exited: vec![],
///     entered: vec![],
///     timestamp: Utc::now(),
/// };
/// assert!(record.exited.is_empty());
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct TransitionRecord<E> {
    /// Id of the machine that made the transition
    pub machine: Uuid,
    /// Leaf the machine left
    pub from: StateId,
    /// Leaf the machine arrived in
    pub to: StateId,
    /// Event that triggered the transition
    pub event: E,
    /// Composites exited, innermost first
    pub exited: Vec<StateId>,
    /// Composites entered, outermost first
    pub entered: Vec<StateId>,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of transitions.
///
/// # Example
///
/// ```rust
/// use hfsm::core::{StateId, TransitionHistory, TransitionRecord};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let mut history = TransitionHistory::with_capacity(2);
/// for _ in 0..3 {
///     history.record(TransitionRecord {
///         machine: Uuid::nil(),
///         from: StateId::ROOT,
///         to: StateId::ROOT,
///         event: (),
///         exited: vec![],
///         entered: vec![],
///         timestamp: Utc::now(),
///     });
/// }
/// assert_eq!(history.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct TransitionHistory<E> {
    records: VecDeque<TransitionRecord<E>>,
    capacity: usize,
}

impl<E> Default for TransitionHistory<E> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<E> TransitionHistory<E> {
    /// Create an empty history keeping at most `capacity` records.
    ///
    /// A capacity of zero disables recording.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord<E>) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// States visited, oldest first: the `from` of the first retained
    /// record, then the `to` of every record.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    /// Time between the first and last retained records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord<E>> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<E>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
