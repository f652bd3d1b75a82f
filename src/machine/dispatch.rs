//! Event dispatch and hook execution.

use super::Machine;
use crate::core::{StateId, StateTree, TransitionPlan, TransitionRecord};
use chrono::Utc;
use std::fmt::Debug;
use tracing::{debug, debug_span, trace};

impl<C, E> Machine<C, E>
where
    E: PartialEq + Clone + Debug,
{
    /// Dispatch an event, returning whether any state handled it.
    ///
    /// An unhandled event changes nothing and fires no hooks. A handled
    /// event whose target is the current state also fires nothing. Otherwise
    /// the previous leaf is exited, then the composites being left
    /// (innermost first), then the composites being entered are entered
    /// (outermost first), then the new leaf's `on_entry` and `perform` run.
    pub fn dispatch(&mut self, event: &E) -> bool {
        let span = debug_span!("dispatch", machine = %self.id, ?event);
        let _guard = span.enter();

        let Some(next) = self.tree.resolve(self.current, event) else {
            debug!(state = %self.tree.label(self.current), "event not handled");
            return false;
        };

        if next == self.current {
            debug!(state = %self.tree.label(next), "event resolved to the current state");
            return true;
        }

        let from = self.current;
        self.previous = Some(from);
        self.current = next;
        self.started = true;

        let plan = self.tree.plan(self.previous, self.current);
        run_hooks(&self.tree, &mut self.context, Some(from), next, &plan, event);

        debug!(
            from = %self.tree.label(from),
            to = %self.tree.label(next),
            exits = plan.exits.len(),
            entries = plan.entries.len(),
            "transition complete"
        );

        self.history.record(TransitionRecord {
            machine: self.id,
            from,
            to: next,
            event: event.clone(),
            exited: plan.exits,
            entered: plan.entries,
            timestamp: Utc::now(),
        });
        true
    }

    /// Enter the initial configuration.
    ///
    /// Fires `on_entry` on every ancestor of the initial state, outermost
    /// first and root included, then `on_entry` and `perform` on the initial
    /// state itself. Only the first call before any transition does
    /// anything; later calls return `false`. Calling it is optional:
    /// machines dispatch without it.
    pub fn start(&mut self, event: &E) -> bool {
        if self.started {
            return false;
        }
        self.started = true;

        let span = debug_span!("start", machine = %self.id, ?event);
        let _guard = span.enter();

        let plan = self.tree.plan(None, self.current);
        run_hooks(&self.tree, &mut self.context, None, self.current, &plan, event);
        debug!(state = %self.tree.label(self.current), "machine started");
        true
    }

    /// The state `event` would lead to, without changing anything.
    pub fn peek(&self, event: &E) -> Option<StateId> {
        self.tree.resolve(self.current, event)
    }
}

fn run_hooks<C, E>(
    tree: &StateTree<C, E>,
    context: &mut C,
    previous: Option<StateId>,
    current: StateId,
    plan: &TransitionPlan,
    event: &E,
) {
    let exits = previous.into_iter().chain(plan.exits.iter().copied());
    for id in exits {
        if let Some(state) = tree.behavior(id) {
            trace!(state = state.name(), "on_exit");
            state.on_exit(context, event);
        }
    }

    let entries = plan.entries.iter().copied().chain(std::iter::once(current));
    for id in entries {
        if let Some(state) = tree.behavior(id) {
            trace!(state = state.name(), "on_entry");
            state.on_entry(context, event);
        }
    }

    if let Some(state) = tree.behavior(current) {
        trace!(state = state.name(), "perform");
        state.perform(context, event);
    }
}
