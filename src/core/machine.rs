//! The state machine: catalog, current-state tracking, and transition
//! enforcement.
//!
//! A machine owns a catalog of boxed state behaviors keyed by state id, each
//! paired with its transition table. The host drives it with `update`,
//! `fixed_update`, and `contact` once per scheduling quantum; application
//! code moves it with `make_transition` (or `change_state` under the direct
//! policy). All operations are synchronous and single-threaded.
//!
//! Failure semantics: configuration mistakes are reported on the diagnostic
//! channel and recovered - the `try_*` forms return [`MachineError`], the
//! bool-returning forms return `false`, and the machine stays in its last
//! valid state either way.

use std::collections::HashMap;

use tracing::{debug, error, warn};

use super::error::{MachineError, Severity};
use super::history::{History, TransitionCause};
use super::key::{StateKey, TransitionKey};
use super::state::{ContactEvent, State};
use super::table::TransitionTable;

/// How moves between states are authorized.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TransitionPolicy {
    /// Every move flows through `make_transition` and the current state's
    /// transition table; direct jumps are rejected.
    #[default]
    Guarded,
    /// `change_state` jumps to any cataloged state with no table check -
    /// the degenerate controller variant (menu / gameplay / game-over
    /// screens and the like).
    Direct,
}

struct StateEntry<C, S: StateKey, T: TransitionKey> {
    behavior: Box<dyn State<C, S, T>>,
    table: TransitionTable<S, T>,
}

/// A generic, tick-driven finite state machine.
///
/// Generic over the owner context `C`, the state-id type `S`, and the
/// transition-id type `T`. See the crate docs for a worked example; most
/// callers construct one through
/// [`StateMachineBuilder`](crate::builder::StateMachineBuilder).
pub struct StateMachine<C, S: StateKey, T: TransitionKey> {
    states: HashMap<S, StateEntry<C, S, T>>,
    current: Option<S>,
    initial_set: bool,
    policy: TransitionPolicy,
    debug: bool,
    history: Option<History<S, T>>,
    shut_down: bool,
}

impl<C, S: StateKey, T: TransitionKey> Default for StateMachine<C, S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S: StateKey, T: TransitionKey> StateMachine<C, S, T> {
    /// Empty machine: guarded policy, diagnostics quiet, no history.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            current: None,
            initial_set: false,
            policy: TransitionPolicy::Guarded,
            debug: false,
            history: None,
            shut_down: false,
        }
    }

    /// Empty machine under the given transition policy.
    pub fn with_policy(policy: TransitionPolicy) -> Self {
        Self {
            policy,
            ..Self::new()
        }
    }

    /// Enable history tracking (rollback stack + journal). Chainable; meant
    /// to be applied before any state is entered.
    pub fn with_history(mut self) -> Self {
        self.history.get_or_insert_with(History::new);
        self
    }

    /// Toggle verbose transition tracing. Chainable form of
    /// [`set_debug`](Self::set_debug).
    pub fn with_debug(mut self, on: bool) -> Self {
        self.debug = on;
        self
    }

    // ----- catalog -----

    /// Register a state: runs its `register` hook, builds its transition
    /// table, and inserts it into the catalog.
    ///
    /// A duplicate id without `overwrite` is rejected. Overwriting the entry
    /// for the *current* state is allowed but warned - the replacement does
    /// not receive `enter`, since the machine is already in that id.
    pub fn try_add_state(
        &mut self,
        owner: &mut C,
        state: Box<dyn State<C, S, T>>,
        overwrite: bool,
    ) -> Result<(), MachineError<S, T>> {
        self.guard_live()?;
        let id = state.id();
        if !overwrite && self.states.contains_key(&id) {
            return Err(MachineError::DuplicateState(id));
        }
        if self.current == Some(id) {
            warn!(state = ?id, "replacing the catalog entry for the current state");
        }
        let mut behavior = state;
        behavior.register(owner);
        let mut table = TransitionTable::new();
        behavior.transitions(&mut table);
        if self.debug {
            debug!(state = ?id, edges = table.len(), "state registered");
        }
        self.states.insert(id, StateEntry { behavior, table });
        Ok(())
    }

    /// Bool-returning form of [`try_add_state`](Self::try_add_state);
    /// failures go to the diagnostic channel.
    pub fn add_state(&mut self, owner: &mut C, state: Box<dyn State<C, S, T>>, overwrite: bool) -> bool {
        Self::report(self.try_add_state(owner, state, overwrite))
    }

    /// Remove a state from the catalog.
    ///
    /// Removing the current state requires `force_if_current`; forcing exits
    /// it and clears the machine to "no current state". A removed state that
    /// still appears on the history stack leaves the stack as-is with a
    /// warning - stale history is never auto-repaired.
    pub fn try_remove_state(
        &mut self,
        owner: &mut C,
        id: S,
        force_if_current: bool,
    ) -> Result<(), MachineError<S, T>> {
        self.guard_live()?;
        if !self.states.contains_key(&id) {
            return Err(MachineError::UnknownState(id));
        }
        if self.current == Some(id) {
            if !force_if_current {
                return Err(MachineError::RemoveCurrent(id));
            }
            if let Some(entry) = self.states.get_mut(&id) {
                entry.behavior.exit(owner);
            }
            self.current = None;
        }
        if self.history.as_ref().is_some_and(|h| h.contains(id)) {
            warn!(state = ?id, "removed state still appears on the history stack");
        }
        self.states.remove(&id);
        if self.debug {
            debug!(state = ?id, "state removed");
        }
        Ok(())
    }

    /// Bool-returning form of [`try_remove_state`](Self::try_remove_state).
    pub fn remove_state(&mut self, owner: &mut C, id: S, force_if_current: bool) -> bool {
        Self::report(self.try_remove_state(owner, id, force_if_current))
    }

    // ----- transitions -----

    /// Set the initial state and enter it. Valid exactly once per machine
    /// lifetime; a second call fails and changes nothing.
    pub fn try_set_initial_state(&mut self, owner: &mut C, id: S) -> Result<(), MachineError<S, T>> {
        self.guard_live()?;
        if self.initial_set {
            return Err(MachineError::InitialAlreadySet);
        }
        if !self.states.contains_key(&id) {
            return Err(MachineError::UnknownState(id));
        }
        self.initial_set = true;
        if self.debug {
            debug!(state = ?id, "initial state");
        }
        self.activate(owner, id);
        Ok(())
    }

    /// Bool-returning form of [`try_set_initial_state`](Self::try_set_initial_state).
    pub fn set_initial_state(&mut self, owner: &mut C, id: S) -> bool {
        Self::report(self.try_set_initial_state(owner, id))
    }

    /// Request a move along the current state's transition table.
    ///
    /// The trigger resolves through the table with the own-id sentinel: an
    /// unmapped trigger and an explicit self-loop both resolve to the
    /// current id and are rejected as [`MachineError::RejectedSelfTransition`].
    /// On success the outgoing state's `exit` runs to completion, then the
    /// destination becomes current and its `enter` runs.
    pub fn try_transition(&mut self, owner: &mut C, trigger: T) -> Result<(), MachineError<S, T>> {
        self.guard_live()?;
        let from = self.current.ok_or(MachineError::NoCurrentState)?;
        let to = self
            .states
            .get(&from)
            .map(|entry| entry.table.resolve(trigger, from))
            .ok_or(MachineError::UnknownState(from))?;
        if to == from {
            return Err(MachineError::RejectedSelfTransition { state: from, trigger });
        }
        if !self.states.contains_key(&to) {
            return Err(MachineError::UnknownTarget { from, to, trigger });
        }
        if self.debug {
            debug!(?from, ?to, ?trigger, "transition");
        }
        self.swap(owner, from, to);
        if let Some(history) = &mut self.history {
            history.push(to);
            history.record(from, to, TransitionCause::Trigger(trigger));
        }
        Ok(())
    }

    /// Bool-returning form of [`try_transition`](Self::try_transition): the
    /// primary control operation. Returns `false` with no state change when
    /// the move is illegal.
    pub fn make_transition(&mut self, owner: &mut C, trigger: T) -> bool {
        Self::report(self.try_transition(owner, trigger))
    }

    /// Jump straight to a cataloged state, bypassing transition tables.
    ///
    /// Only valid under [`TransitionPolicy::Direct`]. A jump may enter the
    /// first state of a fresh machine, and a self-jump restarts the current
    /// state (exit, then enter).
    pub fn try_change_state(&mut self, owner: &mut C, id: S) -> Result<(), MachineError<S, T>> {
        self.guard_live()?;
        if self.policy != TransitionPolicy::Direct {
            return Err(MachineError::DirectJumpDisabled(id));
        }
        if !self.states.contains_key(&id) {
            return Err(MachineError::UnknownState(id));
        }
        if self.debug {
            debug!(from = ?self.current, to = ?id, "direct jump");
        }
        match self.current {
            None => self.activate(owner, id),
            Some(from) => {
                self.swap(owner, from, id);
                if let Some(history) = &mut self.history {
                    history.push(id);
                    history.record(from, id, TransitionCause::Jump);
                }
            }
        }
        Ok(())
    }

    /// Bool-returning form of [`try_change_state`](Self::try_change_state).
    pub fn change_state(&mut self, owner: &mut C, id: S) -> bool {
        Self::report(self.try_change_state(owner, id))
    }

    /// Roll back to the previously-entered state.
    ///
    /// Requires history tracking. Pops the current entry off the stack and
    /// re-enters the one below it without re-pushing, so rollback never
    /// grows the stack. At depth one there is nothing to return to: the call
    /// is a warned no-op and the current state is untouched. A predecessor
    /// that has since been removed from the catalog fails the call with no
    /// mutation.
    pub fn try_revert_to_previous(&mut self, owner: &mut C) -> Result<(), MachineError<S, T>> {
        self.guard_live()?;
        let history = self.history.as_ref().ok_or(MachineError::HistoryDisabled)?;
        let from = self.current.ok_or(MachineError::NoCurrentState)?;
        let prev = history.previous().ok_or(MachineError::NothingToRevert)?;
        if !self.states.contains_key(&prev) {
            return Err(MachineError::StaleHistory(prev));
        }
        if self.debug {
            debug!(?from, to = ?prev, "revert");
        }
        if let Some(history) = &mut self.history {
            history.pop();
        }
        self.swap(owner, from, prev);
        if let Some(history) = &mut self.history {
            history.record(from, prev, TransitionCause::Revert);
        }
        Ok(())
    }

    /// Bool-returning form of [`try_revert_to_previous`](Self::try_revert_to_previous).
    pub fn revert_to_previous(&mut self, owner: &mut C) -> bool {
        Self::report(self.try_revert_to_previous(owner))
    }

    // ----- table mutation after registration -----

    /// Add or overwrite an edge on a cataloged state's table.
    pub fn add_transition(&mut self, state: S, trigger: T, destination: S, overwrite: bool) -> bool {
        match self.states.get_mut(&state) {
            Some(entry) => entry.table.add(trigger, destination, overwrite),
            None => Self::report(Err(MachineError::UnknownState(state)))
        }
    }

    /// Remove an edge from a cataloged state's table.
    pub fn remove_transition(&mut self, state: S, trigger: T) -> bool {
        match self.states.get_mut(&state) {
            Some(entry) => entry.table.remove(trigger),
            None => Self::report(Err(MachineError::UnknownState(state)))
        }
    }

    /// Resolve a trigger against the current state's table, own-id sentinel
    /// applied. `None` when there is no current state.
    pub fn transition_target(&self, trigger: T) -> Option<S> {
        let current = self.current?;
        let entry = self.states.get(&current)?;
        Some(entry.table.resolve(trigger, current))
    }

    /// Read access to a cataloged state's transition table.
    pub fn table(&self, state: S) -> Option<&TransitionTable<S, T>> {
        self.states.get(&state).map(|entry| &entry.table)
    }

    // ----- ticking and forwarding -----

    /// Per-frame tick: delegates to the current state, then executes any
    /// transition it requested. No-op when no state is current.
    pub fn update(&mut self, owner: &mut C, dt: f32) {
        let requested = match self.current_entry() {
            Some(entry) => entry.behavior.update(owner, dt),
            None => return,
        };
        if let Some(trigger) = requested {
            self.make_transition(owner, trigger);
        }
    }

    /// Per-physics-step tick; same contract as [`update`](Self::update).
    pub fn fixed_update(&mut self, owner: &mut C, dt: f32) {
        let requested = match self.current_entry() {
            Some(entry) => entry.behavior.fixed_update(owner, dt),
            None => return,
        };
        if let Some(trigger) = requested {
            self.make_transition(owner, trigger);
        }
    }

    /// Forward a physics callback to the current state, payload unexamined,
    /// then execute any transition it requested.
    pub fn contact(&mut self, owner: &mut C, event: ContactEvent<'_>) {
        let requested = match self.current_entry() {
            Some(entry) => entry.behavior.contact(owner, event),
            None => return,
        };
        if let Some(trigger) = requested {
            self.make_transition(owner, trigger);
        }
    }

    // ----- queries -----

    /// The current state id, if any.
    pub fn current_state(&self) -> Option<S> {
        self.current
    }

    /// Debug rendering of the current state id, for logs and UIs.
    pub fn current_state_name(&self) -> Option<String> {
        self.current.map(|id| format!("{id:?}"))
    }

    /// Whether `id` is the current state. False when no state is current.
    pub fn is_in_state(&self, id: S) -> bool {
        self.current == Some(id)
    }

    /// Whether `id` is in the catalog.
    pub fn contains_state(&self, id: S) -> bool {
        self.states.contains_key(&id)
    }

    /// Number of cataloged states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// History view, when tracking is enabled.
    pub fn history(&self) -> Option<&History<S, T>> {
        self.history.as_ref()
    }

    /// The machine's transition policy.
    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Whether verbose transition tracing is on.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Toggle verbose transition tracing.
    pub fn set_debug(&mut self, on: bool) {
        self.debug = on;
    }

    /// Whether [`shutdown`](Self::shutdown) has run.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Tear the machine down: exits the current state and discards the
    /// catalog and history. Meant to be invoked exactly once from the
    /// owner's teardown path; a second call is a warned no-op, and every
    /// later mutating operation fails with [`MachineError::ShutDown`].
    pub fn shutdown(&mut self, owner: &mut C) {
        if self.shut_down {
            warn!("shutdown invoked more than once");
            return;
        }
        if let Some(id) = self.current.take() {
            if let Some(entry) = self.states.get_mut(&id) {
                entry.behavior.exit(owner);
            }
        }
        self.states.clear();
        if let Some(history) = &mut self.history {
            history.clear();
        }
        self.shut_down = true;
        if self.debug {
            debug!("machine shut down");
        }
    }

    // ----- internals -----

    fn current_entry(&mut self) -> Option<&mut StateEntry<C, S, T>> {
        let id = self.current?;
        self.states.get_mut(&id)
    }

    /// Enter `id` with no outgoing state: the initial set and the
    /// direct-jump-from-off path.
    fn activate(&mut self, owner: &mut C, id: S) {
        self.current = Some(id);
        if let Some(entry) = self.states.get_mut(&id) {
            entry.behavior.enter(owner);
        }
        if let Some(history) = &mut self.history {
            history.push(id);
        }
    }

    /// Exit `from`, then make `to` current and enter it. `exit` always
    /// completes before `enter` begins.
    fn swap(&mut self, owner: &mut C, from: S, to: S) {
        if let Some(entry) = self.states.get_mut(&from) {
            entry.behavior.exit(owner);
        }
        self.current = Some(to);
        if let Some(entry) = self.states.get_mut(&to) {
            entry.behavior.enter(owner);
        }
    }

    fn guard_live(&self) -> Result<(), MachineError<S, T>> {
        if self.shut_down {
            return Err(MachineError::ShutDown);
        }
        Ok(())
    }

    fn report(result: Result<(), MachineError<S, T>>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                match err.severity() {
                    Severity::Error => error!(%err, "machine operation rejected"),
                    Severity::Warning => warn!(%err, "machine operation skipped"),
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Ai {
        Idle,
        Moving,
        Attacking,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Trigger {
        Go,
        Engage,
        Disengage,
    }

    /// Owner context recording hook invocations in order.
    #[derive(Default)]
    struct Arena {
        log: Vec<String>,
    }

    struct Tracked {
        id: Ai,
        edges: Vec<(Trigger, Ai)>,
    }

    impl Tracked {
        fn boxed(id: Ai, edges: &[(Trigger, Ai)]) -> Box<dyn State<Arena, Ai, Trigger>> {
            Box::new(Self {
                id,
                edges: edges.to_vec(),
            })
        }
    }

    impl State<Arena, Ai, Trigger> for Tracked {
        fn id(&self) -> Ai {
            self.id
        }

        fn register(&mut self, owner: &mut Arena) {
            owner.log.push(format!("{:?}:register", self.id));
        }

        fn transitions(&self, table: &mut TransitionTable<Ai, Trigger>) {
            for (trigger, dest) in &self.edges {
                table.add(*trigger, *dest, true);
            }
        }

        fn enter(&mut self, owner: &mut Arena) {
            owner.log.push(format!("{:?}:enter", self.id));
        }

        fn exit(&mut self, owner: &mut Arena) {
            owner.log.push(format!("{:?}:exit", self.id));
        }

        fn update(&mut self, owner: &mut Arena, _dt: f32) -> Option<Trigger> {
            owner.log.push(format!("{:?}:update", self.id));
            None
        }

        fn fixed_update(&mut self, _owner: &mut Arena, _dt: f32) -> Option<Trigger> {
            None
        }
    }

    fn combat_machine(owner: &mut Arena) -> StateMachine<Arena, Ai, Trigger> {
        let mut machine = StateMachine::new().with_history();
        machine.add_state(owner, Tracked::boxed(Ai::Idle, &[(Trigger::Go, Ai::Moving)]), false);
        machine.add_state(
            owner,
            Tracked::boxed(Ai::Moving, &[(Trigger::Engage, Ai::Attacking)]),
            false,
        );
        machine.add_state(
            owner,
            Tracked::boxed(Ai::Attacking, &[(Trigger::Disengage, Ai::Idle)]),
            false,
        );
        machine.set_initial_state(owner, Ai::Idle);
        machine
    }

    #[test]
    fn registration_runs_register_then_builds_tables() {
        let mut owner = Arena::default();
        let machine = combat_machine(&mut owner);
        assert_eq!(machine.state_count(), 3);
        assert!(owner.log.contains(&"Idle:register".to_string()));
        assert_eq!(
            machine.table(Ai::Idle).map(|t| t.target(Trigger::Go)),
            Some(Some(Ai::Moving))
        );
    }

    #[test]
    fn duplicate_state_without_overwrite_is_rejected() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);
        let added = machine.add_state(&mut owner, Tracked::boxed(Ai::Idle, &[]), false);
        assert!(!added);
        assert_eq!(machine.state_count(), 3);
        // The table of the existing entry survives.
        assert_eq!(machine.table(Ai::Idle).map(TransitionTable::len), Some(1));
    }

    #[test]
    fn legal_transition_swaps_with_exit_before_enter() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);
        owner.log.clear();

        assert!(machine.make_transition(&mut owner, Trigger::Go));
        assert_eq!(machine.current_state(), Some(Ai::Moving));
        assert_eq!(owner.log, vec!["Idle:exit", "Moving:enter"]);
    }

    #[test]
    fn unmapped_trigger_is_rejected_as_self_transition() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);

        let err = machine.try_transition(&mut owner, Trigger::Disengage).unwrap_err();
        assert_eq!(
            err,
            MachineError::RejectedSelfTransition {
                state: Ai::Idle,
                trigger: Trigger::Disengage
            }
        );
        assert_eq!(machine.current_state(), Some(Ai::Idle));
    }

    #[test]
    fn explicit_self_loop_is_rejected_like_unmapped() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);
        assert!(machine.add_transition(Ai::Idle, Trigger::Disengage, Ai::Idle, true));

        assert!(!machine.make_transition(&mut owner, Trigger::Disengage));
        assert_eq!(machine.current_state(), Some(Ai::Idle));
    }

    #[test]
    fn transition_to_uncataloged_target_is_rejected() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);
        machine.remove_state(&mut owner, Ai::Moving, false);

        let err = machine.try_transition(&mut owner, Trigger::Go).unwrap_err();
        assert_eq!(
            err,
            MachineError::UnknownTarget {
                from: Ai::Idle,
                to: Ai::Moving,
                trigger: Trigger::Go
            }
        );
        assert_eq!(machine.current_state(), Some(Ai::Idle));
    }

    #[test]
    fn transition_without_current_state_fails() {
        let mut owner = Arena::default();
        let mut machine: StateMachine<Arena, Ai, Trigger> = StateMachine::new();
        machine.add_state(&mut owner, Tracked::boxed(Ai::Idle, &[]), false);

        assert_eq!(
            machine.try_transition(&mut owner, Trigger::Go).unwrap_err(),
            MachineError::NoCurrentState
        );
    }

    #[test]
    fn initial_state_sets_exactly_once() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);

        assert!(!machine.set_initial_state(&mut owner, Ai::Moving));
        assert_eq!(machine.current_state(), Some(Ai::Idle));
    }

    #[test]
    fn remove_current_without_force_fails() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);

        assert!(!machine.remove_state(&mut owner, Ai::Idle, false));
        assert!(machine.contains_state(Ai::Idle));
        assert_eq!(machine.current_state(), Some(Ai::Idle));
    }

    #[test]
    fn remove_current_with_force_clears_machine() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);
        owner.log.clear();

        assert!(machine.remove_state(&mut owner, Ai::Idle, true));
        assert_eq!(owner.log, vec!["Idle:exit"]);
        assert_eq!(machine.current_state(), None);
        assert!(!machine.contains_state(Ai::Idle));
        // With no current state every transition fails.
        assert!(!machine.make_transition(&mut owner, Trigger::Go));
    }

    #[test]
    fn update_executes_deferred_transition_request() {
        #[derive(Default)]
        struct Hot;
        struct Restless;
        impl State<Hot, Ai, Trigger> for Restless {
            fn id(&self) -> Ai {
                Ai::Idle
            }
            fn transitions(&self, table: &mut TransitionTable<Ai, Trigger>) {
                table.add(Trigger::Go, Ai::Moving, true);
            }
            fn update(&mut self, _owner: &mut Hot, _dt: f32) -> Option<Trigger> {
                Some(Trigger::Go)
            }
            fn fixed_update(&mut self, _owner: &mut Hot, _dt: f32) -> Option<Trigger> {
                None
            }
        }
        struct Still;
        impl State<Hot, Ai, Trigger> for Still {
            fn id(&self) -> Ai {
                Ai::Moving
            }
            fn update(&mut self, _owner: &mut Hot, _dt: f32) -> Option<Trigger> {
                None
            }
            fn fixed_update(&mut self, _owner: &mut Hot, _dt: f32) -> Option<Trigger> {
                None
            }
        }

        let mut owner = Hot;
        let mut machine: StateMachine<Hot, Ai, Trigger> = StateMachine::new();
        machine.add_state(&mut owner, Box::new(Restless), false);
        machine.add_state(&mut owner, Box::new(Still), false);
        machine.set_initial_state(&mut owner, Ai::Idle);

        machine.update(&mut owner, 0.016);
        assert_eq!(machine.current_state(), Some(Ai::Moving));

        // Moving never requests anything; further ticks hold steady.
        machine.update(&mut owner, 0.016);
        assert_eq!(machine.current_state(), Some(Ai::Moving));
    }

    #[test]
    fn update_without_current_state_is_a_no_op() {
        let mut owner = Arena::default();
        let mut machine: StateMachine<Arena, Ai, Trigger> = StateMachine::new();
        machine.add_state(&mut owner, Tracked::boxed(Ai::Idle, &[]), false);
        owner.log.clear();

        machine.update(&mut owner, 0.016);
        machine.fixed_update(&mut owner, 0.02);
        assert!(owner.log.is_empty());
    }

    #[test]
    fn history_stack_top_follows_current() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);
        machine.make_transition(&mut owner, Trigger::Go);
        machine.make_transition(&mut owner, Trigger::Engage);

        let history = machine.history().unwrap();
        assert_eq!(history.depth(), 3);
        assert_eq!(history.top(), machine.current_state());
        assert_eq!(history.stack(), &[Ai::Idle, Ai::Moving, Ai::Attacking]);
    }

    #[test]
    fn revert_pops_without_repushing() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);
        machine.make_transition(&mut owner, Trigger::Go);
        machine.make_transition(&mut owner, Trigger::Engage);
        owner.log.clear();

        assert!(machine.revert_to_previous(&mut owner));
        assert_eq!(machine.current_state(), Some(Ai::Moving));
        assert_eq!(owner.log, vec!["Attacking:exit", "Moving:enter"]);
        assert_eq!(machine.history().unwrap().depth(), 2);

        assert!(machine.revert_to_previous(&mut owner));
        assert_eq!(machine.current_state(), Some(Ai::Idle));
        assert_eq!(machine.history().unwrap().depth(), 1);

        // Bottom of the stack: nothing left to revert to.
        assert!(!machine.revert_to_previous(&mut owner));
        assert_eq!(machine.current_state(), Some(Ai::Idle));
        assert_eq!(machine.history().unwrap().depth(), 1);
    }

    #[test]
    fn revert_without_history_tracking_fails() {
        let mut owner = Arena::default();
        let mut machine: StateMachine<Arena, Ai, Trigger> = StateMachine::new();
        machine.add_state(&mut owner, Tracked::boxed(Ai::Idle, &[]), false);
        machine.set_initial_state(&mut owner, Ai::Idle);

        assert_eq!(
            machine.try_revert_to_previous(&mut owner).unwrap_err(),
            MachineError::HistoryDisabled
        );
    }

    #[test]
    fn revert_onto_removed_state_fails_without_mutation() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);
        machine.make_transition(&mut owner, Trigger::Go);
        machine.make_transition(&mut owner, Trigger::Engage);
        machine.remove_state(&mut owner, Ai::Moving, false);

        assert_eq!(
            machine.try_revert_to_previous(&mut owner).unwrap_err(),
            MachineError::StaleHistory(Ai::Moving)
        );
        assert_eq!(machine.current_state(), Some(Ai::Attacking));
        assert_eq!(machine.history().unwrap().depth(), 3);
    }

    #[test]
    fn direct_jump_requires_direct_policy() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);

        assert_eq!(
            machine.try_change_state(&mut owner, Ai::Attacking).unwrap_err(),
            MachineError::DirectJumpDisabled(Ai::Attacking)
        );
        assert_eq!(machine.current_state(), Some(Ai::Idle));
    }

    #[test]
    fn direct_policy_jumps_without_table_check() {
        let mut owner = Arena::default();
        let mut machine = StateMachine::with_policy(TransitionPolicy::Direct);
        machine.add_state(&mut owner, Tracked::boxed(Ai::Idle, &[]), false);
        machine.add_state(&mut owner, Tracked::boxed(Ai::Attacking, &[]), false);
        owner.log.clear();

        // Entering the first state directly, controller style.
        assert!(machine.change_state(&mut owner, Ai::Idle));
        assert_eq!(owner.log, vec!["Idle:enter"]);

        assert!(machine.change_state(&mut owner, Ai::Attacking));
        assert_eq!(machine.current_state(), Some(Ai::Attacking));

        // Self-jump restarts the state.
        owner.log.clear();
        assert!(machine.change_state(&mut owner, Ai::Attacking));
        assert_eq!(owner.log, vec!["Attacking:exit", "Attacking:enter"]);
    }

    #[test]
    fn shutdown_exits_current_and_blocks_further_operations() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);
        owner.log.clear();

        machine.shutdown(&mut owner);
        assert_eq!(owner.log, vec!["Idle:exit"]);
        assert!(machine.is_shut_down());
        assert_eq!(machine.current_state(), None);
        assert_eq!(machine.state_count(), 0);

        assert!(!machine.make_transition(&mut owner, Trigger::Go));
        assert!(!machine.add_state(&mut owner, Tracked::boxed(Ai::Idle, &[]), true));

        // Second shutdown is a warned no-op.
        machine.shutdown(&mut owner);
        assert!(machine.is_shut_down());
    }

    #[test]
    fn current_state_name_uses_debug_rendering() {
        let mut owner = Arena::default();
        let machine = combat_machine(&mut owner);
        assert_eq!(machine.current_state_name().as_deref(), Some("Idle"));
    }

    #[test]
    fn is_in_state_matches_exactly_one_id() {
        let mut owner = Arena::default();
        let mut machine = combat_machine(&mut owner);
        machine.make_transition(&mut owner, Trigger::Go);

        assert!(machine.is_in_state(Ai::Moving));
        assert!(!machine.is_in_state(Ai::Idle));
        assert!(!machine.is_in_state(Ai::Attacking));
    }
}
