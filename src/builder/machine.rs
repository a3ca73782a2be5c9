//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{State, StateKey, StateMachine, TransitionKey, TransitionPolicy};

/// Builder for constructing state machines with a fluent API.
///
/// The builder is the hard-failing front door: any misconfiguration
/// (duplicate ids, missing or unknown initial state, no states at all)
/// fails `build` instead of handing back a partially-usable machine. Hosts
/// that prefer the lenient reported-and-recovered style can assemble a
/// machine by hand with [`StateMachine::new`] and `add_state`.
///
/// # Example
///
/// ```rust
/// use impulse::builder::{passive_state, StateMachineBuilder};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Phase { Menu, Playing }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Input { Start, Quit }
///
/// let mut owner = ();
/// let mut machine = StateMachineBuilder::new()
///     .state(passive_state(Phase::Menu, vec![(Input::Start, Phase::Playing)]))
///     .state(passive_state(Phase::Playing, vec![(Input::Quit, Phase::Menu)]))
///     .initial(Phase::Menu)
///     .track_history(true)
///     .build(&mut owner)
///     .unwrap();
///
/// assert!(machine.make_transition(&mut owner, Input::Start));
/// assert_eq!(machine.current_state(), Some(Phase::Playing));
/// ```
pub struct StateMachineBuilder<C, S: StateKey, T: TransitionKey> {
    states: Vec<Box<dyn State<C, S, T>>>,
    initial: Option<S>,
    policy: TransitionPolicy,
    debug: bool,
    track_history: bool,
}

impl<C, S: StateKey, T: TransitionKey> StateMachineBuilder<C, S, T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            initial: None,
            policy: TransitionPolicy::Guarded,
            debug: false,
            track_history: false,
        }
    }

    /// Add a state.
    pub fn state(mut self, state: Box<dyn State<C, S, T>>) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: Vec<Box<dyn State<C, S, T>>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Set the initial state. Required under the guarded policy; optional
    /// under [`TransitionPolicy::Direct`], where the first `change_state`
    /// jump may enter the machine instead.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Choose the transition policy (guarded by default).
    pub fn policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Toggle verbose transition tracing.
    pub fn debug(mut self, on: bool) -> Self {
        self.debug = on;
        self
    }

    /// Enable the rollback stack and transition journal.
    pub fn track_history(mut self, on: bool) -> Self {
        self.track_history = on;
        self
    }

    /// Build the machine: registers every state (running `register` and
    /// building each transition table) and enters the initial state.
    pub fn build(self, owner: &mut C) -> Result<StateMachine<C, S, T>, BuildError<S>> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut seen = std::collections::HashSet::new();
        for state in &self.states {
            if !seen.insert(state.id()) {
                return Err(BuildError::DuplicateState(state.id()));
            }
        }

        match self.initial {
            None if self.policy == TransitionPolicy::Guarded => {
                return Err(BuildError::MissingInitialState);
            }
            Some(initial) if !seen.contains(&initial) => {
                return Err(BuildError::UnknownInitialState(initial));
            }
            _ => {}
        }

        let mut machine = StateMachine::with_policy(self.policy).with_debug(self.debug);
        if self.track_history {
            machine = machine.with_history();
        }

        for state in self.states {
            let id = state.id();
            if machine.try_add_state(owner, state, false).is_err() {
                return Err(BuildError::DuplicateState(id));
            }
        }

        if let Some(initial) = self.initial {
            if machine.try_set_initial_state(owner, initial).is_err() {
                return Err(BuildError::UnknownInitialState(initial));
            }
        }

        Ok(machine)
    }
}

impl<C, S: StateKey, T: TransitionKey> Default for StateMachineBuilder<C, S, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::passive_state;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Phase {
        Menu,
        Playing,
        GameOver,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Input {
        Start,
        Die,
        Restart,
    }

    type Built = Result<StateMachine<(), Phase, Input>, BuildError<Phase>>;

    #[test]
    fn builder_requires_states() {
        let mut owner = ();
        let result: Built = StateMachineBuilder::new().initial(Phase::Menu).build(&mut owner);
        assert_eq!(result.err(), Some(BuildError::NoStates));
    }

    #[test]
    fn builder_requires_initial_under_guarded_policy() {
        let mut owner = ();
        let result: Built = StateMachineBuilder::new()
            .state(passive_state(Phase::Menu, vec![]))
            .build(&mut owner);
        assert_eq!(result.err(), Some(BuildError::MissingInitialState));
    }

    #[test]
    fn builder_rejects_duplicate_ids() {
        let mut owner = ();
        let result: Built = StateMachineBuilder::new()
            .state(passive_state(Phase::Menu, vec![]))
            .state(passive_state(Phase::Menu, vec![]))
            .initial(Phase::Menu)
            .build(&mut owner);
        assert_eq!(result.err(), Some(BuildError::DuplicateState(Phase::Menu)));
    }

    #[test]
    fn builder_rejects_unknown_initial() {
        let mut owner = ();
        let result: Built = StateMachineBuilder::new()
            .state(passive_state(Phase::Menu, vec![]))
            .initial(Phase::Playing)
            .build(&mut owner);
        assert_eq!(result.err(), Some(BuildError::UnknownInitialState(Phase::Playing)));
    }

    #[test]
    fn fluent_api_builds_machine_in_initial_state() {
        let mut owner = ();
        let machine: StateMachine<(), Phase, Input> = StateMachineBuilder::new()
            .state(passive_state(Phase::Menu, vec![(Input::Start, Phase::Playing)]))
            .state(passive_state(Phase::Playing, vec![(Input::Die, Phase::GameOver)]))
            .state(passive_state(Phase::GameOver, vec![(Input::Restart, Phase::Menu)]))
            .initial(Phase::Menu)
            .build(&mut owner)
            .unwrap();

        assert_eq!(machine.current_state(), Some(Phase::Menu));
        assert_eq!(machine.state_count(), 3);
    }

    #[test]
    fn direct_policy_builds_without_initial() {
        let mut owner = ();
        let mut machine: StateMachine<(), Phase, Input> = StateMachineBuilder::new()
            .state(passive_state(Phase::Menu, vec![]))
            .state(passive_state(Phase::Playing, vec![]))
            .policy(TransitionPolicy::Direct)
            .build(&mut owner)
            .unwrap();

        assert_eq!(machine.current_state(), None);
        assert!(machine.change_state(&mut owner, Phase::Menu));
        assert_eq!(machine.current_state(), Some(Phase::Menu));
    }

    #[test]
    fn states_accepts_a_batch() {
        let mut owner = ();
        let machine: StateMachine<(), Phase, Input> = StateMachineBuilder::new()
            .states(vec![
                passive_state(Phase::Menu, vec![(Input::Start, Phase::Playing)]),
                passive_state(Phase::Playing, vec![]),
            ])
            .initial(Phase::Menu)
            .build(&mut owner)
            .unwrap();
        assert_eq!(machine.state_count(), 2);
    }
}
