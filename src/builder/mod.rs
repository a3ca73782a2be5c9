//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder plus small conveniences for
//! creating machines with minimal boilerplate while keeping construction
//! errors hard failures.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;

use crate::core::{State, StateKey, TransitionKey, TransitionTable};

struct Passive<S: StateKey, T: TransitionKey> {
    id: S,
    edges: Vec<(T, S)>,
}

impl<C, S: StateKey, T: TransitionKey> State<C, S, T> for Passive<S, T> {
    fn id(&self) -> S {
        self.id
    }

    fn transitions(&self, table: &mut TransitionTable<S, T>) {
        for (trigger, dest) in &self.edges {
            table.add(*trigger, *dest, true);
        }
    }

    fn update(&mut self, _owner: &mut C, _dt: f32) -> Option<T> {
        None
    }

    fn fixed_update(&mut self, _owner: &mut C, _dt: f32) -> Option<T> {
        None
    }
}

/// Create a behaviorless state: an id, its outgoing edges, and nothing else.
///
/// Useful for screen-flow controllers and tests, where the interesting
/// logic lives in the owner and the machine only gates which screen is
/// active.
///
/// # Example
///
/// ```rust
/// use impulse::builder::{passive_state, StateMachineBuilder};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Screen { Title, Settings }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Nav { Open, Back }
///
/// let mut owner = ();
/// let mut machine = StateMachineBuilder::new()
///     .state(passive_state(Screen::Title, vec![(Nav::Open, Screen::Settings)]))
///     .state(passive_state(Screen::Settings, vec![(Nav::Back, Screen::Title)]))
///     .initial(Screen::Title)
///     .build(&mut owner)
///     .unwrap();
///
/// assert!(machine.make_transition(&mut owner, Nav::Open));
/// assert!(machine.is_in_state(Screen::Settings));
/// ```
pub fn passive_state<C, S: StateKey, T: TransitionKey>(
    id: S,
    edges: Vec<(T, S)>,
) -> Box<dyn State<C, S, T>> {
    Box::new(Passive { id, edges })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Screen {
        Title,
        Settings,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Nav {
        Open,
    }

    #[test]
    fn passive_state_declares_its_edges() {
        let state: Box<dyn State<(), Screen, Nav>> =
            passive_state(Screen::Title, vec![(Nav::Open, Screen::Settings)]);
        let mut table = TransitionTable::new();
        state.transitions(&mut table);
        assert_eq!(state.id(), Screen::Title);
        assert_eq!(table.target(Nav::Open), Some(Screen::Settings));
    }

    #[test]
    fn passive_state_ticks_request_nothing() {
        let mut state: Box<dyn State<(), Screen, Nav>> = passive_state(Screen::Title, vec![]);
        assert_eq!(state.update(&mut (), 0.016), None);
        assert_eq!(state.fixed_update(&mut (), 0.02), None);
    }
}
