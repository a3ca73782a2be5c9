//! Impulse: a generic, tick-driven finite state machine library.
//!
//! Impulse drives the behavior of a game entity or controller through a
//! catalog of states, each with lifecycle hooks and a table of legal
//! outgoing transitions. The host loop ticks the machine; states request
//! moves by returning a transition id from their tick hooks, and application
//! code requests them with `make_transition`. Everything is synchronous and
//! single-threaded - the machine is meant to live inside a game loop, not
//! across threads.
//!
//! # Core Concepts
//!
//! - **State**: a behavior unit implementing the [`State`] trait, keyed by a
//!   state-id enum
//! - **Transitions**: enum-labeled edges resolved through per-state
//!   [`TransitionTable`]s; illegal requests are reported and recovered
//! - **History**: an optional rollback stack and transition journal,
//!   driving [`StateMachine::revert_to_previous`]
//! - **Policies**: guarded table-checked machines for AI, direct-jump
//!   machines for screen-flow controllers ([`TransitionPolicy`])
//! - **Scheduling**: delayed continuations owned by the parent context
//!   ([`schedule`])
//!
//! # Example
//!
//! ```rust
//! use impulse::{State, StateMachine, TransitionTable};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
//! enum Guard { Patrolling, Alerted }
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
//! enum Sense { HeardNoise, AllClear }
//!
//! struct World { noise: bool }
//!
//! struct Patrolling;
//!
//! impl State<World, Guard, Sense> for Patrolling {
//!     fn id(&self) -> Guard {
//!         Guard::Patrolling
//!     }
//!
//!     fn transitions(&self, table: &mut TransitionTable<Guard, Sense>) {
//!         table.add(Sense::HeardNoise, Guard::Alerted, true);
//!     }
//!
//!     fn update(&mut self, owner: &mut World, _dt: f32) -> Option<Sense> {
//!         owner.noise.then_some(Sense::HeardNoise)
//!     }
//!
//!     fn fixed_update(&mut self, _owner: &mut World, _dt: f32) -> Option<Sense> {
//!         None
//!     }
//! }
//!
//! struct Alerted;
//!
//! impl State<World, Guard, Sense> for Alerted {
//!     fn id(&self) -> Guard {
//!         Guard::Alerted
//!     }
//!
//!     fn transitions(&self, table: &mut TransitionTable<Guard, Sense>) {
//!         table.add(Sense::AllClear, Guard::Patrolling, true);
//!     }
//!
//!     fn update(&mut self, _owner: &mut World, _dt: f32) -> Option<Sense> {
//!         None
//!     }
//!
//!     fn fixed_update(&mut self, _owner: &mut World, _dt: f32) -> Option<Sense> {
//!         None
//!     }
//! }
//!
//! let mut world = World { noise: false };
//! let mut machine: StateMachine<World, Guard, Sense> = StateMachine::new();
//! machine.add_state(&mut world, Box::new(Patrolling), false);
//! machine.add_state(&mut world, Box::new(Alerted), false);
//! machine.set_initial_state(&mut world, Guard::Patrolling);
//!
//! world.noise = true;
//! machine.update(&mut world, 0.016);
//! assert!(machine.is_in_state(Guard::Alerted));
//! ```

pub mod builder;
pub mod core;
pub mod schedule;

// Re-export commonly used types
pub use crate::core::{
    ContactEvent, ContactKind, History, MachineError, Severity, State, StateKey, StateMachine,
    TransitionCause, TransitionKey, TransitionPolicy, TransitionRecord, TransitionTable,
};
pub use builder::{passive_state, BuildError, StateMachineBuilder};
