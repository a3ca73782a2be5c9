//! Key traits for state and transition identifiers.
//!
//! A machine is generic over two key types: the state id that names each
//! catalog entry and the transition id that labels each outgoing edge. Both
//! are expected to be small, copyable enum-like values; any type with the
//! right derives qualifies automatically through the blanket impls.

use std::fmt::Debug;
use std::hash::Hash;

/// Identifies a state within one machine's catalog.
///
/// Blanket-implemented for any `Copy + Eq + Hash + Debug + 'static` type,
/// so a plain derived enum is enough:
///
/// ```rust
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Ai {
///     Idle,
///     Chasing,
/// }
///
/// fn assert_key<K: impulse::StateKey>() {}
/// assert_key::<Ai>();
/// ```
///
/// The `Debug` rendering is what diagnostics and `current_state_name` use,
/// so derive it rather than hand-rolling something exotic.
pub trait StateKey: Copy + Eq + Hash + Debug + 'static {}

impl<K: Copy + Eq + Hash + Debug + 'static> StateKey for K {}

/// Labels an outgoing edge in a state's transition table.
///
/// Same shape as [`StateKey`]; the two traits exist so signatures read as
/// "state id" vs "transition id" rather than a soup of identical bounds.
pub trait TransitionKey: Copy + Eq + Hash + Debug + 'static {}

impl<K: Copy + Eq + Hash + Debug + 'static> TransitionKey for K {}
