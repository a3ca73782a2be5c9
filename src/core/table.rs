//! Per-state transition tables.
//!
//! Each cataloged state owns one table mapping transition ids to destination
//! state ids. Tables are built once when the state is registered (via
//! [`State::transitions`](crate::core::State::transitions)) and stay mutable
//! afterward through the machine's add/remove operations.

use std::collections::HashMap;

use super::key::{StateKey, TransitionKey};

/// Outgoing-edge table for a single state.
///
/// A transition id maps to at most one destination at any time. Lookups for
/// an unregistered id resolve to the owning state's own id (see
/// [`resolve`](Self::resolve)), which the machine uniformly rejects as a
/// self-transition.
///
/// # Example
///
/// ```rust
/// use impulse::TransitionTable;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Ai { Idle, Chasing }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Trigger { Spotted }
///
/// let mut table: TransitionTable<Ai, Trigger> = TransitionTable::new();
/// assert!(table.add(Trigger::Spotted, Ai::Chasing, false));
/// assert_eq!(table.target(Trigger::Spotted), Some(Ai::Chasing));
/// assert_eq!(table.resolve(Trigger::Spotted, Ai::Idle), Ai::Chasing);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionTable<S: StateKey, T: TransitionKey> {
    edges: HashMap<T, S>,
}

impl<S: StateKey, T: TransitionKey> TransitionTable<S, T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// Insert or overwrite an edge.
    ///
    /// With `overwrite` false and the trigger already mapped, the call fails
    /// without mutating the table and the existing destination stays in
    /// place. Returns whether the edge was written.
    pub fn add(&mut self, trigger: T, destination: S, overwrite: bool) -> bool {
        if !overwrite && self.edges.contains_key(&trigger) {
            tracing::error!(
                ?trigger,
                existing = ?self.edges[&trigger],
                rejected = ?destination,
                "transition already registered and overwrite not permitted"
            );
            return false;
        }
        self.edges.insert(trigger, destination);
        true
    }

    /// Remove an edge if present.
    ///
    /// An absent trigger is reported and leaves the table untouched; the
    /// failure is non-fatal.
    pub fn remove(&mut self, trigger: T) -> bool {
        if self.edges.remove(&trigger).is_none() {
            tracing::error!(?trigger, "no such transition to remove");
            return false;
        }
        true
    }

    /// Look up the destination for a trigger, if one is registered.
    pub fn target(&self, trigger: T) -> Option<S> {
        self.edges.get(&trigger).copied()
    }

    /// Resolve a trigger against this table.
    ///
    /// Returns the registered destination, or `own_id` when the trigger is
    /// unmapped. The machine treats a resolution equal to the current state
    /// as "no legal move", which folds the unmapped and explicit-self-loop
    /// cases into one rejection path.
    pub fn resolve(&self, trigger: T, own_id: S) -> S {
        self.target(trigger).unwrap_or(own_id)
    }

    /// Whether a trigger is registered.
    pub fn contains(&self, trigger: T) -> bool {
        self.edges.contains_key(&trigger)
    }

    /// Number of registered edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the table has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over `(trigger, destination)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (T, S)> + '_ {
        self.edges.iter().map(|(t, s)| (*t, *s))
    }
}
