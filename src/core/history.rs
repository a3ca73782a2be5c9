//! History tracking: the rollback stack and the transition journal.
//!
//! When a machine is built with history tracking, it keeps two views of the
//! past. The **stack** holds previously-entered state ids with the current
//! state on top and is what `revert_to_previous` pops. The **journal** is an
//! append-only record of every move with timestamps, kept for diagnostics
//! and serializable for export; it is never replayed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::key::{StateKey, TransitionKey};

/// Why a transition happened.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub enum TransitionCause<T: TransitionKey> {
    /// A table-resolved move requested through `make_transition`.
    Trigger(T),
    /// A direct jump under `TransitionPolicy::Direct`.
    Jump,
    /// A rollback through `revert_to_previous`.
    Revert,
}

/// One journaled move.
///
/// ```rust
/// use impulse::{TransitionCause, TransitionRecord};
/// use chrono::Utc;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
/// enum Phase { Menu, Playing }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
/// enum Input { Start }
///
/// let record = TransitionRecord {
///     from: Phase::Menu,
///     to: Phase::Playing,
///     cause: TransitionCause::Trigger(Input::Start),
///     timestamp: Utc::now(),
/// };
/// let json = serde_json::to_string(&record).unwrap();
/// assert!(json.contains("Playing"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize, T: Serialize",
    deserialize = "S: Deserialize<'de>, T: Deserialize<'de>"
))]
pub struct TransitionRecord<S: StateKey, T: TransitionKey> {
    /// The state that was current before the move.
    pub from: S,
    /// The state that became current.
    pub to: S,
    /// What drove the move.
    pub cause: TransitionCause<T>,
    /// When the move happened.
    pub timestamp: DateTime<Utc>,
}

/// Rollback stack plus transition journal for one machine.
///
/// Maintained by the machine; exposed read-only through
/// [`StateMachine::history`](crate::StateMachine::history). The invariant
/// after any successful forward move is that [`top`](Self::top) equals the
/// machine's current state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize, T: Serialize",
    deserialize = "S: Deserialize<'de>, T: Deserialize<'de>"
))]
pub struct History<S: StateKey, T: TransitionKey> {
    stack: Vec<S>,
    journal: Vec<TransitionRecord<S, T>>,
}

impl<S: StateKey, T: TransitionKey> History<S, T> {
    /// Empty history.
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            journal: Vec::new(),
        }
    }

    /// Stack depth. Depth 1 means only the oldest reachable state remains
    /// and a revert would have nothing to return to.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Top of the stack - the current state, after any successful move.
    pub fn top(&self) -> Option<S> {
        self.stack.last().copied()
    }

    /// The entry a revert would land on, if any.
    pub fn previous(&self) -> Option<S> {
        (self.stack.len() >= 2).then(|| self.stack[self.stack.len() - 2])
    }

    /// Whether a state id appears anywhere on the stack.
    pub fn contains(&self, id: S) -> bool {
        self.stack.contains(&id)
    }

    /// The stack, oldest first.
    pub fn stack(&self) -> &[S] {
        &self.stack
    }

    /// All journaled moves in order.
    pub fn records(&self) -> &[TransitionRecord<S, T>] {
        &self.journal
    }

    /// Sequence of states visited, derived from the journal: the first
    /// record's origin followed by every destination.
    pub fn path(&self) -> Vec<S> {
        let mut path = Vec::with_capacity(self.journal.len() + 1);
        if let Some(first) = self.journal.first() {
            path.push(first.from);
        }
        path.extend(self.journal.iter().map(|r| r.to));
        path
    }

    /// Span from the first to the last journaled move. `None` with an empty
    /// journal.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.journal.first()?, self.journal.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub(crate) fn push(&mut self, id: S) {
        self.stack.push(id);
    }

    pub(crate) fn pop(&mut self) -> Option<S> {
        self.stack.pop()
    }

    pub(crate) fn record(&mut self, from: S, to: S, cause: TransitionCause<T>) {
        self.journal.push(TransitionRecord {
            from,
            to,
            cause,
            timestamp: Utc::now(),
        });
    }

    pub(crate) fn clear(&mut self) {
        self.stack.clear();
        self.journal.clear();
    }
}
