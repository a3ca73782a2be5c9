//! Error types for machine operations.
//!
//! Every fallible operation has a `try_*` form returning one of these and a
//! bool-returning form that routes the error to the diagnostic channel and
//! recovers. None of these conditions panic or poison the machine: the
//! machine always remains in its last valid state.

use thiserror::Error;

use super::key::{StateKey, TransitionKey};

/// How an error should be reported on the diagnostic channel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Severity {
    /// Configuration mistakes: the requested operation did not happen.
    Error,
    /// Stale-reference conditions: bookkeeping is suspect but no operation
    /// was lost.
    Warning,
}

/// A reported-and-recovered machine operation failure.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum MachineError<S: StateKey, T: TransitionKey> {
    #[error("no current state; set an initial state before transitioning")]
    NoCurrentState,

    /// Covers both an unmapped trigger (which resolves to the current state)
    /// and an explicitly registered self-loop.
    #[error("transition {trigger:?} from {state:?} resolves to the current state")]
    RejectedSelfTransition { state: S, trigger: T },

    #[error("transition {trigger:?} from {from:?} targets {to:?}, which is not cataloged")]
    UnknownTarget { from: S, to: S, trigger: T },

    #[error("state {0:?} is already registered and overwrite was not permitted")]
    DuplicateState(S),

    #[error("state {0:?} is not in the catalog")]
    UnknownState(S),

    #[error("initial state may only be set once")]
    InitialAlreadySet,

    #[error("state {0:?} is current; removing it requires force_if_current")]
    RemoveCurrent(S),

    #[error("direct jump to {0:?} rejected under the guarded policy")]
    DirectJumpDisabled(S),

    #[error("history tracking is disabled on this machine")]
    HistoryDisabled,

    #[error("history holds no previous state to revert to")]
    NothingToRevert,

    #[error("previous state {0:?} is no longer in the catalog")]
    StaleHistory(S),

    #[error("machine has been shut down; no further operations are valid")]
    ShutDown,
}

impl<S: StateKey, T: TransitionKey> MachineError<S, T> {
    /// Reporting level for the diagnostic channel.
    pub fn severity(&self) -> Severity {
        match self {
            MachineError::NothingToRevert | MachineError::StaleHistory(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
