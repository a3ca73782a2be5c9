//! Build errors for the state machine builder.

use thiserror::Error;

use crate::core::StateKey;

/// Errors that can occur when building a state machine.
///
/// Unlike the machine's own reported-and-recovered operations, builder
/// failures are hard: a misconfigured machine is never handed back.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum BuildError<S: StateKey> {
    #[error("initial state not specified; call .initial(state) before .build()")]
    MissingInitialState,

    #[error("no states supplied; add at least one state")]
    NoStates,

    #[error("state {0:?} supplied more than once")]
    DuplicateState(S),

    #[error("initial state {0:?} is not among the supplied states")]
    UnknownInitialState(S),
}
