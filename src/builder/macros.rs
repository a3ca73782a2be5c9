//! Macros for ergonomic state machine construction.

/// Declare a state's outgoing edges in one block.
///
/// Expands to a sequence of [`TransitionTable::add`](crate::TransitionTable::add)
/// calls with overwrite permitted, which is what a `transitions` hook almost
/// always wants.
///
/// # Example
///
/// ```rust
/// use impulse::{transition_table, State, TransitionTable};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Ai { Idle, Moving, Attacking }
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Trigger { Go, Engage }
///
/// struct Idle;
///
/// impl State<(), Ai, Trigger> for Idle {
///     fn id(&self) -> Ai { Ai::Idle }
///
///     fn transitions(&self, table: &mut TransitionTable<Ai, Trigger>) {
///         transition_table!(table, {
///             Trigger::Go => Ai::Moving,
///             Trigger::Engage => Ai::Attacking,
///         });
///     }
///
///     fn update(&mut self, _owner: &mut (), _dt: f32) -> Option<Trigger> { None }
///     fn fixed_update(&mut self, _owner: &mut (), _dt: f32) -> Option<Trigger> { None }
/// }
/// ```
#[macro_export]
macro_rules! transition_table {
    ($table:expr, { $($trigger:expr => $dest:expr),* $(,)? }) => {
        $(
            $table.add($trigger, $dest, true);
        )*
    };
}
