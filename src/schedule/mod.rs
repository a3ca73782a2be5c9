//! Delayed-continuation scheduling, supplied by the parent context.
//!
//! The machine itself never schedules anything. A state that wants delayed
//! work asks its owner for the scheduler, starts a [`Task`], and keeps the
//! returned [`TaskHandle`]; the owner's loop drives the scheduler alongside
//! the machine. If the work must not outlive the state's activation, the
//! state cancels the handle in its `exit` hook - the machine never cancels
//! anything on its own.
//!
//! ```rust
//! use impulse::schedule::{ScheduleContext, Scheduler, Task, TickScheduler};
//!
//! struct Enemy {
//!     scheduler: TickScheduler,
//! }
//!
//! impl ScheduleContext for Enemy {
//!     fn scheduler(&mut self) -> &mut dyn Scheduler {
//!         &mut self.scheduler
//!     }
//! }
//!
//! let mut enemy = Enemy { scheduler: TickScheduler::new() };
//! let handle = enemy.scheduler().start(Task::once(2.0, || {}));
//! assert!(enemy.scheduler().is_active(handle));
//! ```

mod task;
mod ticker;

pub use task::{Task, TaskHandle, TaskStatus};
pub use ticker::{NullScheduler, TickScheduler};

/// The scheduling capability: start and stop delayed continuations.
///
/// Object-safe so owners can expose whatever implementation they carry
/// behind `&mut dyn Scheduler`.
pub trait Scheduler {
    /// Schedule a task; the handle identifies it for later cancellation.
    fn start(&mut self, task: Task) -> TaskHandle;

    /// Cancel a scheduled task. An unknown or already-finished handle is a
    /// reported, non-fatal failure.
    fn cancel(&mut self, handle: TaskHandle) -> bool;

    /// Whether the handle refers to a task that has yet to finish.
    fn is_active(&self, handle: TaskHandle) -> bool;
}

/// Implemented by parent contexts that offer scheduling to their states.
pub trait ScheduleContext {
    /// The scheduler the owner carries.
    fn scheduler(&mut self) -> &mut dyn Scheduler;
}
