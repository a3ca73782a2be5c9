//! Cooperative tick-driven scheduler implementations.

use tracing::error;

use super::task::{Task, TaskHandle, TaskStatus};
use super::Scheduler;

struct Entry {
    handle: TaskHandle,
    remaining: f32,
    task: Task,
}

/// A single-threaded scheduler driven by [`advance`](Self::advance).
///
/// The host calls `advance(dt)` once per tick from the same loop that ticks
/// its machines; tasks whose delay has elapsed fire during that call, on the
/// caller's thread. A task fires at most once per `advance`, so a dt much
/// larger than a repeating task's interval does not produce a burst of
/// catch-up firings.
///
/// # Example
///
/// ```rust
/// use impulse::schedule::{Scheduler, Task, TickScheduler};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let mut scheduler = TickScheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&fired);
///
/// let handle = scheduler.start(Task::once(1.0, move || flag.set(true)));
/// scheduler.advance(0.5);
/// assert!(!fired.get());
/// scheduler.advance(0.6);
/// assert!(fired.get());
/// assert!(!scheduler.is_active(handle));
/// ```
#[derive(Default)]
pub struct TickScheduler {
    entries: Vec<Entry>,
    next_handle: u64,
}

impl TickScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Move time forward and fire every due task.
    pub fn advance(&mut self, dt: f32) {
        let mut index = 0;
        while index < self.entries.len() {
            self.entries[index].remaining -= dt;
            if self.entries[index].remaining > 0.0 {
                index += 1;
                continue;
            }
            let entry = &mut self.entries[index];
            let status = (entry.task.action)();
            match (entry.task.interval, status) {
                (Some(interval), TaskStatus::Continue) => {
                    entry.remaining = interval;
                    index += 1;
                }
                _ => {
                    // swap_remove pulls in a not-yet-visited tail entry,
                    // which the next iteration then processes.
                    self.entries.swap_remove(index);
                }
            }
        }
    }

    /// Number of scheduled tasks.
    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Scheduler for TickScheduler {
    fn start(&mut self, task: Task) -> TaskHandle {
        let handle = TaskHandle::from_raw(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            remaining: task.delay,
            task,
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(index) => {
                self.entries.swap_remove(index);
                true
            }
            None => {
                error!(?handle, "no such task to cancel");
                false
            }
        }
    }

    fn is_active(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }
}

/// A scheduler that discards everything it is given.
///
/// For hosts and tests that never use delayed continuations but still need
/// to satisfy [`ScheduleContext`](super::ScheduleContext).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullScheduler;

impl Scheduler for NullScheduler {
    fn start(&mut self, _task: Task) -> TaskHandle {
        TaskHandle::from_raw(u64::MAX)
    }

    fn cancel(&mut self, _handle: TaskHandle) -> bool {
        false
    }

    fn is_active(&self, _handle: TaskHandle) -> bool {
        false
    }
}
