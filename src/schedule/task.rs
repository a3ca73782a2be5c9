//! Delayed-continuation tasks and their handles.

/// Identifies a task within one scheduler.
///
/// States keep the handle a `start` call returned and use it to cancel the
/// work, typically from their `exit` hook.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Wrap a raw id. Scheduler implementations mint these; everything else
    /// just passes them around.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a fired task tells the scheduler to do next.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TaskStatus {
    /// Keep the task scheduled for its next interval.
    Continue,
    /// Drop the task.
    Finished,
}

/// A delayed continuation: an action plus when to run it.
///
/// One-shot tasks run once after `delay`; repeating tasks run after `delay`
/// and then every `interval` until their action returns
/// [`TaskStatus::Finished`] or they are cancelled. Actions are plain boxed
/// closures with no thread-safety obligations - the scheduling model is
/// single-threaded and cooperative.
pub struct Task {
    pub(crate) delay: f32,
    pub(crate) interval: Option<f32>,
    pub(crate) action: Box<dyn FnMut() -> TaskStatus>,
}

impl Task {
    /// A task that fires once, `delay` seconds from now.
    ///
    /// ```rust
    /// use impulse::schedule::Task;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let fired = Rc::new(Cell::new(false));
    /// let flag = Rc::clone(&fired);
    /// let _task = Task::once(0.5, move || flag.set(true));
    /// ```
    pub fn once(delay: f32, action: impl FnOnce() + 'static) -> Self {
        let mut action = Some(action);
        Self {
            delay,
            interval: None,
            action: Box::new(move || {
                if let Some(run) = action.take() {
                    run();
                }
                TaskStatus::Finished
            }),
        }
    }

    /// A task that first fires after `delay` seconds and then every
    /// `interval` seconds until its action returns [`TaskStatus::Finished`].
    pub fn repeating(
        delay: f32,
        interval: f32,
        action: impl FnMut() -> TaskStatus + 'static,
    ) -> Self {
        Self {
            delay,
            interval: Some(interval),
            action: Box::new(action),
        }
    }

    /// Seconds until the first firing.
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Seconds between repeat firings, if any.
    pub fn interval(&self) -> Option<f32> {
        self.interval
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("delay", &self.delay)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
