use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum TimerError {
    #[error("Couldn't schedule timer: {0}")]
    Schedule(String),
}

/// Delayed and repeated callback scheduling with cancellation.
///
/// Callbacks only ever run on the thread that owns the scheduler, so they are
/// not required to be `Send`.
pub trait Scheduler: Clone + 'static {
    type Handle: Copy;

    fn schedule_once(
        &self,
        delay: Duration,
        callback: Box<dyn FnOnce()>,
    ) -> Result<Self::Handle, TimerError>;

    fn schedule_repeating(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<Self::Handle, TimerError>;

    /// After this returns the callback behind `handle` never runs again.
    /// Cancelling an expired handle is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// A single named timer. Scheduling into an occupied slot cancels the pending
/// timer first, so one slot never has two competing callbacks.
pub struct TimerSlot<S: Scheduler> {
    handle: Option<S::Handle>,
}

impl<S: Scheduler> Default for TimerSlot<S> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<S: Scheduler> TimerSlot<S> {
    pub fn schedule_once(
        &mut self,
        scheduler: &S,
        delay: Duration,
        callback: impl FnOnce() + 'static,
    ) {
        self.cancel(scheduler);
        match scheduler.schedule_once(delay, Box::new(callback)) {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => log::warn!("{e}"),
        }
    }

    pub fn schedule_repeating(
        &mut self,
        scheduler: &S,
        period: Duration,
        callback: impl FnMut() + 'static,
    ) {
        self.cancel(scheduler);
        match scheduler.schedule_repeating(period, Box::new(callback)) {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => log::warn!("{e}"),
        }
    }

    pub fn cancel(&mut self, scheduler: &S) {
        if let Some(handle) = self.handle.take() {
            scheduler.cancel(handle);
        }
    }

    /// True while a handle is held. A one-shot that already fired still
    /// counts until the slot is cancelled or reused.
    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{cell::RefCell, rc::Rc, time::Duration};

    use super::{Scheduler, TimerError};

    enum Task {
        Once(Box<dyn FnOnce()>),
        Repeat(Box<dyn FnMut()>),
    }

    struct Entry {
        id: u64,
        due: Duration,
        period: Option<Duration>,
        // None while a repeating task is running
        task: Option<Task>,
    }

    #[derive(Default)]
    struct Clock {
        now: Duration,
        next_id: u64,
        entries: Vec<Entry>,
    }

    /// Virtual clock. Nothing fires until `advance` is called; due timers then
    /// fire in expiry order (ties in scheduling order).
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> Duration {
            self.clock.borrow().now
        }

        pub fn pending(&self) -> usize {
            self.clock.borrow().entries.len()
        }

        pub fn advance(&self, by: Duration) {
            let target = self.now() + by;
            while self.fire_next(target) {}
            self.clock.borrow_mut().now = target;
        }

        pub fn advance_ms(&self, ms: u64) {
            self.advance(Duration::from_millis(ms));
        }

        fn fire_next(&self, target: Duration) -> bool {
            let (id, task) = {
                let mut clock = self.clock.borrow_mut();
                let next = clock
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.task.is_some() && e.due <= target)
                    .min_by_key(|(_, e)| (e.due, e.id))
                    .map(|(i, _)| i);
                let Some(idx) = next else {
                    return false;
                };
                clock.now = clock.entries[idx].due;
                match clock.entries[idx].period {
                    None => {
                        let entry = clock.entries.remove(idx);
                        (entry.id, entry.task)
                    }
                    Some(period) => {
                        let entry = &mut clock.entries[idx];
                        entry.due += period;
                        (entry.id, entry.task.take())
                    }
                }
            };
            match task {
                Some(Task::Once(f)) => f(),
                Some(Task::Repeat(mut f)) => {
                    f();
                    let mut clock = self.clock.borrow_mut();
                    if let Some(entry) = clock.entries.iter_mut().find(|e| e.id == id) {
                        entry.task = Some(Task::Repeat(f));
                    }
                }
                None => {}
            }
            true
        }

        fn push(&self, delay: Duration, period: Option<Duration>, task: Task) -> u64 {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let due = clock.now + delay;
            clock.entries.push(Entry {
                id,
                due,
                period,
                task: Some(task),
            });
            id
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = u64;

        fn schedule_once(
            &self,
            delay: Duration,
            callback: Box<dyn FnOnce()>,
        ) -> Result<u64, TimerError> {
            Ok(self.push(delay, None, Task::Once(callback)))
        }

        fn schedule_repeating(
            &self,
            period: Duration,
            callback: Box<dyn FnMut()>,
        ) -> Result<u64, TimerError> {
            if period.is_zero() {
                return Err(TimerError::Schedule("zero period".to_string()));
            }
            Ok(self.push(period, Some(period), Task::Repeat(callback)))
        }

        fn cancel(&self, handle: u64) {
            self.clock.borrow_mut().entries.retain(|e| e.id != handle);
        }
    }
}
