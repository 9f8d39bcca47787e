use futures::future::{abortable, AbortHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::transport::Timer;

/// Coalesces bursts of input behind a quiet period.
///
/// At most one timer is outstanding: each new input aborts the previous
/// one and starts a fresh delay. Only an input followed by a full delay of
/// silence comes back out of [`Debouncer::settle`].
pub struct Debouncer {
    timer: Rc<dyn Timer>,
    delay: Duration,
    generation: Cell<u64>,
    pending: RefCell<Option<(u64, AbortHandle)>>,
}

impl Debouncer {
    pub fn new(timer: Rc<dyn Timer>, delay: Duration) -> Self {
        Self {
            timer,
            delay,
            generation: Cell::new(0),
            pending: RefCell::new(None),
        }
    }

    /// Resolves to `Some(value)` once `delay` passes with no newer input,
    /// or `None` as soon as a newer input (or [`cancel`](Self::cancel))
    /// supersedes this one.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);

        let (sleep, handle) = abortable(self.timer.sleep(self.delay));
        if let Some((_, previous)) = self.pending.replace(Some((ticket, handle))) {
            previous.abort();
        }

        let fired = sleep.await.is_ok();
        if !fired || self.generation.get() != ticket {
            return None;
        }
        self.pending.replace(None);
        Some(value)
    }

    /// Drops whatever is waiting.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get() + 1);
        if let Some((_, handle)) = self.pending.replace(None) {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}
