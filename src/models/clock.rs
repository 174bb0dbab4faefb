//! Time source for the session. Each operation samples `now` once.
use chrono::Utc;
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_epoch_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_epoch_ms)),
        }
    }

    pub fn set(&self, epoch_ms: i64) {
        self.now.set(epoch_ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_epoch_ms(&self) -> i64 {
        self.now.get()
    }
}
