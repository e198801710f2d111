use std::time::Instant;

/// Monotonic time source driving the ticker.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same reading.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ManualClock {
    base: Instant,
    offset: std::rc::Rc<std::cell::Cell<std::time::Duration>>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Default::default(),
        }
    }

    pub(crate) fn advance(&self, by: std::time::Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}
