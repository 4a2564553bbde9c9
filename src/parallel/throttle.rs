use std::time::Duration;

/// Rate control applied by each worker before it handles a line.
pub trait Throttle: Send + Sync {
    fn wait(&self);

    /// Pause applied by each `wait`.
    fn interval(&self) -> Duration;
}

/// Never pauses. Used when `delay_ms = 0` and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Throttle for NoDelay {
    fn wait(&self) {}

    fn interval(&self) -> Duration {
        Duration::ZERO
    }
}

/// Sleeps the calling worker for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Throttle for FixedDelay {
    fn wait(&self) {
        std::thread::sleep(self.delay);
    }

    fn interval(&self) -> Duration {
        self.delay
    }
}

/// Pick the throttle for a configured delay; zero disables throttling.
pub fn throttle_for(delay: Duration) -> Box<dyn Throttle> {
    if delay.is_zero() {
        Box::new(NoDelay)
    } else {
        Box::new(FixedDelay::new(delay))
    }
}
