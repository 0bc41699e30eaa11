//! Wall-clock port — the injected time source for the scheduler poll loop.
//!
//! The update scheduler matches a fixed *local* calendar instant, so the
//! clock hands out naive local readings. Tests inject scripted clocks to
//! simulate arbitrary instants without real delays.

use homedeck_domain::time::Timestamp;

/// Supplies wall-clock readings.
pub trait WallClock {
    /// The current local wall-clock time.
    fn now(&self) -> Timestamp;
}

impl<T: WallClock + Send + Sync> WallClock for std::sync::Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> Timestamp {
        homedeck_domain::time::now()
    }
}
