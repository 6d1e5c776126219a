//! Sleep capability
//!
//! The bootstrapper waits through a [`Clock`] so tests can observe the
//! requested delays without actually sleeping.

use std::time::Duration;

pub trait Clock {
    fn sleep(&self, duration: Duration);
}

/// Blocks the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
