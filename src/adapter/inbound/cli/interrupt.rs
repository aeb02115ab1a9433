//! Ctrl+C handling.
//!
//! Inside a display loop an interrupt only ends the loop. Anywhere else it
//! ends the process with status 130.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::warn;

/// Exit status for a process ended by SIGINT.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

static IN_DISPLAY_LOOP: AtomicBool = AtomicBool::new(false);
static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Install the process-wide handler. Call once at startup.
pub fn install() {
    let result = ctrlc::set_handler(|| {
        if IN_DISPLAY_LOOP.load(Ordering::SeqCst) {
            STOP_REQUESTED.store(true, Ordering::SeqCst);
        } else {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    });
    if let Err(e) = result {
        warn!(error = %e, "failed to install Ctrl+C handler");
    }
}

/// Marks a display loop as running for as long as it lives.
pub struct DisplayLoop {
    _private: (),
}

impl DisplayLoop {
    #[must_use]
    pub fn enter() -> Self {
        STOP_REQUESTED.store(false, Ordering::SeqCst);
        IN_DISPLAY_LOOP.store(true, Ordering::SeqCst);
        Self { _private: () }
    }

    /// True once Ctrl+C was pressed during this loop.
    #[must_use]
    pub fn stopped(&self) -> bool {
        STOP_REQUESTED.load(Ordering::SeqCst)
    }

    /// Sleep for `period`, waking early if the loop was interrupted.
    pub fn pause(&self, period: Duration) {
        const SLICE: Duration = Duration::from_millis(100);
        let mut remaining = period;
        while !remaining.is_zero() && !self.stopped() {
            let step = remaining.min(SLICE);
            std::thread::sleep(step);
            remaining -= step;
        }
    }
}

impl Drop for DisplayLoop {
    fn drop(&mut self) {
        IN_DISPLAY_LOOP.store(false, Ordering::SeqCst);
        STOP_REQUESTED.store(false, Ordering::SeqCst);
    }
}
