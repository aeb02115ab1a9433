//! Display loops for status, metrics and logs.

use std::time::Duration;

use crate::error::Result;

use super::interrupt::DisplayLoop;
use super::output;

/// Time between frames.
pub const REFRESH: Duration = Duration::from_secs(2);

/// Redraw `fetch` every [`REFRESH`] until Ctrl+C.
///
/// # Errors
///
/// Returns the first error from `fetch`.
pub fn repeat(title: &str, fetch: impl Fn() -> Result<String>) -> Result<()> {
    let display = DisplayLoop::enter();
    while !display.stopped() {
        let frame = fetch()?;
        if display.stopped() {
            break;
        }
        output::clear_screen();
        output::section(&format!("{title} (Ctrl+C to exit)"));
        output::lines(&frame);
        display.pause(REFRESH);
    }
    Ok(())
}

/// Draw `fetch` once.
///
/// # Errors
///
/// Returns the error from `fetch`.
pub fn once(title: &str, fetch: impl FnOnce() -> Result<String>) -> Result<()> {
    let frame = fetch()?;
    output::section(title);
    output::lines(&frame);
    Ok(())
}

/// Run `stream` with Ctrl+C ending only the stream.
///
/// # Errors
///
/// Returns the error from `stream`.
pub fn interruptible<T>(stream: impl FnOnce() -> Result<T>) -> Result<T> {
    let _display = DisplayLoop::enter();
    stream()
}
