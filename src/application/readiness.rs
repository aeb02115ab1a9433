//! Bounded readiness waits.
//!
//! A wait that times out or fails is reported and logged, never raised. The
//! caller decides whether the step after it still runs (it always does).

use tracing::warn;

use crate::domain::{ReadinessOutcome, ReadinessProbe, Warning};
use crate::port::outbound::command::RunOptions;
use crate::port::outbound::notifier::{Action, Event};

use super::Context;

/// Block until pods matching `probe` are ready or its timeout elapses.
pub fn wait(ctx: Context<'_>, probe: &ReadinessProbe) -> ReadinessOutcome {
    ctx.notify(Event::started(Action::WaitReady, &probe.selector));

    let invocation = ctx.control().args([
        "wait",
        "--for=condition=ready",
        "pod",
        "-l",
        probe.selector.as_str(),
        "-n",
        probe.namespace.as_str(),
        probe.timeout_flag().as_str(),
    ]);

    let ready = match ctx.run(&invocation, RunOptions::UNCHECKED) {
        Ok(output) => output.is_success(),
        Err(e) => {
            warn!(selector = %probe.selector, error = %e, "readiness wait could not run");
            false
        }
    };

    if ready {
        ctx.notify(Event::finished(Action::WaitReady, &probe.selector));
        ReadinessOutcome::Ready
    } else {
        warn!(
            selector = %probe.selector,
            namespace = %probe.namespace,
            timeout_secs = probe.timeout.as_secs(),
            "readiness wait timed out"
        );
        ctx.notify(Event::Degraded(timed_out(probe)));
        ReadinessOutcome::TimedOut
    }
}

/// The warning recorded when `probe` does not become ready.
pub fn timed_out(probe: &ReadinessProbe) -> Warning {
    Warning::ReadinessTimedOut {
        selector: probe.selector.clone(),
        namespace: probe.namespace.clone(),
        timeout: probe.timeout,
    }
}
