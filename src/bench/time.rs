use std::time::Duration;

#[cfg_attr(feature = "quanta", path = "time/clock_quanta.rs")]
#[cfg_attr(not(feature = "quanta"), path = "time/clock_compat.rs")]
mod clock;

pub(crate) use clock::Clock;

/// Runs `f` once and returns its output together with the elapsed time.
pub(crate) fn timed<R>(clock: &Clock, f: impl FnOnce() -> R) -> (R, Duration) {
    let start = clock.now();
    let output = f();
    let elapsed = clock.now().duration_since(start);
    (output, elapsed)
}

pub(crate) fn as_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}
