#![allow(unused)]
use std::cell::RefCell;
use std::time::Duration;

use tracing::info;

/// Wall-clock statistics of the last drift run on this thread.
#[derive(Default, Clone, Debug)]
pub struct DriftTiming {
    pub step_times: Vec<Duration>,
    pub total_time: Duration,
}

impl DriftTiming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mean_step(&self) -> Option<Duration> {
        let n = u32::try_from(self.step_times.len()).ok().filter(|&n| n > 0)?;
        Some(self.step_times.iter().sum::<Duration>() / n)
    }

    pub fn report(&self) {
        let stepping: Duration = self.step_times.iter().sum();
        info!(
            steps = self.step_times.len(),
            total_ms = self.total_time.as_secs_f64() * 1000.0,
            stepping_ms = stepping.as_secs_f64() * 1000.0,
            mean_step_us = self.mean_step().map_or(0.0, |d| d.as_secs_f64() * 1e6),
            "drift timing"
        );
    }
}

#[cfg(feature = "timing")]
thread_local! {
    static DRIFT_TIMING: RefCell<DriftTiming> = RefCell::new(DriftTiming::new());
}

#[cfg(feature = "timing")]
pub fn reset_timing() {
    DRIFT_TIMING.with(|stats| {
        *stats.borrow_mut() = DriftTiming::new();
    });
}

#[cfg(not(feature = "timing"))]
pub fn reset_timing() {}

#[cfg(feature = "timing")]
pub fn record_step<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = std::time::Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    DRIFT_TIMING.with(|stats| {
        stats.borrow_mut().step_times.push(elapsed);
    });
    result
}

#[cfg(not(feature = "timing"))]
pub fn record_step<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    f()
}

#[cfg(feature = "timing")]
pub fn finalize_timing(total_time: Duration) -> DriftTiming {
    DRIFT_TIMING.with(|stats| {
        let mut s = stats.borrow_mut();
        s.total_time = total_time;
        s.clone()
    })
}

#[cfg(not(feature = "timing"))]
pub fn finalize_timing(_total_time: Duration) -> DriftTiming {
    DriftTiming::new()
}

#[cfg(feature = "timing")]
pub fn finalize_and_report(total_time: Duration) {
    finalize_timing(total_time).report();
}

#[cfg(not(feature = "timing"))]
pub fn finalize_and_report(_total_time: Duration) {}
