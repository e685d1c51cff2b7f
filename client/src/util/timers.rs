//! Mount-scoped timers.
//!
//! A [`TimerScope`] is created when a page mounts and cancelled from
//! `on_cleanup`. Every callback scheduled through it checks the shared
//! liveness flag before running, so nothing fires into a disposed view.

#[cfg(test)]
#[path = "timers_test.rs"]
mod timers_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Liveness flag shared between a scope and its pending callbacks.
#[derive(Clone, Debug)]
pub struct AliveGuard(Arc<AtomicBool>);

impl AliveGuard {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Run `f` only while the owning scope is still alive.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        if self.is_alive() { Some(f()) } else { None }
    }
}

#[derive(Clone, Debug)]
pub struct TimerScope {
    alive: Arc<AtomicBool>,
}

impl Default for TimerScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerScope {
    #[must_use]
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    #[must_use]
    pub fn guard(&self) -> AliveGuard {
        AliveGuard(self.alive.clone())
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Cancel every pending callback. Idempotent.
    pub fn cancel(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }

    /// Run `f` once after `delay_ms`, unless the scope is cancelled first.
    pub fn after(&self, delay_ms: f64, f: impl FnOnce() + 'static) {
        #[cfg(feature = "hydrate")]
        {
            let guard = self.guard();
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(duration_from_ms(delay_ms)).await;
                guard.run(f);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (delay_ms, f);
        }
    }

    /// Run `f` every `interval_ms` until the scope is cancelled.
    pub fn every(&self, interval_ms: f64, f: impl FnMut() + 'static) {
        #[cfg(feature = "hydrate")]
        {
            let guard = self.guard();
            let mut f = f;
            leptos::task::spawn_local(async move {
                loop {
                    gloo_timers::future::sleep(duration_from_ms(interval_ms)).await;
                    if guard.run(&mut f).is_none() {
                        break;
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (interval_ms, f);
        }
    }

    /// Drive a step function until it returns `None` or the scope is
    /// cancelled. `step` returns the delay before its next invocation.
    pub fn drive(&self, step: impl FnMut() -> Option<f64> + 'static) {
        #[cfg(feature = "hydrate")]
        {
            let guard = self.guard();
            let mut step = step;
            leptos::task::spawn_local(async move {
                while let Some(Some(delay_ms)) = guard.run(&mut step) {
                    gloo_timers::future::sleep(duration_from_ms(delay_ms)).await;
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = step;
        }
    }
}

/// Convert a millisecond delay to a `Duration`, treating garbage as zero.
#[must_use]
pub fn duration_from_ms(ms: f64) -> std::time::Duration {
    if ms.is_finite() && ms > 0.0 {
        std::time::Duration::from_secs_f64(ms / 1000.0)
    } else {
        std::time::Duration::ZERO
    }
}

/// High-resolution timestamp in milliseconds. `0.0` outside the browser.
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.performance())
            .map_or_else(js_sys::Date::now, |p| p.now())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

/// Wall-clock milliseconds since the Unix epoch, used for message timestamps.
#[must_use]
pub fn epoch_ms() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let ms = js_sys::Date::now() as i64;
        ms
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}
