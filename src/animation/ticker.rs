//! Periodic tick sources.
//!
//! The scheduler never assumes a timer implementation: hosts register a callback with whatever
//! [`TickSource`] they have and cancel the registration on teardown.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::foundation::error::{StrokeError, StrokeResult};

/// Callback invoked on every tick.
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Registration handle returned by [`TickSource::schedule_periodic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Something that can call a callback periodically.
pub trait TickSource {
    /// Start calling `callback` every `interval`.
    fn schedule_periodic(
        &mut self,
        interval: Duration,
        callback: TickCallback,
    ) -> StrokeResult<TickHandle>;

    /// Stop a registration. Once this returns the callback is never invoked again.
    ///
    /// Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

struct Worker {
    alive: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

/// Tick source running each registration on its own thread.
#[derive(Default)]
pub struct ThreadTicker {
    next_id: u64,
    workers: HashMap<TickHandle, Worker>,
}

impl ThreadTicker {
    /// Create a ticker without registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    pub fn live(&self) -> usize {
        self.workers.len()
    }
}

impl TickSource for ThreadTicker {
    fn schedule_periodic(
        &mut self,
        interval: Duration,
        mut callback: TickCallback,
    ) -> StrokeResult<TickHandle> {
        if interval.is_zero() {
            return Err(StrokeError::validation("tick interval must be > 0"));
        }
        let handle = TickHandle(self.next_id);
        self.next_id += 1;

        let alive = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&alive);
        let join = std::thread::Builder::new()
            .name(format!("strokeorder-tick-{}", handle.0))
            .spawn(move || {
                let mut next = Instant::now() + interval;
                loop {
                    loop {
                        if !flag.load(Ordering::Acquire) {
                            return;
                        }
                        let now = Instant::now();
                        if now >= next {
                            break;
                        }
                        std::thread::park_timeout(next - now);
                    }
                    callback();

                    next += interval;
                    let now = Instant::now();
                    if next < now {
                        // Fell behind; skip missed ticks instead of bursting.
                        next = now + interval;
                    }
                }
            })
            .map_err(|e| anyhow::anyhow!("failed to spawn tick thread: {e}"))?;

        tracing::debug!(handle = handle.0, ?interval, "tick thread started");
        self.workers.insert(handle, Worker { alive, join });
        Ok(handle)
    }

    fn cancel(&mut self, handle: TickHandle) {
        let Some(worker) = self.workers.remove(&handle) else {
            return;
        };
        worker.alive.store(false, Ordering::Release);
        worker.join.thread().unpark();
        if worker.join.thread().id() == std::thread::current().id() {
            // Cancelled from inside its own callback: the loop exits after it returns.
            return;
        }
        if worker.join.join().is_err() {
            tracing::warn!(handle = handle.0, "tick callback panicked");
        }
        tracing::debug!(handle = handle.0, "tick thread stopped");
    }
}

impl Drop for ThreadTicker {
    fn drop(&mut self) {
        let handles: Vec<_> = self.workers.keys().copied().collect();
        for h in handles {
            self.cancel(h);
        }
    }
}

/// Host-driven tick source: nothing happens until [`ManualTicker::fire`] is called.
///
/// Suits cooperative hosts whose event loop already owns a timer, and tests.
#[derive(Default)]
pub struct ManualTicker {
    next_id: u64,
    registrations: Vec<(TickHandle, Duration, TickCallback)>,
}

impl ManualTicker {
    /// Create a ticker without registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke every live callback once, in registration order.
    pub fn fire(&mut self) {
        for (_, _, cb) in &mut self.registrations {
            cb();
        }
    }

    /// Number of live registrations.
    pub fn live(&self) -> usize {
        self.registrations.len()
    }

    /// Interval requested by `handle`, if still registered.
    pub fn interval(&self, handle: TickHandle) -> Option<Duration> {
        self.registrations
            .iter()
            .find(|(h, _, _)| *h == handle)
            .map(|(_, i, _)| *i)
    }
}

impl TickSource for ManualTicker {
    fn schedule_periodic(
        &mut self,
        interval: Duration,
        callback: TickCallback,
    ) -> StrokeResult<TickHandle> {
        if interval.is_zero() {
            return Err(StrokeError::validation("tick interval must be > 0"));
        }
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.registrations.push((handle, interval, callback));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.registrations.retain(|(h, _, _)| *h != handle);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ticker.rs"]
mod tests;
