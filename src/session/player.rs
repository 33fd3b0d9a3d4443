//! Live playback driven by a [`TickSource`].
//!
//! The animation state lives inside the tick callback. Every redraw request publishes a
//! [`FrameSnapshot`] into a mailbox the host reads from its own thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

use crate::animation::opts::AnimationOpts;
use crate::animation::scheduler::StrokeAnimation;
use crate::animation::ticker::{TickHandle, TickSource};
use crate::character::model::Character;
use crate::foundation::error::StrokeResult;
use crate::render::passes::FrameSnapshot;

#[derive(Default)]
struct FrameMailbox {
    slot: Mutex<Option<FrameSnapshot>>,
    ready: Condvar,
}

impl FrameMailbox {
    fn lock(&self) -> MutexGuard<'_, Option<FrameSnapshot>> {
        // A panicking host thread must not wedge playback.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, snap: FrameSnapshot) {
        *self.lock() = Some(snap);
        self.ready.notify_all();
    }
}

/// A running animation bound to a tick source.
///
/// Dropping the player cancels its registration.
pub struct AnimationPlayer<T: TickSource> {
    ticker: Option<T>,
    handle: TickHandle,
    mailbox: Arc<FrameMailbox>,
}

impl<T: TickSource> AnimationPlayer<T> {
    /// Register a periodic tick on `ticker` and start animating `character`.
    pub fn start(character: Character, opts: AnimationOpts, mut ticker: T) -> StrokeResult<Self> {
        let interval = opts.tick_interval();
        let strokes = character.len();
        let mailbox = Arc::new(FrameMailbox::default());
        let requested = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&requested);
        let mut anim = StrokeAnimation::new(character, opts)?
            .with_redraw(move || flag.store(true, Ordering::Release));
        mailbox.publish(anim.snapshot());

        let out = Arc::clone(&mailbox);
        let handle = ticker.schedule_periodic(
            interval,
            Box::new(move || {
                anim.tick();
                if requested.swap(false, Ordering::AcqRel) {
                    out.publish(anim.snapshot());
                }
            }),
        )?;

        tracing::info!(strokes, interval_ms = interval.as_millis() as u64, "playback started");
        Ok(Self {
            ticker: Some(ticker),
            handle,
            mailbox,
        })
    }

    /// Most recently published frame.
    pub fn latest_frame(&self) -> Option<FrameSnapshot> {
        self.mailbox.lock().clone()
    }

    /// Take the pending frame, leaving the mailbox empty until the next tick.
    pub fn take_frame(&self) -> Option<FrameSnapshot> {
        self.mailbox.lock().take()
    }

    /// Block until a frame is pending or `timeout` elapses, then take it.
    pub fn wait_frame(&self, timeout: Duration) -> Option<FrameSnapshot> {
        let guard = self.mailbox.lock();
        let (mut guard, _) = self
            .mailbox
            .ready
            .wait_timeout_while(guard, timeout, |slot| slot.is_none())
            .unwrap_or_else(|e| e.into_inner());
        guard.take()
    }

    /// Access the tick source, e.g. to fire a [`crate::ManualTicker`].
    pub fn ticker_mut(&mut self) -> Option<&mut T> {
        self.ticker.as_mut()
    }

    /// Cancel the registration and hand the tick source back.
    pub fn stop(mut self) -> Option<T> {
        self.cancel();
        self.ticker.take()
    }

    fn cancel(&mut self) {
        if let Some(ticker) = self.ticker.as_mut() {
            ticker.cancel(self.handle);
            tracing::info!("playback stopped");
        }
    }
}

impl<T: TickSource> Drop for AnimationPlayer<T> {
    fn drop(&mut self) {
        if self.ticker.is_some() {
            self.cancel();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/player.rs"]
mod tests;
