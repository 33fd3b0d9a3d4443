//! Stroke reveal scheduler.
//!
//! One tick advances the active stroke by one unit of progress. A finished stroke is flagged as
//! revealed; if it asks for a pause, the next tick parks the scheduler until a deadline instead of
//! sleeping. After the last stroke the cycle restarts with every flag cleared, indefinitely.

use std::time::{Duration, Instant};

use crate::animation::opts::AnimationOpts;
use crate::character::model::Character;
use crate::foundation::error::StrokeResult;
use crate::render::passes::{FrameSnapshot, FrameView, render_frame};
use crate::render::surface::{NoRedraw, RedrawRequester, RenderSurface};
use crate::reveal::geometry::reveal_stroke;

/// Mutable per-character animation counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationState {
    /// Stroke being revealed; always `< strokes.len()` between ticks.
    pub current_stroke_index: usize,
    /// Reveal ticks spent on the current stroke.
    pub progress: u32,
    /// Set when the stroke just completed requested a pause not yet started.
    pub pending_pause: bool,
}

/// Coarse scheduler phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationPhase {
    /// No tick processed yet.
    Idle,
    /// Progress advances on every tick.
    Revealing,
    /// Ticks are ignored until `until`.
    Paused {
        /// Deadline after which revealing resumes.
        until: Instant,
    },
    /// Torn down; ticks are no-ops.
    Closed,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Progress of `stroke` moved to `progress`; not complete yet.
    Advanced {
        /// Active stroke index.
        stroke: usize,
        /// New progress value.
        progress: u32,
    },
    /// `stroke` finished and the next stroke became active.
    StrokeCompleted {
        /// Index of the stroke that finished.
        stroke: usize,
    },
    /// The last stroke finished; the cycle restarted at stroke 0 with all flags cleared.
    CycleRestarted,
    /// Inside an inter-stroke pause.
    Paused,
    /// The animation was closed; nothing happened.
    Closed,
}

/// Animation scheduler for one character.
pub struct StrokeAnimation {
    character: Character,
    state: AnimationState,
    phase: AnimationPhase,
    opts: AnimationOpts,
    redraw: Box<dyn RedrawRequester>,
    ticks: u64,
    cycles: u64,
}

impl std::fmt::Debug for StrokeAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeAnimation")
            .field("strokes", &self.character.len())
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("ticks", &self.ticks)
            .field("cycles", &self.cycles)
            .finish()
    }
}

impl StrokeAnimation {
    /// Create a scheduler at stroke 0 with nothing revealed.
    pub fn new(mut character: Character, opts: AnimationOpts) -> StrokeResult<Self> {
        opts.validate()?;
        character.reset_revealed();
        Ok(Self {
            character,
            state: AnimationState::default(),
            phase: AnimationPhase::Idle,
            opts,
            redraw: Box::new(NoRedraw),
            ticks: 0,
            cycles: 0,
        })
    }

    /// Route redraw requests to `redraw`.
    pub fn with_redraw(mut self, redraw: impl RedrawRequester + 'static) -> Self {
        self.redraw = Box::new(redraw);
        self
    }

    /// Character with its current reveal flags.
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Current counters.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Current phase.
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Options the scheduler runs with.
    pub fn opts(&self) -> &AnimationOpts {
        &self.opts
    }

    /// Ticks processed so far (closed ticks excluded).
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of completed cycles.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    /// Whether [`StrokeAnimation::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.phase == AnimationPhase::Closed
    }

    /// Stop the animation. Later ticks do nothing and request no redraw.
    pub fn close(&mut self) {
        if !self.is_closed() {
            tracing::debug!(ticks = self.ticks, cycles = self.cycles, "animation closed");
        }
        self.phase = AnimationPhase::Closed;
    }

    /// Advance using the wall clock.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_at(Instant::now())
    }

    /// Advance as if the tick fired at `now`.
    ///
    /// Every tick on an open animation requests exactly one redraw.
    pub fn tick_at(&mut self, now: Instant) -> TickOutcome {
        if self.is_closed() {
            return TickOutcome::Closed;
        }
        self.ticks += 1;
        let outcome = self.advance(now);
        tracing::trace!(tick = self.ticks, ?outcome, "tick");
        self.redraw.request_redraw();
        outcome
    }

    fn advance(&mut self, now: Instant) -> TickOutcome {
        match self.phase {
            AnimationPhase::Paused { until } if now < until => return TickOutcome::Paused,
            AnimationPhase::Closed => return TickOutcome::Closed,
            AnimationPhase::Idle | AnimationPhase::Paused { .. } | AnimationPhase::Revealing => {
                self.phase = AnimationPhase::Revealing;
            }
        }

        if self.state.pending_pause {
            self.state.pending_pause = false;
            self.phase = AnimationPhase::Paused {
                until: now + self.opts.pause(),
            };
            return TickOutcome::Paused;
        }

        let index = self.state.current_stroke_index;
        let Some(stroke) = self.character.stroke(index) else {
            // Unreachable while the index invariant holds; recover by restarting.
            self.restart_cycle();
            return TickOutcome::CycleRestarted;
        };

        self.state.progress = self.state.progress.saturating_add(1);
        let reveal = reveal_stroke(stroke, self.state.progress, self.opts.canvas);
        if !reveal.complete {
            return TickOutcome::Advanced {
                stroke: index,
                progress: self.state.progress,
            };
        }

        let pause_after = stroke.pause_after();
        self.character.mark_revealed(index);
        if pause_after {
            self.state.pending_pause = true;
        }
        self.state.current_stroke_index += 1;
        self.state.progress = 0;

        if self.state.current_stroke_index >= self.character.len() {
            self.restart_cycle();
            return TickOutcome::CycleRestarted;
        }
        TickOutcome::StrokeCompleted { stroke: index }
    }

    fn restart_cycle(&mut self) {
        self.state.current_stroke_index = 0;
        self.state.progress = 0;
        self.character.reset_revealed();
        self.cycles += 1;
        tracing::debug!(cycle = self.cycles, "stroke cycle restarted");
    }

    /// Time left in the current pause, if paused at `now`.
    pub fn pause_remaining(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            AnimationPhase::Paused { until } if now < until => Some(until - now),
            _ => None,
        }
    }

    /// Borrow the drawable state.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            strokes: self.character.strokes(),
            current_stroke: self.state.current_stroke_index,
            progress: self.state.progress,
        }
    }

    /// Copy the drawable state for use on another thread.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            character: self.character.clone(),
            current_stroke: self.state.current_stroke_index,
            progress: self.state.progress,
            tick: self.ticks,
            cycle: self.cycles,
        }
    }

    /// Draw the current frame onto `surface`.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        render_frame(self.view(), &self.opts.palette, self.opts.canvas, surface);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
