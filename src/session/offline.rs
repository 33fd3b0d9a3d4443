//! Offline rendering on a simulated clock.
//!
//! The scheduler is driven with virtual timestamps `tick_interval` apart, so pauses cost exactly
//! `pause / tick_interval` ticks and the output is deterministic.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::animation::opts::AnimationOpts;
use crate::animation::scheduler::{StrokeAnimation, TickOutcome};
use crate::character::model::Character;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{StrokeError, StrokeResult};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuSurface;
use crate::render::passes::{FrameSnapshot, render_frame};

/// Options for sampling and rasterizing a cycle.
#[derive(Clone, Debug)]
pub struct OfflineOpts {
    /// Keep one frame every `frame_every` ticks (tick 0 included).
    pub frame_every: u32,
    /// Rasterize frames on a rayon pool.
    pub parallel: bool,
    /// Override rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Give up if a cycle has not finished after this many ticks.
    pub max_ticks: u64,
}

impl Default for OfflineOpts {
    fn default() -> Self {
        Self {
            frame_every: 1,
            parallel: false,
            threads: None,
            max_ticks: 1_000_000,
        }
    }
}

/// Counters for one sampled cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Ticks processed, trailing pause included.
    pub ticks: u64,
    /// Frames sampled.
    pub frames: u64,
    /// Ticks spent inside inter-stroke pauses.
    pub paused_ticks: u64,
}

struct VirtualClock {
    now: Instant,
    step: Duration,
}

impl VirtualClock {
    fn new(step: Duration) -> Self {
        Self {
            now: Instant::now(),
            step,
        }
    }

    fn tick(&mut self, anim: &mut StrokeAnimation) -> TickOutcome {
        self.now += self.step;
        anim.tick_at(self.now)
    }
}

/// Run one full cycle and keep every `frame_every`-th state.
///
/// The cycle ends once the scheduler wrapped around and any pause carried over from the last
/// stroke has elapsed, so looping the frames reproduces the live animation.
pub fn sample_cycle(
    character: &Character,
    opts: &AnimationOpts,
    offline: &OfflineOpts,
) -> StrokeResult<(Vec<FrameSnapshot>, CycleStats)> {
    if offline.frame_every == 0 {
        return Err(StrokeError::validation("frame_every must be >= 1"));
    }
    let mut anim = StrokeAnimation::new(character.clone(), opts.clone())?;
    let mut clock = VirtualClock::new(opts.tick_interval());
    let every = u64::from(offline.frame_every);

    let mut stats = CycleStats::default();
    let mut frames = vec![anim.snapshot()];
    let mut wrapped = false;

    loop {
        if stats.ticks >= offline.max_ticks {
            return Err(StrokeError::validation(format!(
                "cycle did not finish within {} ticks",
                offline.max_ticks
            )));
        }
        let outcome = clock.tick(&mut anim);
        match outcome {
            TickOutcome::Paused => stats.paused_ticks += 1,
            TickOutcome::CycleRestarted => wrapped = true,
            // First progress of the next cycle: not part of this one.
            _ if wrapped => break,
            _ => {}
        }
        stats.ticks += 1;

        if wrapped && !anim.state().pending_pause && outcome != TickOutcome::Paused {
            break;
        }
        if stats.ticks % every == 0 {
            frames.push(anim.snapshot());
        }
    }

    stats.frames = frames.len() as u64;
    anim.close();
    Ok((frames, stats))
}

/// Advance a fresh animation by `ticks` simulated ticks and return its state.
pub fn snapshot_after(
    character: &Character,
    opts: &AnimationOpts,
    ticks: u64,
) -> StrokeResult<FrameSnapshot> {
    let mut anim = StrokeAnimation::new(character.clone(), opts.clone())?;
    let mut clock = VirtualClock::new(opts.tick_interval());
    for _ in 0..ticks {
        clock.tick(&mut anim);
    }
    Ok(anim.snapshot())
}

/// Rasterize one snapshot on a fresh CPU surface.
pub fn rasterize_snapshot(snap: &FrameSnapshot, opts: &AnimationOpts) -> StrokeResult<FrameRGBA> {
    let mut surface = CpuSurface::new(opts.canvas, opts.background)?;
    render_frame(snap.view(), &opts.palette, opts.canvas, &mut surface);
    Ok(surface.finish())
}

/// Rasterize snapshots in order, optionally on a rayon pool.
pub fn rasterize_all(
    snaps: &[FrameSnapshot],
    opts: &AnimationOpts,
    offline: &OfflineOpts,
) -> StrokeResult<Vec<FrameRGBA>> {
    if !offline.parallel {
        let mut surface = CpuSurface::new(opts.canvas, opts.background)?;
        return Ok(snaps
            .iter()
            .map(|snap| {
                render_frame(snap.view(), &opts.palette, opts.canvas, &mut surface);
                surface.finish()
            })
            .collect());
    }

    opts.canvas.validate()?;
    let pool = build_thread_pool(offline.threads)?;
    pool.install(|| {
        snaps
            .par_iter()
            .map_init(
                || CpuSurface::new(opts.canvas, opts.background),
                |surface, snap| -> StrokeResult<FrameRGBA> {
                    let surface = surface
                        .as_mut()
                        .map_err(|e| StrokeError::render(e.to_string()))?;
                    render_frame(snap.view(), &opts.palette, opts.canvas, surface);
                    Ok(surface.finish())
                },
            )
            .collect::<StrokeResult<Vec<_>>>()
    })
}

/// Sample one cycle, rasterize it and stream the frames into `sink`.
#[tracing::instrument(skip_all, fields(strokes = character.len(), frame_every = offline.frame_every))]
pub fn render_cycle(
    character: &Character,
    opts: &AnimationOpts,
    offline: &OfflineOpts,
    sink: &mut dyn FrameSink,
) -> StrokeResult<CycleStats> {
    let (snaps, stats) = sample_cycle(character, opts, offline)?;
    let frames = rasterize_all(&snaps, opts, offline)?;

    sink.begin(SinkConfig {
        width: opts.canvas.width,
        height: opts.canvas.height,
        frame_delay: opts.tick_interval() * offline.frame_every,
    })?;
    for (i, frame) in frames.iter().enumerate() {
        sink.push_frame(i as u64, frame)?;
    }
    sink.end()?;

    tracing::debug!(
        ticks = stats.ticks,
        frames = stats.frames,
        paused_ticks = stats.paused_ticks,
        "cycle rendered"
    );
    Ok(stats)
}

fn build_thread_pool(threads: Option<usize>) -> StrokeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StrokeError::validation("'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| StrokeError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/offline.rs"]
mod tests;
