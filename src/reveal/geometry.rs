//! Reveal geometry: which part of the canvas shows the stroke being drawn.
//!
//! The stroke polygon is always filled in full; a clip rectangle that grows with progress decides
//! how much of it is visible.

use crate::foundation::core::{Canvas, ClipRect};
use crate::stroke::record::{Bounds, Direction, StrokeRecord};

/// Edge of the bounding box the reveal front moves away from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sweep {
    /// Front moves right from `xmin`.
    Rightwards,
    /// Front moves down from `ymin`.
    Downwards,
    /// Front moves left from `xmax`.
    Leftwards,
    /// Front moves up from `ymax`.
    Upwards,
}

/// Clip region for one progress value plus the completion signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Reveal {
    /// Visible window of the canvas.
    pub clip: ClipRect,
    /// `true` once the front reached the far edge of the stroke.
    pub complete: bool,
}

impl Direction {
    /// Sweep used to reveal strokes drawn in this direction.
    ///
    /// Diagonals follow their vertical component.
    pub fn sweep(self) -> Sweep {
        match self {
            Direction::LeftToRight => Sweep::Rightwards,
            Direction::DownRight | Direction::Down | Direction::DownLeft => Sweep::Downwards,
            Direction::RightToLeft => Sweep::Leftwards,
            Direction::UpLeft | Direction::Up | Direction::UpRight => Sweep::Upwards,
        }
    }
}

impl Sweep {
    /// Compute the clip window after `progress` reveal ticks.
    pub fn reveal(self, bounds: Bounds, progress: u32, canvas: Canvas) -> Reveal {
        let p = i32::try_from(progress).unwrap_or(i32::MAX);
        let (w, h) = (canvas.w(), canvas.h());
        match self {
            Sweep::Rightwards => {
                let front = bounds.xmin.saturating_add(p);
                Reveal {
                    clip: ClipRect::new(0, 0, front, h),
                    complete: front >= bounds.xmax,
                }
            }
            Sweep::Downwards => {
                let front = bounds.ymin.saturating_add(p);
                Reveal {
                    clip: ClipRect::new(0, 0, w, front),
                    complete: front >= bounds.ymax,
                }
            }
            Sweep::Leftwards => {
                let front = bounds.xmax.saturating_sub(p);
                Reveal {
                    clip: ClipRect::new(front, 0, w, h),
                    complete: front <= bounds.xmin,
                }
            }
            Sweep::Upwards => {
                let front = bounds.ymax.saturating_sub(p);
                Reveal {
                    clip: ClipRect::new(0, front, w, h),
                    complete: front <= bounds.ymin,
                }
            }
        }
    }

    /// Progress value at which the reveal completes (at least one tick).
    pub fn ticks_to_complete(self, bounds: Bounds) -> u32 {
        let span = match self {
            Sweep::Rightwards | Sweep::Leftwards => bounds.xmax - bounds.xmin,
            Sweep::Downwards | Sweep::Upwards => bounds.ymax - bounds.ymin,
        };
        u32::try_from(span).unwrap_or(0).max(1)
    }
}

/// Reveal of a parsed stroke at `progress`.
pub fn reveal_stroke(stroke: &StrokeRecord, progress: u32, canvas: Canvas) -> Reveal {
    stroke
        .direction()
        .sweep()
        .reveal(stroke.bounds(), progress, canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/geometry.rs"]
mod tests;
