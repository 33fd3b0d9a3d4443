//! Strokeorder animates how a CJK character is written, one stroke at a time.
//!
//! A character arrives as a compact stroke description (`"1N0:x,y,...#2PR:..."`). The engine
//! parses it into a [`Character`], reveals each stroke with a sweeping clip window driven by a
//! [`StrokeAnimation`], and draws frames through the [`RenderSurface`] seam:
//!
//! - Parse a description with [`parse_strokes`] or [`Character::from_description`]
//! - Drive a [`StrokeAnimation`] from any [`TickSource`], or play it with [`AnimationPlayer`]
//! - Rasterize frames on the CPU with [`CpuSurface`] and stream them into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod character;
pub(crate) mod encode;
pub(crate) mod render;
pub(crate) mod reveal;
pub(crate) mod session;
pub(crate) mod store;
pub(crate) mod stroke;

pub use crate::foundation::core::{
    BezPath, CANONICAL_CANVAS_SIDE, Canvas, ClipRect, Point, Rect, Rgb, StrokePoint,
};
pub use crate::foundation::error::{StrokeError, StrokeResult};

pub use crate::animation::opts::{AnimationOpts, ENV_PAUSE_MS, ENV_TICK_MS};
pub use crate::animation::scheduler::{
    AnimationPhase, AnimationState, StrokeAnimation, TickOutcome,
};
pub use crate::animation::ticker::{
    ManualTicker, ThreadTicker, TickCallback, TickHandle, TickSource,
};
pub use crate::character::model::Character;
pub use crate::encode::sink::{FrameSink, GifSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::passes::{FrameSnapshot, FrameView, Palette, render_frame};
pub use crate::render::surface::{NoRedraw, RedrawRequester, RenderSurface};
pub use crate::reveal::geometry::{Reveal, Sweep, reveal_stroke};
pub use crate::session::offline::{
    CycleStats, OfflineOpts, rasterize_all, rasterize_snapshot, render_cycle, sample_cycle,
    snapshot_after,
};
pub use crate::session::player::AnimationPlayer;
pub use crate::store::table::{StrokeSource, StrokeTable};
pub use crate::stroke::parse::{
    DropReason, DroppedSegment, ParsedStrokes, STROKE_DELIMITER, parse_strokes,
    parse_strokes_with_report,
};
pub use crate::stroke::record::{Bounds, Direction, StrokeRecord};
