//! Per-redraw render pass.
//!
//! Back to front: every stroke as a template (last stroke first), then the active stroke clipped
//! to its reveal window in full color.

use crate::character::model::Character;
use crate::foundation::core::{Canvas, Rgb};
use crate::render::surface::RenderSurface;
use crate::reveal::geometry::reveal_stroke;
use crate::stroke::record::StrokeRecord;

/// Colors used by the two layers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Guide color of strokes not yet drawn in the current cycle.
    pub template: Rgb,
    /// Full-strength color of ordinary strokes.
    pub stroke: Rgb,
    /// Full-strength color of radical strokes.
    pub radical: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            template: Rgb::gray(0.7),
            stroke: Rgb::BLACK,
            radical: Rgb::RED,
        }
    }
}

impl Palette {
    /// Full-strength color for `stroke`.
    pub fn full_color(&self, stroke: &StrokeRecord) -> Rgb {
        if stroke.is_radical() {
            self.radical
        } else {
            self.stroke
        }
    }

    /// Template-layer color: full strength once revealed, guide tone before.
    pub fn template_color(&self, stroke: &StrokeRecord) -> Rgb {
        if stroke.revealed() {
            self.full_color(stroke)
        } else {
            self.template
        }
    }
}

/// Borrowed animation state needed to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    /// Strokes in drawing order, with their reveal flags.
    pub strokes: &'a [StrokeRecord],
    /// Stroke currently being revealed.
    pub current_stroke: usize,
    /// Reveal ticks spent on the current stroke.
    pub progress: u32,
}

/// Owned copy of the animation state, sendable to another thread for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Character with the reveal flags at snapshot time.
    pub character: Character,
    /// Stroke currently being revealed.
    pub current_stroke: usize,
    /// Reveal ticks spent on the current stroke.
    pub progress: u32,
    /// Ticks processed before the snapshot was taken.
    pub tick: u64,
    /// Completed animation cycles.
    pub cycle: u64,
}

impl FrameSnapshot {
    /// Borrow as a [`FrameView`].
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            strokes: self.character.strokes(),
            current_stroke: self.current_stroke,
            progress: self.progress,
        }
    }
}

/// Draw the template layer and the active stroke.
pub fn render_frame(
    view: FrameView<'_>,
    palette: &Palette,
    canvas: Canvas,
    surface: &mut dyn RenderSurface,
) {
    surface.clear_clip();

    for stroke in view.strokes.iter().rev() {
        surface.fill_polygon(stroke.points(), palette.template_color(stroke));
    }

    let Some(active) = view.strokes.get(view.current_stroke) else {
        return;
    };
    let reveal = reveal_stroke(active, view.progress, canvas);
    surface.clip_to_rect(reveal.clip);
    surface.fill_polygon(active.points(), palette.full_color(active));
    surface.clear_clip();
}

#[cfg(test)]
#[path = "../../tests/unit/render/passes.rs"]
mod tests;
