use crate::foundation::core::{ClipRect, Rgb, StrokePoint};

/// Drawable surface lent to the engine for the duration of one redraw.
///
/// The engine never owns a drawing context; hosts adapt whatever toolkit surface they have.
pub trait RenderSurface {
    /// Fill the closed polygon through `points` (the last vertex connects back to the first).
    fn fill_polygon(&mut self, points: &[StrokePoint], color: Rgb);

    /// Restrict subsequent fills to `rect` (intersected with any active clip).
    fn clip_to_rect(&mut self, rect: ClipRect);

    /// Drop every clip pushed with [`RenderSurface::clip_to_rect`].
    fn clear_clip(&mut self);
}

/// Host hook asking for a new frame to be presented.
///
/// Called exactly once per scheduler tick; coalescing is up to the host.
pub trait RedrawRequester: Send {
    /// Schedule a redraw.
    fn request_redraw(&mut self);
}

impl<F> RedrawRequester for F
where
    F: FnMut() + Send,
{
    fn request_redraw(&mut self) {
        self()
    }
}

/// Requester that ignores every request, for hosts that redraw unconditionally.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRedraw;

impl RedrawRequester for NoRedraw {
    fn request_redraw(&mut self) {}
}
