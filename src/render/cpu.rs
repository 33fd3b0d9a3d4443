use crate::foundation::core::{Canvas, ClipRect, Rgb, StrokePoint};
use crate::foundation::error::{StrokeError, StrokeResult};
use crate::render::backend::FrameRGBA;
use crate::render::surface::RenderSurface;

/// CPU raster surface powered by `vello_cpu`.
///
/// Draw calls are recorded into a render context; [`CpuSurface::finish`] rasterizes them into a
/// [`FrameRGBA`] and starts a fresh frame on the background color.
pub struct CpuSurface {
    width: u16,
    height: u16,
    background: [u8; 4],
    ctx: vello_cpu::RenderContext,
    clip_depth: usize,
}

impl CpuSurface {
    /// Create a surface covering `canvas`, cleared to straight RGBA8 `background`.
    pub fn new(canvas: Canvas, background: [u8; 4]) -> StrokeResult<Self> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| StrokeError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| StrokeError::render("surface height exceeds u16"))?;

        let mut surface = Self {
            width,
            height,
            background,
            ctx: vello_cpu::RenderContext::new(width, height),
            clip_depth: 0,
        };
        surface.begin_frame();
        Ok(surface)
    }

    /// Surface size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    fn begin_frame(&mut self) {
        self.ctx.reset();
        self.clip_depth = 0;
        let [r, g, b, a] = self.background;
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    /// Rasterize everything drawn since the last call and reset for the next frame.
    pub fn finish(&mut self) -> FrameRGBA {
        self.clear_clip();
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        let frame = FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        };
        self.begin_frame();
        frame
    }
}

impl RenderSurface for CpuSurface {
    fn fill_polygon(&mut self, points: &[StrokePoint], color: Rgb) {
        let Some(last) = points.last() else {
            return;
        };
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(*last));
        for p in points {
            path.line_to(point_to_cpu(*p));
        }
        path.close_path();

        let [r, g, b, a] = color.to_rgba8();
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_path(&path);
    }

    fn clip_to_rect(&mut self, rect: ClipRect) {
        let r = rect.to_rect();
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to((r.x0, r.y0));
        path.line_to((r.x1, r.y0));
        path.line_to((r.x1, r.y1));
        path.line_to((r.x0, r.y1));
        path.close_path();
        self.ctx.push_clip_layer(&path);
        self.clip_depth += 1;
    }

    fn clear_clip(&mut self) {
        while self.clip_depth > 0 {
            self.ctx.pop_layer();
            self.clip_depth -= 1;
        }
    }
}

fn point_to_cpu(p: StrokePoint) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(f64::from(p.x), f64::from(p.y))
}
