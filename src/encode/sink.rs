use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{StrokeError, StrokeResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Display time of each frame.
    pub frame_delay: Duration,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called with strictly increasing indices starting at 0.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> StrokeResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> StrokeResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> StrokeResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> StrokeResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> StrokeResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> StrokeResult<()> {
        Ok(())
    }
}

fn check_size(cfg: Option<&SinkConfig>, frame: &FrameRGBA) -> StrokeResult<()> {
    let cfg = cfg.ok_or_else(|| StrokeError::render("push_frame called before begin"))?;
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(StrokeError::render(format!(
            "frame is {}x{}, sink expects {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    Ok(())
}

/// Writes every frame as `<prefix>_<index:05>.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    cfg: Option<SinkConfig>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            cfg: None,
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> StrokeResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> StrokeResult<()> {
        check_size(self.cfg.as_ref(), frame)?;
        let path = self.dir.join(format!("{}_{idx:05}.png", self.prefix));
        image::save_buffer_with_format(
            &path,
            &frame.to_straight_rgba8(),
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> StrokeResult<()> {
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Encodes all frames into one looping animated GIF.
pub struct GifSink {
    path: PathBuf,
    cfg: Option<SinkConfig>,
    encoder: Option<image::codecs::gif::GifEncoder<BufWriter<File>>>,
    frames: u64,
}

impl GifSink {
    /// Create a sink writing to `path` (parent directories created on `begin`).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cfg: None,
            encoder: None,
            frames: 0,
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> StrokeResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let file = File::create(&self.path)
            .with_context(|| format!("create gif '{}'", self.path.display()))?;
        let mut encoder = image::codecs::gif::GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(image::codecs::gif::Repeat::Infinite)
            .map_err(|e| StrokeError::render(format!("gif setup failed: {e}")))?;
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.frames = 0;
        Ok(())
    }

    fn push_frame(&mut self, _idx: u64, frame: &FrameRGBA) -> StrokeResult<()> {
        check_size(self.cfg.as_ref(), frame)?;
        let delay = self
            .cfg
            .as_ref()
            .map(|c| c.frame_delay)
            .unwrap_or_default();
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| StrokeError::render("push_frame called before begin"))?;
        let buf = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
            .ok_or_else(|| StrokeError::render("frame byte length mismatch"))?;
        encoder
            .encode_frame(image::Frame::from_parts(
                buf,
                0,
                0,
                image::Delay::from_saturating_duration(delay),
            ))
            .map_err(|e| StrokeError::render(format!("gif encode failed: {e}")))?;
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> StrokeResult<()> {
        // Dropping the encoder writes the trailer.
        self.encoder = None;
        tracing::debug!(frames = self.frames, path = %self.path.display(), "gif written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
