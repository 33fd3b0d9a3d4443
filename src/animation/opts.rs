use std::path::Path;
use std::time::Duration;

use crate::foundation::core::Canvas;
use crate::foundation::error::{StrokeError, StrokeResult};
use crate::render::passes::Palette;

/// Environment variable overriding [`AnimationOpts::tick_interval_ms`].
pub const ENV_TICK_MS: &str = "STROKEORDER_TICK_MS";
/// Environment variable overriding [`AnimationOpts::pause_ms`].
pub const ENV_PAUSE_MS: &str = "STROKEORDER_PAUSE_MS";

/// Timing, canvas and color options for one character animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationOpts {
    /// Period of the reveal tick in milliseconds.
    pub tick_interval_ms: u64,
    /// Pause inserted after strokes flagged `pause_after`, in milliseconds.
    pub pause_ms: u64,
    /// Canvas the stroke coordinates live in.
    pub canvas: Canvas,
    /// Colors of the template and active layers.
    pub palette: Palette,
    /// Straight RGBA8 clear color used by raster surfaces.
    pub background: [u8; 4],
}

impl Default for AnimationOpts {
    fn default() -> Self {
        Self {
            tick_interval_ms: 8,
            pause_ms: 500,
            canvas: Canvas::default(),
            palette: Palette::default(),
            background: [255, 255, 255, 255],
        }
    }
}

impl AnimationOpts {
    /// Tick period as a duration.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Inter-stroke pause as a duration.
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    /// Check option ranges.
    pub fn validate(&self) -> StrokeResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(StrokeError::validation("tick_interval_ms must be > 0"));
        }
        self.canvas.validate()
    }

    /// Parse and validate options from JSON text.
    pub fn from_json_str(s: &str) -> StrokeResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| StrokeError::serde(format!("invalid animation options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> StrokeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            StrokeError::validation(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Apply [`ENV_TICK_MS`] / [`ENV_PAUSE_MS`] from the process environment.
    pub fn with_env_overrides(self) -> StrokeResult<Self> {
        self.with_overrides_from(|k| std::env::var(k).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> StrokeResult<Self> {
        fn millis(key: &str, raw: String) -> StrokeResult<u64> {
            raw.trim()
                .parse::<u64>()
                .map_err(|_| StrokeError::validation(format!("{key} must be an integer, got '{raw}'")))
        }

        if let Some(v) = lookup(ENV_TICK_MS) {
            self.tick_interval_ms = millis(ENV_TICK_MS, v)?;
        }
        if let Some(v) = lookup(ENV_PAUSE_MS) {
            self.pause_ms = millis(ENV_PAUSE_MS, v)?;
        }
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/opts.rs"]
mod tests;
