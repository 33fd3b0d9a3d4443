/// Convenience result type used across the engine.
pub type StrokeResult<T> = Result<T, StrokeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum StrokeError {
    /// Stroke description could not be turned into an animatable character.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid user-provided options or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// A character is missing from a stroke source.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Errors raised while rasterizing or encoding frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StrokeError {
    /// Build a [`StrokeError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`StrokeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StrokeError::Lookup`] value.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Build a [`StrokeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StrokeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
