use crate::foundation::error::{StrokeError, StrokeResult};
use crate::stroke::parse::parse_strokes;
use crate::stroke::record::StrokeRecord;

/// Ordered strokes of one character; vector order is drawing order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Character {
    strokes: Vec<StrokeRecord>,
}

impl Character {
    /// Parse a stroke description.
    ///
    /// Fails when the description is unusable or yields no stroke at all.
    pub fn from_description(description: &str) -> StrokeResult<Self> {
        Self::from_strokes(parse_strokes(description)?)
    }

    /// Wrap already-parsed strokes. At least one stroke is required.
    pub fn from_strokes(mut strokes: Vec<StrokeRecord>) -> StrokeResult<Self> {
        if strokes.is_empty() {
            return Err(StrokeError::parse("no stroke data available"));
        }
        for s in &mut strokes {
            s.set_revealed(false);
        }
        Ok(Self { strokes })
    }

    /// Number of strokes (always at least one).
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Strokes in drawing order.
    pub fn strokes(&self) -> &[StrokeRecord] {
        &self.strokes
    }

    /// Stroke at `index`, if any.
    pub fn stroke(&self, index: usize) -> Option<&StrokeRecord> {
        self.strokes.get(index)
    }

    /// Number of strokes flagged as fully drawn.
    pub fn revealed_count(&self) -> usize {
        self.strokes.iter().filter(|s| s.revealed()).count()
    }

    pub(crate) fn mark_revealed(&mut self, index: usize) {
        if let Some(s) = self.strokes.get_mut(index) {
            s.set_revealed(true);
        }
    }

    pub(crate) fn reset_revealed(&mut self) {
        for s in &mut self.strokes {
            s.set_revealed(false);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/character/model.rs"]
mod tests;
