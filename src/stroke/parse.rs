//! Stroke description parser.
//!
//! A description holds every stroke of one character, separated by `#`. Each segment is
//! `<digit 1-8><P|N><R|O>:x1,y1,x2,y2,...`. Segments with a malformed header or an unknown
//! direction are dropped so the rest of the character stays renderable; a well-formed header
//! without any coordinate pair makes the whole description unusable.

use crate::foundation::core::StrokePoint;
use crate::foundation::error::{StrokeError, StrokeResult};
use crate::stroke::record::{Direction, StrokeRecord};

/// Separator between stroke segments.
pub const STROKE_DELIMITER: char = '#';

/// Why a segment was left out of the parsed stroke list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DropReason {
    /// The segment does not start with a `<digit><P|N><R|O>:` header.
    MalformedHeader,
    /// The header digit is outside `1..=8`.
    UnknownDirection {
        /// The offending digit.
        digit: u8,
    },
    /// A coordinate is not a non-negative integer.
    BadCoordinate {
        /// The offending token.
        token: String,
    },
}

/// A segment skipped during parsing.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DroppedSegment {
    /// Position of the segment in the description (0-based, empty segments counted).
    pub index: usize,
    /// Reason it was skipped.
    pub reason: DropReason,
}

/// Parser output: strokes in drawing order plus the segments that were skipped.
#[derive(Clone, Debug, Default)]
pub struct ParsedStrokes {
    /// Strokes in input order.
    pub strokes: Vec<StrokeRecord>,
    /// Skipped segments in input order.
    pub dropped: Vec<DroppedSegment>,
}

struct Header {
    direction: Direction,
    pause_after: bool,
    is_radical: bool,
}

/// Parse a description into strokes, preserving segment order.
///
/// Returns [`StrokeError::Parse`] when a segment with a valid header carries no coordinate pair.
pub fn parse_strokes(description: &str) -> StrokeResult<Vec<StrokeRecord>> {
    parse_strokes_with_report(description).map(|p| p.strokes)
}

/// Like [`parse_strokes`], additionally reporting the skipped segments.
#[tracing::instrument(level = "debug", skip(description), fields(len = description.len()))]
pub fn parse_strokes_with_report(description: &str) -> StrokeResult<ParsedStrokes> {
    let mut out = ParsedStrokes::default();

    for (index, raw) in description.split(STROKE_DELIMITER).enumerate() {
        let segment = raw.trim();
        if segment.is_empty() {
            continue;
        }

        match parse_segment(segment) {
            Ok(stroke) => out.strokes.push(stroke?),
            Err(reason) => {
                tracing::warn!(index, ?reason, "dropping stroke segment");
                out.dropped.push(DroppedSegment { index, reason });
            }
        }
    }

    tracing::debug!(
        strokes = out.strokes.len(),
        dropped = out.dropped.len(),
        "parsed stroke description"
    );
    Ok(out)
}

/// Outer `Err` drops the segment; inner `Err` fails the whole description.
fn parse_segment(segment: &str) -> Result<StrokeResult<StrokeRecord>, DropReason> {
    let (header, body) = segment
        .split_once(':')
        .ok_or(DropReason::MalformedHeader)?;
    let header = parse_header(header)?;
    let points = parse_points(body)?;

    Ok(StrokeRecord::new(
        header.direction,
        header.pause_after,
        header.is_radical,
        points,
    )
    .map_err(|_| StrokeError::parse(format!("stroke segment '{segment}' has no coordinates"))))
}

fn parse_header(header: &str) -> Result<Header, DropReason> {
    let &[d, pause, radical] = header.as_bytes() else {
        return Err(DropReason::MalformedHeader);
    };
    if !d.is_ascii_digit() {
        return Err(DropReason::MalformedHeader);
    }
    let pause_after = match pause {
        b'P' => true,
        b'N' => false,
        _ => return Err(DropReason::MalformedHeader),
    };
    let is_radical = match radical {
        b'R' => true,
        // Older stroke tables write a zero instead of the letter O.
        b'O' | b'0' => false,
        _ => return Err(DropReason::MalformedHeader),
    };
    let digit = d - b'0';
    let direction = Direction::from_digit(digit).ok_or(DropReason::UnknownDirection { digit })?;

    Ok(Header {
        direction,
        pause_after,
        is_radical,
    })
}

fn parse_points(body: &str) -> Result<Vec<StrokePoint>, DropReason> {
    let mut coords = Vec::new();
    for token in body.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let v: u32 = token.parse().map_err(|_| DropReason::BadCoordinate {
            token: token.to_string(),
        })?;
        let v = i32::try_from(v).map_err(|_| DropReason::BadCoordinate {
            token: token.to_string(),
        })?;
        coords.push(v);
    }

    // A trailing unpaired value is ignored.
    Ok(coords
        .chunks_exact(2)
        .map(|xy| StrokePoint::new(xy[0], xy[1]))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/parse.rs"]
mod tests;
