use crate::foundation::core::{BezPath, StrokePoint};
use crate::foundation::error::{StrokeError, StrokeResult};

/// Drawing direction of a single stroke, numbered 1..=8 clockwise starting at left-to-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `1`: horizontal, drawn rightwards.
    LeftToRight,
    /// `2`: diagonal, drawn down and to the right.
    DownRight,
    /// `3`: vertical, drawn downwards.
    Down,
    /// `4`: diagonal, drawn down and to the left.
    DownLeft,
    /// `5`: horizontal, drawn leftwards.
    RightToLeft,
    /// `6`: diagonal, drawn up and to the left.
    UpLeft,
    /// `7`: vertical, drawn upwards.
    Up,
    /// `8`: diagonal, drawn up and to the right.
    UpRight,
}

impl Direction {
    /// All directions in header-digit order.
    pub const ALL: [Direction; 8] = [
        Direction::LeftToRight,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::RightToLeft,
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
    ];

    /// Map a header digit (`1..=8`) to a direction.
    pub fn from_digit(d: u8) -> Option<Self> {
        match d {
            1..=8 => Some(Self::ALL[usize::from(d - 1)]),
            _ => None,
        }
    }

    /// Header digit for this direction.
    pub fn digit(self) -> u8 {
        match self {
            Self::LeftToRight => 1,
            Self::DownRight => 2,
            Self::Down => 3,
            Self::DownLeft => 4,
            Self::RightToLeft => 5,
            Self::UpLeft => 6,
            Self::Up => 7,
            Self::UpRight => 8,
        }
    }
}

/// Axis-aligned bounding box of a stroke polygon (inclusive on all sides).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Smallest x.
    pub xmin: i32,
    /// Largest x.
    pub xmax: i32,
    /// Smallest y.
    pub ymin: i32,
    /// Largest y.
    pub ymax: i32,
}

impl Bounds {
    /// Scan `points` once; `None` when empty.
    pub fn from_points(points: &[StrokePoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Self {
            xmin: first.x,
            xmax: first.x,
            ymin: first.y,
            ymax: first.y,
        };
        Some(rest.iter().fold(init, |b, p| Self {
            xmin: b.xmin.min(p.x),
            xmax: b.xmax.max(p.x),
            ymin: b.ymin.min(p.y),
            ymax: b.ymax.max(p.y),
        }))
    }

    /// Return `true` when `p` lies inside the box, edges included.
    pub fn contains(self, p: StrokePoint) -> bool {
        self.xmin <= p.x && p.x <= self.xmax && self.ymin <= p.y && p.y <= self.ymax
    }
}

/// One parsed stroke: typed header, polygon and animation status.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StrokeRecord {
    direction: Direction,
    pause_after: bool,
    is_radical: bool,
    points: Vec<StrokePoint>,
    bounds: Bounds,
    revealed: bool,
}

impl StrokeRecord {
    /// Build a record, computing its bounds. Fails when `points` is empty.
    pub fn new(
        direction: Direction,
        pause_after: bool,
        is_radical: bool,
        points: Vec<StrokePoint>,
    ) -> StrokeResult<Self> {
        let bounds = Bounds::from_points(&points)
            .ok_or_else(|| StrokeError::parse("stroke has no coordinate pairs"))?;
        Ok(Self {
            direction,
            pause_after,
            is_radical,
            points,
            bounds,
            revealed: false,
        })
    }

    /// Drawing direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a timed pause follows the full reveal of this stroke.
    pub fn pause_after(&self) -> bool {
        self.pause_after
    }

    /// Whether this stroke belongs to the character's radical.
    pub fn is_radical(&self) -> bool {
        self.is_radical
    }

    /// Polygon vertices in description order.
    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    /// Bounding box computed at construction.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether the reveal animation of this stroke completed in the current cycle.
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub(crate) fn set_revealed(&mut self, revealed: bool) {
        self.revealed = revealed;
    }

    /// Closed polygon outline: move to the last vertex, then line to every vertex in order.
    pub fn outline(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some(last) = self.points.last() {
            path.move_to(last.to_point());
            for p in &self.points {
                path.line_to(p.to_point());
            }
            path.close_path();
        }
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/record.rs"]
mod tests;
