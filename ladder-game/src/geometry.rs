//! Integer ladder geometry and its projection onto normalized coordinates.
//!
//! Every point on a ladder is addressed by `(rail, row)`. Row `0` is the top of
//! each rail and row `steps + 1` the bottom; rungs live on rows `1..=steps`.
//! Floats only appear when a [`Projection`] maps points into the unit square
//! for a renderer.

use serde::{Deserialize, Serialize};

use crate::constants::TOP_ROW;
use crate::numbers::unit_fraction;

/// A junction on the ladder grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub rail: usize,
    pub row: u8,
}

impl Point {
    #[must_use]
    pub const fn new(rail: usize, row: u8) -> Self {
        Self { rail, row }
    }
}

/// A vertical rail a player's token travels down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rail {
    pub index: usize,
    pub bottom_row: u8,
}

impl Rail {
    #[must_use]
    pub const fn top(self) -> Point {
        Point::new(self.index, TOP_ROW)
    }

    #[must_use]
    pub const fn bottom(self) -> Point {
        Point::new(self.index, self.bottom_row)
    }
}

/// A horizontal connector between rail `gap` and rail `gap + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rung {
    pub gap: usize,
    pub row: u8,
}

impl Rung {
    #[must_use]
    pub const fn new(gap: usize, row: u8) -> Self {
        Self { gap, row }
    }

    #[must_use]
    pub const fn left(self) -> usize {
        self.gap
    }

    #[must_use]
    pub const fn right(self) -> usize {
        self.gap + 1
    }

    /// Left endpoint.
    #[must_use]
    pub const fn start(self) -> Point {
        Point::new(self.left(), self.row)
    }

    /// Right endpoint.
    #[must_use]
    pub const fn end(self) -> Point {
        Point::new(self.right(), self.row)
    }

    #[must_use]
    pub const fn touches(self, rail: usize) -> bool {
        rail == self.left() || rail == self.right()
    }

    /// The rail across the rung from `rail`, if the rung touches it.
    #[must_use]
    pub const fn across_from(self, rail: usize) -> Option<usize> {
        if rail == self.left() {
            Some(self.right())
        } else if rail == self.right() {
            Some(self.left())
        } else {
            None
        }
    }
}

/// A point in the unit square, `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

/// A straight line between two normalized points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: NormalizedPoint,
    pub end: NormalizedPoint,
}

/// Maps grid points of one ladder into normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    rail_count: usize,
    steps: u8,
}

impl Projection {
    #[must_use]
    pub const fn new(rail_count: usize, steps: u8) -> Self {
        Self { rail_count, steps }
    }

    /// `x = (rail + 1) / (rail_count + 1)`
    #[must_use]
    pub fn x(&self, rail: usize) -> f32 {
        unit_fraction(rail + 1, self.rail_count + 1)
    }

    /// `y = row / (steps + 1)`
    #[must_use]
    pub fn y(&self, row: u8) -> f32 {
        unit_fraction(usize::from(row), usize::from(self.steps) + 1)
    }

    #[must_use]
    pub fn point(&self, point: Point) -> NormalizedPoint {
        NormalizedPoint {
            x: self.x(point.rail),
            y: self.y(point.row),
        }
    }

    #[must_use]
    pub fn segment(&self, start: Point, end: Point) -> Segment {
        Segment {
            start: self.point(start),
            end: self.point(end),
        }
    }
}
