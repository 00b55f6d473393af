use std::fmt;

use crate::error::{LayoutError, Result};

/// Axis along which a strip grows.
///
/// `Row` allocates weight-proportional spans along the width (children side by
/// side, sharing the height). `Column` allocates along the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Row,
    Column,
}

impl Direction {
    /// The perpendicular direction.
    pub fn transposed(self) -> Self {
        match self {
            Direction::Row => Direction::Column,
            Direction::Column => Direction::Row,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Row => f.write_str("row"),
            Direction::Column => f.write_str("column"),
        }
    }
}

/// Size of a rectangular area. Positions are only introduced by placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Like [`Rectangle::new`], but rejects negative or non-finite sides.
    pub fn try_new(width: f64, height: f64) -> Result<Self> {
        let valid = |side: f64| side.is_finite() && side >= 0.0;
        if valid(width) && valid(height) {
            Ok(Self::new(width, height))
        } else {
            Err(LayoutError::InvalidRectangle { width, height })
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Strictly wider: a square is not.
    pub fn is_wider_than_tall(&self) -> bool {
        self.width > self.height
    }

    /// The first `ratio` share of the area. A `Row` cut scales the height,
    /// a `Column` cut scales the width. `ratio` is expected in `[0, 1]`.
    pub fn portion(&self, ratio: f64, direction: Direction) -> Self {
        match direction {
            Direction::Row => Self::new(self.width, self.height * ratio),
            Direction::Column => Self::new(self.width * ratio, self.height),
        }
    }

    /// What is left after cutting off [`Rectangle::portion`].
    pub fn shaving(&self, ratio: f64, direction: Direction) -> Self {
        match direction {
            Direction::Row => Self::new(self.width, self.height * (1.0 - ratio)),
            Direction::Column => Self::new(self.width * (1.0 - ratio), self.height),
        }
    }
}
