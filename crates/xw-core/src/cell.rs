//! Discrete grid coordinates.
//!
//! `x` grows to the right (the direction of vehicle travel), `y` grows away
//! from row 0.  Coordinates are unsigned; a step past the right edge yields a
//! cell with `x == width`, which callers treat as "left the grid".

use std::fmt;

/// A cell of the intersection grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `heading`.
    ///
    /// Returns `None` when the step would leave the grid through row 0 or
    /// column 0.  Steps toward larger coordinates always succeed; bounds on
    /// that side are checked by the grid.
    #[inline]
    pub fn neighbor(self, heading: Heading) -> Option<Cell> {
        match heading {
            Heading::East  => Some(Cell::new(self.x + 1, self.y)),
            Heading::West  => self.x.checked_sub(1).map(|x| Cell::new(x, self.y)),
            Heading::South => Some(Cell::new(self.x, self.y + 1)),
            Heading::North => self.y.checked_sub(1).map(|y| Cell::new(self.x, y)),
        }
    }

    /// The cell directly to the right.
    #[inline]
    pub fn east(self) -> Cell {
        Cell::new(self.x + 1, self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four grid directions.  `North` points toward row 0.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    East,
    West,
    North,
    South,
}

impl Heading {
    /// Horizontal heading that brings `from_x` closer to `to_x`, or `None`
    /// if they are equal.
    pub fn toward_x(from_x: u32, to_x: u32) -> Option<Heading> {
        match from_x.cmp(&to_x) {
            std::cmp::Ordering::Less    => Some(Heading::East),
            std::cmp::Ordering::Greater => Some(Heading::West),
            std::cmp::Ordering::Equal   => None,
        }
    }

    /// Vertical heading that brings `from_y` closer to `to_y`, or `None`
    /// if they are equal.
    pub fn toward_y(from_y: u32, to_y: u32) -> Option<Heading> {
        match from_y.cmp(&to_y) {
            std::cmp::Ordering::Less    => Some(Heading::South),
            std::cmp::Ordering::Greater => Some(Heading::North),
            std::cmp::Ordering::Equal   => None,
        }
    }
}
