//! Grid coordinates: [`Coord`].
//!
//! Rows grow downward and columns grow to the right, so `(0, 0)` is the
//! top-left cell of a grid.

use std::fmt;
use std::ops::{Add, Sub};

/// A cell position addressed by `(row, col)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four axis-aligned neighbours in expansion order: up, left,
    /// right, down. Bounds are not checked.
    #[inline]
    pub const fn neighbors_4(self) -> [Coord; 4] {
        [
            self.shift(-1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
            self.shift(1, 0),
        ]
    }

    /// Whether `other` is exactly one axis-aligned step away.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_follow_up_left_right_down() {
        let c = Coord::new(2, 3);
        assert_eq!(
            c.neighbors_4(),
            [
                Coord::new(1, 3),
                Coord::new(2, 2),
                Coord::new(2, 4),
                Coord::new(3, 3),
            ]
        );
    }

    #[test]
    fn ordering_is_row_major() {
        let mut v = vec![Coord::new(1, 0), Coord::new(0, 5), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Coord::new(0, 1), Coord::new(0, 5), Coord::new(1, 0)]);
    }

    #[test]
    fn adjacency() {
        let c = Coord::new(4, 4);
        assert!(c.is_adjacent(Coord::new(3, 4)));
        assert!(c.is_adjacent(Coord::new(4, 5)));
        assert!(!c.is_adjacent(Coord::new(5, 5)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn arithmetic_and_display() {
        let a = Coord::new(1, 2);
        let b = Coord::new(3, -1);
        assert_eq!(a + b, Coord::new(4, 1));
        assert_eq!(a - b, Coord::new(-2, 3));
        assert_eq!(Coord::from((7, 8)), Coord::new(7, 8));
        assert_eq!(a.to_string(), "(1, 2)");
    }
}
