//! A rectangular grid of [`Cell`]s with binary traversability.
//!
//! Obstacles are written by the editing side through [`Grid::set_blocked`];
//! a search only ever writes the per-cell [`CellCost`] records, which
//! [`Grid::reset`] clears between runs.

use crate::cell::{Cell, CellCost};
use crate::geom::Coord;

/// A `rows × cols` matrix of cells stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell free. Negative dimensions yield an
    /// empty grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        let mut cells = Vec::with_capacity((rows as usize) * (cols as usize));
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(Coord::new(row, col)));
            }
        }
        Self { rows, cols, cells }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Flat row-major index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some((c.row * self.cols + c.col) as usize)
    }

    /// Coordinate of a flat index. The index must come from [`Grid::index`].
    #[inline]
    pub fn coord_at(&self, idx: usize) -> Coord {
        let cols = self.cols.max(1) as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// The cell at `c`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, c: Coord) -> Option<&Cell> {
        self.index(c).map(|i| &self.cells[i])
    }

    /// Whether `c` is blocked. Out-of-bounds coordinates are not blocked;
    /// use [`Grid::is_open`] to test traversability.
    #[inline]
    pub fn is_blocked(&self, c: Coord) -> bool {
        self.cell(c).is_some_and(Cell::is_blocked)
    }

    /// Whether `c` is inside the grid and free.
    #[inline]
    pub fn is_open(&self, c: Coord) -> bool {
        self.cell(c).is_some_and(|cell| !cell.is_blocked())
    }

    /// Set the blocked flag of `c`. Returns `false` if `c` is out of bounds.
    pub fn set_blocked(&mut self, c: Coord, blocked: bool) -> bool {
        match self.index(c) {
            Some(i) => {
                self.cells[i].blocked = blocked;
                true
            }
            None => false,
        }
    }

    /// Append the in-bounds neighbours of `c` into `buf`, in the order up,
    /// left, right, down. Blocked cells are included; the caller filters.
    /// The caller clears `buf` before calling.
    pub fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        for n in c.neighbors_4() {
            if self.contains(n) {
                buf.push(n);
            }
        }
    }

    /// Cost record of `c`, or `None` if out of bounds.
    #[inline]
    pub fn cost(&self, c: Coord) -> Option<CellCost> {
        self.cell(c).map(Cell::cost)
    }

    /// Overwrite the cost record of `c`. Returns `false` if out of bounds.
    pub fn set_cost(&mut self, c: Coord, cost: CellCost) -> bool {
        match self.index(c) {
            Some(i) => {
                self.cells[i].cost = cost;
                true
            }
            None => false,
        }
    }

    /// Clear every cost record. Obstacles are kept.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.cost = CellCost::UNKNOWN;
        }
    }

    /// Clear every cost record and every obstacle.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.cost = CellCost::UNKNOWN;
            cell.blocked = false;
        }
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_blocked()).count()
    }

    /// Iterate over cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
