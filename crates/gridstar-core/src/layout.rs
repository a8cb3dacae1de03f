//! Plain-text grid layouts.
//!
//! A layout is a block of equally wide lines using these glyphs:
//!
//! | Glyph | Meaning |
//! |---|---|
//! | `.` | free cell |
//! | `#` | blocked cell |
//! | `S` | start (free) |
//! | `G` | goal (free) |
//!
//! Blank lines are skipped, so layouts can be written as indented string
//! literals. [`render`] writes the same glyphs back, plus `*` for path cells.

use thiserror::Error;

use crate::geom::Coord;
use crate::grid::Grid;

pub const FREE: char = '.';
pub const BLOCKED: char = '#';
pub const START: char = 'S';
pub const GOAL: char = 'G';
pub const PATH: char = '*';

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A line's width differs from the first line's.
    #[error("layout line {line} has width {found}, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside the layout alphabet.
    #[error("layout contains invalid character \u{201c}{ch}\u{201d} at {coord}")]
    InvalidChar { ch: char, coord: Coord },
    /// `S` or `G` appears more than once.
    #[error("layout marker \u{201c}{ch}\u{201d} appears at {first} and again at {second}")]
    DuplicateMarker {
        ch: char,
        first: Coord,
        second: Coord,
    },
}

/// A grid together with its designated endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub grid: Grid,
    pub start: Option<Coord>,
    pub goal: Option<Coord>,
}

impl Layout {
    /// Parse a layout from text.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let cols = lines.first().map_or(0, |l| l.chars().count());
        for (i, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(LayoutError::InconsistentWidth {
                    line: i,
                    expected: cols,
                    found,
                });
            }
        }

        let mut grid = Grid::new(lines.len() as i32, cols as i32);
        let mut start = None;
        let mut goal = None;

        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let coord = Coord::new(row as i32, col as i32);
                match ch {
                    FREE => {}
                    BLOCKED => {
                        grid.set_blocked(coord, true);
                    }
                    START => place_marker(&mut start, ch, coord)?,
                    GOAL => place_marker(&mut goal, ch, coord)?,
                    _ => return Err(LayoutError::InvalidChar { ch, coord }),
                }
            }
        }

        Ok(Self { grid, start, goal })
    }

    /// Render this layout, marking `path` cells with `*`.
    pub fn render(&self, path: &[Coord]) -> String {
        render(&self.grid, self.start, self.goal, path)
    }
}

fn place_marker(slot: &mut Option<Coord>, ch: char, coord: Coord) -> Result<(), LayoutError> {
    if let Some(first) = *slot {
        return Err(LayoutError::DuplicateMarker {
            ch,
            first,
            second: coord,
        });
    }
    *slot = Some(coord);
    Ok(())
}

/// Render `grid` as layout text. Endpoints take precedence over path
/// marks, and path marks over obstacles.
pub fn render(grid: &Grid, start: Option<Coord>, goal: Option<Coord>, path: &[Coord]) -> String {
    let mut out = String::with_capacity(grid.len() + grid.rows() as usize);
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let c = Coord::new(row, col);
            let ch = if Some(c) == start {
                START
            } else if Some(c) == goal {
                GOAL
            } else if path.contains(&c) {
                PATH
            } else if grid.is_blocked(c) {
                BLOCKED
            } else {
                FREE
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
