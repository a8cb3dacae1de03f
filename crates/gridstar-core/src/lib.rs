//! **gridstar-core** — grid model for the gridstar path search engine.
//!
//! This crate provides the data the search reads and annotates:
//! [`Coord`] positions, [`Cell`]s with an obstacle flag and a per-search
//! [`CellCost`] record, the rectangular [`Grid`], and a small plain-text
//! [`Layout`] notation for building grids in tests and tools.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{Cell, CellCost, UNKNOWN_COST};
pub use geom::Coord;
pub use grid::Grid;
pub use layout::{Layout, LayoutError};
