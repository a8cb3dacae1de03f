//! The [`Cell`] type and its per-search [`CellCost`] record.

use crate::geom::Coord;

/// Sentinel for a cost that has not been computed in the current search.
pub const UNKNOWN_COST: i32 = i32::MAX;

/// Search bookkeeping attached to a cell.
///
/// `f` is always derived from `g` and `h` at construction, so the three
/// values cannot drift apart. Deserialisation recomputes `f` as well.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawCellCost"))]
pub struct CellCost {
    g: i32,
    h: i32,
    f: i32,
    parent: Option<Coord>,
}

impl CellCost {
    /// The reset state: every cost unknown, no parent.
    pub const UNKNOWN: Self = Self {
        g: UNKNOWN_COST,
        h: UNKNOWN_COST,
        f: UNKNOWN_COST,
        parent: None,
    };

    /// A computed cost record. `f` saturates at [`UNKNOWN_COST`].
    #[inline]
    pub const fn new(g: i32, h: i32, parent: Option<Coord>) -> Self {
        Self {
            g,
            h,
            f: g.saturating_add(h),
            parent,
        }
    }

    /// Best known cost from the start.
    #[inline]
    pub const fn g(&self) -> i32 {
        self.g
    }

    /// Heuristic estimate to the goal.
    #[inline]
    pub const fn h(&self) -> i32 {
        self.h
    }

    /// `g + h`.
    #[inline]
    pub const fn f(&self) -> i32 {
        self.f
    }

    /// Predecessor on the best known path.
    #[inline]
    pub const fn parent(&self) -> Option<Coord> {
        self.parent
    }

    /// Whether this record was written by the current search.
    #[inline]
    pub const fn is_known(&self) -> bool {
        self.g != UNKNOWN_COST
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCellCost {
    g: i32,
    h: i32,
    parent: Option<Coord>,
}

#[cfg(feature = "serde")]
impl From<RawCellCost> for CellCost {
    fn from(raw: RawCellCost) -> Self {
        Self::new(raw.g, raw.h, raw.parent)
    }
}

impl Default for CellCost {
    #[inline]
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// One grid position: a fixed coordinate, an obstacle flag and the cost
/// record of the most recent search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    coord: Coord,
    pub(crate) blocked: bool,
    pub(crate) cost: CellCost,
}

impl Cell {
    pub(crate) const fn new(coord: Coord) -> Self {
        Self {
            coord,
            blocked: false,
            cost: CellCost::UNKNOWN,
        }
    }

    #[inline]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub const fn is_blocked(&self) -> bool {
        self.blocked
    }

    #[inline]
    pub const fn cost(&self) -> CellCost {
        self.cost
    }
}
