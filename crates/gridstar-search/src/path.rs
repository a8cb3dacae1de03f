use gridstar_core::Coord;

use crate::error::SearchError;

/// A solved route, ordered from start to goal inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    coords: Vec<Coord>,
    cost: i32,
}

impl Path {
    pub(crate) fn new(coords: Vec<Coord>, cost: i32) -> Self {
        Self { coords, cost }
    }

    /// The coordinates from start to goal.
    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Total cost, equal to the goal's `g` value.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Number of coordinates, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of moves (edges) along the path.
    #[inline]
    pub fn steps(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.coords.first().copied()
    }

    #[inline]
    pub fn goal(&self) -> Option<Coord> {
        self.coords.last().copied()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.coords.contains(&c)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.coords.iter()
    }

    pub fn into_coords(self) -> Vec<Coord> {
        self.coords
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathResult {
    /// The goal was reached.
    Succeeded(Path),
    /// The search ended without a path.
    Failed(SearchError),
    /// The search was aborted between steps.
    Cancelled,
}

impl PathResult {
    /// The path, if the search succeeded.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Succeeded(p) => Some(p),
            _ => None,
        }
    }

    /// The failure reason, if the search failed.
    pub fn error(&self) -> Option<SearchError> {
        match self {
            Self::Failed(e) => Some(*e),
            _ => None,
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Convert into a `Result`, mapping cancellation to `None` inside `Ok`.
    pub fn into_result(self) -> Result<Option<Path>, SearchError> {
        match self {
            Self::Succeeded(p) => Ok(Some(p)),
            Self::Failed(e) => Err(e),
            Self::Cancelled => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_accessors() {
        let p = Path::new(
            vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)],
            20,
        );
        assert_eq!(p.len(), 3);
        assert_eq!(p.steps(), 2);
        assert_eq!(p.cost(), 20);
        assert_eq!(p.start(), Some(Coord::new(0, 0)));
        assert_eq!(p.goal(), Some(Coord::new(1, 1)));
        assert!(p.contains(Coord::new(0, 1)));
        assert!(!p.contains(Coord::new(1, 0)));
    }

    #[test]
    fn result_helpers() {
        let ok = PathResult::Succeeded(Path::new(vec![Coord::ZERO, Coord::new(0, 1)], 10));
        assert!(ok.is_success());
        assert_eq!(ok.path().map(Path::cost), Some(10));
        assert_eq!(ok.error(), None);

        let failed = PathResult::Failed(SearchError::NoPathExists);
        assert_eq!(failed.error(), Some(SearchError::NoPathExists));
        assert_eq!(failed.into_result(), Err(SearchError::NoPathExists));
        assert_eq!(PathResult::Cancelled.into_result(), Ok(None));
    }
}
