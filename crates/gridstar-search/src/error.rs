//! Search failure taxonomy.
//!
//! Every variant is an ordinary outcome carried inside
//! [`PathResult::Failed`](crate::PathResult::Failed); none of them leaves the
//! grid or the engine in an unusable state.

use gridstar_core::Coord;
use thiserror::Error;

/// Why a search produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchError {
    /// The request itself was malformed.
    #[error("invalid search request: {0}")]
    InvalidRequest(#[from] RequestError),
    /// A search is already running on this engine.
    #[error("a search is already running")]
    AlreadyRunning,
    /// The frontier was exhausted without reaching the goal.
    #[error("no path exists between start and goal")]
    NoPathExists,
}

/// Details of an [`SearchError::InvalidRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestError {
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("start {0} is outside the grid")]
    StartOutOfBounds(Coord),
    #[error("goal {0} is outside the grid")]
    GoalOutOfBounds(Coord),
    #[error("start {0} is blocked")]
    StartBlocked(Coord),
    #[error("goal {0} is blocked")]
    GoalBlocked(Coord),
    #[error("start and goal are both {0}")]
    SameStartAndGoal(Coord),
    /// `step` was called with no search in progress.
    #[error("no search is running")]
    NoActiveSearch,
    /// `step` was called with a grid of different dimensions than `begin`.
    #[error("grid dimensions changed during the search")]
    GridMismatch,
    /// Cost records on the grid were reset or overwritten while the search
    /// was running.
    #[error("cost records changed during the search")]
    CorruptedCosts,
    /// A cell of the found path was blocked after it had been expanded.
    #[error("path cell {0} was blocked during the search")]
    PathBlocked(Coord),
    /// The longest possible path would overflow the cost range.
    #[error("grid is too large for step cost {0}")]
    CostOverflow(i32),
}
