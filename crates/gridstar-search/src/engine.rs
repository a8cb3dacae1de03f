//! The stepwise A* [`SearchEngine`].
//!
//! A search is driven one expansion at a time through [`SearchEngine::step`],
//! or to completion with [`SearchEngine::run`] / [`SearchEngine::find_path`].
//! Costs and parent links are written to the grid's cells, where they stay
//! after the search for inspection; frontier and visited membership live in
//! the engine's own table, indexed like the grid.
//!
//! # States
//!
//! ```text
//! Idle ──begin──▶ Running ──step…──▶ Succeeded | Failed
//!                    │
//!                    └──cancel──▶ Idle
//! ```

use gridstar_core::{CellCost, Coord, Grid, UNKNOWN_COST};

use crate::cancel::CancelToken;
use crate::config::EngineConfig;
use crate::distance::manhattan;
use crate::error::{RequestError, SearchError};
use crate::frontier::{Frontier, FrontierEntry};
use crate::node::{Membership, Node};
use crate::observer::{NoopObserver, StepObserver, StepSnapshot, StepTrace, members};
use crate::path::{Path, PathResult};

/// Lifecycle state of a [`SearchEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Result of a single [`SearchEngine::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// One cell was expanded; the search continues.
    Pending,
    /// The search is over.
    Finished(PathResult),
}

/// The endpoints and grid shape fixed by [`SearchEngine::begin`].
#[derive(Clone, Copy, Debug)]
struct Request {
    start: Coord,
    goal: Coord,
    goal_idx: usize,
    rows: i32,
    cols: i32,
}

impl Request {
    #[inline]
    fn idx(&self, c: Coord) -> Option<usize> {
        if c.row < 0 || c.col < 0 || c.row >= self.rows || c.col >= self.cols {
            return None;
        }
        Some((c.row * self.cols + c.col) as usize)
    }
}

/// A* search over a [`Grid`] with 4-directional uniform-cost moves.
///
/// Frontier selection takes the lowest `f`, then the lowest `g`, then the
/// cell discovered first, so results are reproducible. The engine reuses
/// its buffers across searches.
#[derive(Debug)]
pub struct SearchEngine {
    config: EngineConfig,
    state: EngineState,
    request: Option<Request>,
    nodes: Vec<Node>,
    frontier: Frontier,
    frontier_len: usize,
    visited_len: usize,
    next_seq: u64,
    steps: usize,
    current: Coord,
    cancel: CancelToken,
    // scratch buffer for neighbor queries
    nbuf: Vec<Coord>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config: config.sanitized(),
            state: EngineState::Idle,
            request: None,
            nodes: Vec::new(),
            frontier: Frontier::default(),
            frontier_len: 0,
            visited_len: 0,
            next_seq: 0,
            steps: 0,
            current: Coord::ZERO,
            cancel: CancelToken::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Expansion steps performed by the current or last search.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of cells in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier_len
    }

    /// Number of expanded cells.
    #[inline]
    pub fn visited_len(&self) -> usize {
        self.visited_len
    }

    pub fn in_frontier(&self, c: Coord) -> bool {
        self.membership(c) == Membership::Open
    }

    pub fn is_visited(&self, c: Coord) -> bool {
        self.membership(c) == Membership::Closed
    }

    /// Frontier coordinates of the current or last search, row-major.
    pub fn frontier(&self) -> impl Iterator<Item = Coord> + '_ {
        members(&self.nodes, self.cols(), Membership::Open)
    }

    /// Visited coordinates of the current or last search, row-major.
    pub fn visited(&self) -> impl Iterator<Item = Coord> + '_ {
        members(&self.nodes, self.cols(), Membership::Closed)
    }

    /// Owned copy of the current frontier and visited sets.
    pub fn snapshot(&self) -> StepSnapshot {
        StepSnapshot {
            step: self.steps,
            current: self.current,
            frontier: self.frontier().collect(),
            visited: self.visited().collect(),
        }
    }

    /// A handle that aborts the running search at its next step.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Search for a path from `start` to `goal`, running to completion.
    pub fn find_path(&mut self, grid: &mut Grid, start: Coord, goal: Coord) -> PathResult {
        self.find_path_observed(grid, start, goal, &mut NoopObserver)
    }

    /// Like [`find_path`](Self::find_path), notifying `observer` after every
    /// expansion.
    pub fn find_path_observed<O: StepObserver>(
        &mut self,
        grid: &mut Grid,
        start: Coord,
        goal: Coord,
        observer: &mut O,
    ) -> PathResult {
        if let Err(e) = self.begin(grid, start, goal) {
            return PathResult::Failed(e);
        }
        self.run(grid, observer)
    }

    /// Validate the request and prepare a new search.
    ///
    /// On error neither the grid nor the engine is modified. On success the
    /// grid's cost records are reset and the start cell is in the frontier.
    pub fn begin(&mut self, grid: &mut Grid, start: Coord, goal: Coord) -> Result<(), SearchError> {
        if self.is_running() {
            return Err(SearchError::AlreadyRunning);
        }
        let (start_idx, goal_idx) =
            validate(grid, start, goal, self.config.step_cost).inspect_err(|e| {
            log::debug!("rejected search request: {e}");
        })?;

        grid.reset();
        self.nodes.clear();
        self.nodes.resize(grid.len(), Node::default());
        self.frontier.clear();
        self.frontier_len = 0;
        self.visited_len = 0;
        self.next_seq = 0;
        self.steps = 0;
        self.current = start;
        self.cancel.clear();

        let cost = CellCost::new(0, manhattan(start, goal), None);
        grid.set_cost(start, cost);
        self.push_open(start_idx, cost);

        self.request = Some(Request {
            start,
            goal,
            goal_idx,
            rows: grid.rows(),
            cols: grid.cols(),
        });
        self.state = EngineState::Running;
        log::debug!(
            "search started: {start} -> {goal} on {}x{} grid",
            grid.rows(),
            grid.cols()
        );
        Ok(())
    }

    /// Perform one selection/expansion iteration.
    ///
    /// `grid` must be the grid passed to [`begin`](Self::begin). Obstacle
    /// edits made between steps take effect at the next expansion: a
    /// frontier cell that became blocked is dropped when it is selected, and
    /// a found path crossing a cell blocked after its expansion is reported
    /// as [`RequestError::PathBlocked`]. Cost records must not be touched
    /// until the search finishes.
    pub fn step<O: StepObserver>(&mut self, grid: &mut Grid, observer: &mut O) -> Step {
        let Some(req) = self.request.filter(|_| self.is_running()) else {
            return Step::Finished(PathResult::Failed(RequestError::NoActiveSearch.into()));
        };

        if self.cancel.is_cancelled() {
            log::debug!("search cancelled after {} steps", self.steps);
            self.abort();
            return Step::Finished(PathResult::Cancelled);
        }
        if let Some(max) = self.config.max_steps {
            if self.steps >= max {
                log::debug!("search stopped at step limit {max}");
                self.abort();
                return Step::Finished(PathResult::Cancelled);
            }
        }
        if grid.rows() != req.rows || grid.cols() != req.cols {
            return Step::Finished(self.fail(RequestError::GridMismatch.into()));
        }

        let Some((ci, current_cost)) = self.pop_open(grid) else {
            if self.frontier_len != 0 {
                log::warn!(
                    "frontier drained with {} cells still open",
                    self.frontier_len
                );
                self.drop_open();
                return Step::Finished(self.fail(RequestError::CorruptedCosts.into()));
            }
            return Step::Finished(self.fail(SearchError::NoPathExists));
        };

        if ci == req.goal_idx {
            return Step::Finished(self.succeed(grid, req));
        }

        self.nodes[ci].membership = Membership::Closed;
        self.frontier_len -= 1;
        self.visited_len += 1;
        let current = grid.coord_at(ci);
        self.current = current;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        grid.neighbors(current, &mut nbuf);

        for &np in nbuf.iter() {
            let (Some(ni), Some(cell)) = (req.idx(np), grid.cell(np)) else {
                continue;
            };
            if cell.is_blocked() || self.nodes[ni].membership == Membership::Closed {
                continue;
            }
            let tentative_g = current_cost.g().saturating_add(self.config.step_cost);
            if self.nodes[ni].membership == Membership::Open && tentative_g >= cell.cost().g() {
                continue;
            }
            let cost = CellCost::new(tentative_g, manhattan(np, req.goal), Some(current));
            grid.set_cost(np, cost);
            self.push_open(ni, cost);
        }

        self.nbuf = nbuf;
        self.steps += 1;

        log::trace!(
            "step {}: expanded {current}, frontier {}, visited {}",
            self.steps,
            self.frontier_len,
            self.visited_len
        );
        let trace = StepTrace::new(
            self.steps,
            current,
            &self.nodes,
            req.cols,
            self.frontier_len,
            self.visited_len,
        );
        observer.on_step(&trace);
        Step::Pending
    }

    /// Step until the search finishes.
    pub fn run<O: StepObserver>(&mut self, grid: &mut Grid, observer: &mut O) -> PathResult {
        loop {
            if let Step::Finished(result) = self.step(grid, observer) {
                return result;
            }
        }
    }

    /// Abort the running search. The engine returns to [`EngineState::Idle`]
    /// and discards frontier and visited membership. Returns `false` if no
    /// search was running.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        log::debug!("search cancelled after {} steps", self.steps);
        self.abort();
        true
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    #[inline]
    fn cols(&self) -> i32 {
        self.request.map_or(1, |r| r.cols)
    }

    fn membership(&self, c: Coord) -> Membership {
        self.request
            .and_then(|r| r.idx(c))
            .and_then(|i| self.nodes.get(i))
            .map_or(Membership::Unseen, |n| n.membership)
    }

    /// Add `idx` to the frontier, or re-queue it with an improved cost. The
    /// discovery sequence number is kept on re-queue.
    fn push_open(&mut self, idx: usize, cost: CellCost) {
        let node = &mut self.nodes[idx];
        if node.membership != Membership::Open {
            node.membership = Membership::Open;
            node.seq = self.next_seq;
            self.next_seq += 1;
            self.frontier_len += 1;
        }
        self.frontier.push(FrontierEntry {
            idx,
            f: cost.f(),
            g: cost.g(),
            seq: node.seq,
        });
    }

    /// Pop the best frontier cell, skipping superseded heap entries.
    fn pop_open(&mut self, grid: &Grid) -> Option<(usize, CellCost)> {
        while let Some(entry) = self.frontier.pop() {
            if self.nodes[entry.idx].membership != Membership::Open {
                continue;
            }
            let c = grid.coord_at(entry.idx);
            if grid.is_blocked(c) {
                log::trace!("dropping {c} from the frontier, it was blocked");
                self.nodes[entry.idx].membership = Membership::Unseen;
                self.frontier_len -= 1;
                continue;
            }
            let Some(cost) = grid.cost(c) else {
                continue;
            };
            if cost.g() != entry.g {
                continue;
            }
            return Some((entry.idx, cost));
        }
        None
    }

    fn succeed(&mut self, grid: &Grid, req: Request) -> PathResult {
        let Some(path) = reconstruct(grid, req.start, req.goal) else {
            log::warn!("parent chain from {} is broken", req.goal);
            return self.fail(RequestError::CorruptedCosts.into());
        };
        if let Some(&c) = path.coords().iter().find(|&&c| grid.is_blocked(c)) {
            return self.fail(RequestError::PathBlocked(c).into());
        }
        self.state = EngineState::Succeeded;
        log::debug!(
            "path found: {} cells, cost {}, {} steps",
            path.len(),
            path.cost(),
            self.steps
        );
        PathResult::Succeeded(path)
    }

    fn fail(&mut self, err: SearchError) -> PathResult {
        self.state = EngineState::Failed;
        log::debug!("search failed after {} steps: {err}", self.steps);
        PathResult::Failed(err)
    }

    /// Forget every frontier cell, leaving visited membership intact.
    fn drop_open(&mut self) {
        for node in &mut self.nodes {
            if node.membership == Membership::Open {
                node.membership = Membership::Unseen;
            }
        }
        self.frontier.clear();
        self.frontier_len = 0;
    }

    fn abort(&mut self) {
        self.state = EngineState::Idle;
        self.request = None;
        self.nodes.clear();
        self.frontier.clear();
        self.frontier_len = 0;
        self.visited_len = 0;
        self.cancel.clear();
    }
}

fn validate(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    step_cost: i32,
) -> Result<(usize, usize), RequestError> {
    if grid.is_empty() {
        return Err(RequestError::EmptyGrid);
    }
    if !cost_fits(grid.len(), grid.rows(), grid.cols(), step_cost) {
        return Err(RequestError::CostOverflow(step_cost));
    }
    let start_idx = grid.index(start).ok_or(RequestError::StartOutOfBounds(start))?;
    let goal_idx = grid.index(goal).ok_or(RequestError::GoalOutOfBounds(goal))?;
    if start == goal {
        return Err(RequestError::SameStartAndGoal(start));
    }
    if grid.is_blocked(start) {
        return Err(RequestError::StartBlocked(start));
    }
    if grid.is_blocked(goal) {
        return Err(RequestError::GoalBlocked(goal));
    }
    Ok((start_idx, goal_idx))
}

/// Whether the longest simple path over `cells` cells keeps every `f` below
/// [`UNKNOWN_COST`].
fn cost_fits(cells: usize, rows: i32, cols: i32, step_cost: i32) -> bool {
    let longest = (cells as i64 - 1) * i64::from(step_cost);
    longest + i64::from(rows) + i64::from(cols) < i64::from(UNKNOWN_COST)
}

/// Follow parent links from `goal` back to `start`.
fn reconstruct(grid: &Grid, start: Coord, goal: Coord) -> Option<Path> {
    let cost = grid.cost(goal)?.g();
    let mut coords = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = grid.cost(cur)?.parent()?;
        coords.push(cur);
        if coords.len() > grid.len() {
            return None;
        }
    }
    coords.reverse();
    Some(Path::new(coords, cost))
}
