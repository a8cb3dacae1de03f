//! Interactive grid editor shared by the gridstar demos.
//!
//! The [`Editor`] is the presentation-side collaborator of the search
//! engine: it owns the grid, lets the user place the start, the goal and
//! walls, drives a search one step per frame and keeps a per-cell overlay
//! of frontier, visited and path cells for rendering. It knows nothing about
//! terminals; front-ends translate their events into [`Input`]s and draw
//! [`Tile`]s.

use gridstar_core::{Coord, Grid, Layout};
use gridstar_search::{EngineConfig, PathResult, SearchEngine, SearchError, Step, StepTrace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub const DEFAULT_SIZE: i32 = 20;
pub const DEFAULT_DENSITY: f64 = 0.3;

pub const HELP_TEXT: &str = "\
click/space: start, goal, wall   right-click/x: erase   enter: search
esc: cancel   r: clear overlay   c: clear all   n: random walls   q: quit";

// ---------------------------------------------------------------------------
// Input / effects
// ---------------------------------------------------------------------------

/// A front-end independent user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    /// Place at the cursor: start, then goal, then walls.
    Primary,
    /// Erase whatever is at the cursor.
    Secondary,
    /// Move the cursor to a cell and place there.
    PrimaryAt(Coord),
    /// Move the cursor to a cell and erase there.
    SecondaryAt(Coord),
    Run,
    Cancel,
    ClearOverlay,
    ClearAll,
    Scatter,
    Quit,
}

/// What the front-end should do after an [`Input`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// A search has begun; call [`Editor::step_search`] until it finishes.
    Animate,
    Quit,
}

/// Why a search could not be started from the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("place both start and goal first")]
    MissingEndpoints,
    #[error(transparent)]
    Search(#[from] SearchError),
}

// ---------------------------------------------------------------------------
// Tiles
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Mark {
    #[default]
    None,
    Frontier,
    Visited,
    Path,
}

/// What to draw for one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Free,
    Wall,
    Start,
    Goal,
    Frontier,
    Visited,
    Path,
}

impl Tile {
    /// Background colour as RGB.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Free => (128, 128, 128),
            Self::Wall => (0, 0, 0),
            Self::Start => (255, 255, 0),
            Self::Goal => (64, 224, 208),
            Self::Frontier => (0, 255, 0),
            Self::Visited => (255, 0, 0),
            Self::Path => (128, 0, 128),
        }
    }
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

pub struct Editor {
    grid: Grid,
    engine: SearchEngine,
    start: Option<Coord>,
    goal: Option<Coord>,
    cursor: Coord,
    marks: Vec<Mark>,
    status: String,
    density: f64,
    rng: StdRng,
}

impl Editor {
    /// An empty `size × size` editor.
    pub fn new(size: i32, config: EngineConfig, density: f64, seed: u64) -> Self {
        Self::with_grid(Grid::new(size, size), None, None, config, density, seed)
    }

    /// An editor preloaded from a text layout.
    pub fn from_layout(layout: Layout, config: EngineConfig, density: f64, seed: u64) -> Self {
        Self::with_grid(layout.grid, layout.start, layout.goal, config, density, seed)
    }

    fn with_grid(
        grid: Grid,
        start: Option<Coord>,
        goal: Option<Coord>,
        config: EngineConfig,
        density: f64,
        seed: u64,
    ) -> Self {
        let len = grid.len();
        Self {
            grid,
            engine: SearchEngine::with_config(config),
            start,
            goal,
            cursor: Coord::ZERO,
            marks: vec![Mark::None; len],
            status: "place the start".into(),
            density: density.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Option<Coord> {
        self.goal
    }

    #[inline]
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[inline]
    pub fn is_searching(&self) -> bool {
        self.engine.is_running()
    }

    /// The tile to draw at `c`.
    pub fn tile(&self, c: Coord) -> Tile {
        if Some(c) == self.start {
            return Tile::Start;
        }
        if Some(c) == self.goal {
            return Tile::Goal;
        }
        if self.grid.is_blocked(c) {
            return Tile::Wall;
        }
        match self.grid.index(c).map(|i| self.marks[i]) {
            Some(Mark::Frontier) => Tile::Frontier,
            Some(Mark::Visited) => Tile::Visited,
            Some(Mark::Path) => Tile::Path,
            _ => Tile::Free,
        }
    }

    /// Apply one input. While a search runs only `Cancel` and `Quit` are
    /// accepted.
    pub fn update(&mut self, input: Input) -> Option<Effect> {
        if self.is_searching() {
            match input {
                Input::Cancel => self.cancel_search(),
                Input::Quit => return Some(Effect::Quit),
                _ => {}
            }
            return None;
        }

        match input {
            Input::Up => self.move_cursor(-1, 0),
            Input::Down => self.move_cursor(1, 0),
            Input::Left => self.move_cursor(0, -1),
            Input::Right => self.move_cursor(0, 1),
            Input::Primary => self.place(self.cursor),
            Input::Secondary => self.erase(self.cursor),
            Input::PrimaryAt(c) => {
                if self.grid.contains(c) {
                    self.cursor = c;
                    self.place(c);
                }
            }
            Input::SecondaryAt(c) => {
                if self.grid.contains(c) {
                    self.cursor = c;
                    self.erase(c);
                }
            }
            Input::Run => {
                return match self.begin_search() {
                    Ok(()) => Some(Effect::Animate),
                    Err(e) => {
                        self.status = e.to_string();
                        None
                    }
                };
            }
            Input::Cancel => {}
            Input::ClearOverlay => {
                self.clear_overlay();
                self.status = "overlay cleared".into();
            }
            Input::ClearAll => {
                self.grid.clear();
                self.start = None;
                self.goal = None;
                self.clear_overlay();
                self.status = "place the start".into();
            }
            Input::Scatter => self.scatter(),
            Input::Quit => return Some(Effect::Quit),
        }
        None
    }

    fn move_cursor(&mut self, drow: i32, dcol: i32) {
        let next = self.cursor.shift(drow, dcol);
        if self.grid.contains(next) {
            self.cursor = next;
        }
    }

    /// Start first, goal second, walls after that. Occupied cells are left
    /// alone.
    fn place(&mut self, c: Coord) {
        if Some(c) == self.start || Some(c) == self.goal || self.grid.is_blocked(c) {
            return;
        }
        self.clear_overlay();
        if self.start.is_none() {
            self.start = Some(c);
            self.status = format!("start at {c}");
        } else if self.goal.is_none() {
            self.goal = Some(c);
            self.status = format!("goal at {c}");
        } else {
            self.grid.set_blocked(c, true);
        }
    }

    fn erase(&mut self, c: Coord) {
        self.clear_overlay();
        if Some(c) == self.start {
            self.start = None;
        } else if Some(c) == self.goal {
            self.goal = None;
        }
        self.grid.set_blocked(c, false);
    }

    fn scatter(&mut self) {
        self.clear_overlay();
        let cells: Vec<Coord> = self.grid.iter().map(|c| c.coord()).collect();
        for c in cells {
            let blocked = Some(c) != self.start
                && Some(c) != self.goal
                && self.rng.random_bool(self.density);
            self.grid.set_blocked(c, blocked);
        }
        self.status = format!("{} walls", self.grid.blocked_count());
    }

    fn clear_overlay(&mut self) {
        self.marks.fill(Mark::None);
        self.grid.reset();
    }

    /// Begin a search between the placed endpoints.
    pub fn begin_search(&mut self) -> Result<(), EditorError> {
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            return Err(EditorError::MissingEndpoints);
        };
        self.clear_overlay();
        self.engine.begin(&mut self.grid, start, goal)?;
        self.status = "searching…".into();
        Ok(())
    }

    /// Advance the running search by one step, refreshing the overlay.
    /// Returns the outcome once the search is over.
    pub fn step_search(&mut self) -> Option<PathResult> {
        let marks = &mut self.marks;
        let cols = self.grid.cols();
        let mut paint = |t: &StepTrace<'_>| {
            marks.fill(Mark::None);
            for c in t.visited() {
                marks[(c.row * cols + c.col) as usize] = Mark::Visited;
            }
            for c in t.frontier() {
                marks[(c.row * cols + c.col) as usize] = Mark::Frontier;
            }
        };
        match self.engine.step(&mut self.grid, &mut paint) {
            Step::Pending => None,
            Step::Finished(result) => {
                self.finish(&result);
                Some(result)
            }
        }
    }

    /// Run the current search to the end without animation.
    pub fn finish_search(&mut self) -> Option<PathResult> {
        loop {
            if !self.is_searching() {
                return None;
            }
            if let Some(result) = self.step_search() {
                return Some(result);
            }
        }
    }

    pub fn cancel_search(&mut self) {
        if self.engine.cancel() {
            self.marks.fill(Mark::None);
            self.status = "search cancelled".into();
        }
    }

    fn finish(&mut self, result: &PathResult) {
        match result {
            PathResult::Succeeded(path) => {
                for &c in path.coords() {
                    if let Some(i) = self.grid.index(c) {
                        self.marks[i] = Mark::Path;
                    }
                }
                self.status = format!(
                    "path: {} cells, cost {}, {} steps",
                    path.len(),
                    path.cost(),
                    self.engine.steps()
                );
            }
            PathResult::Failed(e) => self.status = e.to_string(),
            PathResult::Cancelled => {
                self.marks.fill(Mark::None);
                self.status = "search cancelled".into();
            }
        }
    }
}
