use std::collections::VecDeque;

use gridstar_core::{Coord, Grid, Layout};
use gridstar_search::{
    EngineState, Path, PathResult, RequestError, SearchEngine, SearchError, StepSnapshot,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Assert the structural properties every returned path must have.
fn assert_valid_path(grid: &Grid, path: &Path, start: Coord, goal: Coord) {
    assert_eq!(path.start(), Some(start));
    assert_eq!(path.goal(), Some(goal));
    for pair in path.coords().windows(2) {
        assert!(
            pair[0].is_adjacent(pair[1]),
            "{} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }
    for &c in path {
        assert!(grid.is_open(c), "path crosses blocked cell {c}");
    }
    assert_eq!(path.cost(), path.steps() as i32 * 10);
    assert_eq!(grid.cost(goal).map(|c| c.g()), Some(path.cost()));
}

/// Unit-cost BFS distance, used as an optimality oracle.
fn bfs_distance(grid: &Grid, start: Coord, goal: Coord) -> Option<i32> {
    let mut dist = vec![-1; grid.len()];
    let mut queue = VecDeque::new();
    dist[grid.index(start)?] = 0;
    queue.push_back(start);
    let mut buf = Vec::new();
    while let Some(c) = queue.pop_front() {
        let d = dist[grid.index(c)?];
        if c == goal {
            return Some(d);
        }
        buf.clear();
        grid.neighbors(c, &mut buf);
        for &n in &buf {
            let ni = grid.index(n)?;
            if grid.is_open(n) && dist[ni] < 0 {
                dist[ni] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

#[test]
fn open_five_by_five() {
    let mut grid = Grid::new(5, 5);
    let (start, goal) = (Coord::new(0, 0), Coord::new(4, 4));
    let result = SearchEngine::new().find_path(&mut grid, start, goal);
    let path = result.path().expect("open grid must be solvable");
    assert_eq!(path.cost(), 80);
    assert_eq!(path.len(), 9);
    assert_valid_path(&grid, path, start, goal);
}

#[test]
fn detour_through_single_gap() {
    let mut l = Layout::parse(
        "
        S....
        .....
        ####.
        .....
        ....G
        ",
    )
    .unwrap();
    let (start, goal) = (l.start.unwrap(), l.goal.unwrap());
    let result = SearchEngine::new().find_path(&mut l.grid, start, goal);
    let path = result.path().expect("gap at (2, 4) keeps the goal reachable");
    assert!(path.contains(Coord::new(2, 4)));
    assert_eq!(path.cost(), 80);
    assert_valid_path(&l.grid, path, start, goal);
}

#[test]
fn walled_off_goal() {
    let mut l = Layout::parse(
        "
        S.#
        .#G
        ..#
        ",
    )
    .unwrap();
    // (1,2) is surrounded by (0,2), (1,1) and (2,2); the right side is the
    // grid edge.
    let mut engine = SearchEngine::new();
    let result = engine.find_path(&mut l.grid, l.start.unwrap(), l.goal.unwrap());
    assert_eq!(result, PathResult::Failed(SearchError::NoPathExists));
    assert_eq!(engine.state(), EngineState::Failed);
    assert_eq!(engine.frontier_len(), 0);
    assert_eq!(engine.frontier().count(), 0);
}

#[test]
fn centre_goal_walled_on_four_sides() {
    let mut grid = Grid::new(3, 3);
    for c in Coord::new(1, 1).neighbors_4() {
        grid.set_blocked(c, true);
    }
    let mut engine = SearchEngine::new();
    let result = engine.find_path(&mut grid, Coord::new(0, 0), Coord::new(1, 1));
    assert_eq!(result, PathResult::Failed(SearchError::NoPathExists));
    assert_eq!(engine.frontier_len(), 0);
    // Only the start corner was reachable.
    assert_eq!(engine.visited().collect::<Vec<_>>(), vec![Coord::new(0, 0)]);
}

#[test]
fn start_equals_goal_is_rejected() {
    let mut grid = Grid::new(5, 5);
    let c = Coord::new(2, 2);
    let result = SearchEngine::new().find_path(&mut grid, c, c);
    assert_eq!(
        result,
        PathResult::Failed(SearchError::InvalidRequest(RequestError::SameStartAndGoal(c)))
    );
}

#[test]
fn repeated_searches_are_identical() {
    let mut l = Layout::parse(
        "
        S..#....
        .#.#.##.
        .#...#..
        .####.#.
        ......#G
        ",
    )
    .unwrap();
    let (start, goal) = (l.start.unwrap(), l.goal.unwrap());
    let mut engine = SearchEngine::new();

    let mut first_trace: Vec<StepSnapshot> = Vec::new();
    let first = engine.find_path_observed(&mut l.grid, start, goal, &mut first_trace);
    let first_grid = l.grid.clone();

    l.grid.reset();
    let mut second_trace: Vec<StepSnapshot> = Vec::new();
    let second = engine.find_path_observed(&mut l.grid, start, goal, &mut second_trace);

    assert!(first.is_success());
    assert_eq!(first, second);
    assert_eq!(first_trace, second_trace);
    assert_eq!(first_grid, l.grid);

    // A fresh engine agrees too.
    let third = SearchEngine::new().find_path(&mut l.grid, start, goal);
    assert_eq!(first, third);
}

#[test]
fn observer_does_not_change_the_result() {
    let mut grid = Grid::new(8, 8);
    for row in 1..7 {
        grid.set_blocked(Coord::new(row, 4), true);
    }
    let (start, goal) = (Coord::new(4, 0), Coord::new(4, 7));

    let plain = SearchEngine::new().find_path(&mut grid, start, goal);

    let mut engine = SearchEngine::new();
    let mut events = 0;
    let mut count = |_: &gridstar_search::StepTrace<'_>| events += 1;
    let observed = engine.find_path_observed(&mut grid, start, goal, &mut count);

    assert_eq!(plain, observed);
    assert_eq!(events, engine.steps());
    assert_eq!(events, engine.visited_len());
}

#[test]
fn trace_sets_are_disjoint_and_grow() {
    let mut grid = Grid::new(6, 6);
    grid.set_blocked(Coord::new(2, 2), true);
    grid.set_blocked(Coord::new(3, 3), true);
    let mut trace: Vec<StepSnapshot> = Vec::new();
    let result = SearchEngine::new().find_path_observed(
        &mut grid,
        Coord::new(0, 0),
        Coord::new(5, 5),
        &mut trace,
    );
    assert!(result.is_success());
    for (i, snap) in trace.iter().enumerate() {
        assert_eq!(snap.step, i + 1);
        assert_eq!(snap.visited.len(), i + 1);
        assert!(snap.visited.contains(&snap.current));
        assert!(snap.frontier.iter().all(|c| !snap.visited.contains(c)));
        assert!(!snap.frontier.contains(&Coord::new(2, 2)));
        assert!(!snap.visited.contains(&Coord::new(3, 3)));
    }
}

#[test]
fn channel_observer_receives_every_step() {
    let mut grid = Grid::new(4, 4);
    let (mut tx, rx) = std::sync::mpsc::channel::<StepSnapshot>();
    let mut engine = SearchEngine::new();
    let result = engine.find_path_observed(&mut grid, Coord::new(0, 0), Coord::new(3, 3), &mut tx);
    drop(tx);
    assert!(result.is_success());
    assert_eq!(rx.iter().count(), engine.steps());
}

#[test]
fn manual_stepping_matches_run() {
    let mut grid = Grid::new(7, 7);
    for col in 0..6 {
        grid.set_blocked(Coord::new(3, col), true);
    }
    let (start, goal) = (Coord::new(0, 0), Coord::new(6, 0));
    let expected = SearchEngine::new().find_path(&mut grid, start, goal);

    let mut engine = SearchEngine::new();
    engine.begin(&mut grid, start, goal).unwrap();
    let mut frames = 0;
    let result = loop {
        match engine.step(&mut grid, &mut gridstar_search::NoopObserver) {
            gridstar_search::Step::Pending => frames += 1,
            gridstar_search::Step::Finished(r) => break r,
        }
    };
    assert_eq!(result, expected);
    assert_eq!(frames, engine.steps());
    assert_eq!(result.path().map(Path::cost), Some(180));
}

#[test]
fn random_grids_match_bfs_optimum() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut engine = SearchEngine::new();
    let mut solved = 0;
    let mut unsolvable = 0;

    for _ in 0..300 {
        let rows = rng.random_range(2..14);
        let cols = rng.random_range(2..14);
        let density = rng.random_range(0.0..0.45);
        let mut grid = Grid::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                if rng.random_bool(density) {
                    grid.set_blocked(Coord::new(row, col), true);
                }
            }
        }
        let start = Coord::new(rng.random_range(0..rows), rng.random_range(0..cols));
        let goal = Coord::new(rng.random_range(0..rows), rng.random_range(0..cols));
        if start == goal {
            continue;
        }
        grid.set_blocked(start, false);
        grid.set_blocked(goal, false);

        let result = engine.find_path(&mut grid, start, goal);
        match bfs_distance(&grid, start, goal) {
            Some(d) => {
                let path = result.path().expect("BFS found a path, A* must too");
                assert_eq!(path.cost(), d * 10, "suboptimal path on\n{grid:?}");
                assert_valid_path(&grid, path, start, goal);
                solved += 1;
            }
            None => {
                assert_eq!(result, PathResult::Failed(SearchError::NoPathExists));
                assert_eq!(engine.frontier_len(), 0);
                unsolvable += 1;
            }
        }
    }
    assert!(solved > 0);
    assert!(unsolvable > 0);
}
