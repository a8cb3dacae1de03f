//! Per-step notifications for incremental rendering.
//!
//! After every expansion the engine hands a [`StepTrace`] to its
//! [`StepObserver`]. The trace borrows the engine's membership table
//! read-only, so an observer can look but never steer.

use std::sync::mpsc::Sender;

use gridstar_core::Coord;

use crate::node::{Membership, Node};

/// Read-only view of the search after one expansion step.
#[derive(Debug, Clone, Copy)]
pub struct StepTrace<'a> {
    step: usize,
    current: Coord,
    nodes: &'a [Node],
    cols: i32,
    frontier_len: usize,
    visited_len: usize,
}

impl<'a> StepTrace<'a> {
    pub(crate) fn new(
        step: usize,
        current: Coord,
        nodes: &'a [Node],
        cols: i32,
        frontier_len: usize,
        visited_len: usize,
    ) -> Self {
        Self {
            step,
            current,
            nodes,
            cols,
            frontier_len,
            visited_len,
        }
    }

    /// 1-based number of the expansion that produced this trace.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// The cell that was just expanded.
    #[inline]
    pub fn current(&self) -> Coord {
        self.current
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier_len
    }

    #[inline]
    pub fn visited_len(&self) -> usize {
        self.visited_len
    }

    /// Frontier coordinates in row-major order.
    pub fn frontier(&self) -> impl Iterator<Item = Coord> + '_ {
        members(self.nodes, self.cols, Membership::Open)
    }

    /// Visited coordinates in row-major order.
    pub fn visited(&self) -> impl Iterator<Item = Coord> + '_ {
        members(self.nodes, self.cols, Membership::Closed)
    }

    /// Copy this trace into an owned snapshot.
    pub fn snapshot(&self) -> StepSnapshot {
        StepSnapshot {
            step: self.step,
            current: self.current,
            frontier: self.frontier().collect(),
            visited: self.visited().collect(),
        }
    }
}

pub(crate) fn members(
    nodes: &[Node],
    cols: i32,
    which: Membership,
) -> impl Iterator<Item = Coord> + '_ {
    let cols = cols.max(1) as usize;
    nodes
        .iter()
        .enumerate()
        .filter(move |(_, n)| n.membership == which)
        .map(move |(i, _)| Coord::new((i / cols) as i32, (i % cols) as i32))
}

/// Owned copy of a [`StepTrace`], suitable for sending across threads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepSnapshot {
    pub step: usize,
    pub current: Coord,
    pub frontier: Vec<Coord>,
    pub visited: Vec<Coord>,
}

/// Receives one notification per expansion step.
pub trait StepObserver {
    fn on_step(&mut self, trace: &StepTrace<'_>);
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    #[inline]
    fn on_step(&mut self, _trace: &StepTrace<'_>) {}
}

impl<F> StepObserver for F
where
    F: FnMut(&StepTrace<'_>),
{
    fn on_step(&mut self, trace: &StepTrace<'_>) {
        self(trace)
    }
}

/// Records a snapshot of every step.
impl StepObserver for Vec<StepSnapshot> {
    fn on_step(&mut self, trace: &StepTrace<'_>) {
        self.push(trace.snapshot());
    }
}

/// Forwards snapshots over a channel. A disconnected receiver is ignored.
impl StepObserver for Sender<StepSnapshot> {
    fn on_step(&mut self, trace: &StepTrace<'_>) {
        let _ = self.send(trace.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<Node> {
        // 2×3 grid: row 0 = [closed, open, unseen], row 1 = [unseen, open, closed]
        let m = [
            Membership::Closed,
            Membership::Open,
            Membership::Unseen,
            Membership::Unseen,
            Membership::Open,
            Membership::Closed,
        ];
        m.iter()
            .map(|&membership| Node {
                membership,
                seq: 0,
            })
            .collect()
    }

    #[test]
    fn trace_lists_members_row_major() {
        let nodes = table();
        let t = StepTrace::new(3, Coord::new(1, 2), &nodes, 3, 2, 2);
        assert_eq!(
            t.frontier().collect::<Vec<_>>(),
            vec![Coord::new(0, 1), Coord::new(1, 1)]
        );
        assert_eq!(
            t.visited().collect::<Vec<_>>(),
            vec![Coord::new(0, 0), Coord::new(1, 2)]
        );
        let snap = t.snapshot();
        assert_eq!(snap.step, 3);
        assert_eq!(snap.current, Coord::new(1, 2));
        assert_eq!(snap.frontier.len(), 2);
    }

    #[test]
    fn closure_vec_and_channel_observers() {
        let nodes = table();
        let t = StepTrace::new(1, Coord::ZERO, &nodes, 3, 2, 2);

        let mut seen = 0;
        let mut count = |tr: &StepTrace<'_>| seen += tr.frontier_len();
        count.on_step(&t);
        assert_eq!(seen, 2);

        let mut log: Vec<StepSnapshot> = Vec::new();
        log.on_step(&t);
        assert_eq!(log.len(), 1);

        let (mut tx, rx) = std::sync::mpsc::channel::<StepSnapshot>();
        tx.on_step(&t);
        assert_eq!(rx.try_recv().unwrap().visited.len(), 2);
        drop(rx);
        tx.on_step(&t);
    }
}
