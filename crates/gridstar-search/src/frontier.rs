use std::collections::BinaryHeap;

/// Heap entry referencing a cell by flat grid index.
///
/// Ordered so that `BinaryHeap` (a max-heap) pops the entry with the
/// smallest `f`, then the smallest `g`, then the smallest discovery `seq`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FrontierEntry {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) g: i32,
    pub(crate) seq: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed on every key so the max-heap yields the minimum.
        other
            .f
            .cmp(&self.f)
            .then(other.g.cmp(&self.g))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of frontier cells with lazy deletion.
///
/// Improving a cell's cost pushes a fresh entry; the superseded one stays in
/// the heap and is discarded by the caller when popped (its `g` no longer
/// matches the cell's record).
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
}

impl Frontier {
    #[inline]
    pub(crate) fn push(&mut self, entry: FrontierEntry) {
        self.heap.push(entry);
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(idx: usize, f: i32, g: i32, seq: u64) -> FrontierEntry {
        FrontierEntry { idx, f, g, seq }
    }

    fn drain(mut fr: Frontier) -> Vec<usize> {
        let mut out = Vec::new();
        while let Some(e) = fr.pop() {
            out.push(e.idx);
        }
        out
    }

    #[test]
    fn lowest_f_first() {
        let mut fr = Frontier::default();
        fr.push(entry(0, 30, 10, 0));
        fr.push(entry(1, 12, 10, 1));
        fr.push(entry(2, 20, 10, 2));
        assert_eq!(drain(fr), vec![1, 2, 0]);
    }

    #[test]
    fn equal_f_prefers_lower_g() {
        let mut fr = Frontier::default();
        fr.push(entry(0, 24, 20, 0));
        fr.push(entry(1, 24, 10, 1));
        fr.push(entry(2, 24, 30, 2));
        assert_eq!(drain(fr), vec![1, 0, 2]);
    }

    #[test]
    fn full_tie_prefers_earliest_discovery() {
        let mut fr = Frontier::default();
        fr.push(entry(7, 18, 10, 5));
        fr.push(entry(3, 18, 10, 2));
        fr.push(entry(9, 18, 10, 9));
        assert_eq!(drain(fr), vec![3, 7, 9]);
    }

    #[test]
    fn clear_empties() {
        let mut fr = Frontier::default();
        fr.push(entry(0, 1, 0, 0));
        fr.clear();
        assert!(fr.pop().is_none());
    }
}
