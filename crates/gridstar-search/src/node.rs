/// Where a cell stands in the current search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Membership {
    #[default]
    Unseen,
    /// In the frontier (open set).
    Open,
    /// Expanded (closed set).
    Closed,
}

/// Per-cell membership record, indexed like the grid.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Node {
    pub(crate) membership: Membership,
    /// Discovery order: assigned when the cell first enters the frontier and
    /// kept when its cost later improves.
    pub(crate) seq: u64,
}
