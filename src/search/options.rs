//! Tunable solver policy flags threaded through expansion and dominance pruning, plus the
//! deck-dominance upgrade policy.

#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    /// When true, any surviving non-dead candidate ending causes every dead ending at that
    /// decision frame to be pruned outright, trading away the "closest to surviving" death
    /// tie-break for never keeping a losing line once a winning one is known. Off by default, to
    /// preserve that tie-break.
    pub prefer_survival: bool,
    /// whether `PileStore::deck_worse_or_equal` treats an upgraded card as dominating its base.
    pub upgrades_strictly_better: bool,
    /// nodes above this count suppress the optional `tree.txt` dump in `report`.
    pub printable_tree_ceiling: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { prefer_survival: false, upgrades_strictly_better: true, printable_tree_ceiling: 5_000 }
    }
}
