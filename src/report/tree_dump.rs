//! Optional `tree.txt` dump, gated by `SolverOptions::printable_tree_ceiling` so a fully-expanded
//! large tree never gets written out accidentally.

use std::fmt::Write as _;
use std::io::Write as _;

use crate::search::tree::Arena;

/// writes an indented, depth-first rendering of the whole tree to `path`. Callers are expected
/// to check the node count against `printable_tree_ceiling` before calling this.
pub fn dump_tree(arena: &Arena, path: &std::path::Path) -> anyhow::Result<()> {
    let mut rendered = String::new();
    let mut stack = vec![(arena.root(), 0usize)];
    while let Some((node, depth)) = stack.pop() {
        let state = arena.state(node);
        let decision = match state.parent_decision {
            Some(ref decision) => decision.to_string(),
            None => "root".to_string(),
        };
        writeln!(
            rendered,
            "{}turn={} hp={} objective={:.3} solved={} prob={:.4} :: {}",
            "  ".repeat(depth),
            state.turn,
            state.hp,
            state.objective,
            state.tree_solved,
            state.probability,
            decision
        )?;
        for child in arena.children(node).into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    let mut file = std::fs::File::create(path)?;
    file.write_all(rendered.as_bytes())?;
    Ok(())
}
