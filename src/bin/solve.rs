use std::path::Path;

use anyhow::Result;
use clap::Parser;

use spire_solve::cli::{Args, BattleConfig};
use spire_solve::piles::PileStore;
use spire_solve::report;
use spire_solve::search::{Solver, SolverOptions};
use spire_solve::state::combat::CombatState;

fn main() -> Result<()> {
    spire_solve::init_logging();

    let args = Args::parse();
    let config = match BattleConfig::from_args(&args) {
        Ok(config) => config,
        Err(error) => {
            log::error!("configuration error: {error:#}");
            std::process::exit(1);
        }
    };

    let mut store = PileStore::new();
    let deck_handle = store.intern(config.deck.clone());
    let empty_handle = store.empty_handle();
    let root = CombatState::new_root(config.hp, config.max_hp, deck_handle, empty_handle, config.relics);

    log::info!(
        "solving {} hp (max {}) against {} with a {}-card deck",
        config.hp,
        config.max_hp,
        config.fight.name,
        config.deck.total()
    );

    let options = SolverOptions::default();
    let mut solver = Solver::new(root, store, config.fight, options);
    let iterations = solver.run();
    log::info!("search complete after {iterations} frontier expansions");

    let report = report::compile(&solver.arena, &solver.store);
    report::print(&report);

    if report.node_count <= options.printable_tree_ceiling {
        let path = Path::new(&args.tree_dump);
        match report::dump_tree(&solver.arena, path) {
            Ok(()) => log::info!("wrote full tree dump to {}", path.display()),
            Err(error) => log::warn!("failed to write tree dump to {}: {error:#}", path.display()),
        }
    } else {
        log::info!(
            "tree has {} nodes, above the {}-node printable ceiling; skipping the dump",
            report.node_count,
            options.printable_tree_ceiling
        );
    }

    Ok(())
}
