use clap::Parser;

/// Command-line surface: a single battle to solve, described entirely by its arguments. There
/// is no persisted state between runs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// named character preset (registry::character) supplying defaults for max hp, starting
    /// deck, and relics. Any of `--deck`/`--maxhp`/`--relics` overrides the matching default.
    #[arg(long)]
    pub character: Option<String>,

    /// comma-separated card names, each optionally prefixed `NxName` for N copies
    /// (e.g. `5xStrike,4xDefend,1xBash`). Overrides the character preset's deck when given.
    #[arg(long)]
    pub deck: Option<String>,

    /// starting hp, or `full` to start at max hp. Defaults to `full`.
    #[arg(long, default_value = "full")]
    pub hp: String,

    /// max hp. Required unless `--character` supplies one.
    #[arg(long)]
    pub maxhp: Option<crate::Hp>,

    /// comma-separated relic names, case-insensitive, `_`/`-`/` ` interchangeable. Adds to
    /// (does not replace) any relics carried by `--character`.
    #[arg(long, default_value = "")]
    pub relics: String,

    /// named fight preset (registry::fight) describing the enemy layout distribution.
    #[arg(long)]
    pub fight: String,

    /// path to write the full solved-tree dump to, gated by `printable_tree_ceiling`.
    #[arg(long, default_value = "tree.txt")]
    pub tree_dump: String,
}
