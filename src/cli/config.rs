use anyhow::{bail, Context};

use crate::catalog::{registry, FightPreset, RelicSet};
use crate::cli::args::Args;
use crate::piles::Pile;
use crate::{CardId, Hp};

/// A validated, ready-to-solve battle configuration. Configuration errors are caught here,
/// before any search tree exists.
pub struct BattleConfig {
    pub hp: Hp,
    pub max_hp: Hp,
    pub deck: Pile,
    pub relics: RelicSet,
    pub fight: &'static FightPreset,
}

impl BattleConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        registry::register_defaults();

        let character = match &args.character {
            Some(name) => Some(registry::character(name)?),
            None => None,
        };

        let max_hp = match args.maxhp {
            Some(max_hp) => max_hp,
            None => character
                .map(|c| c.max_hp)
                .ok_or_else(|| anyhow::anyhow!("--maxhp is required unless --character supplies one"))?,
        };
        if max_hp <= 0 {
            bail!("--maxhp must be positive, got {max_hp}");
        }

        let hp = match args.hp.as_str() {
            "full" => max_hp,
            other => other.parse::<Hp>().with_context(|| format!("invalid --hp value {other:?}"))?,
        };
        if hp <= 0 {
            bail!("--hp must be positive, got {hp}");
        }
        if hp > max_hp {
            bail!("--hp ({hp}) cannot exceed --maxhp ({max_hp})");
        }

        let deck = match &args.deck {
            Some(spec) => parse_deck(spec)?,
            None => {
                let character = character
                    .ok_or_else(|| anyhow::anyhow!("--deck is required unless --character supplies one"))?;
                Pile::from_counts(character.deck.iter().map(|&(id, count)| (id, count as u16)))
            }
        };
        if deck.is_empty() {
            bail!("deck must not be empty");
        }

        let mut relics = RelicSet::empty();
        if let Some(character) = character {
            for &id in character.relics {
                relics.insert(id);
            }
        }
        for name in args.relics.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            relics.insert(registry::relic_id_by_name(name)?);
        }

        let fight = registry::fight(&args.fight)?;

        Ok(Self { hp, max_hp, deck, relics, fight })
    }
}

/// parses `"3xStrike,1xDefend,Bash"` into a canonical [`Pile`]. A token with no `NxName`
/// multiplicity prefix counts once.
fn parse_deck(spec: &str) -> anyhow::Result<Pile> {
    let mut counts: Vec<(CardId, u16)> = Vec::new();
    for token in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (count, name) = split_multiplicity(token);
        let id = registry::card_id_by_name(name)
            .with_context(|| format!("in deck entry {token:?}"))?;
        counts.push((id, count));
    }
    Ok(Pile::from_counts(counts))
}

fn split_multiplicity(token: &str) -> (u16, &str) {
    if let Some(x) = token.find(['x', 'X']) {
        let (digits, rest) = token.split_at(x);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(count) = digits.parse::<u16>() {
                return (count, &rest[1..]);
            }
        }
    }
    (1, token)
}
