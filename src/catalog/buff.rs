/// the fixed buff/debuff alphabet. Every buff vector (player or per-enemy) is indexed by this
/// enum's discriminant; `COUNT` sizes the backing array the way the source game sizes its
/// `value[kBuffFinal]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum BuffKind {
    Strength,
    Dexterity,
    Weak,
    Frail,
    Vulnerable,
    Ritual,
    Thorns,
    Enrage,
    Metallicize,
    CurlUp,
    Regenerate,
    StrengthDown,
    Poison,
    Rage,
    Barricade,
}

impl BuffKind {
    pub const COUNT: usize = 15;

    pub const ALL: [BuffKind; Self::COUNT] = [
        BuffKind::Strength,
        BuffKind::Dexterity,
        BuffKind::Weak,
        BuffKind::Frail,
        BuffKind::Vulnerable,
        BuffKind::Ritual,
        BuffKind::Thorns,
        BuffKind::Enrage,
        BuffKind::Metallicize,
        BuffKind::CurlUp,
        BuffKind::Regenerate,
        BuffKind::StrengthDown,
        BuffKind::Poison,
        BuffKind::Rage,
        BuffKind::Barricade,
    ];

    /// strictly beneficial to its owner: more stacks is never worse.
    pub const POSITIVE: [BuffKind; 8] = [
        BuffKind::Strength,
        BuffKind::Dexterity,
        BuffKind::Ritual,
        BuffKind::Thorns,
        BuffKind::Enrage,
        BuffKind::Metallicize,
        BuffKind::Rage,
        BuffKind::Barricade,
    ];

    /// strictly detrimental to its owner: more stacks is never better.
    pub const NEGATIVE: [BuffKind; 5] =
        [BuffKind::Weak, BuffKind::Frail, BuffKind::Vulnerable, BuffKind::StrengthDown, BuffKind::Poison];

    /// neither: dominance comparisons require exact equality on these.
    pub const AMBIGUOUS: [BuffKind; 2] = [BuffKind::CurlUp, BuffKind::Regenerate];
}

impl TryFrom<i16> for BuffKind {
    type Error = anyhow::Error;
    fn try_from(value: i16) -> Result<Self, Self::Error> {
        BuffKind::ALL
            .into_iter()
            .find(|b| *b as i16 == value)
            .ok_or_else(|| anyhow::anyhow!("unknown buff index {value}"))
    }
}

/// stack counts over the fixed buff alphabet, mirroring the source game's `BuffState`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuffVec([i16; BuffKind::COUNT]);

impl BuffVec {
    pub fn new() -> Self {
        Self([0; BuffKind::COUNT])
    }

    pub fn get(&self, buff: BuffKind) -> i16 {
        self.0[buff as usize]
    }

    pub fn add(&mut self, buff: BuffKind, stacks: i16) {
        self.0[buff as usize] += stacks;
    }

    pub fn set(&mut self, buff: BuffKind, stacks: i16) {
        self.0[buff as usize] = stacks;
    }

    /// true if `self` is never strictly better than `that` for the owning side's comparison
    /// direction (higher positive/lower negative = better), with ambiguous buffs requiring
    /// exact equality.
    fn worse_or_equal(&self, that: &Self, invert: bool) -> bool {
        if self == that {
            return true;
        }
        for buff in BuffKind::POSITIVE {
            let (a, b) = (self.get(buff), that.get(buff));
            if invert {
                if a < b {
                    return false;
                }
            } else if a > b {
                return false;
            }
        }
        for buff in BuffKind::NEGATIVE {
            let (a, b) = (self.get(buff), that.get(buff));
            if invert {
                if a > b {
                    return false;
                }
            } else if a < b {
                return false;
            }
        }
        for buff in BuffKind::AMBIGUOUS {
            if self.get(buff) != that.get(buff) {
                return false;
            }
        }
        true
    }

    /// player dominance direction: more positive buffs is better, more negative is worse.
    pub fn player_worse_or_equal(&self, that: &Self) -> bool {
        self.worse_or_equal(that, false)
    }

    /// enemy dominance direction: from the player's perspective an enemy with *fewer* positive
    /// buffs and *more* negative buffs is the better (worse-for-the-enemy) state, so the sense
    /// is inverted relative to the player comparison.
    pub fn mob_worse_or_equal(&self, that: &Self) -> bool {
        self.worse_or_equal(that, true)
    }

    /// end-of-turn decay: vulnerable/weak/frail tick down, ritual feeds strength, a pending
    /// strength-down is applied once then cleared.
    pub fn cycle(&mut self) {
        if self.get(BuffKind::Vulnerable) > 0 {
            self.add(BuffKind::Vulnerable, -1);
        }
        if self.get(BuffKind::Weak) > 0 {
            self.add(BuffKind::Weak, -1);
        }
        if self.get(BuffKind::Frail) > 0 {
            self.add(BuffKind::Frail, -1);
        }
        let ritual = self.get(BuffKind::Ritual);
        if ritual != 0 {
            self.add(BuffKind::Strength, ritual);
        }
        let strength_down = self.get(BuffKind::StrengthDown);
        if strength_down != 0 {
            self.add(BuffKind::Strength, -strength_down);
            self.set(BuffKind::StrengthDown, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn more_strength_is_never_worse_for_the_player() {
        let mut weak = BuffVec::new();
        let mut strong = BuffVec::new();
        strong.add(BuffKind::Strength, 3);
        assert!(weak.player_worse_or_equal(&strong));
        assert!(!strong.player_worse_or_equal(&weak));
        weak.add(BuffKind::Vulnerable, 2);
        assert!(!weak.player_worse_or_equal(&strong));
    }

    #[test]
    fn more_strength_on_a_mob_is_worse_for_the_player_comparing_states() {
        let mut weak_mob = BuffVec::new();
        let mut strong_mob = BuffVec::new();
        strong_mob.add(BuffKind::Strength, 3);
        assert!(strong_mob.mob_worse_or_equal(&weak_mob));
        assert!(!weak_mob.mob_worse_or_equal(&strong_mob));
    }

    #[test]
    fn cycle_applies_ritual_and_strength_down() {
        let mut buffs = BuffVec::new();
        buffs.add(BuffKind::Ritual, 2);
        buffs.add(BuffKind::StrengthDown, 1);
        buffs.add(BuffKind::Strength, 5);
        buffs.cycle();
        assert_eq!(buffs.get(BuffKind::Strength), 6);
        assert_eq!(buffs.get(BuffKind::StrengthDown), 0);
    }
}
