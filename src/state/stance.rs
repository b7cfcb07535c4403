#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    None,
    Wrath,
    Calm,
}

impl Stance {
    /// wrath doubles outgoing and incoming attack damage; calm grants energy on exit.
    pub fn damage_multiplier(self) -> i32 {
        match self {
            Stance::Wrath => 2,
            Stance::Calm | Stance::None => 1,
        }
    }
}

impl TryFrom<i16> for Stance {
    type Error = anyhow::Error;
    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Stance::None),
            1 => Ok(Stance::Wrath),
            2 => Ok(Stance::Calm),
            other => Err(anyhow::anyhow!("invalid stance discriminant {other}")),
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stance::None => write!(f, "none"),
            Stance::Wrath => write!(f, "wrath"),
            Stance::Calm => write!(f, "calm"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrath_doubles_damage() {
        assert_eq!(Stance::Wrath.damage_multiplier(), 2);
        assert_eq!(Stance::None.damage_multiplier(), 1);
    }

    #[test]
    fn discriminant_round_trip() {
        for s in [Stance::None, Stance::Wrath, Stance::Calm] {
            assert_eq!(Stance::try_from(s as i16).unwrap_or(Stance::None), s);
        }
    }
}
