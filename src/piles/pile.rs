use crate::CardId;

/// A multiset of cards in canonical form: sorted by card id, one entry per distinct id, with a
/// cached total. Two `Pile` values with the same contents compare equal regardless of the order
/// cards were added in. This is the value type the store interns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pile {
    cards: Vec<(CardId, u16)>,
    total: u32,
}

impl Pile {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_counts(counts: impl IntoIterator<Item = (CardId, u16)>) -> Self {
        let mut pile = Self::empty();
        for (id, count) in counts {
            pile.add(id, count);
        }
        pile
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, id: CardId) -> u16 {
        self.cards.binary_search_by_key(&id, |(c, _)| *c).map(|i| self.cards[i].1).unwrap_or(0)
    }

    pub fn entries(&self) -> &[(CardId, u16)] {
        &self.cards
    }

    fn add(&mut self, id: CardId, count: u16) {
        if count == 0 {
            return;
        }
        match self.cards.binary_search_by_key(&id, |(c, _)| *c) {
            Ok(i) => self.cards[i].1 += count,
            Err(i) => self.cards.insert(i, (id, count)),
        }
        self.total += count as u32;
    }

    fn remove(&mut self, id: CardId, count: u16) {
        let i = self
            .cards
            .binary_search_by_key(&id, |(c, _)| *c)
            .unwrap_or_else(|_| panic!("pile does not contain card {id}"));
        assert!(self.cards[i].1 >= count, "removing more copies of card {id} than the pile has");
        if self.cards[i].1 == count {
            self.cards.remove(i);
        } else {
            self.cards[i].1 -= count;
        }
        self.total -= count as u32;
    }

    /// returns a copy of `self` with one more copy of `id`. Used only by the store, which owns
    /// canonicalization; direct callers should go through `PileStore::add_card`.
    pub(crate) fn plus_one(&self, id: CardId) -> Self {
        let mut next = self.clone();
        next.add(id, 1);
        next
    }

    /// returns a copy of `self` with one fewer copy of `id`. Precondition: `count(id) >= 1`.
    pub(crate) fn minus_one(&self, id: CardId) -> Self {
        let mut next = self.clone();
        next.remove(id, 1);
        next
    }
}

impl std::fmt::Display for Pile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{} cards", self.total)?;
        for (i, (id, count)) in self.cards.iter().enumerate() {
            write!(f, "{}{}x{}", if i == 0 { ": " } else { ", " }, count, id)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_returns_to_original() {
        let base = Pile::from_counts([(1u16, 2u16), (2, 1)]);
        let added = base.plus_one(1);
        assert_eq!(added.count(1), 3);
        let removed = added.minus_one(1);
        assert_eq!(removed, base);
    }

    #[test]
    fn equality_is_order_independent() {
        let a = Pile::from_counts([(1u16, 1u16), (2, 1)]);
        let b = Pile::from_counts([(2u16, 1u16), (1, 1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_pile_has_zero_total() {
        assert_eq!(Pile::empty().total(), 0);
        assert!(Pile::empty().is_empty());
    }
}
