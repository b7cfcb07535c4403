use std::collections::HashMap;

use crate::piles::pile::Pile;
use crate::CardId;

/// A handle into a `PileStore`. Equality is handle identity: two piles with identical contents
/// always carry the same handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PileHandle(u32);

struct Entry {
    pile: Pile,
    /// `add_edges[id]` = handle reached by adding one copy of card `id`, once computed.
    add_edges: Vec<Option<PileHandle>>,
    /// `remove_edges[id]` = handle reached by removing one copy of card `id`, once computed.
    remove_edges: Vec<Option<PileHandle>>,
}

impl Entry {
    fn new(pile: Pile) -> Self {
        Self { pile, add_edges: Vec::new(), remove_edges: Vec::new() }
    }
}

/// Canonicalizing multiset interner. Every distinct pile of cards that has ever been
/// constructed during a search gets exactly one `PileHandle`; the store lazily
/// materializes `add`/`remove` successor edges so repeated traversal of the same
/// draw/discard/exhaust transitions costs one hash lookup, not a full pile rebuild.
pub struct PileStore {
    entries: Vec<Entry>,
    index: HashMap<Pile, PileHandle>,
}

impl PileStore {
    pub fn new() -> Self {
        let empty = Entry::new(Pile::empty());
        let mut index = HashMap::new();
        index.insert(Pile::empty(), PileHandle(0));
        Self { entries: vec![empty], index }
    }

    pub fn empty_handle(&self) -> PileHandle {
        PileHandle(0)
    }

    pub fn pile(&self, handle: PileHandle) -> &Pile {
        &self.entries[handle.0 as usize].pile
    }

    /// canonicalize an arbitrary pile value, interning it if this is the first time it has been
    /// seen. Used for piles constructed outside the add/remove edge machinery (e.g. `select`'s
    /// drawn/remaining outputs, or a starting deck built from a preset).
    pub fn intern(&mut self, pile: Pile) -> PileHandle {
        if let Some(handle) = self.index.get(&pile) {
            return *handle;
        }
        let handle = PileHandle(self.entries.len() as u32);
        self.index.insert(pile.clone(), handle);
        self.entries.push(Entry::new(pile));
        handle
    }

    fn ensure_edge_slot(edges: &mut Vec<Option<PileHandle>>, id: CardId) {
        let idx = id as usize;
        if edges.len() <= idx {
            edges.resize(idx + 1, None);
        }
    }

    /// returns the handle for `handle`'s pile plus one copy of `id`, creating and linking the
    /// canonical successor entry (both directions) on first miss.
    pub fn add_card(&mut self, handle: PileHandle, id: CardId) -> PileHandle {
        if let Some(cached) = self.entries[handle.0 as usize].add_edges.get(id as usize).copied().flatten() {
            return cached;
        }
        let next_pile = self.entries[handle.0 as usize].pile.plus_one(id);
        let next = self.intern(next_pile);

        Self::ensure_edge_slot(&mut self.entries[handle.0 as usize].add_edges, id);
        self.entries[handle.0 as usize].add_edges[id as usize] = Some(next);

        Self::ensure_edge_slot(&mut self.entries[next.0 as usize].remove_edges, id);
        self.entries[next.0 as usize].remove_edges[id as usize] = Some(handle);

        next
    }

    /// returns the handle for `handle`'s pile minus one copy of `id`. Precondition:
    /// `pile(handle).count(id) >= 1`.
    pub fn remove_card(&mut self, handle: PileHandle, id: CardId) -> PileHandle {
        if let Some(cached) = self.entries[handle.0 as usize].remove_edges.get(id as usize).copied().flatten() {
            return cached;
        }
        let prev_pile = self.entries[handle.0 as usize].pile.minus_one(id);
        let prev = self.intern(prev_pile);

        Self::ensure_edge_slot(&mut self.entries[handle.0 as usize].remove_edges, id);
        self.entries[handle.0 as usize].remove_edges[id as usize] = Some(prev);

        Self::ensure_edge_slot(&mut self.entries[prev.0 as usize].add_edges, id);
        self.entries[prev.0 as usize].add_edges[id as usize] = Some(handle);

        prev
    }

    /// Deck dominance: `a` is deck-worse-or-equal to `b` iff totals match and, for every card in
    /// `b`, `a` has no more of it (counting an upgraded card toward its base) than `b` does, and
    /// no more of its upgrade either. Gated by `upgrades_strictly_better`; when that policy is
    /// off only handle identity counts.
    pub fn deck_worse_or_equal(
        &self,
        a: PileHandle,
        b: PileHandle,
        upgrades_strictly_better: bool,
        upgraded_of: impl Fn(CardId) -> Option<CardId>,
    ) -> bool {
        if a == b {
            return true;
        }
        if !upgrades_strictly_better {
            return false;
        }
        let pile_a = self.pile(a);
        let pile_b = self.pile(b);
        if pile_a.total() != pile_b.total() {
            return false;
        }
        for (id, that_count) in pile_b.entries().iter().copied() {
            let this_count = pile_a.count(id);
            let (this_upgraded, that_upgraded) = match upgraded_of(id) {
                Some(up) => (pile_a.count(up), pile_b.count(up)),
                None => (0, 0),
            };
            if this_upgraded > that_upgraded {
                return false;
            }
            if this_count + this_upgraded > that_count + that_upgraded {
                return false;
            }
        }
        true
    }
}

impl Default for PileStore {
    fn default() -> Self {
        Self::new()
    }
}
