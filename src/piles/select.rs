use crate::piles::pile::Pile;
use crate::piles::store::{PileHandle, PileStore};
use crate::{CardId, Probability};

fn binomial(n: u64, r: u64) -> u128 {
    if r > n {
        return 0;
    }
    let r = r.min(n - r);
    let mut result: u128 = 1;
    for i in 0..r {
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result
}

/// enumerate every way to pick counts `(k_1..k_n)` for `entries[0..]` summing to `remaining`,
/// in lexicographic-descending order, appending completed combinations to `out`.
fn enumerate(entries: &[(CardId, u16)], remaining: u32, combo: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
    if entries.is_empty() {
        if remaining == 0 {
            out.push(combo.clone());
        }
        return;
    }
    let (_, multiplicity) = entries[0];
    let rest = &entries[1..];
    let rest_capacity: u32 = rest.iter().map(|(_, m)| *m as u32).sum();
    let max_here = (multiplicity as u32).min(remaining);
    let min_here = remaining.saturating_sub(rest_capacity);
    let mut count = max_here;
    loop {
        combo.push(count);
        enumerate(rest, remaining - count, combo, out);
        combo.pop();
        if count == min_here {
            break;
        }
        count -= 1;
    }
}

/// Exhaustive hypergeometric draw enumeration: every way to draw exactly `k` cards from `pile`,
/// each tagged with its exact probability and the resulting drawn/remaining piles. Probabilities
/// sum to 1.
pub fn select(store: &mut PileStore, pile: PileHandle, k: u32) -> Vec<(Probability, PileHandle, PileHandle)> {
    let entries = store.pile(pile).entries().to_vec();
    let total = store.pile(pile).total();
    assert!(k <= total, "cannot draw {k} cards from a pile of {total}");

    let mut combos = Vec::new();
    let mut combo = Vec::new();
    enumerate(&entries, k, &mut combo, &mut combos);

    let denominator = binomial(total as u64, k as u64);
    combos
        .into_iter()
        .map(|counts| {
            let mut numerator: u128 = 1;
            let mut drawn_counts = Vec::new();
            let mut remaining_counts = Vec::new();
            for ((id, multiplicity), count) in entries.iter().copied().zip(counts.iter().copied()) {
                numerator *= binomial(multiplicity as u64, count as u64);
                if count > 0 {
                    drawn_counts.push((id, count as u16));
                }
                if multiplicity as u32 - count > 0 {
                    remaining_counts.push((id, (multiplicity as u32 - count) as u16));
                }
            }
            let probability = numerator as f64 / denominator as f64;
            let drawn = store.intern(Pile::from_counts(drawn_counts));
            let remaining = store.intern(Pile::from_counts(remaining_counts));
            (probability, drawn, remaining)
        })
        .collect()
}
