//! Result cache for the search.
//!
//! Two positions reached by different deals can still be strategically
//! identical: what matters to the outcome is how many tricks are left, who
//! is on lead, and how many cards of each suit each player still holds —
//! not which exact thirteen cards a deal happened to distribute. Caching
//! on `(tricks_played, player_on_lead, suit_length_signature)` lets one
//! search result generalize across every deal with the same shape, instead
//! of only the exact deal that produced it.
//!
//! A cached result doesn't even need the suit lengths to match exactly: it
//! records which cards it actually depended on (the "relevant mask", built
//! from the move's own rank-equivalence mask plus whichever moves later in
//! the line turned out to matter) and a later lookup need only agree with
//! it on those cards, not on the whole hand.

use std::collections::HashMap;

use super::state::GameState;
use super::types::*;

struct CacheEntry {
    /// `cards_left` mask recorded at the time this entry was stored.
    cards_left: u64,
    /// Mask of cards this result actually depends on.
    relevant_mask: u64,
    lower: u8,
    upper: u8,
}

/// 14 possible trick-played counts (0..=13) x 4 players on lead.
const TRICK_BANDS: usize = NUM_RANKS + 1;

pub struct Cache {
    buckets: Vec<HashMap<u64, Vec<CacheEntry>>>,
}

impl Cache {
    pub fn new() -> Self {
        let mut buckets = Vec::with_capacity(TRICK_BANDS * NUM_PLAYERS);
        for _ in 0..(TRICK_BANDS * NUM_PLAYERS) {
            buckets.push(HashMap::new());
        }
        Cache { buckets }
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    #[inline]
    fn bucket_index(tricks_played: usize, pl: Player) -> usize {
        tricks_played * NUM_PLAYERS + pl
    }

    /// Look up whether `trick_target` is known to be makeable or not
    /// makeable from `state`, with `pl` on lead. Returns `Some(true)`,
    /// `Some(false)`, or `None` if the cache has nothing conclusive, along
    /// with the relevant-cards mask of whichever entry answered the query
    /// (folded into `rw_mask`, matching the caller's running accumulator).
    pub fn check(&self, state: &GameState, pl: Player, trick_target: usize, rw_mask: &mut u64) -> Option<bool> {
        let tricks_played = state.n_played / NUM_PLAYERS;
        let idx = Self::bucket_index(tricks_played, pl);
        let Some(entries) = self.buckets[idx].get(&state.suit_lengths) else {
            return None;
        };
        for entry in entries.iter().rev() {
            if (entry.relevant_mask & entry.cards_left) == (entry.relevant_mask & state.cards_left.value()) {
                if trick_target as u8 <= entry.lower {
                    *rw_mask |= entry.relevant_mask;
                    return Some(true);
                }
                if trick_target as u8 >= entry.upper {
                    *rw_mask |= entry.relevant_mask;
                    return Some(false);
                }
            }
        }
        None
    }

    /// Record that `trick_target` tricks were shown makeable.
    pub fn update_hit(&mut self, state: &GameState, pl: Player, relevant_mask: u64, trick_target: usize) {
        let tricks_played = state.n_played / NUM_PLAYERS;
        let idx = Self::bucket_index(tricks_played, pl);
        self.buckets[idx]
            .entry(state.suit_lengths)
            .or_default()
            .push(CacheEntry {
                cards_left: state.cards_left.value(),
                relevant_mask,
                lower: trick_target as u8,
                upper: (1 + state.tricks_left()) as u8,
            });
    }

    /// Record that `trick_target` tricks were shown not makeable.
    pub fn update_miss(&mut self, state: &GameState, pl: Player, relevant_mask: u64, trick_target: usize) {
        let tricks_played = state.n_played / NUM_PLAYERS;
        let idx = Self::bucket_index(tricks_played, pl);
        self.buckets[idx]
            .entry(state.suit_lengths)
            .or_default()
            .push(CacheEntry {
                cards_left: state.cards_left.value(),
                relevant_mask,
                lower: 0,
                upper: trick_target as u8,
            });
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Cache {
    fn clone(&self) -> Self {
        let mut buckets = Vec::with_capacity(self.buckets.len());
        for bucket in &self.buckets {
            let mut cloned = HashMap::with_capacity(bucket.len());
            for (k, entries) in bucket {
                let entries = entries
                    .iter()
                    .map(|e| CacheEntry {
                        cards_left: e.cards_left,
                        relevant_mask: e.relevant_mask,
                        lower: e.lower,
                        upper: e.upper,
                    })
                    .collect();
                cloned.insert(*k, entries);
            }
            buckets.push(cloned);
        }
        Cache { buckets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Cards;

    fn sample_state() -> GameState {
        let mut hands = [Cards::new(); NUM_PLAYERS];
        hands[NORTH].add(card(SPADE, ACE));
        hands[EAST].add(card(SPADE, KING));
        hands[SOUTH].add(card(SPADE, QUEEN));
        hands[WEST].add(card(SPADE, JACK));
        GameState::new(NOTRUMP, hands)
    }

    #[test]
    fn test_miss_then_hit_on_same_shape() {
        let state = sample_state();
        let mut cache = Cache::new();
        let mut rw = 0u64;
        assert_eq!(cache.check(&state, NORTH, 1, &mut rw), None);

        cache.update_hit(&state, NORTH, 0, 1);
        let mut rw2 = 0u64;
        assert_eq!(cache.check(&state, NORTH, 1, &mut rw2), Some(true));
    }

    #[test]
    fn test_update_miss_then_lookup_above_upper() {
        let state = sample_state();
        let mut cache = Cache::new();
        cache.update_miss(&state, NORTH, 0, 2);
        let mut rw = 0u64;
        assert_eq!(cache.check(&state, NORTH, 2, &mut rw), Some(false));
        // below upper, above any lower: inconclusive
        let mut rw2 = 0u64;
        assert_eq!(cache.check(&state, NORTH, 1, &mut rw2), None);
    }

    #[test]
    fn test_clear_empties_all_buckets() {
        let state = sample_state();
        let mut cache = Cache::new();
        cache.update_hit(&state, NORTH, 0, 1);
        cache.clear();
        let mut rw = 0u64;
        assert_eq!(cache.check(&state, NORTH, 1, &mut rw), None);
    }
}
