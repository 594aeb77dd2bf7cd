//! Rank-equivalence tracking.
//!
//! Two cards of the same suit that are adjacent in rank, with nothing still
//! in play between them, are strategically interchangeable: playing one or
//! the other can never change how many tricks either side can take. This
//! module keeps a doubly-linked ring per suit (`next_higher`/`next_lower`)
//! so the move generator can collapse such runs into a single representative
//! card plus a mask of the cards it stands in for.
//!
//! The ring is only updated at trick boundaries (after all four players have
//! played), never mid-trick — a card in the current trick hasn't actually
//! been removed from anyone's strategic options until the trick is over.

use super::types::*;

#[derive(Clone)]
pub struct RankEquivalence {
    next_higher: [Card; TOTAL_CARDS],
    next_lower: [Card; TOTAL_CARDS],
}

impl RankEquivalence {
    pub fn new() -> Self {
        let mut re = RankEquivalence {
            next_higher: [0; TOTAL_CARDS],
            next_lower: [0; TOTAL_CARDS],
        };
        re.reset();
        re
    }

    fn reset(&mut self) {
        for s in 0..NUM_SUITS {
            self.next_lower[card(s, TWO)] = card(s, TWO);
            self.next_higher[card(s, TWO)] = card(s, TWO + 1);
            for r in (TWO + 1)..ACE {
                self.next_lower[card(s, r)] = card(s, r - 1);
                self.next_higher[card(s, r)] = card(s, r + 1);
            }
            self.next_lower[card(s, ACE)] = card(s, ACE - 1);
            self.next_higher[card(s, ACE)] = card(s, ACE);
        }
    }

    /// Remove a card from the ring (it has just been played, and its trick
    /// has been won). Its neighbors become adjacent to each other.
    pub fn play(&mut self, c: Card) {
        let nh = self.next_higher[c];
        let nl = self.next_lower[c];
        self.next_higher[nl] = nh;
        self.next_lower[nh] = nl;
    }

    /// Undo the most recent `play`. Only ever called in LIFO order relative
    /// to `play`, so the neighbors recorded at play time are still correct.
    pub fn unplay(&mut self, c: Card) {
        let nh = self.next_higher[c];
        let nl = self.next_lower[c];
        if nl != c {
            self.next_higher[nl] = c;
        }
        if nh != c {
            self.next_lower[nh] = c;
        }
    }

    #[inline]
    pub fn next_higher(&self, c: Card) -> Card {
        self.next_higher[c]
    }

    #[inline]
    pub fn next_lower(&self, c: Card) -> Card {
        self.next_lower[c]
    }
}

impl Default for RankEquivalence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ring_links_whole_suit() {
        let re = RankEquivalence::new();
        assert_eq!(re.next_higher(card(SPADE, TWO)), card(SPADE, THREE));
        assert_eq!(re.next_lower(card(SPADE, TWO)), card(SPADE, TWO));
        assert_eq!(re.next_higher(card(SPADE, ACE)), card(SPADE, ACE));
        assert_eq!(re.next_lower(card(SPADE, ACE)), card(SPADE, KING));
    }

    #[test]
    fn test_play_closes_the_gap() {
        let mut re = RankEquivalence::new();
        re.play(card(SPADE, KING));
        assert_eq!(re.next_higher(card(SPADE, QUEEN)), card(SPADE, ACE));
        assert_eq!(re.next_lower(card(SPADE, ACE)), card(SPADE, QUEEN));
    }

    #[test]
    fn test_unplay_is_exact_inverse() {
        let mut re = RankEquivalence::new();
        let before = (re.next_higher(card(SPADE, QUEEN)), re.next_lower(card(SPADE, ACE)));
        re.play(card(SPADE, KING));
        re.unplay(card(SPADE, KING));
        let after = (re.next_higher(card(SPADE, QUEEN)), re.next_lower(card(SPADE, ACE)));
        assert_eq!(before, after);
        assert_eq!(re.next_higher(card(SPADE, KING)), card(SPADE, ACE));
        assert_eq!(re.next_lower(card(SPADE, KING)), card(SPADE, QUEEN));
    }

    #[test]
    fn test_adjacent_equivalence_collapses_after_playing_between() {
        // With king played, queen and ace become rank-adjacent to each other.
        let mut re = RankEquivalence::new();
        re.play(card(HEART, KING));
        assert_eq!(re.next_higher(card(HEART, QUEEN)), card(HEART, ACE));
    }
}
