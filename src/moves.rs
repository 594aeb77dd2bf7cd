//! Seat-specialized move generation.
//!
//! Each of the four seats in a trick sees a different set of legal choices
//! (lead from any suit; follow suit if possible; otherwise discard or ruff)
//! and a different reason to prefer one ordering over another, since a
//! move's *rank* among its own side's later options matters more than its
//! absolute value. These are deliberately four separate routines rather
//! than one parameterized one: the branching needed to special-case "can
//! the fourth hand still be beaten" only applies to third hand, "has this
//! trick already been ruffed" only to fourth, and so on, and folding them
//! into one function would just hide that under a pile of seat checks.
//!
//! Cards that are currently interchangeable (adjacent in rank, with no
//! other card resting between them) are collapsed to a single
//! representative move; the cards it stands in for are recorded in an
//! "equivalents" mask so a caller who finds out the representative card's
//! bound also knows the bound for the cards it was standing in for.

use super::cards::Cards;
use super::rankequiv::RankEquivalence;
use super::state::TrickState;
use super::types::*;

/// A fixed-capacity, ordered list of legal moves, each paired with the
/// mask of other cards currently equivalent to it.
pub struct MoveList {
    cards: [Card; NUM_RANKS],
    equivs: [u64; NUM_RANKS],
    len: usize,
}

impl MoveList {
    fn new() -> Self {
        MoveList {
            cards: [0; NUM_RANKS],
            equivs: [0; NUM_RANKS],
            len: 0,
        }
    }

    fn push(&mut self, c: Card, equiv_mask: u64) {
        self.cards[self.len] = c;
        self.equivs[self.len] = equiv_mask;
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, i: usize) -> (Card, u64) {
        (self.cards[i], self.equivs[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Card, u64)> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }
}

/// One suit's unique cards in a hand, lowest rank first, with rank-adjacent
/// runs collapsed to their lowest member plus an equivalents mask.
struct SuitGroups {
    cards: [Card; NUM_RANKS],
    equivs: [u64; NUM_RANKS],
    len: usize,
}

fn group_suit(hand_suit: Cards, rankequiv: &RankEquivalence) -> SuitGroups {
    let mut g = SuitGroups {
        cards: [0; NUM_RANKS],
        equivs: [0; NUM_RANKS],
        len: 0,
    };
    let mut bits = hand_suit.value();
    let mut last_move: Option<Card> = None;
    while bits != 0 {
        let mcard = bits & bits.wrapping_neg();
        bits ^= mcard;
        let this_move = mcard.trailing_zeros() as Card;
        let adjacent = match last_move {
            Some(lm) => rankequiv.next_higher(lm) == this_move,
            None => false,
        };
        if adjacent {
            g.equivs[g.len - 1] |= mcard;
        } else {
            g.cards[g.len] = this_move;
            g.equivs[g.len] = mcard;
            g.len += 1;
        }
        last_move = Some(this_move);
    }
    g
}

/// Per-suit groups for every suit in a hand, used whenever a seat can't
/// follow suit and must choose from every suit it holds.
fn group_all_suits(hand: Cards, rankequiv: &RankEquivalence) -> [SuitGroups; NUM_SUITS] {
    [
        group_suit(hand.suit(CLUB), rankequiv),
        group_suit(hand.suit(DIAMOND), rankequiv),
        group_suit(hand.suit(HEART), rankequiv),
        group_suit(hand.suit(SPADE), rankequiv),
    ]
}

/// Append, in order: a low ruff, a low discard from each non-trump suit,
/// then every remaining ruff, then every remaining discard. This is the
/// ordering shared by seats 2-4 whenever they can't follow suit.
fn append_discards_and_ruffs(moves: &mut MoveList, groups: &[SuitGroups; NUM_SUITS], trumps: Suit) {
    if trumps != NOTRUMP && groups[trumps].len > 0 {
        moves.push(groups[trumps].cards[0], groups[trumps].equivs[0]);
    }
    for s in 0..NUM_SUITS {
        if s == trumps {
            continue;
        }
        if groups[s].len > 0 {
            moves.push(groups[s].cards[0], groups[s].equivs[0]);
        }
    }
    if trumps != NOTRUMP {
        for i in 1..groups[trumps].len {
            moves.push(groups[trumps].cards[i], groups[trumps].equivs[i]);
        }
    }
    for s in 0..NUM_SUITS {
        if s == trumps {
            continue;
        }
        for i in 1..groups[s].len {
            moves.push(groups[s].cards[i], groups[s].equivs[i]);
        }
    }
}

/// Moves for the first player to a trick: the highest card in each suit,
/// then the lowest card in each suit, then interior cards. A leader either
/// wants to cash winners or keep something back, and has no trick in
/// progress to react to, so suit-by-suit extremes are the only useful
/// heuristic.
pub fn generate_moves_seat0(hand: Cards, rankequiv: &RankEquivalence) -> MoveList {
    let groups = group_all_suits(hand, rankequiv);
    let mut moves = MoveList::new();
    for s in 0..NUM_SUITS {
        if groups[s].len > 0 {
            let i = groups[s].len - 1;
            moves.push(groups[s].cards[i], groups[s].equivs[i]);
        }
    }
    for s in 0..NUM_SUITS {
        if groups[s].len > 1 {
            moves.push(groups[s].cards[0], groups[s].equivs[0]);
        }
    }
    for s in 0..NUM_SUITS {
        if groups[s].len > 2 {
            for i in 1..groups[s].len - 1 {
                moves.push(groups[s].cards[i], groups[s].equivs[i]);
            }
        }
    }
    moves
}

/// Moves for the second player to a trick. Following suit: try the highest
/// card, then the lowest, then work down from the top — second hand has no
/// information yet about whether its side can win the trick, so testing the
/// top card first catches cheap wins, and the rest is played safe (low)
/// before anything extravagant.
pub fn generate_moves_seat1(
    hand: Cards,
    trickstate: &TrickState,
    rankequiv: &RankEquivalence,
    trumps: Suit,
) -> MoveList {
    let mut moves = MoveList::new();
    let following = hand.suit(trickstate.led_suit);
    if !following.is_empty() {
        let g = group_suit(following, rankequiv);
        moves.push(g.cards[g.len - 1], g.equivs[g.len - 1]);
        if g.len > 1 {
            moves.push(g.cards[0], g.equivs[0]);
        }
        for i in 2..g.len {
            let idx = g.len - i;
            moves.push(g.cards[idx], g.equivs[idx]);
        }
    } else {
        let groups = group_all_suits(hand, rankequiv);
        append_discards_and_ruffs(&mut moves, &groups, trumps);
    }
    moves
}

/// Moves for the third player to a trick (partner's hand is visible and
/// known, so this seat can reason about whether fourth hand can beat it).
pub fn generate_moves_seat2(
    hand: Cards,
    trickstate: &TrickState,
    rankequiv: &RankEquivalence,
    trumps: Suit,
    seat: Player,
    fourth_hand: Cards,
) -> MoveList {
    let mut moves = MoveList::new();
    let following = hand.suit(trickstate.led_suit);
    if !following.is_empty() {
        let g = group_suit(following, rankequiv);
        let n = g.len;

        let cant_beat_trick = g.cards[n - 1] < trickstate.winning_card
            || trickstate.win_suit != trickstate.led_suit;
        if cant_beat_trick {
            for i in 0..n {
                moves.push(g.cards[i], g.equivs[i]);
            }
            return moves;
        }

        let suit_pl3 = fourth_hand.suit(trickstate.led_suit);
        if suit_pl3.is_empty() {
            if trickstate.winner == partner(seat) {
                for i in 0..n {
                    moves.push(g.cards[i], g.equivs[i]);
                }
                return moves;
            }
            let winner = (0..n)
                .find(|&i| trickstate.winning_card <= g.cards[i])
                .unwrap_or(n);
            moves.push(g.cards[winner], g.equivs[winner]);
            for i in 0..winner {
                moves.push(g.cards[i], g.equivs[i]);
            }
            for i in (winner + 1)..n {
                moves.push(g.cards[i], g.equivs[i]);
            }
        } else {
            let winning_beats_all_of_pl3 = (1u64 << trickstate.winning_card) > suit_pl3.value();
            if trickstate.winner == partner(seat) && winning_beats_all_of_pl3 {
                for i in 0..n {
                    moves.push(g.cards[i], g.equivs[i]);
                }
                return moves;
            }
            let we_beat_pl3 = (1u64 << g.cards[n - 1]) > suit_pl3.value();
            if we_beat_pl3 {
                let winner = (0..n)
                    .find(|&i| trickstate.winning_card <= g.cards[i])
                    .unwrap_or(n - 1);
                for i in 0..=winner {
                    moves.push(g.cards[winner - i], g.equivs[winner - i]);
                }
                for i in (winner + 1)..n {
                    moves.push(g.cards[i], g.equivs[i]);
                }
            } else {
                let mut i = 0;
                while i < n {
                    let idx = n - 1 - i;
                    if g.cards[idx] < trickstate.winning_card {
                        break;
                    }
                    moves.push(g.cards[idx], g.equivs[idx]);
                    i += 1;
                }
                let mut j = 0;
                while i < n {
                    moves.push(g.cards[j], g.equivs[j]);
                    i += 1;
                    j += 1;
                }
            }
        }
    } else {
        let groups = group_all_suits(hand, rankequiv);
        append_discards_and_ruffs(&mut moves, &groups, trumps);
    }
    moves
}

/// Moves for the fourth (last) player to a trick: if it can follow suit,
/// knows exactly what it needs to beat; otherwise decides whether and how
/// high to ruff.
pub fn generate_moves_seat3(
    hand: Cards,
    trickstate: &TrickState,
    rankequiv: &RankEquivalence,
    trumps: Suit,
    seat: Player,
) -> MoveList {
    let mut moves = MoveList::new();
    let following = hand.suit(trickstate.led_suit);
    if !following.is_empty() {
        let g = group_suit(following, rankequiv);
        let n = g.len;

        if trickstate.win_suit != trickstate.led_suit {
            // Trick's already been ruffed; our suit can't win it regardless.
            for i in 0..n {
                moves.push(g.cards[i], g.equivs[i]);
            }
            return moves;
        }

        let winner = (0..n)
            .find(|&i| trickstate.winning_card <= g.cards[i])
            .unwrap_or(n);

        let partner_winning = trickstate.winner == partner(seat) && winner > 0;
        let start = if partner_winning {
            moves.push(g.cards[0], g.equivs[0]);
            1
        } else {
            0
        };
        if winner < n {
            moves.push(g.cards[winner], g.equivs[winner]);
        }
        for i in (winner + 1)..n {
            moves.push(g.cards[i], g.equivs[i]);
        }
        for i in start..winner {
            moves.push(g.cards[i], g.equivs[i]);
        }
    } else {
        let groups = group_all_suits(hand, rankequiv);
        let mut ruffer: Option<usize> = None;
        if trumps != NOTRUMP && groups[trumps].len > 0 {
            if trickstate.win_suit == trumps {
                for i in 0..groups[trumps].len {
                    if groups[trumps].cards[i] > trickstate.winning_card {
                        moves.push(groups[trumps].cards[i], groups[trumps].equivs[i]);
                        ruffer = Some(i);
                        break;
                    }
                }
            } else {
                moves.push(groups[trumps].cards[0], groups[trumps].equivs[0]);
                ruffer = Some(0);
            }
        }
        for s in 0..NUM_SUITS {
            if s == trumps {
                continue;
            }
            if groups[s].len > 0 {
                moves.push(groups[s].cards[0], groups[s].equivs[0]);
            }
        }
        if trumps != NOTRUMP {
            for i in 0..groups[trumps].len {
                if Some(i) != ruffer {
                    moves.push(groups[trumps].cards[i], groups[trumps].equivs[i]);
                }
            }
        }
        for s in 0..NUM_SUITS {
            if s == trumps {
                continue;
            }
            for i in 1..groups[s].len {
                moves.push(groups[s].cards[i], groups[s].equivs[i]);
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat0_orders_high_then_low_then_interior() {
        let mut hand = Cards::new();
        hand.add(card(SPADE, ACE));
        hand.add(card(SPADE, TEN));
        hand.add(card(SPADE, FIVE));
        hand.add(card(SPADE, TWO));
        let re = RankEquivalence::new();
        let moves = generate_moves_seat0(hand, &re);
        let seq: Vec<Card> = moves.iter().map(|(c, _)| c).collect();
        assert_eq!(seq[0], card(SPADE, ACE));
        assert_eq!(seq[1], card(SPADE, TWO));
        assert!(seq[2..].iter().all(|&c| c == card(SPADE, FIVE) || c == card(SPADE, TEN)));
    }

    #[test]
    fn test_equivalent_cards_collapse() {
        let mut hand = Cards::new();
        hand.add(card(SPADE, ACE));
        hand.add(card(SPADE, KING)); // adjacent to ace, should fold in
        let re = RankEquivalence::new();
        let moves = generate_moves_seat0(hand, &re);
        assert_eq!(moves.len(), 1);
        let (c, equiv) = moves.get(0);
        assert_eq!(c, card(SPADE, ACE));
        assert!(Cards::from_bits(equiv).have(card(SPADE, KING)));
    }

    #[test]
    fn test_seat1_must_follow_suit_if_possible() {
        let mut hand = Cards::new();
        hand.add(card(SPADE, TWO));
        hand.add(card(HEART, ACE));
        let ts = TrickState::new(NORTH, card(SPADE, QUEEN));
        let re = RankEquivalence::new();
        let moves = generate_moves_seat1(hand, &ts, &re, NOTRUMP);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves.get(0).0, card(SPADE, TWO));
    }

    #[test]
    fn test_seat1_discard_prefers_low_ruff_first() {
        let mut hand = Cards::new();
        hand.add(card(HEART, TWO)); // trumps
        hand.add(card(CLUB, THREE));
        let ts = TrickState::new(NORTH, card(SPADE, QUEEN));
        let re = RankEquivalence::new();
        let moves = generate_moves_seat1(hand, &ts, &re, HEART);
        assert_eq!(moves.get(0).0, card(HEART, TWO));
    }
}
