//! The deal: who holds which of the 52 cards, who declared, and what's
//! trumps. This is the one piece of input every other module is ultimately
//! a function of.
//!
//! A deal need not be a full 52 cards — the solver supports "subset deals"
//! used for endgame analysis, where every player holds the same count
//! `N <= 13` and the rest of the cards are simply not dealt to anyone.

use rand::seq::SliceRandom;

use super::cards::Cards;
use super::error::SolverError;
use super::state::{GameState, TrickState};
use super::types::*;

/// A complete description of who holds what, who's declaring, and trumps.
#[derive(Clone, Copy)]
pub struct Deal {
    pub board: u32,
    pub declarer: Player,
    pub trumps: Suit,
    /// `holder[c]` is the player holding card `c`, or `NO_PLAYER` if `c`
    /// wasn't dealt to anyone (subset deals only).
    pub holder: [Player; TOTAL_CARDS],
}

impl Deal {
    /// Build a deal from a holder table, rejecting one where the four hands
    /// aren't all the same size.
    pub fn new(board: u32, declarer: Player, trumps: Suit, holder: [Player; TOTAL_CARDS]) -> Result<Self, SolverError> {
        let deal = Deal { board, declarer, trumps, holder };
        deal.validate()?;
        Ok(deal)
    }

    fn validate(&self) -> Result<(), SolverError> {
        let mut counts = [0usize; NUM_PLAYERS];
        for &pl in &self.holder {
            if pl != NO_PLAYER {
                counts[pl] += 1;
            }
        }
        if counts.iter().any(|&n| n != counts[0]) {
            return Err(SolverError::UnequalHandSizes);
        }
        Ok(())
    }

    /// How many cards each player holds (all four are equal by construction).
    pub fn cards_each(&self) -> usize {
        (0..TOTAL_CARDS).filter(|&c| self.holder[c] == NORTH).count()
    }

    /// Each player's remaining (undealt-aside) cards as a bitboard.
    pub fn hands(&self) -> [Cards; NUM_PLAYERS] {
        let mut hands = [Cards::new(); NUM_PLAYERS];
        for c in 0..TOTAL_CARDS {
            let pl = self.holder[c];
            if pl != NO_PLAYER {
                hands[pl].add(c);
            }
        }
        hands
    }
}

/// Check that every play in `plays` is by the player whose turn it is, of a
/// card they actually hold, and follows suit whenever they're able to.
pub fn validate_play(deal: &Deal, plays: &[Card]) -> Result<(), SolverError> {
    let hands = deal.hands();
    let mut state = GameState::new(deal.trumps, hands);
    let mut pl = next_player(deal.declarer);
    let mut trickstate = TrickState::default();
    for (i, &c) in plays.iter().enumerate() {
        if !state.hand[pl].have(c) {
            return Err(SolverError::CardNotAvailable(c));
        }
        if i % NUM_PLAYERS != 0 {
            let led = trickstate.led_suit;
            if suit_of(c) != led && !state.hand[pl].suit(led).is_empty() {
                return Err(SolverError::IllegalFollow { card: c, led_suit: led });
            }
        }
        if i % NUM_PLAYERS == 0 {
            trickstate = TrickState::new(pl, c);
        } else {
            trickstate.play(pl, c, deal.trumps);
        }
        state.play(c, pl);
        pl = if i % NUM_PLAYERS == NUM_PLAYERS - 1 {
            trickstate.winner
        } else {
            next_player(pl)
        };
    }
    Ok(())
}

/// A uniformly shuffled full deal, trumps no-trump, declarer South — the
/// convention used for self-test and exercising the solver end to end.
pub fn random_deal(board: u32) -> Deal {
    let mut deck: Vec<Card> = (0..TOTAL_CARDS).collect();
    deck.shuffle(&mut rand::thread_rng());
    let mut holder = [NO_PLAYER; TOTAL_CARDS];
    for (i, &c) in deck.iter().enumerate() {
        holder[c] = i % NUM_PLAYERS;
    }
    Deal::new(board, SOUTH, NOTRUMP, holder).expect("a full 52-card shuffle always balances evenly")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_deal(declarer: Player, trumps: Suit) -> Deal {
        let mut holder = [NO_PLAYER; TOTAL_CARDS];
        for c in 0..TOTAL_CARDS {
            holder[c] = c % NUM_PLAYERS;
        }
        Deal::new(1, declarer, trumps, holder).unwrap()
    }

    #[test]
    fn test_unequal_hands_rejected() {
        let mut holder = [NO_PLAYER; TOTAL_CARDS];
        holder[0] = NORTH;
        holder[1] = NORTH;
        let result = Deal::new(1, SOUTH, NOTRUMP, holder);
        assert_eq!(result, Err(SolverError::UnequalHandSizes));
    }

    #[test]
    fn test_hands_roundtrip_cards_each() {
        let deal = full_deal(SOUTH, NOTRUMP);
        assert_eq!(deal.cards_each(), 13);
        let hands = deal.hands();
        for h in hands {
            assert_eq!(h.size(), 13);
        }
    }

    #[test]
    fn test_validate_play_accepts_legal_sequence() {
        let deal = full_deal(WEST, SPADE);
        let leader = next_player(WEST);
        let hands = deal.hands();
        let lead = hands[leader].top();
        assert!(validate_play(&deal, &[lead]).is_ok());
    }

    #[test]
    fn test_validate_play_rejects_revoke() {
        let mut holder = [NO_PLAYER; TOTAL_CARDS];
        holder[card(SPADE, ACE)] = NORTH;
        holder[card(HEART, TWO)] = NORTH;
        holder[card(SPADE, KING)] = EAST;
        holder[card(HEART, THREE)] = EAST;
        holder[card(SPADE, QUEEN)] = SOUTH;
        holder[card(HEART, FOUR)] = SOUTH;
        holder[card(SPADE, JACK)] = WEST;
        holder[card(HEART, FIVE)] = WEST;
        let deal = Deal::new(1, WEST, NOTRUMP, holder).unwrap();
        // North leads a spade; East must follow with the spade king, not discard a heart.
        let result = validate_play(&deal, &[card(SPADE, ACE), card(HEART, THREE)]);
        assert_eq!(
            result,
            Err(SolverError::IllegalFollow { card: card(HEART, THREE), led_suit: SPADE })
        );
    }

    #[test]
    fn test_random_deal_is_balanced_notrump_south() {
        let deal = random_deal(1);
        assert_eq!(deal.declarer, SOUTH);
        assert_eq!(deal.trumps, NOTRUMP);
        assert_eq!(deal.cards_each(), 13);
    }
}
