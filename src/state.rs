//! Trick and game state tracked during search.
//!
//! `TrickState` is the small, cheap-to-copy record of a trick in progress:
//! who led it, who's winning it, and with what. `GameState` is the larger
//! record of the whole deal: each player's remaining cards, and a LIFO
//! play/unplay log so search can walk forward and backward through the game
//! tree without ever allocating.

use super::cards::Cards;
use super::types::*;

/// Progress of the trick currently being played.
#[derive(Clone, Copy)]
pub struct TrickState {
    pub leader: Player,
    pub winner: Player,
    pub winning_card: Card,
    /// True once the trick has been contested within `led_suit` (i.e. at
    /// least two cards of the led suit have been compared) and no trump has
    /// been played over it — the crucial bit the last-trick shortcut and
    /// move ordering rely on to know whether a discard/ruff happened.
    pub rank_trick: bool,
    pub led_suit: Suit,
    pub win_suit: Suit,
}

impl Default for TrickState {
    /// An inert placeholder for "no trick in progress yet". Only ever read
    /// once a card has actually been led, at which point `new` replaces it.
    fn default() -> Self {
        TrickState {
            leader: NO_PLAYER,
            winner: NO_PLAYER,
            winning_card: 0,
            rank_trick: false,
            led_suit: CLUB,
            win_suit: CLUB,
        }
    }
}

impl TrickState {
    /// Start a new trick: `leader` has just led `c`.
    pub fn new(leader: Player, c: Card) -> Self {
        TrickState {
            leader,
            winner: leader,
            winning_card: c,
            rank_trick: false,
            led_suit: suit_of(c),
            win_suit: suit_of(c),
        }
    }

    /// Record that `pl` played `c`, given `trumps` is trumps for the deal.
    pub fn play(&mut self, pl: Player, c: Card, trumps: Suit) {
        let s = suit_of(c);
        if s == self.win_suit {
            self.rank_trick = true;
            if c > self.winning_card {
                self.winning_card = c;
                self.winner = pl;
            }
        } else if s == trumps {
            self.rank_trick = false;
            self.winning_card = c;
            self.win_suit = trumps;
            self.winner = pl;
        }
    }

    /// Would playing `c` win the trick for `pl`'s side? (Might be a
    /// partner's card that's already winning — that still counts.)
    pub fn would_win(&self, pl: Player, c: Card, trumps: Suit) -> bool {
        if partnership_of(self.winner) == partnership_of(pl) {
            return true;
        }
        let s = suit_of(c);
        if s == self.win_suit {
            c > self.winning_card
        } else {
            s == trumps
        }
    }
}

/// The full state of a deal in progress: each player's remaining cards, plus
/// the history of cards played so far (used to undo plays and to replay the
/// last trick for rank-equivalence bookkeeping).
pub struct GameState {
    pub trumps: Suit,
    /// Cards per player in the original deal (all equal; bridge hands are
    /// always the same size once cards are dealt out).
    pub cards_each: usize,

    pub n_played: usize,
    cards_played: [Card; TOTAL_CARDS],
    who_played: [Player; TOTAL_CARDS],

    /// All cards not yet played, across all hands.
    pub cards_left: Cards,
    /// Remaining cards per player.
    pub hand: [Cards; NUM_PLAYERS],
    /// Nibble-packed remaining suit lengths: 4 bits at position
    /// `4 * (4*player + suit)` hold that player's card count in that suit.
    /// Two positions are "compatible" under a cache lookup iff they agree on
    /// every suit length that's actually relevant to the result.
    pub suit_lengths: u64,
}

impl GameState {
    pub fn new(trumps: Suit, hands: [Cards; NUM_PLAYERS]) -> Self {
        let mut cards_left = Cards::new();
        let mut suit_lengths = 0u64;
        for pl in 0..NUM_PLAYERS {
            cards_left.add_cards(hands[pl]);
            for s in 0..NUM_SUITS {
                let len = hands[pl].suit(s).size() as u64;
                suit_lengths += len << (4 * (NUM_SUITS * pl + s));
            }
        }
        let cards_each = hands[0].size();
        GameState {
            trumps,
            cards_each,
            n_played: 0,
            cards_played: [0; TOTAL_CARDS],
            who_played: [NO_PLAYER; TOTAL_CARDS],
            cards_left,
            hand: hands,
            suit_lengths,
        }
    }

    #[inline]
    pub fn tricks_left(&self) -> usize {
        self.cards_each - self.n_played / NUM_PLAYERS
    }

    /// Play `c` on behalf of `pl`. Must be undone with `unplay` in strict
    /// LIFO order before the state is used for anything else.
    pub fn play(&mut self, c: Card, pl: Player) {
        self.cards_played[self.n_played] = c;
        self.who_played[self.n_played] = pl;
        self.n_played += 1;
        self.hand[pl].remove(c);
        self.cards_left.remove(c);
        self.suit_lengths -= 1u64 << (4 * (NUM_SUITS * pl + suit_of(c)));
    }

    /// Undo the most recent `play`.
    pub fn unplay(&mut self) {
        self.n_played -= 1;
        let c = self.cards_played[self.n_played];
        let pl = self.who_played[self.n_played];
        self.hand[pl].add(c);
        self.cards_left.add(c);
        self.suit_lengths += 1u64 << (4 * (NUM_SUITS * pl + suit_of(c)));
    }

    /// The most recent `n` plays, oldest first.
    pub fn last_n_played(&self, n: usize) -> &[Card] {
        &self.cards_played[self.n_played - n..self.n_played]
    }

    /// The cards played in the trick just completed (the last four entries
    /// of the play log).
    pub fn last_trick(&self) -> &[Card] {
        self.last_n_played(NUM_PLAYERS)
    }
}
