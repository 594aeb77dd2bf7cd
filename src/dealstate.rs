//! Projects a deal plus the play so far into what a user interface needs to
//! show: which cards are dealt, played, or legal to play right now, whose
//! turn it is, and how many tricks each side has already won.

use super::deal::Deal;
use super::state::TrickState;
use super::types::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CardState {
    /// Not part of this deal at all (subset deals only).
    NotDealt,
    /// Played to the trick currently in progress (or just completed, if
    /// `quitted` wasn't set).
    PlayedThisTrick,
    /// Played to an earlier, completed trick.
    PlayedPrevTrick,
    /// Legal for the player on turn to play right now.
    Playable,
    /// Dealt, not yet played, not (currently) legal to play.
    Unplayed,
}

pub struct DealState {
    pub pl: Player,
    pub tricks_won: [usize; 2],
    pub card_state: [CardState; TOTAL_CARDS],
}

/// Project `deal` + `plays` into a `DealState`.
///
/// `quitted` distinguishes whether the most recently completed trick has
/// been "turned over" (cleared from the table): when false, that trick's
/// four cards are still shown as `PlayedThisTrick` rather than
/// `PlayedPrevTrick`, matching a UI that keeps the last trick visible until
/// the next card is led.
pub fn deal_state(deal: &Deal, plays: &[Card], quitted: bool) -> DealState {
    let mut card_state = [CardState::Unplayed; TOTAL_CARDS];
    for c in 0..TOTAL_CARDS {
        if deal.holder[c] == NO_PLAYER {
            card_state[c] = CardState::NotDealt;
        }
    }

    let mut tricks_won = [0usize; 2];
    let start_of_trick: isize = (plays.len() as isize - if quitted { 0 } else { 1 }) & !3;

    let mut pl = next_player(deal.declarer);
    let mut trickstate = TrickState::default();
    for (i, &c) in plays.iter().enumerate() {
        if i % NUM_PLAYERS == 0 {
            trickstate = TrickState::new(pl, c);
        } else {
            trickstate.play(pl, c, deal.trumps);
        }
        card_state[c] = if i as isize >= start_of_trick {
            CardState::PlayedThisTrick
        } else {
            CardState::PlayedPrevTrick
        };
        pl = next_player(pl);
        if i % NUM_PLAYERS == NUM_PLAYERS - 1 {
            pl = trickstate.winner;
            tricks_won[partnership_of(trickstate.winner)] += 1;
        }
    }

    let mut anything_goes = true;
    if !plays.is_empty() && plays.len() % NUM_PLAYERS > 0 {
        for r in 0..NUM_RANKS {
            let c = card(trickstate.led_suit, r);
            if card_state[c] == CardState::Unplayed && deal.holder[c] == pl {
                card_state[c] = CardState::Playable;
                anything_goes = false;
            }
        }
    }
    if anything_goes {
        for c in 0..TOTAL_CARDS {
            if card_state[c] == CardState::Unplayed && deal.holder[c] == pl {
                card_state[c] = CardState::Playable;
            }
        }
    }

    DealState { pl, tricks_won, card_state }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deal() -> Deal {
        let mut holder = [NO_PLAYER; TOTAL_CARDS];
        holder[card(SPADE, ACE)] = NORTH;
        holder[card(HEART, TWO)] = NORTH;
        holder[card(SPADE, KING)] = EAST;
        holder[card(HEART, THREE)] = EAST;
        holder[card(SPADE, QUEEN)] = SOUTH;
        holder[card(HEART, FOUR)] = SOUTH;
        holder[card(SPADE, JACK)] = WEST;
        holder[card(HEART, FIVE)] = WEST;
        Deal::new(1, WEST, NOTRUMP, holder).unwrap()
    }

    #[test]
    fn test_empty_play_everything_playable_for_opening_leader() {
        let deal = sample_deal();
        let ds = deal_state(&deal, &[], true);
        assert_eq!(ds.pl, NORTH); // declarer West, so North leads
        assert_eq!(ds.card_state[card(SPADE, ACE)], CardState::Playable);
        assert_eq!(ds.card_state[card(HEART, TWO)], CardState::Playable);
    }

    #[test]
    fn test_must_follow_suit_restricts_playable() {
        let deal = sample_deal();
        let ds = deal_state(&deal, &[card(SPADE, ACE)], true);
        assert_eq!(ds.pl, EAST);
        assert_eq!(ds.card_state[card(SPADE, KING)], CardState::Playable);
        assert_eq!(ds.card_state[card(HEART, THREE)], CardState::Unplayed);
    }

    #[test]
    fn test_void_in_led_suit_allows_anything() {
        let mut holder = [NO_PLAYER; TOTAL_CARDS];
        holder[card(SPADE, ACE)] = NORTH;
        holder[card(CLUB, TWO)] = NORTH;
        holder[card(HEART, TWO)] = EAST;
        holder[card(CLUB, THREE)] = EAST;
        holder[card(SPADE, QUEEN)] = SOUTH;
        holder[card(CLUB, FOUR)] = SOUTH;
        holder[card(SPADE, JACK)] = WEST;
        holder[card(CLUB, FIVE)] = WEST;
        let deal = Deal::new(1, WEST, NOTRUMP, holder).unwrap();
        let ds = deal_state(&deal, &[card(SPADE, ACE)], true);
        assert_eq!(ds.pl, EAST);
        assert_eq!(ds.card_state[card(HEART, TWO)], CardState::Playable);
        assert_eq!(ds.card_state[card(CLUB, THREE)], CardState::Playable);
    }

    #[test]
    fn test_trick_winner_leads_next_and_tricks_counted() {
        let deal = sample_deal();
        let plays = [card(SPADE, ACE), card(SPADE, KING), card(SPADE, QUEEN), card(SPADE, JACK)];
        let ds = deal_state(&deal, &plays, true);
        // North's ace is high, North's side (NS) wins the trick.
        assert_eq!(ds.pl, NORTH);
        assert_eq!(ds.tricks_won[NS], 1);
        assert_eq!(ds.tricks_won[EW], 0);
    }

    #[test]
    fn test_not_quitted_keeps_completed_trick_visible() {
        let deal = sample_deal();
        let plays = [card(SPADE, ACE), card(SPADE, KING), card(SPADE, QUEEN), card(SPADE, JACK)];
        let ds = deal_state(&deal, &plays, false);
        for &c in &plays {
            assert_eq!(ds.card_state[c], CardState::PlayedThisTrick);
        }
    }

    #[test]
    fn test_not_dealt_cards_stay_not_dealt() {
        let deal = sample_deal();
        let ds = deal_state(&deal, &[], true);
        assert_eq!(ds.card_state[card(CLUB, TWO)], CardState::NotDealt);
    }
}
