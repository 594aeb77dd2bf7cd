//! Double-dummy search: can the side named `who` take `trick_target` tricks
//! from the current position onward?
//!
//! Mirrors the move generator's four-way seat split. `search_seat0` is the
//! only one that consults the cache (a position is only describable by
//! `(tricks played, player on lead, suit lengths)` once no trick is in
//! progress) and the only one that shortcuts to `search_last_trick` once a
//! single card remains in every hand.
//!
//! Rank equivalence is deliberately *not* kept up to date card-by-card
//! during a trick: a card still in the trick hasn't actually left anyone's
//! strategic options yet. So `rankequiv` is threaded through seats 0-2
//! unchanged, and only advanced once, by `search_seat3`, immediately before
//! handing a fresh copy down to the next trick's `search_seat0`. The catch-up
//! loop there replays the three cards already played in this trick, plus
//! (from the second trick on) the last card of the trick just before this
//! one — that one's already in `rankequiv`, so replaying it is a no-op. The
//! first trick has no such card to back up over, so the loop starts exactly
//! at this trick's leader instead.

use super::cache::Cache;
use super::cards::SAME_RANK_OR_HIGHER;
use super::moves::{
    generate_moves_seat0, generate_moves_seat1, generate_moves_seat2, generate_moves_seat3, MoveList,
};
use super::rankequiv::RankEquivalence;
use super::state::{GameState, TrickState};
use super::types::*;

fn search_last_trick(state: &GameState, trumps: Suit, pl: Player, rwmask: &mut u64) -> bool {
    let mut trickstate = TrickState::new(pl, state.hand[pl].top());
    let mut p = next_player(pl);
    for _ in 0..3 {
        trickstate.play(p, state.hand[p].top(), trumps);
        p = next_player(p);
    }
    if trickstate.rank_trick {
        *rwmask |= SAME_RANK_OR_HIGHER[trickstate.winning_card];
    }
    partnership_of(pl) == partnership_of(trickstate.winner)
}

fn search_seat0(
    state: &mut GameState,
    cache: &mut Cache,
    trumps: Suit,
    trick_target: usize,
    pl: Player,
    rwmask: &mut u64,
    rankequiv: &RankEquivalence,
) -> bool {
    if trick_target == 0 {
        return true;
    }
    if trick_target >= 1 + state.tricks_left() {
        return false;
    }
    if state.tricks_left() == 1 {
        return search_last_trick(state, trumps, pl, rwmask);
    }
    if let Some(hit) = cache.check(state, pl, trick_target, rwmask) {
        return hit;
    }

    let moves = generate_moves_seat0(state.hand[pl], rankequiv);
    let oppo_target = 1 + state.tricks_left() - trick_target;
    let mut failmask = 0u64;
    for (mv, equiv) in moves.iter() {
        let mut thismask = 0u64;
        state.play(mv, pl);
        let trickstate = TrickState::new(pl, mv);
        let works = !search_seat1(
            state,
            cache,
            trumps,
            oppo_target,
            next_player(pl),
            &mut thismask,
            rankequiv,
            &trickstate,
        );
        state.unplay();
        if thismask & equiv != 0 {
            thismask |= SAME_RANK_OR_HIGHER[mv];
        }
        if works {
            cache.update_hit(state, pl, thismask, trick_target);
            *rwmask |= thismask;
            return true;
        }
        failmask |= thismask;
    }
    cache.update_miss(state, pl, failmask, trick_target);
    *rwmask |= failmask;
    false
}

#[allow(clippy::too_many_arguments)]
fn search_seat1(
    state: &mut GameState,
    cache: &mut Cache,
    trumps: Suit,
    trick_target: usize,
    pl: Player,
    rwmask: &mut u64,
    rankequiv: &RankEquivalence,
    trickstate: &TrickState,
) -> bool {
    let moves = generate_moves_seat1(state.hand[pl], trickstate, rankequiv, trumps);
    let oppo_target = 1 + state.tricks_left() - trick_target;
    let mut failmask = 0u64;
    for (mv, equiv) in moves.iter() {
        let mut thismask = 0u64;
        state.play(mv, pl);
        let mut next_ts = *trickstate;
        next_ts.play(pl, mv, trumps);
        let works = !search_seat2(
            state,
            cache,
            trumps,
            oppo_target,
            next_player(pl),
            &mut thismask,
            rankequiv,
            &next_ts,
        );
        state.unplay();
        if thismask & equiv != 0 {
            thismask |= SAME_RANK_OR_HIGHER[mv];
        }
        if works {
            *rwmask |= thismask;
            return true;
        }
        failmask |= thismask;
    }
    *rwmask |= failmask;
    false
}

#[allow(clippy::too_many_arguments)]
fn search_seat2(
    state: &mut GameState,
    cache: &mut Cache,
    trumps: Suit,
    trick_target: usize,
    pl: Player,
    rwmask: &mut u64,
    rankequiv: &RankEquivalence,
    trickstate: &TrickState,
) -> bool {
    let fourth_hand = state.hand[next_player(pl)];
    let moves = generate_moves_seat2(state.hand[pl], trickstate, rankequiv, trumps, pl, fourth_hand);
    let oppo_target = 1 + state.tricks_left() - trick_target;
    let mut failmask = 0u64;
    for (mv, equiv) in moves.iter() {
        let mut thismask = 0u64;
        state.play(mv, pl);
        let mut next_ts = *trickstate;
        next_ts.play(pl, mv, trumps);
        let works = !search_seat3(
            state,
            cache,
            trumps,
            oppo_target,
            next_player(pl),
            &mut thismask,
            rankequiv,
            &next_ts,
        );
        state.unplay();
        if thismask & equiv != 0 {
            thismask |= SAME_RANK_OR_HIGHER[mv];
        }
        if works {
            *rwmask |= thismask;
            return true;
        }
        failmask |= thismask;
    }
    *rwmask |= failmask;
    false
}

#[allow(clippy::too_many_arguments)]
fn search_seat3(
    state: &mut GameState,
    cache: &mut Cache,
    trumps: Suit,
    trick_target: usize,
    pl: Player,
    rwmask: &mut u64,
    rankequiv: &RankEquivalence,
    trickstate: &TrickState,
) -> bool {
    let moves = generate_moves_seat3(state.hand[pl], trickstate, rankequiv, trumps, pl);
    let oppo_target = 1 + state.tricks_left() - trick_target;
    let mut failmask = 0u64;

    // `rankequiv` only reflects tricks committed before this one started, so
    // this trick's three already-played cards (indices `trick_start..n_played`)
    // still need to go in. On every trick but the first there's also a prior
    // trick's last card sitting at `trick_start - 1`; replaying it is a no-op
    // since it's already in `rankequiv`, but on the first trick there is no
    // such card and `trick_start` is 0 — nothing to back up over.
    let mut rankequiv_next = rankequiv.clone();
    let trick_start = state.n_played - 3;
    let catchup_start = trick_start.saturating_sub(1);
    for &c in &state.cards_played[catchup_start..state.n_played] {
        rankequiv_next.play(c);
    }

    for (mv, equiv) in moves.iter() {
        let mut thismask = 0u64;
        state.play(mv, pl);
        rankequiv_next.play(mv);
        let mut trickstate_this = *trickstate;
        trickstate_this.play(pl, mv, trumps);
        let works = if partnership_of(pl) == partnership_of(trickstate_this.winner) {
            search_seat0(
                state,
                cache,
                trumps,
                trick_target - 1,
                trickstate_this.winner,
                &mut thismask,
                &rankequiv_next,
            )
        } else {
            !search_seat0(
                state,
                cache,
                trumps,
                oppo_target - 1,
                trickstate_this.winner,
                &mut thismask,
                &rankequiv_next,
            )
        };
        if trickstate_this.rank_trick {
            thismask |= SAME_RANK_OR_HIGHER[trickstate_this.winning_card];
        }
        if thismask & equiv != 0 {
            thismask |= SAME_RANK_OR_HIGHER[mv];
        }
        state.unplay();
        rankequiv_next.unplay(mv);
        if works {
            *rwmask |= thismask;
            return true;
        }
        failmask |= thismask;
    }
    *rwmask |= failmask;
    false
}

/// A double-dummy search in progress: the deal, the cache it shares with
/// sibling searches, and the "current" player/trick/rank-equivalence state
/// that `make` reads from and `make_after_move` advances.
pub struct Search<'a> {
    trumps: Suit,
    state: GameState,
    cache: &'a mut Cache,
    pub player: Player,
    pub rankequiv: RankEquivalence,
    pub trickstate: TrickState,
}

impl<'a> Search<'a> {
    /// A search starting at the top of a deal, with `leader` on lead to the
    /// first trick and nothing played yet.
    pub fn new(trumps: Suit, hands: [Cards; NUM_PLAYERS], leader: Player, cache: &'a mut Cache) -> Self {
        Search {
            trumps,
            state: GameState::new(trumps, hands),
            cache,
            player: leader,
            rankequiv: RankEquivalence::new(),
            trickstate: TrickState::default(),
        }
    }

    /// A search partway into a deal: `hands` are the *original* (full) deal,
    /// `declarer` is who named the contract (so the opening leader is the
    /// next hand around), and `plays` is every card played so far, in play
    /// order. Replays the history to reconstruct whose turn it is, the
    /// state of any trick in progress, and which cards are rank-equivalent.
    pub fn from_play_so_far(
        trumps: Suit,
        hands: [Cards; NUM_PLAYERS],
        declarer: Player,
        plays: &[Card],
        cache: &'a mut Cache,
    ) -> Self {
        let mut search = Search::new(trumps, hands, next_player(declarer), cache);
        for (i, &c) in plays.iter().enumerate() {
            let pl = search.player;
            if i % NUM_PLAYERS == 0 {
                search.trickstate = TrickState::new(pl, c);
            } else {
                search.trickstate.play(pl, c, trumps);
            }
            search.state.play(c, pl);
            search.player = if i % NUM_PLAYERS == 3 {
                search.trickstate.winner
            } else {
                next_player(pl)
            };
        }
        let complete_cards = plays.len() - plays.len() % NUM_PLAYERS;
        for &c in &plays[..complete_cards] {
            search.rankequiv.play(c);
        }
        search
    }

    pub fn trumps(&self) -> Suit {
        self.trumps
    }

    pub fn tricks_left(&self) -> usize {
        self.state.tricks_left()
    }

    pub fn hand(&self, pl: Player) -> Cards {
        self.state.hand[pl]
    }

    /// The legal moves from the current position, seat-appropriate for
    /// whoever is on turn, along with who that is.
    pub fn generate_moves(&self) -> (Player, MoveList) {
        let pl = self.player;
        let moves = match self.state.n_played % NUM_PLAYERS {
            0 => generate_moves_seat0(self.state.hand[pl], &self.rankequiv),
            1 => generate_moves_seat1(self.state.hand[pl], &self.trickstate, &self.rankequiv, self.trumps),
            2 => generate_moves_seat2(
                self.state.hand[pl],
                &self.trickstate,
                &self.rankequiv,
                self.trumps,
                pl,
                self.state.hand[next_player(pl)],
            ),
            _ => generate_moves_seat3(self.state.hand[pl], &self.trickstate, &self.rankequiv, self.trumps, pl),
        };
        (pl, moves)
    }

    /// Can `who` (a partnership) take `trick_target` tricks from here on,
    /// with the player currently on turn to move next?
    pub fn make(&mut self, who: Partnership, trick_target: usize) -> bool {
        if trick_target == 0 {
            return true;
        }
        let mut rwmask = 0u64;
        let pl = self.player;
        if partnership_of(pl) == who {
            match self.state.n_played % NUM_PLAYERS {
                0 => search_seat0(&mut self.state, self.cache, self.trumps, trick_target, pl, &mut rwmask, &self.rankequiv),
                1 => search_seat1(
                    &mut self.state,
                    self.cache,
                    self.trumps,
                    trick_target,
                    pl,
                    &mut rwmask,
                    &self.rankequiv,
                    &self.trickstate,
                ),
                2 => search_seat2(
                    &mut self.state,
                    self.cache,
                    self.trumps,
                    trick_target,
                    pl,
                    &mut rwmask,
                    &self.rankequiv,
                    &self.trickstate,
                ),
                _ => search_seat3(
                    &mut self.state,
                    self.cache,
                    self.trumps,
                    trick_target,
                    pl,
                    &mut rwmask,
                    &self.rankequiv,
                    &self.trickstate,
                ),
            }
        } else {
            let oppo_target = 1 + self.state.tricks_left() - trick_target;
            let works = match self.state.n_played % NUM_PLAYERS {
                0 => search_seat0(&mut self.state, self.cache, self.trumps, oppo_target, pl, &mut rwmask, &self.rankequiv),
                1 => search_seat1(
                    &mut self.state,
                    self.cache,
                    self.trumps,
                    oppo_target,
                    pl,
                    &mut rwmask,
                    &self.rankequiv,
                    &self.trickstate,
                ),
                2 => search_seat2(
                    &mut self.state,
                    self.cache,
                    self.trumps,
                    oppo_target,
                    pl,
                    &mut rwmask,
                    &self.rankequiv,
                    &self.trickstate,
                ),
                _ => search_seat3(
                    &mut self.state,
                    self.cache,
                    self.trumps,
                    oppo_target,
                    pl,
                    &mut rwmask,
                    &self.rankequiv,
                    &self.trickstate,
                ),
            };
            !works
        }
    }

    /// Can `who` take `trick_target` tricks given the next card played is
    /// `mv`? Plays it, recurses via `make`, then restores everything —
    /// `trick_target` already includes the trick `mv` might complete.
    pub fn make_after_move(&mut self, who: Partnership, trick_target: usize, mv: Card) -> bool {
        let saved_trickstate = self.trickstate;
        let saved_player = self.player;
        let saved_rankequiv = self.rankequiv.clone();

        let pl = self.player;
        self.state.play(mv, pl);
        let mut trick_target = trick_target;
        if self.state.n_played % NUM_PLAYERS == 1 {
            self.trickstate = TrickState::new(pl, mv);
            self.player = next_player(pl);
        } else {
            self.trickstate.play(pl, mv, self.trumps);
            self.player = next_player(pl);
            if self.state.n_played % NUM_PLAYERS == 0 {
                for &c in self.state.last_n_played(4) {
                    self.rankequiv.play(c);
                }
                if partnership_of(self.trickstate.winner) == who {
                    debug_assert!(trick_target > 0);
                    trick_target -= 1;
                }
                self.player = self.trickstate.winner;
            }
        }

        let result = self.make(who, trick_target);

        self.trickstate = saved_trickstate;
        self.rankequiv = saved_rankequiv;
        self.state.unplay();
        self.player = saved_player;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::cards::Cards;

    fn hand_of(cards: &[(Suit, Rank)]) -> Cards {
        let mut h = Cards::new();
        for &(s, r) in cards {
            h.add(card(s, r));
        }
        h
    }

    #[test]
    fn test_last_trick_ns_wins_with_a_rank_winner() {
        // N has the ace, can always win the last trick.
        let hands = [
            hand_of(&[(SPADE, ACE)]),
            hand_of(&[(SPADE, TWO)]),
            hand_of(&[(SPADE, KING)]),
            hand_of(&[(SPADE, THREE)]),
        ];
        let mut cache = Cache::new();
        let mut search = Search::new(NOTRUMP, hands, NORTH, &mut cache);
        assert!(search.make(NS, 1));
    }

    #[test]
    fn test_finesse_position_is_makeable_by_leading_toward_the_queen() {
        // N: AQ of spades, E has the lone K, S and W have nothing in spades.
        // North on lead can finesse around East's king by leading low.
        let hands = [
            hand_of(&[(SPADE, ACE), (HEART, TWO)]),
            hand_of(&[(SPADE, KING), (HEART, THREE)]),
            hand_of(&[(SPADE, QUEEN), (HEART, FOUR)]),
            hand_of(&[(SPADE, FIVE), (HEART, SIX)]),
        ];
        let mut cache = Cache::new();
        let mut search = Search::new(NOTRUMP, hands, NORTH, &mut cache);
        assert!(search.make(NS, 1));
    }

    #[test]
    fn test_make_after_move_restores_state() {
        let hands = [
            hand_of(&[(SPADE, ACE)]),
            hand_of(&[(SPADE, TWO)]),
            hand_of(&[(SPADE, KING)]),
            hand_of(&[(SPADE, THREE)]),
        ];
        let mut cache = Cache::new();
        let mut search = Search::new(NOTRUMP, hands, NORTH, &mut cache);
        let before_player = search.player;
        let before_hand = search.hand(NORTH);
        let result = search.make_after_move(NS, 1, card(SPADE, ACE));
        assert!(result);
        assert_eq!(search.player, before_player);
        assert_eq!(search.hand(NORTH), before_hand);
    }

    #[test]
    fn test_from_play_so_far_reconstructs_player_and_trick() {
        let hands = [
            hand_of(&[(SPADE, ACE), (HEART, TWO)]),
            hand_of(&[(SPADE, TWO), (HEART, THREE)]),
            hand_of(&[(SPADE, KING), (HEART, FOUR)]),
            hand_of(&[(SPADE, THREE), (HEART, FIVE)]),
        ];
        let mut cache = Cache::new();
        let plays = [card(SPADE, ACE), card(SPADE, TWO)];
        let search = Search::from_play_so_far(NOTRUMP, hands, WEST, &plays, &mut cache);
        // Declarer West, so North led; North led the ace, East played two;
        // next to play is South.
        assert_eq!(search.player, SOUTH);
        assert_eq!(search.trickstate.winner, NORTH);
    }
}
