//! The outer driver: turns the yes/no `Search::make` oracle into tight
//! `[low, high)` trick bounds for every legal next card, by bisecting the
//! trick target. This is what a caller actually wants — "how many tricks
//! can each candidate lead produce?" — rather than the single-target
//! true/false the search itself answers.

use super::cache::Cache;
use super::deal::Deal;
use super::search::Search;
use super::types::*;

/// A proven `[low, high)` trick range: `low` is achievable by the side to
/// play, `high` is the smallest proven-unreachable target. Exact iff
/// `low + 1 == high`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bound {
    pub low: usize,
    pub high: usize,
}

impl Bound {
    pub fn is_exact(&self) -> bool {
        self.low + 1 == self.high
    }
}

/// Bounds for the position as a whole, plus one per legal next card.
/// Entries for cards that aren't legal right now are left at their initial
/// `[0, tricks_left + 1)` and should be ignored by callers.
pub struct PositionAnalysis {
    pub global: Bound,
    pub play: [Bound; TOTAL_CARDS],
}

impl PositionAnalysis {
    fn new(tricks_left: usize) -> Self {
        let initial = Bound { low: 0, high: tricks_left + 1 };
        PositionAnalysis { global: initial, play: [initial; TOTAL_CARDS] }
    }
}

fn update_hit(analysis: &mut PositionAnalysis, mv: Card, equivs: u64, goal: usize) {
    analysis.play[mv].low = goal;
    let mut eq = equivs;
    while eq != 0 {
        let e = eq & eq.wrapping_neg();
        analysis.play[e.trailing_zeros() as usize].low = goal;
        eq ^= e;
    }
    if analysis.global.low < goal {
        analysis.global.low = goal;
    }
}

fn update_miss(analysis: &mut PositionAnalysis, mv: Card, equivs: u64, goal: usize) {
    analysis.play[mv].high = goal;
    let mut eq = equivs;
    while eq != 0 {
        let e = eq & eq.wrapping_neg();
        analysis.play[e.trailing_zeros() as usize].high = goal;
        eq ^= e;
    }
}

/// Analyze the position reached after `deal` and `plays`, filling in
/// `global` bounds and (if `analyze_moves`) exact per-card bounds for every
/// legal next play. `callback`, if given, is invoked after every probe and
/// can abort the search early by returning `false` — on early return the
/// bounds gathered so far are still sound, just possibly loose.
pub fn analyze(
    deal: &Deal,
    plays: &[Card],
    cache: &mut Cache,
    mut callback: Option<&mut dyn FnMut(&PositionAnalysis) -> bool>,
    analyze_moves: bool,
) -> PositionAnalysis {
    let mut search = Search::from_play_so_far(deal.trumps, deal.hands(), deal.declarer, plays, cache);
    let tricks_left = search.tricks_left();
    let mut analysis = PositionAnalysis::new(tricks_left);

    let (pl, moves) = search.generate_moves();
    let who = partnership_of(pl);
    let is_fourth_card = plays.len() % NUM_PLAYERS == 3;

    for (mv, equiv) in moves.iter() {
        let won_tricks = if is_fourth_card {
            usize::from(search.trickstate.would_win(pl, mv, search.trumps()))
        } else {
            0
        };
        let max_tricks = analysis.global.high;
        update_hit(&mut analysis, mv, equiv, won_tricks);
        update_miss(&mut analysis, mv, equiv, max_tricks);
    }

    macro_rules! probe_callback {
        () => {
            if let Some(cb) = callback.as_deref_mut() {
                if !cb(&analysis) {
                    return analysis;
                }
            }
        };
    }

    // Phase 1: bisect to find the best move and tight global bounds.
    while analysis.global.low + 1 < analysis.global.high {
        let goal = (analysis.global.low + analysis.global.high) / 2;
        let mut succeeded = false;
        for (mv, equiv) in moves.iter() {
            if goal >= analysis.play[mv].high {
                continue;
            }
            if search.make_after_move(who, goal, mv) {
                update_hit(&mut analysis, mv, equiv, goal);
                succeeded = true;
                break;
            }
            update_miss(&mut analysis, mv, equiv, goal);
            probe_callback!();
        }
        if !succeeded {
            analysis.global.high = goal;
        }
        probe_callback!();
    }

    if !analyze_moves {
        return analysis;
    }

    // Phase 2: refine every other move's bound to exactness.
    for (mv, equiv) in moves.iter() {
        while analysis.play[mv].low + 1 < analysis.play[mv].high {
            let goal = (analysis.play[mv].low + analysis.play[mv].high) / 2;
            if search.make_after_move(who, goal, mv) {
                update_hit(&mut analysis, mv, equiv, goal);
            } else {
                update_miss(&mut analysis, mv, equiv, goal);
            }
            probe_callback!();
        }
    }

    analysis
}

/// Per-card trick outcome against best defense for every legal opening
/// lead: `analyze` at the very start of play with exact per-card bounds.
pub fn opening_lead_analysis(deal: &Deal, cache: &mut Cache) -> PositionAnalysis {
    analyze(deal, &[], cache, None, true)
}

/// Makeable tricks for each of the four declarers in each of the five
/// strains — the 4x5 matrix that hand-record / par computation consumes.
/// Rows are N, E, S, W; columns are C, D, H, S, NT.
pub fn makeable_tricks_matrix(deal: &Deal) -> [[usize; 5]; NUM_PLAYERS] {
    let declarers = [NORTH, EAST, SOUTH, WEST];
    let strains = [CLUB, DIAMOND, HEART, SPADE, NOTRUMP];
    let mut matrix = [[0usize; 5]; NUM_PLAYERS];
    for (di, &declarer) in declarers.iter().enumerate() {
        for (si, &strain) in strains.iter().enumerate() {
            let variant = Deal { board: deal.board, declarer, trumps: strain, holder: deal.holder };
            let mut cache = Cache::new();
            let analysis = analyze(&variant, &[], &mut cache, None, false);
            debug_assert!(analysis.global.is_exact());
            matrix[di][si] = variant.cards_each() - analysis.global.low;
        }
    }
    matrix
}
