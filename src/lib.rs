//! double-dummy-core - a double-dummy bridge analyzer.
//!
//! Given a deal (who holds which of the 52 cards), trumps, and a declarer,
//! this crate answers exactly how many tricks each side can force with
//! perfect play by both sides, for every legal next card.
//!
//! The algorithm:
//! - Alpha-beta (negamax) search over the 4-player trick-taking tree, with
//!   seat-specialized move generation and ordering heuristics.
//! - Rank-equivalence collapsing of consecutive untaken same-suit cards.
//! - A cache keyed on (tricks played, player on lead, suit-length signature)
//!   with a relevant-cards-mask compatibility test, not a plain position hash.
//! - An outer bisection driver that turns the search's single-target
//!   yes/no oracle into tight `[low, high)` bounds per candidate card.
//!
//! # Example
//!
//! ```
//! use double_dummy_core::{analyze, random_deal, Cache};
//!
//! let deal = random_deal(1);
//! let mut cache = Cache::new();
//! let analysis = analyze(&deal, &[], &mut cache, None, false);
//! assert!(analysis.global.low <= 13);
//! ```

mod analyze;
pub mod cache;
pub mod cards;
mod deal;
mod dealstate;
mod error;
mod hands;
mod moves;
mod rankequiv;
mod search;
pub mod serialize;
mod state;
pub mod types;

pub use analyze::{analyze, opening_lead_analysis, makeable_tricks_matrix, Bound, PositionAnalysis};
pub use cache::Cache;
pub use cards::Cards;
pub use deal::{random_deal, validate_play, Deal};
pub use dealstate::{deal_state, CardState, DealState};
pub use error::SolverError;
pub use hands::bridge_diagram;
pub use search::Search;
pub use serialize::{deserialize_deal, deserialize_play, serialize_deal, serialize_play};
pub use types::{
    card, char_to_player, char_to_rank, char_to_suit, is_ns, next_player, partner,
    partnership_of, player_letter, player_name, prev_player, rank_name, rank_of, suit_letter,
    suit_name, suit_of, Card, Partnership, Player, Rank, Suit,
};
pub use types::{CLUB, DIAMOND, HEART, NOTRUMP, SPADE};
pub use types::{EAST, NORTH, NO_PLAYER, SOUTH, WEST};
pub use types::{EW, NS};
pub use types::{NUM_PLAYERS, NUM_RANKS, NUM_SUITS, TOTAL_CARDS, TOTAL_TRICKS};
