//! Error types for malformed input.
//!
//! Illegal deals, illegal plays, and malformed serialized records are
//! rejected with a specific variant rather than panicking; invariant
//! violations inside the search itself (an apply/undo imbalance, a seat
//! with no legal move) are programmer errors and stay as `debug_assert!`.

use std::fmt;

use super::types::Card;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The same card appeared in more than one hand, or twice in one hand.
    DuplicateCard(Card),
    /// Not every player was dealt the same number of cards.
    UnequalHandSizes,
    /// A play didn't follow suit when the player held a card of the led suit.
    IllegalFollow { card: Card, led_suit: usize },
    /// A card was played that the player on turn doesn't hold (already
    /// played, never dealt to them, or dealt to someone else).
    CardNotAvailable(Card),
    /// A deal record couldn't be parsed.
    MalformedDeal(String),
    /// A play record couldn't be parsed.
    MalformedPlay(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::DuplicateCard(c) => write!(f, "card {c} dealt more than once"),
            SolverError::UnequalHandSizes => write!(f, "hands are not all the same size"),
            SolverError::IllegalFollow { card, led_suit } => {
                write!(f, "card {card} does not follow led suit {led_suit}")
            }
            SolverError::CardNotAvailable(c) => write!(f, "card {c} is not available to the player on turn"),
            SolverError::MalformedDeal(s) => write!(f, "malformed deal: {s}"),
            SolverError::MalformedPlay(s) => write!(f, "malformed play: {s}"),
        }
    }
}

impl std::error::Error for SolverError {}
