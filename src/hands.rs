//! A text diagram of the four hands, bridge-table layout (North on top,
//! West/East to the sides, South on the bottom).

use super::cards::Cards;
use super::types::*;

pub fn bridge_diagram(hands: &[Cards; NUM_PLAYERS]) -> String {
    let mut out = String::new();
    out.push_str(&format!("        {}\n", hands[NORTH]));
    out.push_str(&format!("{}        {}\n", hands[WEST], hands[EAST]));
    out.push_str(&format!("        {}\n", hands[SOUTH]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagram_contains_all_four_hands() {
        let mut hands = [Cards::new(); NUM_PLAYERS];
        hands[NORTH].add(card(SPADE, ACE));
        hands[EAST].add(card(HEART, KING));
        hands[SOUTH].add(card(DIAMOND, QUEEN));
        hands[WEST].add(card(CLUB, JACK));
        let diagram = bridge_diagram(&hands);
        assert!(diagram.contains('A'));
        assert!(diagram.contains('K'));
        assert!(diagram.contains('Q'));
        assert!(diagram.contains('J'));
        assert_eq!(diagram.lines().count(), 3);
    }
}
