//! Pure rules engine: move legality, play comparison, start-player
//! selection, and finish-rank assignment.
//!
//! Nothing here mutates state. The game state machine re-derives
//! legality from these primitives on every submitted play;
//! [`legal_moves`] exists for client-side hinting only.

use std::collections::{BTreeMap, HashMap};

use crate::card::Card;
use crate::player::{FinishRank, Player, PlayerId};

/// A set of cards is playable iff it is non-empty and every card
/// shares one rank. A single card is always a valid set.
pub fn is_valid_card_set(cards: &[Card]) -> bool {
    match cards.split_first() {
        Some((first, rest)) => rest.iter().all(|c| c.same_rank(*first)),
        None => false,
    }
}

/// Does `new_cards` beat the previous play?
///
/// An empty `last_cards` (fresh trick) is beaten by any valid set.
/// Otherwise the counts must match and the new set's rank must be
/// strictly higher; suit is never a tiebreaker.
pub fn beats_last_play(new_cards: &[Card], last_cards: &[Card]) -> bool {
    if last_cards.is_empty() {
        return true;
    }
    if new_cards.len() != last_cards.len() {
        return false;
    }
    if !is_valid_card_set(new_cards) {
        return false;
    }
    new_cards[0].beats(last_cards[0])
}

/// Seat index of the player holding the 3 of clubs, used once at game
/// start to fix the opening turn.
pub fn find_starting_player(players: &[Player]) -> Option<usize> {
    players
        .iter()
        .position(|p| p.hand.contains(&Card::OPENING))
}

/// On the first turn of the game, the play must contain the 3 of
/// clubs. Off the first turn this is trivially satisfied.
pub fn must_include_opening_card(cards: &[Card], is_first_turn: bool) -> bool {
    if !is_first_turn {
        return true;
    }
    cards.contains(&Card::OPENING)
}

/// Maps finish positions to rank labels.
///
/// The checks run in order: president, vice_president, asshole
/// (last), vice_asshole (second to last), neutral. The order matters
/// for small games — with exactly 3 players, position 1 is
/// vice_president and position 2 is asshole, with no vice_asshole.
pub fn determine_finish_ranks(
    finish_order: &[PlayerId],
    total_players: usize,
) -> HashMap<PlayerId, FinishRank> {
    let mut ranks = HashMap::with_capacity(finish_order.len());
    for (index, player_id) in finish_order.iter().enumerate() {
        let rank = if index == 0 {
            FinishRank::President
        } else if index == 1 {
            FinishRank::VicePresident
        } else if index == total_players - 1 {
            FinishRank::Asshole
        } else if index == total_players - 2 {
            FinishRank::ViceAsshole
        } else {
            FinishRank::Neutral
        };
        ranks.insert(*player_id, rank);
    }
    ranks
}

/// Enumerates every same-rank group subset of `hand` that would beat
/// `last_play`. UI hinting only; the server never trusts this.
pub fn legal_moves(hand: &[Card], last_play: &[Card]) -> Vec<Vec<Card>> {
    let mut moves = Vec::new();

    if last_play.is_empty() {
        for group in group_by_rank(hand) {
            for n in 1..=group.len() {
                moves.push(group[..n].to_vec());
            }
        }
        return moves;
    }

    let required = last_play.len();
    let floor = last_play[0].rank.value();
    for group in group_by_rank(hand) {
        if group.len() >= required && group[0].rank.value() > floor {
            moves.push(group[..required].to_vec());
        }
    }
    moves
}

/// Groups a hand by rank, groups ordered weakest to strongest.
fn group_by_rank(cards: &[Card]) -> Vec<Vec<Card>> {
    let mut groups: BTreeMap<_, Vec<Card>> = BTreeMap::new();
    for card in cards {
        groups.entry(card.rank).or_default().push(*card);
    }
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn player_with_hand(hand: Vec<Card>) -> Player {
        let mut p = Player::new(PlayerId::random(), "p", 0, false);
        p.add_cards(hand);
        p
    }

    #[test]
    fn test_valid_card_set_single_card() {
        assert!(is_valid_card_set(&[card(Rank::Seven, Suit::Hearts)]));
    }

    #[test]
    fn test_valid_card_set_requires_shared_rank() {
        assert!(is_valid_card_set(&[
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Seven, Suit::Clubs),
        ]));
        assert!(!is_valid_card_set(&[
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Eight, Suit::Clubs),
        ]));
        assert!(!is_valid_card_set(&[]));
    }

    #[test]
    fn test_beats_empty_trick() {
        assert!(beats_last_play(&[card(Rank::Three, Suit::Hearts)], &[]));
    }

    #[test]
    fn test_beats_higher_single() {
        // 7♦ beats 5♥
        assert!(beats_last_play(
            &[card(Rank::Seven, Suit::Diamonds)],
            &[card(Rank::Five, Suit::Hearts)],
        ));
    }

    #[test]
    fn test_does_not_beat_with_lower_pair() {
        // 5♥5♦ does not beat 8♣8♠
        assert!(!beats_last_play(
            &[card(Rank::Five, Suit::Hearts), card(Rank::Five, Suit::Diamonds)],
            &[card(Rank::Eight, Suit::Clubs), card(Rank::Eight, Suit::Spades)],
        ));
    }

    #[test]
    fn test_does_not_beat_with_count_mismatch() {
        // 6♣6♠ does not beat a single 5♥
        assert!(!beats_last_play(
            &[card(Rank::Six, Suit::Clubs), card(Rank::Six, Suit::Spades)],
            &[card(Rank::Five, Suit::Hearts)],
        ));
    }

    #[test]
    fn test_find_starting_player() {
        let players = vec![
            player_with_hand(vec![card(Rank::Ace, Suit::Hearts)]),
            player_with_hand(vec![Card::OPENING, card(Rank::Two, Suit::Hearts)]),
            player_with_hand(vec![card(Rank::Three, Suit::Spades)]),
        ];
        assert_eq!(find_starting_player(&players), Some(1));
    }

    #[test]
    fn test_find_starting_player_absent() {
        let players = vec![player_with_hand(vec![card(Rank::Ace, Suit::Hearts)])];
        assert_eq!(find_starting_player(&players), None);
    }

    #[test]
    fn test_opening_card_required_on_first_turn_only() {
        let without = [card(Rank::Three, Suit::Hearts)];
        let with = [Card::OPENING, card(Rank::Three, Suit::Hearts)];

        assert!(!must_include_opening_card(&without, true));
        assert!(must_include_opening_card(&with, true));
        assert!(must_include_opening_card(&without, false));
    }

    #[test]
    fn test_finish_ranks_three_players() {
        let order: Vec<PlayerId> = (0..3).map(|_| PlayerId::random()).collect();
        let ranks = determine_finish_ranks(&order, 3);
        assert_eq!(ranks[&order[0]], FinishRank::President);
        assert_eq!(ranks[&order[1]], FinishRank::VicePresident);
        assert_eq!(ranks[&order[2]], FinishRank::Asshole);
    }

    #[test]
    fn test_finish_ranks_six_players() {
        let order: Vec<PlayerId> = (0..6).map(|_| PlayerId::random()).collect();
        let ranks = determine_finish_ranks(&order, 6);
        assert_eq!(ranks[&order[0]], FinishRank::President);
        assert_eq!(ranks[&order[1]], FinishRank::VicePresident);
        assert_eq!(ranks[&order[2]], FinishRank::Neutral);
        assert_eq!(ranks[&order[3]], FinishRank::Neutral);
        assert_eq!(ranks[&order[4]], FinishRank::ViceAsshole);
        assert_eq!(ranks[&order[5]], FinishRank::Asshole);
    }

    #[test]
    fn test_legal_moves_fresh_trick_enumerates_group_prefixes() {
        let hand = vec![
            card(Rank::Five, Suit::Hearts),
            card(Rank::Five, Suit::Clubs),
            card(Rank::Nine, Suit::Spades),
        ];
        let moves = legal_moves(&hand, &[]);
        // 5, 55, 9
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().any(|m| m.len() == 2 && m[0].rank == Rank::Five));
        assert!(moves.iter().any(|m| m.len() == 1 && m[0].rank == Rank::Nine));
    }

    #[test]
    fn test_legal_moves_must_match_count_and_climb() {
        let hand = vec![
            card(Rank::Five, Suit::Hearts),
            card(Rank::Five, Suit::Clubs),
            card(Rank::Nine, Suit::Spades),
            card(Rank::Two, Suit::Hearts),
            card(Rank::Two, Suit::Diamonds),
        ];
        let last = vec![card(Rank::Six, Suit::Hearts), card(Rank::Six, Suit::Spades)];
        let moves = legal_moves(&hand, &last);
        // Only the pair of 2s: 5s are too low, the 9 is a single.
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].len(), 2);
        assert_eq!(moves[0][0].rank, Rank::Two);
    }

    #[test]
    fn test_legal_moves_every_candidate_beats_last_play() {
        let hand = vec![
            card(Rank::Four, Suit::Hearts),
            card(Rank::Jack, Suit::Clubs),
            card(Rank::Jack, Suit::Spades),
            card(Rank::Ace, Suit::Diamonds),
        ];
        let last = vec![card(Rank::Ten, Suit::Hearts)];
        for candidate in legal_moves(&hand, &last) {
            assert!(beats_last_play(&candidate, &last));
        }
    }
}
