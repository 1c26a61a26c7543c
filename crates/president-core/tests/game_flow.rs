//! Full-game scenario driven through the public `GameSession` API.

use president_core::{
    FinishRank, GameConfig, GameSession, GameStatus, Player, PlayerId, PresidentGame, rules,
};

fn lobby(count: usize) -> (PresidentGame, Vec<PlayerId>) {
    let mut game = PresidentGame::create("ROOMXY".into(), GameConfig::president(count));
    let mut ids = Vec::new();
    for i in 0..count {
        let id = PlayerId::random();
        let mut player = Player::new(id, format!("player-{i}"), i, i == 0);
        player.set_ready(true);
        game.add_player(player).unwrap();
        ids.push(id);
    }
    (game, ids)
}

/// Drives a real shuffled game to completion: each turn the current
/// player makes their first legal move (honoring the forced opening)
/// or passes. Whatever the shuffle, the session must end with a full
/// finish order and president/asshole at the extremes.
#[test]
fn test_full_game_reaches_rankings() {
    let (mut game, ids) = lobby(4);
    game.start().unwrap();

    // 52 / 4 = 13 cards each, nothing left over.
    for public in game.snapshot().players {
        assert_eq!(public.card_count, 13);
    }

    let opener = game.current_player_id().unwrap();
    assert!(
        game.player(opener)
            .unwrap()
            .hand
            .contains(&president_core::Card::OPENING)
    );

    let mut turns = 0;
    while game.status() == GameStatus::InProgress {
        turns += 1;
        assert!(turns < 10_000, "game did not terminate");

        let current = game.current_player_id().unwrap();
        let hand = game.player(current).unwrap().hand.clone();
        let last = game.played_cards().to_vec();

        let choice = rules::legal_moves(&hand, &last)
            .into_iter()
            .find(|m| rules::must_include_opening_card(m, game.is_first_turn()));
        match choice {
            Some(cards) => {
                game.play_cards(current, cards).unwrap();
            }
            None => {
                game.pass_turn(current).unwrap();
            }
        }
    }

    assert_eq!(game.status(), GameStatus::Finished);
    assert_eq!(game.finish_order().len(), 4);

    let order = game.finish_order().to_vec();
    assert_eq!(game.player(order[0]).unwrap().rank, FinishRank::President);
    assert_eq!(game.player(order[1]).unwrap().rank, FinishRank::VicePresident);
    assert_eq!(game.player(order[2]).unwrap().rank, FinishRank::ViceAsshole);
    assert_eq!(game.player(order[3]).unwrap().rank, FinishRank::Asshole);
    for id in ids {
        assert_ne!(game.player(id).unwrap().rank, FinishRank::None);
    }
}

/// Three-player games have no vice_asshole slot.
#[test]
fn test_three_player_game_skips_vice_asshole() {
    let (mut game, _ids) = lobby(3);
    game.start().unwrap();

    let mut turns = 0;
    while game.status() == GameStatus::InProgress {
        turns += 1;
        assert!(turns < 10_000, "game did not terminate");

        let current = game.current_player_id().unwrap();
        let hand = game.player(current).unwrap().hand.clone();
        let last = game.played_cards().to_vec();
        let choice = rules::legal_moves(&hand, &last)
            .into_iter()
            .find(|m| rules::must_include_opening_card(m, game.is_first_turn()));
        match choice {
            Some(cards) => drop(game.play_cards(current, cards).unwrap()),
            None => drop(game.pass_turn(current).unwrap()),
        }
    }

    let order = game.finish_order().to_vec();
    assert_eq!(game.player(order[0]).unwrap().rank, FinishRank::President);
    assert_eq!(game.player(order[1]).unwrap().rank, FinishRank::VicePresident);
    assert_eq!(game.player(order[2]).unwrap().rank, FinishRank::Asshole);
}
