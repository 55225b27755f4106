//! Agent combat: headquarters spawns, takeovers, tile capture.

use std::cell::RefCell;
use std::rc::Rc;

use rust_trinity::board::{Tile, TileType};
use rust_trinity::cards::EventCard;
use rust_trinity::core::{ActionError, AgentRules, PlayerId, Position, RuleConfig, RuleViolation, StartingPlayer, WinConditions};
use rust_trinity::effects::CardEffect;
use rust_trinity::game::Game;
use rust_trinity::triggers::GameEvent;

fn p(i: u8) -> PlayerId {
    PlayerId::new(i)
}

fn game_with(agents: AgentRules) -> Game {
    let mut config = RuleConfig::new(2)
        .with_starting_player(StartingPlayer::Fixed(p(0)))
        .with_shuffle(false)
        .with_starting_hand(0)
        .with_agents(agents)
        .with_win(WinConditions {
            board_full: false,
            exhaustion: false,
            landmark_target: None,
        });
    config.starting_events = 0;
    let mut game = Game::new(config, 0).unwrap();
    game.setup().unwrap();
    game
}

fn landmark(game: &mut Game, owner: PlayerId, x: u8, y: u8) -> Position {
    let o = Position::new(x, y);
    let c = Position::new(x + 1, y);
    let i = Position::new(x, y + 1);
    let store = game.store_mut();
    store.place_tile(o, Tile::owned(TileType::Housing, owner)).unwrap();
    store.place_tile(c, Tile::owned(TileType::Commerce, owner)).unwrap();
    store.place_tile(i, Tile::owned(TileType::Industry, owner)).unwrap();
    store.form_landmark(o, [o, c, i]).unwrap();
    o
}

#[test]
fn test_settlement_after_three_agents() {
    let mut game = game_with(AgentRules::default());
    let target = landmark(&mut game, p(1), 3, 5);
    for _ in 0..3 {
        game.store_mut().place_agent(target, p(0)).unwrap();
    }
    game.store_mut().place_agent(target, p(1)).unwrap();
    let landmarks_before = game.player(p(1)).unwrap().landmarks;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    game.subscribe(move |e| log.borrow_mut().push(e.clone()));

    game.attempt_takeover(p(0), target).unwrap();

    assert_eq!(game.player(p(1)).unwrap().landmarks, landmarks_before - 1);
    assert!(game.board().landmark(target).is_none());
    assert_eq!(game.board().agent_count_at(target, p(0)), 0);
    assert_eq!(game.board().agent_count_at(target, p(1)), 0);
    // never an ownership transfer
    assert_eq!(game.player(p(0)).unwrap().landmarks, 0);
    assert!(seen
        .borrow()
        .iter()
        .any(|e| matches!(e, GameEvent::LandmarkCaptured { attackers_lost: 3, defenders_lost: 1, .. })));
}

#[test]
fn test_headquarters_spawn_and_cap() {
    let mut game = game_with(AgentRules {
        max_per_player: 3,
        hq_spawn: 2,
        ..AgentRules::default()
    });
    let first = landmark(&mut game, p(0), 0, 0);
    let second = landmark(&mut game, p(0), 2, 2);

    assert_eq!(game.establish_headquarters(p(0), first).unwrap(), 2);
    assert!(matches!(
        game.establish_headquarters(p(0), first),
        Err(ActionError::Rule(RuleViolation::AlreadyHeadquarters(_)))
    ));
    assert!(matches!(
        game.establish_headquarters(p(0), second),
        Err(ActionError::Rule(RuleViolation::HeadquartersCapReached(1)))
    ));
    assert!(matches!(
        game.establish_headquarters(p(0), Position::new(6, 6)),
        Err(ActionError::Rule(RuleViolation::NoLandmarkAt(_)))
    ));
    let state = game.player(p(0)).unwrap();
    assert_eq!((state.landmarks, state.headquarters), (2, 1));
    assert_eq!(state.plain_landmarks(), 1);
}

#[test]
fn test_march_and_capture() {
    let mut game = game_with(AgentRules::default());
    let hq = landmark(&mut game, p(0), 2, 2);
    game.establish_headquarters(p(0), hq).unwrap();
    let enemy = Position::new(4, 2);
    game.store_mut()
        .place_tile(enemy, Tile::owned(TileType::Industry, p(1)))
        .unwrap();

    game.move_agent(p(0), hq, Position::new(3, 2)).unwrap();
    assert_eq!(game.capture_tile(p(0), enemy).unwrap(), 1);
    assert!(game.board().tile(enemy).unwrap().is_owned_by(p(0)));
    assert_eq!(game.board().agents_on_board(p(0)), 1);
}

#[test]
fn test_insurance_claim() {
    let mut game = game_with(AgentRules::default());
    let target = landmark(&mut game, p(1), 3, 5);
    let insurance = game
        .catalog()
        .find(|c| c.effect == CardEffect::Insurance)
        .map(|c| c.id)
        .unwrap();
    game.store_mut().add_event(p(1), EventCard::new(77, insurance)).unwrap();
    for _ in 0..3 {
        game.store_mut().place_agent(target, p(0)).unwrap();
    }

    let outcome = game.attempt_takeover(p(0), target).unwrap();
    assert!(outcome.insured);
    let defender = game.player(p(1)).unwrap();
    assert!(defender.events.is_empty());
    let mut types: Vec<_> = defender.hand.iter().map(|t| t.tile_type).collect();
    types.sort_by_key(|t| t.rank());
    assert_eq!(types, [TileType::Industry, TileType::Commerce, TileType::Housing]);
}

#[test]
fn test_insurance_claim_respects_hand_limit() {
    let mut game = game_with(AgentRules::default());
    let hand_size = game.config().hand_size;
    let target = landmark(&mut game, p(1), 3, 5);
    let insurance = game
        .catalog()
        .find(|c| c.effect == CardEffect::Insurance)
        .map(|c| c.id)
        .unwrap();
    game.store_mut().add_event(p(1), EventCard::new(77, insurance)).unwrap();
    for _ in 0..hand_size {
        game.store_mut().add_to_hand(p(1), Tile::new(TileType::Commerce)).unwrap();
    }
    for _ in 0..3 {
        game.store_mut().place_agent(target, p(0)).unwrap();
    }

    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    game.subscribe(move |e| log.borrow_mut().push(e.clone()));

    let outcome = game.attempt_takeover(p(0), target).unwrap();
    assert!(outcome.insured);
    assert_eq!(game.player(p(1)).unwrap().hand.len(), hand_size);
    let discarded: usize = seen
        .borrow()
        .iter()
        .filter_map(|e| match e {
            GameEvent::TilesDiscarded { player, tiles } if *player == p(1) => Some(tiles.len()),
            _ => None,
        })
        .sum();
    assert_eq!(discarded, 3);
}

#[test]
fn test_agents_wait_for_agent_phase_in_classic() {
    let config = RuleConfig::new(2)
        .with_starting_player(StartingPlayer::Fixed(p(0)))
        .with_turn_model(rust_trinity::core::TurnModel::Classic);
    let mut game = Game::new(config, 0).unwrap();
    game.setup().unwrap();
    game.store_mut().place_agent(Position::new(1, 1), p(0)).unwrap();

    assert!(matches!(
        game.move_agent(p(0), Position::new(1, 1), Position::new(1, 2)),
        Err(ActionError::Rule(RuleViolation::WrongPhase(_)))
    ));
    game.advance_phase(p(0)).unwrap();
    game.advance_phase(p(0)).unwrap();
    game.move_agent(p(0), Position::new(1, 1), Position::new(1, 2)).unwrap();
}
