mod common;

use common::{actor, at, tokens, Board};
use std::time::Duration;
use walkdemo::action_log::Action;
use walkdemo::handler::Reactivate;
use walkdemo::InputToken::*;
use walkdemo::{ActorId, Flow, MovementRules, PlayerHandler, PlayerState};

fn gated_orthogonal() -> MovementRules {
    MovementRules {
        cooldown_gating: true,
        diagonal: false,
        run_modifier: true,
    }
}

/// Handler for `player` that has already pressed start
fn walking(board: &mut Board, player: usize) -> PlayerHandler {
    let mut handler = PlayerHandler::new(player, actor(player));
    handler.handle(&tokens(&[Start]), None, &mut board.ctx()).unwrap();
    assert!(handler.is_walking());
    handler
}

#[test]
fn start_places_actor_at_first_free_cell_in_row_one() {
    let mut board = Board::new(80, MovementRules::default());
    board.registry.place(at(1, 1), actor(10)).unwrap();
    board.registry.place(at(2, 1), actor(11)).unwrap();

    let mut handler = PlayerHandler::new(0, actor(0));
    let flow = handler.handle(&tokens(&[Start]), None, &mut board.ctx()).unwrap();

    assert_eq!(flow, Flow::Continue);
    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(3, 1)));
    assert_eq!(
        handler.state(),
        &PlayerState::Walking { actor: ActorId(0), movement_enabled: true }
    );
}

#[test]
fn ready_ignores_movement() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = PlayerHandler::new(0, actor(0));

    handler.handle(&tokens(&[Right, Down]), None, &mut board.ctx()).unwrap();

    assert!(!handler.is_walking());
    assert!(board.registry.is_empty());
}

#[test]
fn start_does_not_step_in_the_same_frame() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = PlayerHandler::new(0, actor(0));

    handler.handle(&tokens(&[Start, Right]), None, &mut board.ctx()).unwrap();

    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(1, 1)));
    assert!(handler.movement_enabled());
}

#[test]
fn walking_stays_walking() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = walking(&mut board, 0);

    handler.handle(&tokens(&[Start]), None, &mut board.ctx()).unwrap();

    assert!(handler.is_walking());
    assert_eq!(board.registry.len(), 1);
}

#[test]
fn cooldown_gates_second_step_until_reactivated() {
    let mut board = Board::new(80, gated_orthogonal());
    let mut handler = walking(&mut board, 0);

    // Down is evaluated before Right; the step disables movement for Right
    handler.handle(&tokens(&[Down, Right]), None, &mut board.ctx()).unwrap();
    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(1, 2)));
    assert!(!handler.movement_enabled());
    assert_eq!(board.scheduler.pending(), 1);

    handler.handle(&tokens(&[Right]), None, &mut board.ctx()).unwrap();
    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(1, 2)));

    assert!(board.scheduler.advance_to(Duration::from_millis(99)).is_empty());
    let due = board.scheduler.advance_to(Duration::from_millis(100));
    assert_eq!(due, vec![Reactivate { player: 0 }]);
    assert!(handler.reactivate());

    handler.handle(&tokens(&[Right]), None, &mut board.ctx()).unwrap();
    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(2, 2)));
}

#[test]
fn cooldown_uses_actor_walk_cooldown() {
    let mut board = Board::new(80, gated_orthogonal());
    let mut handler = walking(&mut board, 0);

    for _ in 0..5 {
        handler.handle(&tokens(&[SpeedDown]), None, &mut board.ctx()).unwrap();
    }
    handler.handle(&tokens(&[Right]), None, &mut board.ctx()).unwrap();

    assert!(board.scheduler.advance_to(Duration::from_millis(149)).is_empty());
    assert_eq!(board.scheduler.advance_to(Duration::from_millis(150)).len(), 1);
}

#[test]
fn run_token_skips_cooldown() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = walking(&mut board, 0);

    handler.handle(&tokens(&[Right, Run]), None, &mut board.ctx()).unwrap();
    handler.handle(&tokens(&[Right, Run]), None, &mut board.ctx()).unwrap();

    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(3, 1)));
    assert!(handler.movement_enabled());
    assert_eq!(board.scheduler.pending(), 0);
}

#[test]
fn run_token_ignored_when_run_modifier_off() {
    let rules = MovementRules { run_modifier: false, ..MovementRules::default() };
    let mut board = Board::new(80, rules);
    let mut handler = walking(&mut board, 0);

    handler.handle(&tokens(&[Right, Run]), None, &mut board.ctx()).unwrap();
    handler.handle(&tokens(&[Right, Run]), None, &mut board.ctx()).unwrap();

    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(2, 1)));
    assert_eq!(board.scheduler.pending(), 1);
}

#[test]
fn ungated_rules_take_every_direction() {
    let rules = MovementRules {
        cooldown_gating: false,
        diagonal: false,
        run_modifier: false,
    };
    let mut board = Board::new(80, rules);
    let mut handler = walking(&mut board, 0);

    handler.handle(&tokens(&[Down, Right]), None, &mut board.ctx()).unwrap();

    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(2, 2)));
    assert_eq!(board.scheduler.pending(), 0);
}

#[test]
fn blocked_step_is_silent_and_keeps_movement_enabled() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = walking(&mut board, 0);
    board.registry.place(at(2, 1), actor(1)).unwrap();

    let flow = handler.handle(&tokens(&[Right]), None, &mut board.ctx()).unwrap();

    assert_eq!(flow, Flow::Continue);
    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(1, 1)));
    assert_eq!(board.registry.position_of(ActorId(1)), Some(at(2, 1)));
    assert!(handler.movement_enabled());
    assert_eq!(board.scheduler.pending(), 0);
    assert!(matches!(
        board.log.get_actions().last().map(|a| &a.action),
        Some(Action::Blocked { player: 0, .. })
    ));
}

#[test]
fn diagonal_pair_is_one_step() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = walking(&mut board, 0);
    // Get off row one so Up has room
    handler.handle(&tokens(&[Down, Run]), None, &mut board.ctx()).unwrap();
    handler.handle(&tokens(&[Right, Run]), None, &mut board.ctx()).unwrap();
    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(2, 2)));

    handler.handle(&tokens(&[Up, Left]), None, &mut board.ctx()).unwrap();

    assert_eq!(board.registry.position_of(ActorId(0)), Some(at(1, 1)));
    assert_eq!(board.scheduler.pending(), 1);
}

#[test]
fn speed_tokens_adjust_actor_on_board() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = walking(&mut board, 0);

    handler.handle(&tokens(&[SpeedUp]), None, &mut board.ctx()).unwrap();
    handler.handle(&tokens(&[SpeedUp]), None, &mut board.ctx()).unwrap();

    let on_board = board.registry.actor_at(at(1, 1)).unwrap();
    assert_eq!(on_board.walk_cooldown(), Duration::from_millis(80));
}

#[test]
fn speed_tokens_adjust_ready_actor() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = PlayerHandler::new(0, actor(0));

    handler.handle(&tokens(&[SpeedDown]), None, &mut board.ctx()).unwrap();

    match handler.state() {
        PlayerState::Ready { actor } => assert_eq!(actor.walk_cooldown(), Duration::from_millis(110)),
        other => panic!("unexpected state {:?}", other),
    }
}

#[test]
fn speed_at_bound_logs_nothing() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = walking(&mut board, 0);
    for _ in 0..20 {
        handler.handle(&tokens(&[SpeedUp]), None, &mut board.ctx()).unwrap();
    }

    let speed_changes = board
        .log
        .get_actions()
        .iter()
        .filter(|a| matches!(a.action, Action::SpeedChange { .. }))
        .count();
    assert_eq!(speed_changes, 5);
}

#[test]
fn quit_comes_from_keyboard_only() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = walking(&mut board, 0);

    let flow = handler.handle(&tokens(&[Quit]), Some(&tokens(&[])), &mut board.ctx()).unwrap();
    assert_eq!(flow, Flow::Continue);

    let flow = handler.handle(&tokens(&[]), Some(&tokens(&[Quit])), &mut board.ctx()).unwrap();
    assert_eq!(flow, Flow::Quit);
}

#[test]
fn full_spawn_row_leaves_player_ready() {
    let mut board = Board::new(3, MovementRules::default());
    board.registry.place(at(1, 1), actor(10)).unwrap();
    board.registry.place(at(2, 1), actor(11)).unwrap();

    let mut handler = PlayerHandler::new(0, actor(0));
    let flow = handler.handle(&tokens(&[Start]), None, &mut board.ctx()).unwrap();

    assert_eq!(flow, Flow::Continue);
    assert!(!handler.is_walking());
    assert_eq!(handler.actor_id(), ActorId(0));
    assert!(board.registry.position_of(ActorId(0)).is_none());
    assert_eq!(
        board.log.get_actions().last().map(|a| a.action.clone()),
        Some(Action::SpawnFailed { player: 0, row: 1 })
    );
}

#[test]
fn reactivate_in_ready_is_a_no_op() {
    let mut handler = PlayerHandler::new(0, actor(0));
    assert!(!handler.reactivate());
    assert!(!handler.is_walking());
}

#[test]
fn quit_is_honoured_before_start() {
    let mut board = Board::new(80, MovementRules::default());
    let mut handler = PlayerHandler::new(0, actor(0));

    let flow = handler.handle(&tokens(&[]), Some(&tokens(&[Quit])), &mut board.ctx()).unwrap();

    assert_eq!(flow, Flow::Quit);
    assert!(!handler.is_walking());
}
