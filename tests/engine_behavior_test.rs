//! Behavior-locking tests for the snake engine.
//!
//! Growth-heavy tests steer the snake along a Hamiltonian cycle of the
//! 20x20 board, so the run never dies and every target is eventually eaten
//! regardless of where the RNG places it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_arcade::game::{
    Cell, Direction, EngineConfig, EngineLayout, GameEngine, GameOverCause, GameState, Target,
    TickOutcome, Variant,
};

fn create_test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn started_engine(seed: u64) -> GameEngine<ChaCha8Rng> {
    let mut engine = GameEngine::new(EngineConfig::default(), create_test_rng(seed));
    engine.start();
    engine
}

fn layout_engine(snake: Vec<Cell>, direction: Direction, target: Cell) -> GameEngine<ChaCha8Rng> {
    GameEngine::with_layout(
        EngineConfig::default(),
        create_test_rng(1),
        EngineLayout {
            snake,
            direction,
            target: Target::food(target),
            state: GameState::Playing,
        },
    )
    .unwrap()
}

/// Next move on a 20x20 Hamiltonian cycle: even rows run right over
/// columns 1..=19, odd rows run left back to column 1, column 0 climbs
/// from row 19 to row 0.
fn cycle_direction(head: Cell) -> Direction {
    let last = 19;
    if head.x == 0 {
        return if head.y == 0 {
            Direction::Right
        } else {
            Direction::Up
        };
    }
    if head.y % 2 == 0 {
        if head.x < last {
            Direction::Right
        } else {
            Direction::Down
        }
    } else if head.x > 1 || head.y == last {
        Direction::Left
    } else {
        Direction::Down
    }
}

/// Tick along the cycle until `growths` targets are eaten.
fn grow_along_cycle(engine: &mut GameEngine<ChaCha8Rng>, growths: u32) -> Vec<TickOutcome> {
    let mut outcomes = Vec::new();
    let mut eaten = 0;
    for _ in 0..(growths as usize + 1) * 400 {
        if eaten == growths {
            break;
        }
        engine.queue_direction(cycle_direction(engine.snake().head()));
        let outcome = engine.tick();
        assert!(
            !matches!(outcome, TickOutcome::GameOver(_)),
            "cycle walk died: {:?}",
            outcome
        );
        assert!(!engine.snake().contains(engine.target().cell));
        if matches!(outcome, TickOutcome::Grew { .. }) {
            eaten += 1;
            outcomes.push(outcome);
        }
    }
    assert_eq!(eaten, growths);
    outcomes
}

// ── Direction queue ─────────────────────────────────────────────────

#[test]
fn test_reversal_never_changes_queue() {
    let mut engine = started_engine(1);
    assert!(!engine.queue_direction(Direction::Left));
    assert!(engine.pending().is_empty());

    assert!(engine.queue_direction(Direction::Up));
    assert!(!engine.queue_direction(Direction::Down));
    assert!(!engine.queue_direction(Direction::Up));
    assert_eq!(engine.pending(), vec![Direction::Up]);
}

#[test]
fn test_queue_keeps_two_newest_turns() {
    let mut engine = started_engine(1);
    engine.queue_direction(Direction::Up);
    engine.queue_direction(Direction::Left);
    engine.queue_direction(Direction::Down);
    assert_eq!(engine.pending(), vec![Direction::Left, Direction::Down]);
}

// ── Growth, score and speed ─────────────────────────────────────────

#[test]
fn test_growth_adds_score_and_length() {
    let mut engine = started_engine(11);
    grow_along_cycle(&mut engine, 6);
    assert_eq!(engine.score(), 60);
    assert_eq!(engine.snake().len(), 3 + 6);
    assert_eq!(engine.state(), GameState::Playing);
}

#[test]
fn test_interval_follows_decrement_then_clamps() {
    let mut engine = started_engine(5);
    for k in 1..=25u64 {
        let outcomes = grow_along_cycle(&mut engine, 1);
        let expected = 300u64.saturating_sub(k * 10).max(80);
        assert_eq!(engine.tick_interval_ms(), expected, "after {} growths", k);
        let changed = expected != 300u64.saturating_sub((k - 1) * 10).max(80);
        assert_eq!(
            outcomes[0],
            TickOutcome::Grew {
                interval_changed: changed
            }
        );
    }
    assert_eq!(engine.tick_interval_ms(), 80);
}

#[test]
fn test_target_never_on_snake_across_seeds() {
    for seed in 0..20 {
        let mut engine = started_engine(seed);
        grow_along_cycle(&mut engine, 8);
    }
}

// ── Collisions ──────────────────────────────────────────────────────

fn hook_snake() -> Vec<Cell> {
    vec![
        Cell::new(5, 5),
        Cell::new(6, 5),
        Cell::new(6, 6),
        Cell::new(5, 6),
        Cell::new(4, 6),
    ]
}

#[test]
fn test_self_collision_ends_run() {
    let mut engine = layout_engine(hook_snake(), Direction::Left, Cell::new(0, 0));
    engine.queue_direction(Direction::Down);
    assert_eq!(
        engine.tick(),
        TickOutcome::GameOver(GameOverCause::SelfCollision)
    );
    assert_eq!(engine.state(), GameState::GameOver);
    assert_eq!(engine.snake().head(), Cell::new(5, 5));
}

#[test]
fn test_self_collision_ends_run_in_unrestricted_mode() {
    let mut engine = layout_engine(hook_snake(), Direction::Left, Cell::new(0, 0));
    engine.toggle_special_mode();
    engine.queue_direction(Direction::Down);
    assert_eq!(
        engine.tick(),
        TickOutcome::GameOver(GameOverCause::SelfCollision)
    );
}

#[test]
fn test_wall_collision_ends_run() {
    let snake = vec![Cell::new(19, 10), Cell::new(18, 10), Cell::new(17, 10)];
    let mut engine = layout_engine(snake, Direction::Right, Cell::new(0, 0));
    assert_eq!(engine.tick(), TickOutcome::GameOver(GameOverCause::Wall));
    assert_eq!(engine.game_over_cause(), Some(GameOverCause::Wall));
    assert_eq!(engine.snake().head(), Cell::new(19, 10));
}

#[test]
fn test_unrestricted_mode_wraps_each_edge() {
    let cases = [
        (
            vec![Cell::new(19, 10), Cell::new(18, 10), Cell::new(17, 10)],
            Direction::Right,
            Cell::new(0, 10),
        ),
        (
            vec![Cell::new(0, 10), Cell::new(1, 10), Cell::new(2, 10)],
            Direction::Left,
            Cell::new(19, 10),
        ),
        (
            vec![Cell::new(7, 0), Cell::new(7, 1), Cell::new(7, 2)],
            Direction::Up,
            Cell::new(7, 19),
        ),
        (
            vec![Cell::new(7, 19), Cell::new(7, 18), Cell::new(7, 17)],
            Direction::Down,
            Cell::new(7, 0),
        ),
    ];
    for (snake, direction, expected) in cases {
        let mut engine = layout_engine(snake, direction, Cell::new(12, 12));
        engine.toggle_special_mode();
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.snake().head(), expected);
        assert_eq!(engine.state(), GameState::Playing);
    }
}

// ── No-op ticks and reset ───────────────────────────────────────────

#[test]
fn test_tick_outside_playing_changes_nothing() {
    let mut ready = GameEngine::new(EngineConfig::default(), create_test_rng(2));
    let before = ready.snapshot();
    assert_eq!(ready.tick(), TickOutcome::Idle);
    assert_eq!(ready.snapshot(), before);

    let mut paused = started_engine(2);
    paused.queue_direction(Direction::Up);
    paused.pause();
    let before = paused.snapshot();
    assert_eq!(paused.tick(), TickOutcome::Idle);
    assert_eq!(paused.snapshot(), before);

    let snake = vec![Cell::new(19, 10), Cell::new(18, 10), Cell::new(17, 10)];
    let mut over = layout_engine(snake, Direction::Right, Cell::new(0, 0));
    over.tick();
    let before = over.snapshot();
    assert_eq!(over.tick(), TickOutcome::Idle);
    assert_eq!(over.snapshot(), before);
}

#[test]
fn test_reset_restores_defaults_from_any_state() {
    let fresh = GameEngine::new(EngineConfig::default(), create_test_rng(3));

    let mut playing = started_engine(3);
    grow_along_cycle(&mut playing, 2);
    playing.toggle_special_mode();

    let mut paused = started_engine(4);
    paused.pause();

    let snake = vec![Cell::new(19, 10), Cell::new(18, 10), Cell::new(17, 10)];
    let mut over = layout_engine(snake, Direction::Right, Cell::new(0, 0));
    over.tick();

    for engine in [&mut playing, &mut paused, &mut over] {
        engine.reset();
        assert_eq!(engine.state(), GameState::Ready);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.snake().cells(), fresh.snake().cells());
        assert_eq!(engine.direction(), Direction::Right);
        assert!(engine.pending().is_empty());
        assert_eq!(engine.tick_interval_ms(), 300);
        assert!(!engine.special_mode());
        assert_eq!(engine.game_over_cause(), None);
        assert!(!engine.snake().contains(engine.target().cell));
    }
}

// ── Scenarios ───────────────────────────────────────────────────────

fn center_snake() -> Vec<Cell> {
    vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]
}

#[test]
fn test_scenario_turn_up() {
    let mut engine = layout_engine(center_snake(), Direction::Right, Cell::new(0, 0));
    engine.queue_direction(Direction::Up);
    assert_eq!(engine.tick(), TickOutcome::Moved);
    assert_eq!(engine.snake().head(), Cell::new(10, 9));
    assert_eq!(engine.snake().len(), 3);
    assert_eq!(engine.state(), GameState::Playing);
    assert_eq!(engine.direction(), Direction::Up);
}

#[test]
fn test_scenario_eat_target_ahead() {
    let mut engine = layout_engine(center_snake(), Direction::Right, Cell::new(11, 10));
    assert_eq!(
        engine.tick(),
        TickOutcome::Grew {
            interval_changed: true
        }
    );
    assert_eq!(engine.score(), 10);
    assert_eq!(engine.snake().len(), 4);
    assert_eq!(engine.tick_interval_ms(), 290);
    assert!(!engine.snake().contains(engine.target().cell));
}

// ── Prey ordering ───────────────────────────────────────────────────

/// Snake at the center heading right with the prey placed on its row. The
/// first tick is a prey rest tick; the second is a prey acting tick.
fn prey_engine(seed: u64, prey: Cell, facing: Direction) -> GameEngine<ChaCha8Rng> {
    GameEngine::with_layout(
        EngineConfig::default().with_variant(Variant::Prey),
        create_test_rng(seed),
        EngineLayout {
            snake: center_snake(),
            direction: Direction::Right,
            target: Target::prey(prey, facing),
            state: GameState::Playing,
        },
    )
    .unwrap()
}

#[test]
fn test_prey_steps_away_before_snake_moves() {
    let mut escapes = 0;
    for seed in 0..20 {
        let mut engine = prey_engine(seed, Cell::new(12, 10), Direction::Right);
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.snake().head(), Cell::new(11, 10));
        assert_eq!(engine.target().cell, Cell::new(12, 10));

        // The head lands on the prey's old cell; only a prey that moved
        // first survives.
        match engine.tick() {
            TickOutcome::Moved => {
                escapes += 1;
                assert_eq!(engine.snake().head(), Cell::new(12, 10));
                assert_ne!(engine.target().cell, Cell::new(12, 10));
                assert_eq!(engine.score(), 0);
                assert_eq!(engine.snake().len(), 3);
            }
            TickOutcome::Grew { .. } => assert_eq!(engine.score(), 10),
            other => panic!("unexpected outcome {:?} for seed {}", other, seed),
        }
    }
    assert!(escapes > 0, "prey never stepped away");
}

#[test]
fn test_prey_stepping_into_head_path_is_eaten() {
    let mut caught = 0;
    for seed in 0..20 {
        let mut engine = prey_engine(seed, Cell::new(13, 10), Direction::Left);
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.target().cell, Cell::new(13, 10));

        // The prey moves into (12, 10) first, then the head arrives there.
        match engine.tick() {
            TickOutcome::Grew { interval_changed } => {
                caught += 1;
                assert!(interval_changed);
                assert_eq!(engine.snake().head(), Cell::new(12, 10));
                assert_eq!(engine.score(), 10);
                assert_eq!(engine.snake().len(), 4);
                assert!(!engine.snake().contains(engine.target().cell));
            }
            TickOutcome::Moved => {
                assert_ne!(engine.target().cell, Cell::new(12, 10));
                assert_eq!(engine.score(), 0);
            }
            other => panic!("unexpected outcome {:?} for seed {}", other, seed),
        }
    }
    assert!(caught > 0, "prey never stepped into the head's path");
}
