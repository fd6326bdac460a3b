//! Snake engine: commands, the per-tick transition and speed progression.
//!
//! The engine never owns a timer. An external scheduler calls [`GameEngine::tick`]
//! every [`GameEngine::tick_interval`] and reschedules when the interval changes.
//! Every command validates the current [`GameState`] and silently ignores
//! requests that do not apply, so late timer signals and key repeats are safe.

use super::spawn::{PreyStep, SpawnPolicy};
use super::types::*;
use crate::core::constants::{DIRECTION_QUEUE_CAPACITY, INITIAL_SNAKE_LENGTH};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

/// Read-only copy of everything a renderer needs after a command or tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub snake: Vec<Cell>,
    pub target: Target,
    pub direction: Direction,
    pub pending: Vec<Direction>,
    pub score: u32,
    pub tick_interval_ms: u64,
    pub special_mode: bool,
    pub state: GameState,
    pub game_over_cause: Option<GameOverCause>,
}

/// Arrangement used to start an engine from a chosen layout instead of the
/// canonical centered snake (puzzles, replays, scenario tests).
#[derive(Debug, Clone)]
pub struct EngineLayout {
    /// Head-first cells.
    pub snake: Vec<Cell>,
    pub direction: Direction,
    pub target: Target,
    pub state: GameState,
}

pub struct GameEngine<R: Rng = StdRng> {
    config: EngineConfig,
    spawn: SpawnPolicy,
    rng: R,

    snake: Snake,
    target: Target,
    direction: Direction,
    pending: VecDeque<Direction>,

    score: u32,
    tick_interval_ms: u64,
    special_mode: bool,
    state: GameState,
    game_over_cause: Option<GameOverCause>,
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine in the Ready state with a fresh centered snake.
    pub fn new(config: EngineConfig, rng: R) -> Self {
        let snake = Snake::centered(config.grid_size, INITIAL_SNAKE_LENGTH);
        let mut engine = Self {
            spawn: SpawnPolicy::new(config.variant),
            rng,
            target: Target::food(Cell::new(0, 0)),
            direction: Direction::Right,
            pending: VecDeque::with_capacity(DIRECTION_QUEUE_CAPACITY + 1),
            score: 0,
            tick_interval_ms: config.initial_interval_ms,
            special_mode: false,
            state: GameState::Ready,
            game_over_cause: None,
            snake,
            config,
        };
        engine.relocate_target();
        engine
    }

    /// Create an engine from an explicit layout.
    ///
    /// Rejects layouts that break the board invariants: empty or
    /// self-overlapping snake, cells off the board, a non-contiguous body,
    /// a target on the snake, or a finished run (a game over needs a cause).
    pub fn with_layout(config: EngineConfig, rng: R, layout: EngineLayout) -> Result<Self, String> {
        if layout.state == GameState::GameOver {
            return Err("layout cannot start a finished run".to_string());
        }
        let grid_size = config.grid_size;
        let snake =
            Snake::from_cells(layout.snake).ok_or_else(|| "snake must not be empty".to_string())?;
        if snake.iter().any(|c| !c.in_bounds(grid_size)) {
            return Err("snake leaves the board".to_string());
        }
        if snake.has_duplicates() {
            return Err("snake overlaps itself".to_string());
        }
        if !snake.is_contiguous(grid_size) {
            return Err("snake is not contiguous".to_string());
        }
        if !layout.target.cell.in_bounds(grid_size) {
            return Err("target is off the board".to_string());
        }
        if snake.contains(layout.target.cell) {
            return Err("target is on the snake".to_string());
        }

        let mut engine = Self::new(config, rng);
        engine.snake = snake;
        engine.direction = layout.direction;
        engine.target = layout.target;
        engine.state = layout.state;
        Ok(engine)
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Ready → Playing. Returns true if the transition happened.
    pub fn start(&mut self) -> bool {
        self.transition(GameState::Ready, GameState::Playing)
    }

    /// Playing → Paused. Returns true if the transition happened.
    pub fn pause(&mut self) -> bool {
        self.transition(GameState::Playing, GameState::Paused)
    }

    /// Paused → Playing. Returns true if the transition happened.
    pub fn resume(&mut self) -> bool {
        self.transition(GameState::Paused, GameState::Playing)
    }

    /// Back to Ready defaults from any state.
    pub fn reset(&mut self) {
        self.snake = Snake::centered(self.config.grid_size, INITIAL_SNAKE_LENGTH);
        self.direction = Direction::Right;
        self.pending.clear();
        self.score = 0;
        self.tick_interval_ms = self.config.initial_interval_ms;
        self.special_mode = false;
        self.state = GameState::Ready;
        self.game_over_cause = None;
        self.spawn.reset();
        self.relocate_target();
    }

    /// Flip unrestricted (wall-wrapping) mode. Allowed in any state.
    pub fn toggle_special_mode(&mut self) {
        self.special_mode = !self.special_mode;
        tracing::debug!(enabled = self.special_mode, "special mode toggled");
    }

    /// Queue a turn. Returns true if it was queued.
    ///
    /// Compared against the newest queued turn (or the current direction):
    /// reversals and repeats are dropped. Only the newest
    /// `DIRECTION_QUEUE_CAPACITY` turns are kept.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.state != GameState::Playing {
            return false;
        }

        let last = self.pending.back().copied().unwrap_or(self.direction);
        if direction == last || direction == last.opposite() {
            return false;
        }

        self.pending.push_back(direction);
        if self.pending.len() > DIRECTION_QUEUE_CAPACITY {
            self.pending.pop_front();
        }
        true
    }

    /// Advance the simulation one step. No-op unless Playing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != GameState::Playing {
            return TickOutcome::Idle;
        }

        let grid_size = self.config.grid_size;

        // Prey moves before the snake, independent of this tick's move.
        if self.spawn.advance_target(&mut self.target, &self.snake, grid_size, &mut self.rng)
            == PreyStep::Moved
        {
            tracing::trace!(x = self.target.cell.x, y = self.target.cell.y, "prey moved");
        }

        if let Some(next) = self.pending.pop_front() {
            self.direction = next;
        }

        let mut new_head = self.snake.head().step(self.direction);

        if !new_head.in_bounds(grid_size) {
            if self.special_mode {
                new_head = new_head.wrapped(grid_size);
            } else {
                return self.end_game(GameOverCause::Wall);
            }
        }

        // Checked against the body before the move, tail included.
        if self.snake.contains(new_head) {
            return self.end_game(GameOverCause::SelfCollision);
        }

        self.snake.push_head(new_head);

        if new_head != self.target.cell {
            self.snake.drop_tail();
            return TickOutcome::Moved;
        }

        self.score += self.config.points_per_target;
        let interval_changed = self.increase_speed();
        tracing::debug!(
            score = self.score,
            length = self.snake.len(),
            interval_ms = self.tick_interval_ms,
            "target eaten"
        );

        if !self.relocate_target() {
            return self.end_game(GameOverCause::BoardFilled);
        }

        TickOutcome::Grew { interval_changed }
    }

    // ── Observers ────────────────────────────────────────────────

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending(&self) -> Vec<Direction> {
        self.pending.iter().copied().collect()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn special_mode(&self) -> bool {
        self.special_mode
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over_cause
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn grid_size(&self) -> i16 {
        self.config.grid_size
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Direction the head visibly points: from the neck to the head, which
    /// lags behind queued turns. Falls back to the movement direction.
    pub fn visual_direction(&self) -> Direction {
        let Some(neck) = self.snake.neck() else {
            return self.direction;
        };
        let head = self.snake.head();
        let (dx, dy) = (head.x - neck.x, head.y - neck.y);
        match (dx.signum(), dy.signum()) {
            // A wrapped step shows up as a jump of (1 - N) cells.
            (1, 0) if dx == 1 => Direction::Right,
            (1, 0) => Direction::Left,
            (-1, 0) if dx == -1 => Direction::Left,
            (-1, 0) => Direction::Right,
            (0, 1) if dy == 1 => Direction::Down,
            (0, 1) => Direction::Up,
            (0, -1) if dy == -1 => Direction::Up,
            (0, -1) => Direction::Down,
            _ => self.direction,
        }
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            snake: self.snake.cells(),
            target: self.target,
            direction: self.direction,
            pending: self.pending(),
            score: self.score,
            tick_interval_ms: self.tick_interval_ms,
            special_mode: self.special_mode,
            state: self.state,
            game_over_cause: self.game_over_cause,
        }
    }

    // ── Internals ────────────────────────────────────────────────

    fn transition(&mut self, from: GameState, to: GameState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        true
    }

    fn end_game(&mut self, cause: GameOverCause) -> TickOutcome {
        self.state = GameState::GameOver;
        self.game_over_cause = Some(cause);
        self.pending.clear();
        tracing::debug!(?cause, score = self.score, "game over");
        TickOutcome::GameOver(cause)
    }

    /// Decrease the interval by the fixed step, clamped at the minimum.
    /// Returns true if the interval changed.
    fn increase_speed(&mut self) -> bool {
        let before = self.tick_interval_ms;
        self.tick_interval_ms = before
            .saturating_sub(self.config.interval_decrement_ms)
            .max(self.config.min_interval_ms);
        self.tick_interval_ms != before
    }

    /// Returns false if the snake covers the whole board.
    fn relocate_target(&mut self) -> bool {
        match self
            .spawn
            .place_target(&self.snake, self.config.grid_size, &mut self.rng)
        {
            Some(target) => {
                self.target = target;
                true
            }
            None => false,
        }
    }
}
