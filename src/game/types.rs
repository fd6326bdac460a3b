//! Snake game data structures.
//!
//! Board geometry, the snake body, the food/prey target and the session state
//! enums shared by the engine and the spawn policy.

use crate::core::constants::{
    GRID_SIZE, INITIAL_TICK_INTERVAL_MS, MAX_GRID_SIZE, MIN_GRID_SIZE, MIN_TICK_INTERVAL_MS,
    POINTS_PER_TARGET, TICK_INTERVAL_DECREMENT_MS,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Cardinal direction for snake (and prey) movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (dx, dy) delta for this direction. Y grows downwards.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Uniformly random direction.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// A cell on the square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one step in `direction`. May leave the board.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(self, grid_size: i16) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }

    /// Wrap a cell back onto the board (toroidal topology).
    pub fn wrapped(self, grid_size: i16) -> Self {
        Self {
            x: self.x.rem_euclid(grid_size),
            y: self.y.rem_euclid(grid_size),
        }
    }
}

/// Snake body. Head is at the front (index 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Build a snake from head-first cells. Returns `None` for an empty body.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// The canonical starting snake: centered, `length` cells, head facing right.
    pub fn centered(grid_size: i16, length: usize) -> Self {
        let center = grid_size / 2;
        let body = (0..length.max(1) as i16)
            .map(|i| Cell::new(center - i, center))
            .collect();
        Self { body }
    }

    pub fn head(&self) -> Cell {
        // Non-empty by construction.
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn cells(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }

    /// Second segment, if any.
    pub fn neck(&self) -> Option<Cell> {
        self.body.get(1).copied()
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub(crate) fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    /// True when every segment is adjacent to its predecessor, allowing a
    /// wrapped step across the board edge.
    pub fn is_contiguous(&self, grid_size: i16) -> bool {
        self.body.iter().zip(self.body.iter().skip(1)).all(|(a, b)| {
            let dx = (a.x - b.x).abs();
            let dy = (a.y - b.y).abs();
            let wrap = grid_size - 1;
            matches!((dx, dy), (1, 0) | (0, 1)) || (dx == wrap && dy == 0) || (dx == 0 && dy == wrap)
        })
    }

    pub fn has_duplicates(&self) -> bool {
        self.body
            .iter()
            .enumerate()
            .any(|(i, cell)| self.body.iter().skip(i + 1).any(|other| other == cell))
    }
}

/// The cell the snake is chasing. Prey additionally carries a facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub cell: Cell,
    pub facing: Option<Direction>,
}

impl Target {
    pub fn food(cell: Cell) -> Self {
        Self { cell, facing: None }
    }

    pub fn prey(cell: Cell, facing: Direction) -> Self {
        Self {
            cell,
            facing: Some(facing),
        }
    }
}

/// Whether the target sits still or wanders the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Food,
    Prey,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Prey => "Prey",
        }
    }
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ready,
    Playing,
    Paused,
    GameOver,
}

impl GameState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::GameOver => "Game Over",
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    Wall,
    SelfCollision,
    /// The snake filled every cell; there is nowhere left to put a target.
    BoardFilled,
}

/// What a single `tick()` did. The owning scheduler reschedules on
/// `Grew { interval_changed: true }` and stops on `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Idle,
    Moved,
    Grew { interval_changed: bool },
    GameOver(GameOverCause),
}

/// Tunables for one engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grid_size: i16,
    pub initial_interval_ms: u64,
    pub min_interval_ms: u64,
    pub interval_decrement_ms: u64,
    pub points_per_target: u32,
    pub variant: Variant,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            initial_interval_ms: INITIAL_TICK_INTERVAL_MS,
            min_interval_ms: MIN_TICK_INTERVAL_MS,
            interval_decrement_ms: TICK_INTERVAL_DECREMENT_MS,
            points_per_target: POINTS_PER_TARGET,
            variant: Variant::Food,
        }
    }
}

impl EngineConfig {
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(format!(
                "grid_size must be at least {} (got {})",
                MIN_GRID_SIZE, self.grid_size
            ));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(format!(
                "grid_size must be at most {} (got {})",
                MAX_GRID_SIZE, self.grid_size
            ));
        }
        if self.min_interval_ms == 0 {
            return Err("min_interval_ms must be positive".to_string());
        }
        if self.min_interval_ms > self.initial_interval_ms {
            return Err(format!(
                "min_interval_ms ({}) exceeds initial_interval_ms ({})",
                self.min_interval_ms, self.initial_interval_ms
            ));
        }
        if self.points_per_target == 0 {
            return Err("points_per_target must be positive".to_string());
        }
        Ok(())
    }
}
