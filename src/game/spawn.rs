//! Target placement and the prey's biased random walk.

use super::types::{Cell, Direction, Snake, Target, Variant};
use crate::core::constants::{PREY_MOVE_EVERY_TICKS, PREY_TURN_CHANCE};
use rand::seq::SliceRandom;
use rand::Rng;

/// What one `advance_target` call did to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreyStep {
    /// Static food never moves.
    Stationary,
    /// Off-beat tick; the prey moves at half the snake's cadence.
    Resting,
    Moved,
    /// Next step would leave the board; facing reversed, position kept.
    Reflected,
    /// Next step was inside the snake; new random facing, position kept.
    /// The new facing is not checked, so the prey may stay put again.
    Avoided,
}

/// Chooses target cells and drives prey movement.
#[derive(Debug, Clone)]
pub struct SpawnPolicy {
    variant: Variant,
    advance_calls: u8,
}

impl SpawnPolicy {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            advance_calls: 0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Restart the half-cadence counter (new run).
    pub fn reset(&mut self) {
        self.advance_calls = 0;
    }

    /// Pick a cell uniformly among all cells not covered by the snake.
    ///
    /// Prey also gets a uniformly random facing. Returns `None` only when the
    /// snake covers the whole board.
    pub fn place_target<R: Rng + ?Sized>(
        &self,
        snake: &Snake,
        grid_size: i16,
        rng: &mut R,
    ) -> Option<Target> {
        let free: Vec<Cell> = (0..grid_size)
            .flat_map(|x| (0..grid_size).map(move |y| Cell::new(x, y)))
            .filter(|&cell| !snake.contains(cell))
            .collect();
        let cell = *free.choose(rng)?;

        Some(match self.variant {
            Variant::Food => Target::food(cell),
            Variant::Prey => Target::prey(cell, Direction::random(rng)),
        })
    }

    /// Advance the prey one random-walk attempt on every second call.
    pub fn advance_target<R: Rng + ?Sized>(
        &mut self,
        target: &mut Target,
        snake: &Snake,
        grid_size: i16,
        rng: &mut R,
    ) -> PreyStep {
        if self.variant == Variant::Food {
            return PreyStep::Stationary;
        }

        self.advance_calls += 1;
        if self.advance_calls < PREY_MOVE_EVERY_TICKS {
            return PreyStep::Resting;
        }
        self.advance_calls = 0;

        let mut facing = target.facing.unwrap_or_else(|| Direction::random(rng));
        // Brownian bias: mostly straight, sometimes a fresh heading.
        if rng.gen_bool(PREY_TURN_CHANCE) {
            facing = Direction::random(rng);
        }

        let candidate = target.cell.step(facing);
        let step = if !candidate.in_bounds(grid_size) {
            facing = facing.opposite();
            PreyStep::Reflected
        } else if snake.contains(candidate) {
            facing = Direction::random(rng);
            PreyStep::Avoided
        } else {
            target.cell = candidate;
            PreyStep::Moved
        };

        target.facing = Some(facing);
        step
    }
}
