//! Snake simulation: engine, spawn policy and board types.

pub mod engine;
pub mod spawn;
pub mod types;

pub use engine::{EngineLayout, EngineSnapshot, GameEngine};
pub use spawn::{PreyStep, SpawnPolicy};
pub use types::{
    Cell, Direction, EngineConfig, GameOverCause, GameState, Snake, Target, TickOutcome, Variant,
};
