// Board
pub const GRID_SIZE: i16 = 20;
pub const INITIAL_SNAKE_LENGTH: usize = 3;
/// Smallest board that still fits the centered starting snake plus a target.
pub const MIN_GRID_SIZE: i16 = 4;
/// Largest board the terminal renderer can draw and spawning can enumerate.
pub const MAX_GRID_SIZE: i16 = 100;

// Tick timing (milliseconds)
pub const INITIAL_TICK_INTERVAL_MS: u64 = 300;
pub const MIN_TICK_INTERVAL_MS: u64 = 80;
pub const TICK_INTERVAL_DECREMENT_MS: u64 = 10;

// Scoring
pub const POINTS_PER_TARGET: u32 = 10;

// Input
pub const DIRECTION_QUEUE_CAPACITY: usize = 2;
/// Consecutive `O` presses while paused that toggle unrestricted mode.
pub const SPECIAL_MODE_KEY_PRESSES: u32 = 5;
pub const MAX_PLAYER_NAME_LEN: usize = 24;

// Prey random walk
pub const PREY_TURN_CHANCE: f64 = 0.3;
/// The prey attempts a step on every Nth engine tick.
pub const PREY_MOVE_EVERY_TICKS: u8 = 2;

// Leaderboard service
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const SERVER_URL_ENV: &str = "SNAKE_ARCADE_SERVER";
pub const HTTP_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 100;

// Main loop
/// Upper bound on how long the loop blocks waiting for input.
pub const INPUT_POLL_MS: u64 = 50;

// Logging
pub const LOG_FILTER_ENV: &str = "SNAKE_ARCADE_LOG";
pub const DEFAULT_LOG_FILTER: &str = "snake_arcade=info";
pub const LOG_FILE_NAME: &str = "snake-arcade.log";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
