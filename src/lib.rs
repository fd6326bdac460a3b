//! Snake Arcade: a grid snake engine, its terminal front end and a client
//! for the online leaderboard.

pub mod app;
pub mod build_info;
pub mod cli;
pub mod core;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod settings;
pub mod ui;
pub mod utils;
