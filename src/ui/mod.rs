pub mod game_common;
pub mod game_scene;
pub mod leaderboard_scene;
pub mod name_prompt;

use crate::app::{App, Screen};
use rand::Rng;
use ratatui::Frame;

/// Draw whichever screen is active.
pub fn draw<R: Rng>(frame: &mut Frame, app: &App<R>) {
    let size = frame.size();
    match app.screen {
        Screen::Game => game_scene::render_game_screen(frame, size, app),
        Screen::Leaderboard => leaderboard_scene::render_leaderboard_screen(frame, size, app),
    }
}
