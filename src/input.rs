//! Keyboard dispatch: overlays first, then the active screen.

use crate::app::{App, GameOverlay, Screen};
use crate::game::{Direction, GameState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use std::time::Instant;

/// Result of handling one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Game-screen actions, independent of the terminal key that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Steer(Direction),
    TogglePlay,
    CheatKey,
    Submit,
    Reset,
    ShowLeaderboard,
    Quit,
    Other,
}

/// Map a key on the game screen to a `GameInput`.
pub fn map_game_key(code: KeyCode) -> GameInput {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => GameInput::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameInput::Steer(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameInput::Steer(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameInput::Steer(Direction::Right)
        }
        KeyCode::Char(' ') => GameInput::TogglePlay,
        KeyCode::Char('o') | KeyCode::Char('O') => GameInput::CheatKey,
        KeyCode::Enter => GameInput::Submit,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Reset,
        KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Tab => GameInput::ShowLeaderboard,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameInput::Quit,
        _ => GameInput::Other,
    }
}

/// Main dispatcher. Handles the overlay priority chain.
pub fn handle_key<R: Rng>(app: &mut App<R>, key: KeyEvent, now: Instant) -> InputResult {
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    match app.screen {
        Screen::Leaderboard => handle_leaderboard(app, key),
        Screen::Game => match app.overlay {
            GameOverlay::NamePrompt(_) => handle_name_prompt(app, key),
            GameOverlay::Submitting { .. } => InputResult::Continue,
            GameOverlay::Submitted { .. } => handle_submitted(app, key, now),
            GameOverlay::SubmitFailed { .. } => handle_submit_failed(app, key),
            GameOverlay::None => handle_game(app, key, now),
        },
    }
}

fn handle_name_prompt<R: Rng>(app: &mut App<R>, key: KeyEvent) -> InputResult {
    let GameOverlay::NamePrompt(prompt) = &mut app.overlay else {
        return InputResult::Continue;
    };
    match key.code {
        KeyCode::Enter => {
            if let Some(name) = prompt.accepted_name() {
                app.submit_score(name);
            }
        }
        KeyCode::Esc => app.dismiss_overlay(),
        KeyCode::Backspace => prompt.handle_backspace(),
        KeyCode::Left => prompt.move_cursor_left(),
        KeyCode::Right => prompt.move_cursor_right(),
        KeyCode::Char(c) => prompt.handle_char_input(c),
        _ => {}
    }
    InputResult::Continue
}

fn handle_submitted<R: Rng>(app: &mut App<R>, key: KeyEvent, now: Instant) -> InputResult {
    match key.code {
        KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Enter | KeyCode::Tab => {
            app.show_leaderboard(now);
        }
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') => app.reset_run(),
        KeyCode::Esc => app.dismiss_overlay(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return InputResult::Quit,
        _ => {}
    }
    InputResult::Continue
}

fn handle_submit_failed<R: Rng>(app: &mut App<R>, key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => app.open_name_prompt(),
        KeyCode::Esc => app.dismiss_overlay(),
        _ => {}
    }
    InputResult::Continue
}

fn handle_game<R: Rng>(app: &mut App<R>, key: KeyEvent, now: Instant) -> InputResult {
    let input = map_game_key(key.code);
    if input != GameInput::CheatKey {
        app.cheat.clear();
    }

    match input {
        GameInput::Steer(direction) => {
            if app.engine.state() == GameState::Playing {
                app.engine.queue_direction(direction);
            }
        }
        GameInput::TogglePlay => app.toggle_play(now),
        GameInput::CheatKey => app.register_cheat_key(),
        GameInput::Submit => app.open_name_prompt(),
        GameInput::Reset => {
            if app.engine.state() != GameState::Ready {
                app.reset_run();
            }
        }
        GameInput::ShowLeaderboard => app.show_leaderboard(now),
        GameInput::Quit => return InputResult::Quit,
        GameInput::Other => {}
    }
    InputResult::Continue
}

fn handle_leaderboard<R: Rng>(app: &mut App<R>, key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => app.refresh_leaderboard(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_leaderboard(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_leaderboard(1),
        KeyCode::Esc | KeyCode::Tab | KeyCode::Char('l') | KeyCode::Char('L') => app.show_game(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return InputResult::Quit,
        _ => {}
    }
    InputResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EngineConfig, GameEngine};
    use crate::leaderboard::LeaderboardClient;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App<ChaCha8Rng> {
        let engine = GameEngine::new(EngineConfig::default(), ChaCha8Rng::seed_from_u64(7));
        App::new(engine, LeaderboardClient::new("http://127.0.0.1:9"), None, 100, 5)
    }

    #[test]
    fn test_wasd_and_arrows_map_to_steering() {
        assert_eq!(map_game_key(KeyCode::Char('w')), GameInput::Steer(Direction::Up));
        assert_eq!(map_game_key(KeyCode::Char('A')), GameInput::Steer(Direction::Left));
        assert_eq!(map_game_key(KeyCode::Down), GameInput::Steer(Direction::Down));
        assert_eq!(map_game_key(KeyCode::Right), GameInput::Steer(Direction::Right));
        assert_eq!(map_game_key(KeyCode::Char('x')), GameInput::Other);
    }

    #[test]
    fn test_space_starts_and_pauses() {
        let mut app = test_app();
        let now = Instant::now();
        handle_key(&mut app, press(KeyCode::Char(' ')), now);
        assert_eq!(app.engine.state(), GameState::Playing);
        handle_key(&mut app, press(KeyCode::Char(' ')), now);
        assert_eq!(app.engine.state(), GameState::Paused);
    }

    #[test]
    fn test_steering_ignored_unless_playing() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('w')), Instant::now());
        assert!(app.engine.pending().is_empty());
    }

    #[test]
    fn test_cheat_code_while_paused() {
        let mut app = test_app();
        let now = Instant::now();
        handle_key(&mut app, press(KeyCode::Char(' ')), now);
        handle_key(&mut app, press(KeyCode::Char(' ')), now);
        assert_eq!(app.engine.state(), GameState::Paused);

        for _ in 0..5 {
            handle_key(&mut app, press(KeyCode::Char('o')), now);
        }
        assert!(app.engine.special_mode());
    }

    #[test]
    fn test_other_key_breaks_cheat_sequence() {
        let mut app = test_app();
        let now = Instant::now();
        handle_key(&mut app, press(KeyCode::Char(' ')), now);
        handle_key(&mut app, press(KeyCode::Char(' ')), now);

        for _ in 0..4 {
            handle_key(&mut app, press(KeyCode::Char('o')), now);
        }
        handle_key(&mut app, press(KeyCode::Char('x')), now);
        handle_key(&mut app, press(KeyCode::Char('o')), now);
        assert!(!app.engine.special_mode());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        let now = Instant::now();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q')), now), InputResult::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, ctrl_c, now), InputResult::Quit);
    }

    #[test]
    fn test_leaderboard_back_to_game() {
        let mut app = test_app();
        let now = Instant::now();
        handle_key(&mut app, press(KeyCode::Char('l')), now);
        assert_eq!(app.screen, Screen::Leaderboard);
        handle_key(&mut app, press(KeyCode::Esc), now);
        assert_eq!(app.screen, Screen::Game);
    }
}
