use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::Backend;
use ratatui::{backend::CrosstermBackend, Terminal};
use snake_arcade::app::App;
use snake_arcade::build_info;
use snake_arcade::cli::{parse_args, Command, USAGE};
use snake_arcade::core::constants::{
    DEFAULT_LEADERBOARD_LIMIT, INPUT_POLL_MS, SPECIAL_MODE_KEY_PRESSES,
};
use snake_arcade::game::GameEngine;
use snake_arcade::input::{handle_key, InputResult};
use snake_arcade::leaderboard::LeaderboardClient;
use snake_arcade::settings::{CliOverrides, Settings};
use snake_arcade::ui;
use snake_arcade::utils::{logging, persistence};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'snake-arcade --help' for usage.");
            std::process::exit(2);
        }
    };

    match cli.command {
        Command::Version => {
            println!("{}", build_info::version_line());
            Ok(())
        }
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        Command::Leaderboard { limit } => {
            logging::init_stderr_logging();
            let (settings, _) = load_settings(&cli.overrides);
            std::process::exit(print_leaderboard(&settings.server_url, limit));
        }
        Command::Health => {
            logging::init_stderr_logging();
            let (settings, _) = load_settings(&cli.overrides);
            std::process::exit(print_health(&settings.server_url));
        }
        Command::Play { seed } => {
            match persistence::data_dir().and_then(|dir| logging::init_file_logging(&dir)) {
                Ok(path) => tracing::debug!(path = %path.display(), "log file ready"),
                Err(e) => eprintln!("Warning: logging disabled: {}", e),
            }
            let (settings, settings_path) = load_settings(&cli.overrides);
            run_game(settings, settings_path, seed)
        }
    }
}

/// Settings with environment and CLI overrides applied, plus where they live.
fn load_settings(overrides: &CliOverrides) -> (Settings, Option<PathBuf>) {
    let path = match Settings::default_path() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(error = %e, "no config directory, using default settings");
            None
        }
    };
    let mut settings = path
        .as_deref()
        .map(Settings::load_from)
        .unwrap_or_default();
    settings.apply_overrides(Settings::env_server_url(), overrides);
    (settings, path)
}

fn print_leaderboard(server_url: &str, limit: usize) -> i32 {
    let result = LeaderboardClient::new(server_url).and_then(|c| c.fetch_leaderboard(limit));
    match result {
        Ok(entries) if entries.is_empty() => {
            println!("No scores yet.");
            0
        }
        Ok(entries) => {
            println!("{:>4}  {:<24}  {:>7}  {}", "Rank", "Player", "Score", "Date");
            for (i, entry) in entries.iter().enumerate() {
                println!(
                    "{:>4}  {:<24}  {:>7}  {}",
                    i + 1,
                    entry.player_name,
                    entry.score,
                    entry
                        .timestamp
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                );
            }
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

fn print_health(server_url: &str) -> i32 {
    match LeaderboardClient::new(server_url).and_then(|c| c.check_health()) {
        Ok(true) => {
            println!("{} is healthy", server_url);
            0
        }
        Ok(false) => {
            println!("{} responded but is not healthy", server_url);
            1
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

fn run_game(mut settings: Settings, settings_path: Option<PathBuf>, seed: Option<u64>) -> io::Result<()> {
    let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let engine = GameEngine::new(settings.engine.clone(), rng);
    let client = LeaderboardClient::new(&settings.server_url);
    if let Err(e) = &client {
        tracing::warn!(error = %e, url = %settings.server_url, "leaderboard unavailable");
    }
    let mut app = App::new(
        engine,
        client,
        settings.last_player_name.clone(),
        DEFAULT_LEADERBOARD_LIMIT,
        SPECIAL_MODE_KEY_PRESSES,
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app, &mut settings, settings_path.as_deref());

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    settings: &mut Settings,
    settings_path: Option<&std::path::Path>,
) -> io::Result<()> {
    let input_poll = Duration::from_millis(INPUT_POLL_MS);

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Wake for whichever comes first: the next tick or an input check.
        let timeout = app
            .scheduler
            .time_until_due(Instant::now())
            .map_or(input_poll, |due| due.min(input_poll));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(app, key, Instant::now()) == InputResult::Quit {
                    tracing::info!(score = app.engine.score(), "quit");
                    return Ok(());
                }
            }
        }

        app.update(Instant::now());

        if let Some(name) = app.take_name_to_save() {
            settings.last_player_name = Some(name);
            if let Some(path) = settings_path {
                if let Err(e) = settings.save_to(path) {
                    tracing::warn!(error = %e, "could not save settings");
                }
            }
        }
    }
}
