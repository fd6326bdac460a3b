//! Application state: wires the engine, its tick clock, the name prompt,
//! background leaderboard jobs and the current screen together.
//!
//! Nothing here touches the terminal, so the whole flow can be driven from
//! tests by feeding keys and instants.

use crate::core::scheduler::TickScheduler;
use crate::game::{GameEngine, GameState, TickOutcome};
use crate::leaderboard::{
    spawn_fetch, spawn_submit, FetchResult, LeaderboardClient, LeaderboardEntry, LeaderboardError,
    SubmitResult,
};
use crate::ui::name_prompt::NamePrompt;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Game,
    Leaderboard,
}

/// Modal state layered over the game screen. At most one is active at a time.
#[derive(Debug)]
pub enum GameOverlay {
    None,
    NamePrompt(NamePrompt),
    Submitting { player_name: String },
    Submitted { entry: LeaderboardEntry },
    SubmitFailed { message: String, player_name: String },
}

/// Leaderboard screen contents.
#[derive(Debug, Default)]
pub struct LeaderboardView {
    pub entries: Vec<LeaderboardEntry>,
    pub loading: bool,
    pub error: Option<String>,
    pub loaded_once: bool,
    pub scroll: usize,
}

/// Counts consecutive cheat-key presses while paused.
#[derive(Debug, Default)]
pub struct CheatCodeTracker {
    presses: u32,
    required: u32,
}

impl CheatCodeTracker {
    pub fn new(required: u32) -> Self {
        Self {
            presses: 0,
            required,
        }
    }

    /// Register one cheat-key press. Returns true when the code completes.
    /// Presses outside the pause screen restart the count.
    pub fn register(&mut self, paused: bool) -> bool {
        if !paused {
            self.presses = 0;
            return false;
        }
        self.presses += 1;
        if self.presses >= self.required {
            self.presses = 0;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.presses = 0;
    }

    pub fn presses(&self) -> u32 {
        self.presses
    }
}

pub struct App<R: Rng = StdRng> {
    pub engine: GameEngine<R>,
    pub scheduler: TickScheduler,
    pub screen: Screen,
    pub overlay: GameOverlay,
    pub leaderboard: LeaderboardView,
    pub cheat: CheatCodeTracker,
    /// Set once this run's score reached the leaderboard.
    pub score_submitted: bool,
    pub last_player_name: Option<String>,
    pub leaderboard_limit: usize,
    client: Result<LeaderboardClient, LeaderboardError>,
    submit_rx: Option<Receiver<SubmitResult>>,
    fetch_rx: Option<Receiver<FetchResult>>,
    name_to_save: Option<String>,
}

impl<R: Rng> App<R> {
    pub fn new(
        engine: GameEngine<R>,
        client: Result<LeaderboardClient, LeaderboardError>,
        last_player_name: Option<String>,
        leaderboard_limit: usize,
        cheat_presses: u32,
    ) -> Self {
        let scheduler = TickScheduler::new(engine.tick_interval());
        Self {
            engine,
            scheduler,
            screen: Screen::Game,
            overlay: GameOverlay::None,
            leaderboard: LeaderboardView::default(),
            cheat: CheatCodeTracker::new(cheat_presses),
            score_submitted: false,
            last_player_name,
            leaderboard_limit,
            client,
            submit_rx: None,
            fetch_rx: None,
            name_to_save: None,
        }
    }

    // ── Run control ──────────────────────────────────────────────

    /// Space bar: start, pause or resume depending on the engine state.
    pub fn toggle_play(&mut self, now: Instant) {
        match self.engine.state() {
            GameState::Ready => {
                if self.engine.start() {
                    self.start_clock(now);
                    tracing::info!(variant = self.engine.config().variant.name(), "run started");
                }
            }
            GameState::Playing => {
                if self.engine.pause() {
                    self.scheduler.stop();
                }
            }
            GameState::Paused => {
                if self.engine.resume() {
                    self.start_clock(now);
                }
            }
            GameState::GameOver => {}
        }
    }

    /// Start a fresh run (back to Ready). Clears this run's submission state.
    pub fn reset_run(&mut self) {
        self.engine.reset();
        self.scheduler.stop();
        self.score_submitted = false;
        self.cheat.clear();
        self.overlay = GameOverlay::None;
    }

    /// Toggle unrestricted mode after the cheat code completes.
    pub fn register_cheat_key(&mut self) {
        let paused = self.engine.state() == GameState::Paused;
        if self.cheat.register(paused) {
            self.engine.toggle_special_mode();
            tracing::info!(enabled = self.engine.special_mode(), "unrestricted mode toggled");
        }
    }

    /// Advance the clock and collect finished background jobs.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        let outcome = self.scheduler.poll(now).then(|| self.on_tick(now));
        self.poll_background();
        outcome
    }

    /// One engine tick plus the scheduler bookkeeping it implies.
    pub fn on_tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.engine.tick();
        match outcome {
            TickOutcome::Grew {
                interval_changed: true,
            } => {
                self.scheduler.reschedule(self.engine.tick_interval(), now);
            }
            TickOutcome::GameOver(cause) => {
                self.scheduler.stop();
                tracing::info!(?cause, score = self.engine.score(), "run ended");
            }
            _ => {}
        }
        outcome
    }

    fn start_clock(&mut self, now: Instant) {
        self.scheduler.reschedule(self.engine.tick_interval(), now);
        self.scheduler.start(now);
    }

    // ── Score submission ─────────────────────────────────────────

    /// Submission is offered once per finished run with a non-zero score.
    pub fn can_submit(&self) -> bool {
        self.engine.state() == GameState::GameOver
            && self.engine.score() > 0
            && !self.score_submitted
            && self.submit_rx.is_none()
    }

    pub fn open_name_prompt(&mut self) {
        if !self.can_submit() {
            return;
        }
        let prefill = match &self.overlay {
            GameOverlay::SubmitFailed { player_name, .. } => Some(player_name.clone()),
            _ => self.last_player_name.clone(),
        };
        self.overlay = GameOverlay::NamePrompt(NamePrompt::with_name(prefill.as_deref().unwrap_or("")));
    }

    /// Send the current score in the background under `player_name`.
    pub fn submit_score(&mut self, player_name: String) {
        if !self.can_submit() {
            return;
        }
        match &self.client {
            Ok(client) => {
                let score = self.engine.score();
                self.submit_rx = Some(spawn_submit(client.clone(), player_name.clone(), score));
                self.overlay = GameOverlay::Submitting { player_name };
            }
            Err(e) => {
                self.overlay = GameOverlay::SubmitFailed {
                    message: e.to_string(),
                    player_name,
                };
            }
        }
    }

    pub fn dismiss_overlay(&mut self) {
        if !matches!(self.overlay, GameOverlay::Submitting { .. }) {
            self.overlay = GameOverlay::None;
        }
    }

    /// Player name from the latest successful submission, to persist once.
    pub fn take_name_to_save(&mut self) -> Option<String> {
        self.name_to_save.take()
    }

    // ── Leaderboard ──────────────────────────────────────────────

    /// Switch to the leaderboard, pausing a live run first.
    pub fn show_leaderboard(&mut self, now: Instant) {
        if self.engine.state() == GameState::Playing {
            self.toggle_play(now);
        }
        self.overlay = match std::mem::replace(&mut self.overlay, GameOverlay::None) {
            GameOverlay::Submitting { player_name } => GameOverlay::Submitting { player_name },
            _ => GameOverlay::None,
        };
        self.screen = Screen::Leaderboard;
        if !self.leaderboard.loaded_once {
            self.refresh_leaderboard();
        }
    }

    pub fn show_game(&mut self) {
        self.screen = Screen::Game;
    }

    pub fn refresh_leaderboard(&mut self) {
        if self.fetch_rx.is_some() {
            return;
        }
        match &self.client {
            Ok(client) => {
                self.fetch_rx = Some(spawn_fetch(client.clone(), self.leaderboard_limit));
                self.leaderboard.loading = true;
                self.leaderboard.error = None;
            }
            Err(e) => {
                self.leaderboard.error = Some(e.to_string());
                self.leaderboard.loaded_once = true;
            }
        }
    }

    pub fn scroll_leaderboard(&mut self, delta: isize) {
        let max = self.leaderboard.entries.len().saturating_sub(1);
        let next = self.leaderboard.scroll as isize + delta;
        self.leaderboard.scroll = next.clamp(0, max as isize) as usize;
    }

    pub fn server_url(&self) -> Option<&str> {
        self.client.as_ref().ok().map(|c| c.base_url())
    }

    pub fn is_busy(&self) -> bool {
        self.submit_rx.is_some() || self.fetch_rx.is_some()
    }

    // ── Background jobs ──────────────────────────────────────────

    pub fn poll_background(&mut self) {
        if let Some(rx) = &self.submit_rx {
            let received = match rx.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(Err(LeaderboardError::Network(
                    "submission was interrupted".to_string(),
                ))),
            };
            if let Some(result) = received {
                self.submit_rx = None;
                self.finish_submit(result);
            }
        }

        if let Some(rx) = &self.fetch_rx {
            let received = match rx.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(Err(LeaderboardError::Network(
                    "request was interrupted".to_string(),
                ))),
            };
            if let Some(result) = received {
                self.fetch_rx = None;
                self.finish_fetch(result);
            }
        }
    }

    fn finish_submit(&mut self, result: SubmitResult) {
        let player_name = match std::mem::replace(&mut self.overlay, GameOverlay::None) {
            GameOverlay::Submitting { player_name } => player_name,
            _ => String::new(),
        };
        match result {
            Ok(entry) => {
                self.score_submitted = true;
                self.last_player_name = Some(entry.player_name.clone());
                self.name_to_save = Some(entry.player_name.clone());
                // A fresh fetch will include the new entry.
                self.leaderboard.loaded_once = false;
                self.overlay = GameOverlay::Submitted { entry };
            }
            Err(e) => {
                self.overlay = GameOverlay::SubmitFailed {
                    message: e.to_string(),
                    player_name,
                };
            }
        }
    }

    fn finish_fetch(&mut self, result: FetchResult) {
        self.leaderboard.loading = false;
        self.leaderboard.loaded_once = true;
        match result {
            Ok(entries) => {
                self.leaderboard.entries = entries;
                self.leaderboard.error = None;
                self.leaderboard.scroll = 0;
            }
            Err(e) => {
                self.leaderboard.error = Some(e.to_string());
            }
        }
    }
}
