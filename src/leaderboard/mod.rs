//! Leaderboard service client and background jobs.

pub mod client;
pub mod error;
pub mod types;

pub use client::LeaderboardClient;
pub use error::LeaderboardError;
pub use types::{parse_timestamp, validate_player_name, LeaderboardEntry};

use std::sync::mpsc::{self, Receiver};
use std::thread;

pub type SubmitResult = Result<LeaderboardEntry, LeaderboardError>;
pub type FetchResult = Result<Vec<LeaderboardEntry>, LeaderboardError>;

/// Submit a score on a background thread. The result arrives on the returned
/// channel; the caller polls it with `try_recv` from its main loop.
pub fn spawn_submit(client: LeaderboardClient, player_name: String, score: u32) -> Receiver<SubmitResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = client.submit_score(&player_name, score);
        match &result {
            Ok(entry) => tracing::info!(id = entry.id, score, "score submitted"),
            Err(e) => tracing::warn!(error = %e, score, "score submission failed"),
        }
        // Receiver gone means the app quit; nothing left to report to.
        let _ = tx.send(result);
    });
    rx
}

/// Fetch the leaderboard on a background thread.
pub fn spawn_fetch(client: LeaderboardClient, limit: usize) -> Receiver<FetchResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = client.fetch_leaderboard(limit);
        match &result {
            Ok(entries) => tracing::info!(count = entries.len(), "leaderboard fetched"),
            Err(e) => tracing::warn!(error = %e, "leaderboard fetch failed"),
        }
        let _ = tx.send(result);
    });
    rx
}
