//! Blocking HTTP client for the leaderboard service.
//!
//! Calls block for up to the request timeout, so the game runs them on a
//! background thread (see [`super::spawn_submit`] and [`super::spawn_fetch`]).

use super::error::LeaderboardError;
use super::types::{validate_player_name, LeaderboardCreate, LeaderboardEntry, LeaderboardResponse};
use crate::core::constants::HTTP_TIMEOUT_SECONDS;
use std::error::Error as _;
use std::io;
use std::time::Duration;

#[derive(Clone)]
pub struct LeaderboardClient {
    base_url: String,
    agent: ureq::Agent,
}

impl LeaderboardClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str) -> Result<Self, LeaderboardError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let has_host = ["http://", "https://"]
            .iter()
            .any(|scheme| base_url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
        if !has_host {
            return Err(LeaderboardError::InvalidUrl(base_url.to_string()));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECONDS))
            .user_agent(concat!("snake-arcade/", env!("CARGO_PKG_VERSION")))
            .build();

        Ok(Self {
            base_url: base_url.to_string(),
            agent,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a final score. The name is trimmed and must not be empty.
    pub fn submit_score(
        &self,
        player_name: &str,
        score: u32,
    ) -> Result<LeaderboardEntry, LeaderboardError> {
        let player_name = validate_player_name(player_name).map_err(LeaderboardError::InvalidInput)?;
        let url = format!("{}/leaderboard", self.base_url);

        let response = self
            .agent
            .post(&url)
            .send_json(LeaderboardCreate {
                player_name: &player_name,
                score,
            })
            .map_err(|e| self.classify(e))?;

        response.into_json().map_err(classify_body_error)
    }

    /// Fetch the top `limit` entries, best first.
    pub fn fetch_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let url = format!("{}/leaderboard", self.base_url);

        let response = self
            .agent
            .get(&url)
            .query("limit", &limit.to_string())
            .call()
            .map_err(|e| self.classify(e))?;

        let body: LeaderboardResponse = response.into_json().map_err(classify_body_error)?;
        Ok(body.entries)
    }

    /// True when `/health` answers with a 2xx status.
    pub fn check_health(&self) -> Result<bool, LeaderboardError> {
        let url = format!("{}/health", self.base_url);

        match self.agent.get(&url).call() {
            Ok(_) => Ok(true),
            Err(ureq::Error::Status(status, _)) => {
                tracing::debug!(status, "health check returned non-success status");
                Ok(false)
            }
            Err(e) => Err(self.classify(e)),
        }
    }

    fn classify(&self, err: ureq::Error) -> LeaderboardError {
        let transport = match err {
            ureq::Error::Status(status, _) => return LeaderboardError::Server { status },
            ureq::Error::Transport(transport) => transport,
        };

        let timed_out = transport
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>())
            .is_some_and(|io_err| is_timeout(io_err.kind()))
            || transport.to_string().contains("timed out");
        if timed_out {
            return LeaderboardError::Timeout;
        }

        match transport.kind() {
            ureq::ErrorKind::InvalidUrl | ureq::ErrorKind::UnknownScheme => {
                LeaderboardError::InvalidUrl(self.base_url.clone())
            }
            ureq::ErrorKind::Dns | ureq::ErrorKind::ConnectionFailed => {
                LeaderboardError::CannotConnect {
                    base_url: self.base_url.clone(),
                }
            }
            _ => LeaderboardError::Network(transport.to_string()),
        }
    }
}

fn is_timeout(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

/// `into_json` reports both malformed JSON and broken reads as `io::Error`.
fn classify_body_error(err: io::Error) -> LeaderboardError {
    match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
            LeaderboardError::Decode(err.to_string())
        }
        kind if is_timeout(kind) => LeaderboardError::Timeout,
        _ => LeaderboardError::Network(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_base_urls() {
        for bad in ["", "localhost:8000", "ftp://example.com", "http://"] {
            assert!(
                matches!(
                    LeaderboardClient::new(bad),
                    Err(LeaderboardError::InvalidUrl(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = LeaderboardClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_empty_name_rejected_before_request() {
        // Port 9 on a reserved address; the request must never be attempted.
        let client = LeaderboardClient::new("http://192.0.2.1:9").unwrap();
        let err = client.submit_score("   ", 10).unwrap_err();
        assert_eq!(
            err,
            LeaderboardError::InvalidInput("Name cannot be empty".to_string())
        );
    }

    #[test]
    fn test_body_error_classification() {
        let decode = classify_body_error(io::Error::new(io::ErrorKind::InvalidData, "bad json"));
        assert!(matches!(decode, LeaderboardError::Decode(_)));

        let timeout = classify_body_error(io::Error::new(io::ErrorKind::TimedOut, "slow"));
        assert_eq!(timeout, LeaderboardError::Timeout);

        let other = classify_body_error(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert!(matches!(other, LeaderboardError::Network(_)));
    }
}
