//! Classified leaderboard failures with user-facing messages.

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// Rejected before any request was made (e.g. empty player name).
    InvalidInput(String),
    InvalidUrl(String),
    /// Host unreachable or refusing connections.
    CannotConnect { base_url: String },
    Timeout,
    Network(String),
    /// Non-2xx response.
    Server { status: u16 },
    /// Response body did not match the expected shape.
    Decode(String),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(reason) => write!(f, "{}", reason),
            Self::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            Self::CannotConnect { base_url } => write!(
                f,
                "Cannot connect to server. Make sure the API is running at {}",
                base_url
            ),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Network(detail) => write!(f, "Network error: {}", detail),
            Self::Server { status } => write!(f, "Server error (status code: {})", status),
            Self::Decode(detail) => write!(f, "Failed to decode response: {}", detail),
        }
    }
}

impl Error for LeaderboardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            LeaderboardError::Server { status: 503 }.to_string(),
            "Server error (status code: 503)"
        );
        assert_eq!(LeaderboardError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            LeaderboardError::CannotConnect {
                base_url: "http://localhost:8000".to_string()
            }
            .to_string(),
            "Cannot connect to server. Make sure the API is running at http://localhost:8000"
        );
        assert_eq!(
            LeaderboardError::InvalidInput("Name cannot be empty".to_string()).to_string(),
            "Name cannot be empty"
        );
    }
}
