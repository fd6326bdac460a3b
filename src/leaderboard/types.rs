//! Leaderboard wire models.

use crate::core::constants::MAX_PLAYER_NAME_LEN;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A stored leaderboard record as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub player_name: String,
    pub score: u32,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// `GET /leaderboard` body.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

/// `POST /leaderboard` body.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardCreate<'a> {
    pub player_name: &'a str,
    pub score: u32,
}

/// Parse a service timestamp.
///
/// Tries RFC 3339 (with or without fractional seconds), then the naive
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` form some backends emit, read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "Date string '{}' does not match expected format",
            raw
        ))
    })
}

/// Trim and check a player name before submission.
pub fn validate_player_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_PLAYER_NAME_LEN {
        return Err(format!(
            "Name must be {} characters or less",
            MAX_PLAYER_NAME_LEN
        ));
    }

    if trimmed.chars().any(char::is_control) {
        return Err("Name cannot contain control characters".to_string());
    }

    Ok(trimmed.to_string())
}
