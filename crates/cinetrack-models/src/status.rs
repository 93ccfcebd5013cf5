use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Progress status of a saved movie, as stored by the watchlist API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    /// Saved but not started; the default on add.
    Pending,
    Watching,
    Watched,
    Dropped,
}

impl WatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Pending => "pending",
            WatchStatus::Watching => "watching",
            WatchStatus::Watched => "watched",
            WatchStatus::Dropped => "dropped",
        }
    }
}

impl Default for WatchStatus {
    fn default() -> Self {
        WatchStatus::Pending
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown watch status: {0} (expected pending, watching, watched, or dropped)")]
pub struct ParseStatusError(String);

impl FromStr for WatchStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(WatchStatus::Pending),
            "watching" => Ok(WatchStatus::Watching),
            "watched" => Ok(WatchStatus::Watched),
            "dropped" => Ok(WatchStatus::Dropped),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
