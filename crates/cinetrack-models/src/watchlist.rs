use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::movie::Movie;
use crate::status::WatchStatus;

/// A server-side watchlist row. The entry id is assigned on add and stays
/// stable across status updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub id: u64,
    pub user_id: u64,
    pub movie_id: u64,
    pub status: WatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A watchlist entry joined with the full catalog record for its movie.
/// The API has no batch endpoint, so the join is assembled client-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistMovie {
    pub entry: WatchlistEntry,
    pub movie: Movie,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_server_entry() {
        let json = r#"{
            "id": 7,
            "user_id": 3,
            "movie_id": 603,
            "status": "pending",
            "created_at": "2026-01-15T10:00:00Z",
            "updated_at": "2026-01-15T10:00:00Z"
        }"#;
        let entry: WatchlistEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.movie_id, 603);
        assert_eq!(entry.status, WatchStatus::Pending);
    }
}
