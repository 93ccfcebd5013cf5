use std::collections::BTreeMap;

use anyhow::Result;
use tracing::debug;

use cinetrack_api::{CatalogClient, WatchlistClient};
use cinetrack_models::{WatchStatus, WatchlistEntry, WatchlistMovie};

/// Watchlist state mirrored client-side. The membership map is rebuilt on
/// refresh and then updated incrementally from confirmed add/remove/update
/// responses, never optimistically: a failed call leaves it untouched.
pub struct WatchlistController {
    watchlist: WatchlistClient,
    catalog: CatalogClient,
    membership: BTreeMap<u64, WatchStatus>,
}

impl WatchlistController {
    pub fn new(watchlist: WatchlistClient, catalog: CatalogClient) -> Self {
        Self {
            watchlist,
            catalog,
            membership: BTreeMap::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.watchlist.is_authenticated()
    }

    pub fn contains(&self, movie_id: u64) -> bool {
        self.membership.contains_key(&movie_id)
    }

    pub fn status_of(&self, movie_id: u64) -> Option<WatchStatus> {
        self.membership.get(&movie_id).copied()
    }

    /// Fetch the joined watchlist and rebuild the membership map from it.
    pub async fn refresh(&mut self) -> Result<Vec<WatchlistMovie>> {
        let joined = self.watchlist.list_with_movies(&self.catalog).await?;
        self.membership = joined
            .iter()
            .map(|w| (w.entry.movie_id, w.entry.status))
            .collect();
        Ok(joined)
    }

    /// Rebuild the membership map without fetching movie details.
    pub async fn refresh_membership(&mut self) -> Result<()> {
        let entries = self.watchlist.list().await?;
        self.membership = entries.iter().map(|e| (e.movie_id, e.status)).collect();
        debug!(entries = self.membership.len(), "membership refreshed");
        Ok(())
    }

    pub async fn add(&mut self, movie_id: u64, status: WatchStatus) -> Result<WatchlistEntry> {
        let entry = self.watchlist.add(movie_id, status).await?;
        self.membership.insert(entry.movie_id, entry.status);
        Ok(entry)
    }

    pub async fn remove(&mut self, movie_id: u64) -> Result<()> {
        self.watchlist.remove(movie_id).await?;
        self.membership.remove(&movie_id);
        Ok(())
    }

    pub async fn set_status(&mut self, movie_id: u64, status: WatchStatus) -> Result<WatchlistEntry> {
        let entry = self.watchlist.update_status(movie_id, status).await?;
        self.membership.insert(entry.movie_id, entry.status);
        Ok(entry)
    }

    /// Add when absent, remove when present. Returns whether the movie is
    /// a member afterwards.
    pub async fn toggle(&mut self, movie_id: u64) -> Result<bool> {
        if self.contains(movie_id) {
            self.remove(movie_id).await?;
            Ok(false)
        } else {
            self.add(movie_id, WatchStatus::Pending).await?;
            Ok(true)
        }
    }
}
