use anyhow::Result;

use cinetrack_api::{CatalogClient, WatchlistClient};
use cinetrack_models::{Movie, WatchlistEntry};

/// Full detail for one movie plus the viewer's watchlist entry for it, if
/// any. The entry is found by scanning the full list; there is no
/// per-movie lookup endpoint.
#[derive(Debug, Clone)]
pub struct MovieDetail {
    pub movie: Movie,
    pub entry: Option<WatchlistEntry>,
}

/// Fetch detail and, when a watchlist client is supplied (authenticated
/// viewer), the matching entry. Anonymous viewers get `entry: None`.
pub async fn fetch_detail(
    catalog: &CatalogClient,
    watchlist: Option<&WatchlistClient>,
    movie_id: u64,
) -> Result<MovieDetail> {
    let movie = catalog.details(movie_id).await?;
    let entry = match watchlist {
        Some(client) => client
            .list()
            .await?
            .into_iter()
            .find(|e| e.movie_id == movie_id),
        None => None,
    };
    Ok(MovieDetail { movie, entry })
}
