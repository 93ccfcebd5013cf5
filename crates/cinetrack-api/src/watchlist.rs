use serde::Serialize;
use tracing::{debug, warn};

use cinetrack_models::{WatchStatus, WatchlistEntry, WatchlistMovie};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::movies::CatalogClient;

const FALLBACK: &str = "Watchlist request failed";

#[derive(Serialize)]
struct AddRequest {
    movie_id: u64,
    status: WatchStatus,
}

#[derive(Serialize)]
struct StatusRequest {
    status: WatchStatus,
}

/// Bearer-gated calls under `/watchlist`. Every method checks for a token
/// before touching the network; an absent token fails immediately with
/// `ApiError::NotAuthenticated`.
#[derive(Clone)]
pub struct WatchlistClient {
    api: ApiClient,
    token: Option<String>,
}

impl WatchlistClient {
    pub fn new(api: ApiClient, token: Option<String>) -> Self {
        Self { api, token }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn bearer(&self) -> Result<String, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotAuthenticated)?;
        Ok(format!("Bearer {token}"))
    }

    /// `GET /watchlist/` - the raw entries, no movie detail.
    pub async fn list(&self) -> Result<Vec<WatchlistEntry>, ApiError> {
        let bearer = self.bearer()?;
        let response = self
            .api
            .http()
            .get(self.api.url("/watchlist/"))
            .header("Authorization", bearer)
            .send()
            .await?;
        let response = ApiClient::check(response, FALLBACK).await?;
        Ok(response.json().await?)
    }

    /// Entries joined with full catalog detail, one `/movies/{id}` request
    /// per entry (the API has no batch endpoint). All-or-nothing: a single
    /// failed detail fetch fails the whole call.
    pub async fn list_with_movies(
        &self,
        catalog: &CatalogClient,
    ) -> Result<Vec<WatchlistMovie>, ApiError> {
        let entries = self.list().await?;
        let mut joined = Vec::with_capacity(entries.len());
        for entry in entries {
            let movie = catalog.details(entry.movie_id).await.map_err(|e| {
                warn!(movie_id = entry.movie_id, error = %e, "detail fetch failed during join");
                e
            })?;
            joined.push(WatchlistMovie { entry, movie });
        }
        Ok(joined)
    }

    /// `POST /watchlist/{movie_id}` - add/upsert with the given status.
    pub async fn add(
        &self,
        movie_id: u64,
        status: WatchStatus,
    ) -> Result<WatchlistEntry, ApiError> {
        let bearer = self.bearer()?;
        debug!(movie_id, %status, "adding to watchlist");
        let response = self
            .api
            .http()
            .post(self.api.url(&format!("/watchlist/{movie_id}")))
            .header("Authorization", bearer)
            .json(&AddRequest { movie_id, status })
            .send()
            .await?;
        let response = ApiClient::check(response, FALLBACK).await?;
        Ok(response.json().await?)
    }

    /// `DELETE /watchlist/{movie_id}`.
    pub async fn remove(&self, movie_id: u64) -> Result<(), ApiError> {
        let bearer = self.bearer()?;
        debug!(movie_id, "removing from watchlist");
        let response = self
            .api
            .http()
            .delete(self.api.url(&format!("/watchlist/{movie_id}")))
            .header("Authorization", bearer)
            .send()
            .await?;
        ApiClient::check(response, FALLBACK).await?;
        Ok(())
    }

    /// `PATCH /watchlist/{movie_id}` with the new status. The entry id is
    /// unchanged by a status update.
    pub async fn update_status(
        &self,
        movie_id: u64,
        status: WatchStatus,
    ) -> Result<WatchlistEntry, ApiError> {
        let bearer = self.bearer()?;
        debug!(movie_id, %status, "updating watchlist status");
        let response = self
            .api
            .http()
            .patch(self.api.url(&format!("/watchlist/{movie_id}")))
            .header("Authorization", bearer)
            .json(&StatusRequest { status })
            .send()
            .await?;
        let response = ApiClient::check(response, FALLBACK).await?;
        Ok(response.json().await?)
    }

    /// Membership test by scanning the full list. There is no dedicated
    /// endpoint; O(watchlist size) per check, fine while watchlists are
    /// small. Controllers keep an incremental set instead of calling this
    /// in a loop.
    pub async fn contains(&self, movie_id: u64) -> Result<bool, ApiError> {
        let entries = self.list().await?;
        Ok(entries.iter().any(|e| e.movie_id == movie_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn client(base_url: &str, token: Option<&str>) -> WatchlistClient {
        WatchlistClient::new(
            ApiClient::new(base_url, Duration::from_secs(5)).unwrap(),
            token.map(str::to_string),
        )
    }

    fn entry_body(id: u64, movie_id: u64, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "user_id": 3,
            "movie_id": movie_id,
            "status": status,
            "created_at": "2026-01-15T10:00:00Z",
            "updated_at": "2026-01-15T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn list_sends_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/watchlist/")
                .header("authorization", "Bearer tok-123");
            then.status(200)
                .json_body(serde_json::json!([entry_body(7, 603, "pending")]));
        });

        let entries = client(&server.base_url(), Some("tok-123"))
            .list()
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].movie_id, 603);
        mock.assert();
    }

    #[tokio::test]
    async fn add_posts_movie_id_and_status() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/watchlist/603")
                .header("authorization", "Bearer tok-123")
                .json_body(serde_json::json!({"movie_id": 603, "status": "pending"}));
            then.status(201).json_body(entry_body(7, 603, "pending"));
        });

        let entry = client(&server.base_url(), Some("tok-123"))
            .add(603, WatchStatus::Pending)
            .await
            .unwrap();
        assert_eq!(entry.status, WatchStatus::Pending);
        mock.assert();
    }

    #[tokio::test]
    async fn update_status_keeps_entry_id() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(httpmock::Method::PATCH)
                .path("/watchlist/603")
                .json_body(serde_json::json!({"status": "watching"}));
            then.status(200).json_body(entry_body(7, 603, "watching"));
        });

        let entry = client(&server.base_url(), Some("tok-123"))
            .update_status(603, WatchStatus::Watching)
            .await
            .unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.status, WatchStatus::Watching);
    }

    #[tokio::test]
    async fn unauthenticated_calls_issue_no_requests() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.path_contains("/watchlist");
            then.status(200);
        });

        let unauthenticated = client(&server.base_url(), None);
        assert!(matches!(
            unauthenticated.add(603, WatchStatus::Pending).await,
            Err(ApiError::NotAuthenticated)
        ));
        assert!(matches!(
            unauthenticated.remove(603).await,
            Err(ApiError::NotAuthenticated)
        ));
        assert!(matches!(
            unauthenticated.update_status(603, WatchStatus::Watched).await,
            Err(ApiError::NotAuthenticated)
        ));
        assert!(matches!(
            unauthenticated.list().await,
            Err(ApiError::NotAuthenticated)
        ));
        assert_eq!(mock.hits(), 0);
    }

    #[tokio::test]
    async fn join_fails_when_any_detail_fetch_fails() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/watchlist/");
            then.status(200).json_body(serde_json::json!([
                entry_body(7, 603, "pending"),
                entry_body(8, 999, "watching")
            ]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/movies/603");
            then.status(200).json_body(serde_json::json!({
                "id": 603, "title": "The Matrix",
                "release_date": "1999-03-30", "vote_average": 8.2
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/movies/999");
            then.status(404)
                .json_body(serde_json::json!({"detail": "Movie not found"}));
        });

        let watchlist = client(&server.base_url(), Some("tok-123"));
        let catalog = CatalogClient::new(
            ApiClient::new(server.base_url(), Duration::from_secs(5)).unwrap(),
        );
        let err = watchlist.list_with_movies(&catalog).await.unwrap_err();
        assert!(err.to_string().contains("Movie not found"));
    }

    #[tokio::test]
    async fn contains_scans_the_full_list() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/watchlist/");
            then.status(200)
                .json_body(serde_json::json!([entry_body(7, 603, "pending")]));
        });

        let watchlist = client(&server.base_url(), Some("tok-123"));
        assert!(watchlist.contains(603).await.unwrap());
        assert!(!watchlist.contains(42).await.unwrap());
    }
}
