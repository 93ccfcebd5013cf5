pub mod auth;
pub mod config;
pub mod movies;
pub mod prompts;
pub mod watchlist;

use std::time::Duration;

use anyhow::Result;

use cinetrack_api::{ApiClient, AuthClient, CatalogClient, WatchlistClient};
use cinetrack_config::{Config, PathManager, SessionStore};
use cinetrack_core::Session;

/// Everything a command handler needs: effective config, resolved paths,
/// the session loaded from disk, and the typed API clients.
pub struct AppContext {
    pub config: Config,
    pub paths: PathManager,
    pub session: Session,
    pub auth: AuthClient,
    pub catalog: CatalogClient,
    api: ApiClient,
}

impl AppContext {
    pub fn build(base_url_override: Option<String>) -> Result<Self> {
        let paths = PathManager::default();
        let mut config = Config::load_or_default(&paths.config_file())?;
        if let Some(base_url) = base_url_override {
            config.api.base_url = base_url;
            config.validate()?;
        }

        let session = Session::from_store(SessionStore::new(paths.session_file()))?;
        let api = ApiClient::new(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.timeout_secs),
        )?;
        tracing::debug!(base_url = %config.api.base_url, "api client ready");

        Ok(Self {
            auth: AuthClient::new(api.clone()),
            catalog: CatalogClient::new(api.clone()),
            config,
            paths,
            session,
            api,
        })
    }

    /// Watchlist client carrying the current session's token, if any.
    /// Unauthenticated clients fail bearer-gated calls before any I/O.
    pub fn watchlist_client(&self) -> WatchlistClient {
        WatchlistClient::new(self.api.clone(), self.session.token().map(str::to_string))
    }
}
