use anyhow::Result;
use tracing::{info, warn};

use cinetrack_api::AuthClient;
use cinetrack_config::SessionStore;

/// Two-state session machine. Authenticated always carries both halves of
/// the pair; a token without a username (or the reverse) never reaches
/// this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { token: String, username: String },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

type Subscriber = Box<dyn Fn(&SessionState) + Send>;

/// Explicit session object injected into controllers. Owns the persistent
/// store and notifies subscribers on every transition.
pub struct Session {
    store: SessionStore,
    state: SessionState,
    subscribers: Vec<Subscriber>,
}

impl Session {
    /// Read the store and derive the starting state. A partial pair in
    /// storage is inconsistent; it is cleared and the session stays
    /// anonymous (self-healing).
    pub fn from_store(mut store: SessionStore) -> Result<Self> {
        store.load()?;
        let state = match (store.token(), store.username()) {
            (Some(token), Some(username)) => SessionState::Authenticated {
                token: token.to_string(),
                username: username.to_string(),
            },
            (None, None) => SessionState::Anonymous,
            _ => {
                warn!("inconsistent session storage, clearing");
                store.clear()?;
                SessionState::Anonymous
            }
        };
        Ok(Self {
            store,
            state,
            subscribers: Vec::new(),
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { username, .. } => Some(username),
            SessionState::Anonymous => None,
        }
    }

    /// Register an observer called after every state transition.
    pub fn subscribe(&mut self, subscriber: impl Fn(&SessionState) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Authenticate against the backend. On success the pair is persisted
    /// and the session transitions; on failure the session stays anonymous
    /// and the error propagates for display. Last call to resolve wins.
    pub async fn login(&mut self, auth: &AuthClient, username: &str, password: &str) -> Result<()> {
        match auth.login(username, password).await {
            Ok(response) => {
                self.store
                    .store(response.token.clone(), username.to_string())?;
                self.state = SessionState::Authenticated {
                    token: response.token,
                    username: username.to_string(),
                };
                info!(username, "logged in");
                self.notify();
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Anonymous;
                self.notify();
                Err(e.into())
            }
        }
    }

    /// Drop the session unconditionally. No network call is involved; the
    /// state transition happens even if clearing storage fails.
    pub fn logout(&mut self) -> Result<()> {
        self.state = SessionState::Anonymous;
        self.notify();
        let result = self.store.clear();
        info!("logged out");
        result
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use cinetrack_api::ApiClient;

    fn store_at(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.toml"))
    }

    fn auth_client(base_url: &str) -> AuthClient {
        AuthClient::new(ApiClient::new(base_url, Duration::from_secs(5)).unwrap())
    }

    #[test]
    fn startup_with_full_pair_is_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(&dir);
        store.store("tok-123".to_string(), "alice".to_string()).unwrap();

        let session = Session::from_store(store_at(&dir)).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("alice"));
        assert_eq!(session.token(), Some("tok-123"));
    }

    #[test]
    fn startup_with_partial_pair_self_heals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "token = \"orphan\"\n").unwrap();

        let session = Session::from_store(store_at(&dir)).unwrap();
        assert!(!session.is_authenticated());

        // Storage must have been cleared, not just ignored.
        let mut reloaded = store_at(&dir);
        reloaded.load().unwrap();
        assert_eq!(reloaded.token(), None);
        assert_eq!(reloaded.username(), None);
    }

    #[tokio::test]
    async fn login_persists_pair_and_notifies() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200)
                .json_body(serde_json::json!({"token": "tok-123"}));
        });

        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::from_store(store_at(&dir)).unwrap();
        let transitions = Arc::new(AtomicUsize::new(0));
        let counter = transitions.clone();
        session.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        session
            .login(&auth_client(&server.base_url()), "alice", "hunter2")
            .await
            .unwrap();
        assert!(session.is_authenticated());
        assert_eq!(transitions.load(Ordering::SeqCst), 1);

        let mut reloaded = store_at(&dir);
        reloaded.load().unwrap();
        assert_eq!(reloaded.token(), Some("tok-123"));
        assert_eq!(reloaded.username(), Some("alice"));
    }

    #[tokio::test]
    async fn failed_login_stays_anonymous() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(401)
                .json_body(serde_json::json!({"detail": "incorrect password"}));
        });

        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::from_store(store_at(&dir)).unwrap();
        let err = session
            .login(&auth_client(&server.base_url()), "alice", "wrong")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("incorrect password"));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_storage_without_network() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200)
                .json_body(serde_json::json!({"token": "tok-123"}));
        });

        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::from_store(store_at(&dir)).unwrap();
        session
            .login(&auth_client(&server.base_url()), "alice", "hunter2")
            .await
            .unwrap();

        session.logout().unwrap();
        assert!(!session.is_authenticated());

        let mut reloaded = store_at(&dir);
        reloaded.load().unwrap();
        assert_eq!(reloaded.token(), None);
    }
}
