use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Signup and login against `/auth`. Neither call retries; a failed login
/// surfaces the server's message to the caller.
#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /auth/signup` with a JSON body. Returns the server-issued token
    /// but does not persist anything; the caller decides whether to log in.
    pub async fn signup(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        debug!(username, "signing up");
        let response = self
            .api
            .http()
            .post(self.api.url("/auth/signup"))
            .json(&SignupRequest {
                email,
                username,
                password,
            })
            .send()
            .await?;
        let response = ApiClient::check(response, "Authentication failed").await?;
        Ok(response.json().await?)
    }

    /// `POST /auth/login`. The backend expects a form-urlencoded body with
    /// `username` and `password` fields, not JSON.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        debug!(username, "logging in");
        let response = self
            .api
            .http()
            .post(self.api.url("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        let response = ApiClient::check(response, "Authentication failed").await?;
        Ok(response.json().await?)
    }
}
