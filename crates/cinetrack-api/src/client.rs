use reqwest::{Client, Response};
use std::time::Duration;

use crate::error::ApiError;

/// Shared HTTP plumbing for the typed clients. Holds the base URL (with
/// version prefix, no trailing slash) and a connection-pooled client.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Join a path (starting with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pass 2xx responses through, turn anything else into `ApiError::Status`.
    pub async fn check(response: Response, fallback: &str) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(response, fallback).await)
        }
    }
}
