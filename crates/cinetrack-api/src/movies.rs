use serde::Deserialize;
use tracing::debug;

use cinetrack_models::{Genre, Movie, Page};

use crate::client::ApiClient;
use crate::error::ApiError;

const FALLBACK: &str = "Something went wrong";

#[derive(Deserialize)]
struct GenreList {
    genres: Vec<Genre>,
}

/// Read-only catalog queries under `/movies`. No client-side caching:
/// repeated calls always re-fetch.
#[derive(Clone)]
pub struct CatalogClient {
    api: ApiClient,
}

impl CatalogClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /movies/popular` - the unfiltered listing, page 1.
    pub async fn popular(&self) -> Result<Page<Movie>, ApiError> {
        self.get_page(self.api.url("/movies/popular")).await
    }

    /// `GET /movies/search?query=..&page=..`. The query term is
    /// percent-encoded before it lands in the URL.
    pub async fn search(&self, query: &str, page: u32) -> Result<Page<Movie>, ApiError> {
        let url = format!(
            "{}?query={}&page={}",
            self.api.url("/movies/search"),
            urlencoding::encode(query),
            page
        );
        debug!(query, page, "searching catalog");
        self.get_page(url).await
    }

    /// `GET /movies/{id}` - full detail for one movie.
    pub async fn details(&self, movie_id: u64) -> Result<Movie, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url(&format!("/movies/{movie_id}")))
            .send()
            .await?;
        let response = ApiClient::check(response, FALLBACK).await?;
        Ok(response.json().await?)
    }

    /// `GET /movies/{id}/recommendations`.
    pub async fn recommendations(&self, movie_id: u64) -> Result<Page<Movie>, ApiError> {
        self.get_page(self.api.url(&format!("/movies/{movie_id}/recommendations")))
            .await
    }

    /// `GET /movies/genres`.
    pub async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url("/movies/genres"))
            .send()
            .await?;
        let response = ApiClient::check(response, FALLBACK).await?;
        let list: GenreList = response.json().await?;
        Ok(list.genres)
    }

    async fn get_page(&self, url: String) -> Result<Page<Movie>, ApiError> {
        let response = self.api.http().get(url).send().await?;
        let response = ApiClient::check(response, FALLBACK).await?;
        Ok(response.json().await?)
    }
}
