use anyhow::Result;
use tracing::debug;

use cinetrack_api::{ApiError, CatalogClient};
use cinetrack_models::{Movie, Page};

/// A pending fetch tagged with the generation it was issued under. A new
/// search bumps the generation, so a slower response from a superseded
/// search is discarded instead of clobbering fresher results.
#[derive(Debug, Clone)]
pub struct PageTicket {
    generation: u64,
    query: String,
    page: u32,
}

/// Search results with pagination accumulation. An empty query means the
/// unfiltered popular listing. Results accumulate across pages by
/// concatenation and only reset on a fresh search.
pub struct BrowseController {
    catalog: CatalogClient,
    query: String,
    movies: Vec<Movie>,
    page: u32,
    total_pages: u32,
    total_results: u64,
    generation: u64,
}

impl BrowseController {
    pub fn new(catalog: CatalogClient) -> Self {
        Self {
            catalog,
            query: String::new(),
            movies: Vec::new(),
            page: 0,
            total_pages: 0,
            total_results: 0,
            generation: 0,
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Start a fresh search. Supersedes every in-flight ticket.
    pub fn begin_search(&mut self, query: &str) -> PageTicket {
        self.generation += 1;
        self.query = query.trim().to_string();
        PageTicket {
            generation: self.generation,
            query: self.query.clone(),
            page: 1,
        }
    }

    /// Ticket for the next page of the current search, or `None` when the
    /// last known page is the final one.
    pub fn begin_load_more(&mut self) -> Option<PageTicket> {
        if self.page == 0 || !self.has_more() {
            return None;
        }
        Some(PageTicket {
            generation: self.generation,
            query: self.query.clone(),
            page: self.page + 1,
        })
    }

    /// Perform the fetch a ticket describes. Borrows `self` immutably, so
    /// the caller may hold several tickets at once.
    pub async fn fetch(&self, ticket: &PageTicket) -> Result<Page<Movie>, ApiError> {
        if ticket.query.is_empty() && ticket.page == 1 {
            self.catalog.popular().await
        } else {
            self.catalog.search(&ticket.query, ticket.page).await
        }
    }

    /// Apply a fetched page. Returns false (and changes nothing) when the
    /// ticket's generation is stale. Page 1 replaces the result set, later
    /// pages append.
    pub fn apply(&mut self, ticket: PageTicket, page: Page<Movie>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale page response"
            );
            return false;
        }
        if page.page <= 1 {
            self.movies = page.results;
        } else {
            self.movies.extend(page.results);
        }
        self.page = page.page;
        self.total_pages = page.total_pages;
        self.total_results = page.total_results;
        true
    }

    /// Convenience wrapper: search and apply in one step.
    pub async fn search(&mut self, query: &str) -> Result<()> {
        let ticket = self.begin_search(query);
        let page = self.fetch(&ticket).await?;
        self.apply(ticket, page);
        Ok(())
    }

    /// Fetch and append the next page. Returns false when there was none.
    pub async fn load_more(&mut self) -> Result<bool> {
        let Some(ticket) = self.begin_load_more() else {
            return Ok(false);
        };
        let page = self.fetch(&ticket).await?;
        Ok(self.apply(ticket, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    use cinetrack_api::ApiClient;

    fn controller(base_url: &str) -> BrowseController {
        BrowseController::new(CatalogClient::new(
            ApiClient::new(base_url, Duration::from_secs(5)).unwrap(),
        ))
    }

    fn page_body(page: u32, total_pages: u32, ids: &[u64]) -> serde_json::Value {
        serde_json::json!({
            "page": page,
            "results": ids.iter().map(|id| serde_json::json!({
                "id": id,
                "title": format!("Movie {id}"),
                "release_date": "2020-01-01",
                "vote_average": 7.0
            })).collect::<Vec<_>>(),
            "total_pages": total_pages,
            "total_results": 4
        })
    }

    #[tokio::test]
    async fn empty_query_fetches_popular() {
        let server = MockServer::start_async().await;
        let popular = server.mock(|when, then| {
            when.method(GET).path("/movies/popular");
            then.status(200).json_body(page_body(1, 1, &[1, 2]));
        });
        let search = server.mock(|when, then| {
            when.method(GET).path("/movies/search");
            then.status(200).json_body(page_body(1, 1, &[]));
        });

        let mut browse = controller(&server.base_url());
        browse.search("   ").await.unwrap();
        assert_eq!(browse.movies().len(), 2);
        popular.assert();
        assert_eq!(search.hits(), 0);
    }

    #[tokio::test]
    async fn load_more_appends_in_page_order() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/movies/search")
                .query_param("page", "1");
            then.status(200).json_body(page_body(1, 2, &[1, 2]));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/movies/search")
                .query_param("page", "2");
            then.status(200).json_body(page_body(2, 2, &[3, 4]));
        });

        let mut browse = controller(&server.base_url());
        browse.search("matrix").await.unwrap();
        assert!(browse.has_more());
        assert!(browse.load_more().await.unwrap());

        let ids: Vec<u64> = browse.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(!browse.has_more());
        // Nothing left to fetch.
        assert!(!browse.load_more().await.unwrap());
    }

    #[tokio::test]
    async fn stale_generation_is_discarded() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/movies/search")
                .query_param("query", "old");
            then.status(200).json_body(page_body(1, 1, &[1]));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/movies/search")
                .query_param("query", "new");
            then.status(200).json_body(page_body(1, 1, &[2]));
        });

        let mut browse = controller(&server.base_url());
        let old_ticket = browse.begin_search("old");
        let new_ticket = browse.begin_search("new");

        // The superseded search resolves after the newer one.
        let new_page = browse.fetch(&new_ticket).await.unwrap();
        let old_page = browse.fetch(&old_ticket).await.unwrap();
        assert!(browse.apply(new_ticket, new_page));
        assert!(!browse.apply(old_ticket, old_page));

        let ids: Vec<u64> = browse.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2]);
    }
}
