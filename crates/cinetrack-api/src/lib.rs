pub mod auth;
pub mod client;
pub mod error;
pub mod movies;
pub mod watchlist;

pub use auth::{AuthClient, TokenResponse};
pub use client::ApiClient;
pub use error::ApiError;
pub use movies::CatalogClient;
pub use watchlist::WatchlistClient;
