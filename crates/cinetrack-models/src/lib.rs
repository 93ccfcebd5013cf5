pub mod movie;
pub mod page;
pub mod status;
pub mod watchlist;

pub use movie::{Genre, Movie};
pub use page::Page;
pub use status::{ParseStatusError, WatchStatus};
pub use watchlist::{WatchlistEntry, WatchlistMovie};
