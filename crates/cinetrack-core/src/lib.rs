pub mod browse;
pub mod detail;
pub mod session;
pub mod watchlist;

pub use browse::{BrowseController, PageTicket};
pub use detail::{fetch_detail, MovieDetail};
pub use session::{Session, SessionState};
pub use watchlist::WatchlistController;
