pub mod config;
pub mod paths;
pub mod session;

pub use config::{ApiConfig, Config};
pub use paths::PathManager;
pub use session::SessionStore;
