// Core business logic lives here - the brain of the operation
pub mod config;
pub mod error;
pub mod messages;
pub mod repository_flow;
pub mod search_flow;
pub mod status;
pub mod timefmt;

pub use config::Config;
pub use error::Error;
pub use repository_flow::RepositoryFlow;
pub use search_flow::{ResultRow, SearchFlow};
pub use status::{StatusKind, StatusMessage};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
