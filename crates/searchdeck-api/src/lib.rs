// HTTP client for the search backend
pub mod client;
pub mod models;
pub mod retry;

// Re-export common types
pub use client::{ApiError, BackendClient};
pub use models::{
    QueryResponse, RepositoryQuery, RepositoryRecord, SaveResponse, SearchResponse,
    SearchResultItem, STATUS_SUCCESS,
};
pub use retry::RetryConfig;
