//! fls-results: throughput series types and the last-result store.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::compute_config_id;
pub use store::ResultsStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
