//! Error types.

#[derive(thiserror::Error, Debug)]
pub enum CoronakartanError {
    #[error("failed to fetch source dataset: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("wrapped polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
    #[error("source dataset has no '{0}' column")]
    MissingColumn(String),
}
