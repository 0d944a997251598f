//! Error types for spot placement.

use thiserror::Error;

/// Result type for spot placement operations.
pub type Result<T> = std::result::Result<T, PlacementError>;

/// Everything that can go wrong between loading inputs and composing audio.
#[derive(Error, Debug)]
pub enum PlacementError {
    /// Episode id is empty or whitespace only.
    #[error("Episode id must not be empty")]
    EmptyEpisodeId,

    /// A campaign in the catalog has no spots.
    #[error("Campaign #{index} has no spots")]
    EmptyCampaign { index: usize },

    /// A spot carries a negative or non-finite revenue.
    #[error("Campaign '{campaign}' has invalid spot revenue {revenue}")]
    InvalidRevenue { campaign: String, revenue: f64 },

    /// Spots of one campaign disagree on their target episodes.
    #[error("Campaign #{index} has spots with differing targets")]
    MismatchedTargets { index: usize },

    /// Too many eligible campaigns to enumerate every combination.
    #[error("{count} eligible campaigns exceed the combination limit of {max}")]
    TooManyCandidates { count: usize, max: usize },

    /// Settings could not be loaded or are invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
