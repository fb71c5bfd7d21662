// Error types for the startdeck application.
// Covers HTTP source errors, store errors, and widget lookup failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Location unavailable")]
    LocationUnavailable,

    #[error("Weather unavailable")]
    WeatherUnavailable,

    #[error("News unavailable")]
    NewsUnavailable,

    #[error("feed returned no items")]
    EmptyFeed,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DeckError>;
