//! Error types for the MBA stats engine

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, MbaError>;

#[derive(Error, Debug)]
pub enum MbaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Invalid value for {env_var}: {value}")]
    InvalidConfig { env_var: String, value: String },

    #[error("Could not determine a cache directory")]
    NoCacheDir,

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Unknown stat category: {value} (expected ppg, rpg, apg, spg, bpg or tpg)")]
    InvalidMetric { value: String },

    #[error("Unknown ranking mode: {value} (expected average or total)")]
    InvalidMode { value: String },

    #[error("Unknown role action: {value} (expected add or remove)")]
    InvalidRoleAction { value: String },

    #[error("Invalid season label: {value}")]
    InvalidSeason { value: String },

    #[error("Invalid player id: {value:?}")]
    InvalidPlayerId { value: String },

    #[error("Invalid service URL: {url}")]
    InvalidUrl { url: String },

    #[error("Player not found: {id}")]
    PlayerNotFound { id: String },

    #[error("{service} responded with {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },
}
