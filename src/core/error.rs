

use thiserror::Error;

use crate::api::Endpoint;


#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}


#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Fetch of {endpoint} failed: {source}")]
    Fetch {
        endpoint: Endpoint,
        #[source]
        source: FetchError,
    },
}

impl DashboardError {
    pub fn fetch(endpoint: Endpoint, source: impl Into<FetchError>) -> Self {
        Self::Fetch {
            endpoint,
            source: source.into(),
        }
    }

    pub fn invalid_base_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<config::ConfigError> for DashboardError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}


pub type Result<T> = std::result::Result<T, DashboardError>;
