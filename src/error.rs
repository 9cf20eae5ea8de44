use std::{io, path::PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("problem data is broken: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a URL: {url:?}")]
pub struct InvalidUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to generate the template: {name}")]
pub struct UnknownTemplate {
    pub name: String,
}
