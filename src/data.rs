use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::{error::LoadError, url::UrlKey};

/// A precomputed entry: a judge problem's canonical URL, its title and the
/// generated source of every template, keyed by template name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub url: String,
    pub title: String,
    pub template: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(String),
}

impl From<&str> for DataSource {
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            DataSource::Remote(value.to_owned())
        } else {
            DataSource::File(value.into())
        }
    }
}

pub struct DataStore {
    source: DataSource,
    client: reqwest::Client,
    cache: OnceCell<Result<Vec<ProblemRecord>, LoadError>>,
}

impl DataStore {
    pub fn new(source: impl Into<DataSource>) -> Self {
        Self {
            source: source.into(),
            client: reqwest::Client::new(),
            cache: OnceCell::new(),
        }
    }

    #[cfg(test)]
    pub fn with_records(records: Vec<ProblemRecord>) -> Self {
        Self {
            source: DataSource::File(PathBuf::new()),
            client: reqwest::Client::new(),
            cache: OnceCell::from(Ok(records)),
        }
    }

    pub async fn load(&self) -> Result<Vec<ProblemRecord>, LoadError> {
        let text = match &self.source {
            DataSource::File(path) => {
                debug!(path = %path.display(), "reading problem data");
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Read {
                        path: path.clone(),
                        source,
                    })?
            }
            DataSource::Remote(url) => {
                debug!(url, "fetching problem data");
                let fetch_err = |source: reqwest::Error| LoadError::Fetch {
                    url: url.clone(),
                    source,
                };
                let response = self.client.get(url).send().await.map_err(fetch_err)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url: url.clone(),
                        status,
                    });
                }
                response.text().await.map_err(fetch_err)?
            }
        };
        let records: Vec<ProblemRecord> = serde_json::from_str(&text)?;

        for record in &records {
            if UrlKey::parse(&record.url).is_err() {
                warn!(url = record.url, "problem record has an invalid url and will never match");
            }
        }
        info!(problems = records.len(), "loaded problem data");
        Ok(records)
    }

    /// Loads the data on first use, every later call gets the same result back.
    pub async fn load_cached(&self) -> Result<&[ProblemRecord], &LoadError> {
        self.cache
            .get_or_init(|| self.load())
            .await
            .as_deref()
    }
}
