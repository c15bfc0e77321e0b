use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::model::Pack;

pub const DEFAULT_SOURCE: &str = "data/data.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    FilePath(String),
    Url(String),
}

impl CatalogSource {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Url(value.to_string())
        } else {
            CatalogSource::FilePath(
                crate::config::expand_tilde(value)
                    .to_string_lossy()
                    .into_owned(),
            )
        }
    }

    pub fn location(&self) -> &str {
        match self {
            CatalogSource::FilePath(p) => p,
            CatalogSource::Url(u) => u,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read catalog file: {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("catalog is not valid JSON: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog root must be an array of packs")]
    NotAnArray,
}

impl LoadError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::Status { .. } => "Error loading packs. Please check the console.",
            _ => "Failed to load data. Please check the console.",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackStore {
    packs: Vec<Pack>,
}

impl PackStore {
    pub fn new(packs: Vec<Pack>) -> Self {
        Self { packs }
    }

    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let root: Value = serde_json::from_str(raw).map_err(|e| LoadError::Parse { source: e })?;
        let Value::Array(values) = root else {
            return Err(LoadError::NotAnArray);
        };
        let mut packs = Vec::with_capacity(values.len());
        for (idx, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<Pack>(value) {
                Ok(pack) => packs.push(pack),
                Err(e) => {
                    // Non-object entries; kept as blank records so they never list.
                    tracing::debug!(index = idx, error = %e, "unreadable catalog entry");
                    packs.push(Pack::default());
                }
            }
        }
        Ok(Self { packs })
    }

    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Pack> {
        self.packs.get(idx)
    }

    // Packs that never list have no detail view either.
    pub fn find_by_id(&self, id: &str) -> Option<&Pack> {
        self.packs
            .iter()
            .find(|p| p.is_listable() && p.id_or_empty() == id)
    }
}

pub async fn load(source: &CatalogSource, timeout: Duration) -> Result<PackStore, LoadError> {
    let raw = match source {
        CatalogSource::FilePath(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LoadError::Read {
                    path: path.clone(),
                    source: e,
                })?
        }
        CatalogSource::Url(url) => fetch(url, timeout).await?,
    };
    let store = PackStore::from_json(&raw)?;
    tracing::info!(
        source = source.location(),
        packs = store.len(),
        "catalog loaded"
    );
    Ok(store)
}

async fn fetch(url: &str, timeout: Duration) -> Result<String, LoadError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LoadError::HttpClientBuild { source: e })?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LoadError::Request {
            url: url.to_string(),
            source: e,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().await.map_err(|e| LoadError::Request {
        url: url.to_string(),
        source: e,
    })
}
