//! REST client for the folder listing endpoints

use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::{debug, error};

const FOLDERS_ENDPOINT: &str = "/v1/folders";
const FOLDER_TYPE: &str = "Folder";

pub type FolderResult<T> = Result<T, FolderError>;

#[derive(Debug, thiserror::Error)]
pub enum FolderError {
    #[error("folder service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("no folder named {0:?}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// One listed object.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FolderEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl FolderEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == FOLDER_TYPE
    }
}

#[derive(Deserialize)]
struct Listing {
    #[serde(default)]
    entries: Vec<FolderEntry>,
}

fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id: {}", other))),
    }
}

pub struct FolderClient {
    client: Client,
    base_url: String,
}

impl FolderClient {
    pub fn new(base_url: impl Into<String>) -> FolderResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> FolderResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Top-level folders. Non-folder entries at the root are dropped.
    pub async fn list_roots(&self) -> FolderResult<Vec<FolderEntry>> {
        let url = format!("{}{}/", self.base_url, FOLDERS_ENDPOINT);
        let entries = self.get_listing(&url).await?;
        Ok(entries.into_iter().filter(FolderEntry::is_folder).collect())
    }

    /// Direct children of folder `id`, folders and files alike.
    pub async fn list_children(&self, id: &str) -> FolderResult<Vec<FolderEntry>> {
        let url = format!("{}{}/{}/children", self.base_url, FOLDERS_ENDPOINT, id);
        self.get_listing(&url).await
    }

    async fn get_listing(&self, url: &str) -> FolderResult<Vec<FolderEntry>> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("folder service error {}: {}", status, body);
            return Err(FolderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let listing: Listing = serde_json::from_str(&text)
            .map_err(|e| FolderError::InvalidResponse(e.to_string()))?;
        Ok(listing.entries)
    }
}
