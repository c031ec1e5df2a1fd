//! HTTP adapter for the repository's query service

use crate::executor::{ExecutorError, ExecutorResult, QueryExecutor};
use cmsquery_core::Record;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

const QUERY_ENDPOINT: &str = "/v1/cmsquery";
const LOGON_TOKEN_HEADER: &str = "X-SAP-LogonToken";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where and as whom queries are sent. Passed in explicitly; nothing is read
/// from the environment here.
#[derive(Clone)]
pub struct ExecutorConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl ExecutorConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the query endpoint.
    pub fn query_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), QUERY_ENDPOINT)
    }
}

impl std::fmt::Debug for ExecutorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub struct HttpQueryExecutor {
    client: Client,
    config: ExecutorConfig,
}

impl HttpQueryExecutor {
    pub fn new(config: ExecutorConfig) -> ExecutorResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl QueryExecutor for HttpQueryExecutor {
    async fn execute(&self, query: &str) -> ExecutorResult<Vec<Record>> {
        let url = self.config.query_url();
        debug!("POST {} query={}", url, query);

        let response = self
            .client
            .post(&url)
            .header(LOGON_TOKEN_HEADER, &self.config.token)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .json(&QueryRequest { query })
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("query service error {}: {}", status, body);

            return Err(match status.as_u16() {
                401 | 403 => ExecutorError::Unauthorized {
                    status: status.as_u16(),
                    body,
                },
                code => ExecutorError::Status { status: code, body },
            });
        }

        let text = response.text().await?;
        let records = decode_entries(&text)?;
        debug!("query returned {} records", records.len());
        Ok(records)
    }
}

/// Decode a `{"entries": [...]}` response body. A missing `entries` field is
/// an empty batch.
pub fn decode_entries(body: &str) -> ExecutorResult<Vec<Record>> {
    let response: QueryResponse = serde_json::from_str(body)
        .map_err(|e| ExecutorError::InvalidResponse(e.to_string()))?;

    let entries = match response.entries {
        None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
        Some(serde_json::Value::Array(entries)) => entries,
        Some(other) => {
            return Err(ExecutorError::InvalidResponse(format!(
                "entries is not an array: {}",
                other
            )))
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            serde_json::Value::Object(record) => Ok(record),
            other => Err(ExecutorError::InvalidResponse(format!(
                "entry {} is not an object: {}",
                i, other
            ))),
        })
        .collect()
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    entries: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_url_trims_trailing_slash() {
        let cfg = ExecutorConfig::new("https://bo.example.com/biprws/", "t");
        assert_eq!(cfg.query_url(), "https://bo.example.com/biprws/v1/cmsquery");
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = ExecutorConfig::new("https://x", "secret-token");
        let dbg = format!("{:?}", cfg);
        assert!(!dbg.contains("secret-token"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn decode_entries_variants() {
        assert_eq!(decode_entries(r#"{"entries": [{"SI_CUID": "A"}]}"#).unwrap().len(), 1);
        assert!(decode_entries(r#"{}"#).unwrap().is_empty());
        assert!(decode_entries(r#"{"entries": null}"#).unwrap().is_empty());
        assert!(matches!(
            decode_entries(r#"{"entries": {"SI_CUID": "A"}}"#),
            Err(ExecutorError::InvalidResponse(_))
        ));
        assert!(matches!(
            decode_entries(r#"{"entries": ["A"]}"#),
            Err(ExecutorError::InvalidResponse(_))
        ));
        assert!(matches!(
            decode_entries("<html>"),
            Err(ExecutorError::InvalidResponse(_))
        ));
    }
}
