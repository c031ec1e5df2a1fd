//! Query executor trait

use cmsquery_core::Record;
use std::sync::Arc;

/// Result type for query execution
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Query execution error types
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("unauthorized ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("query service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Sends one query to the repository and returns the complete batch of records.
///
/// Implementations do not retry. A deadline, if any, is the implementation's
/// own request timeout.
#[async_trait::async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &str) -> ExecutorResult<Vec<Record>>;
}

#[async_trait::async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn execute(&self, query: &str) -> ExecutorResult<Vec<Record>> {
        (**self).execute(query).await
    }
}

#[async_trait::async_trait]
impl<'a, T: QueryExecutor + ?Sized> QueryExecutor for &'a T {
    async fn execute(&self, query: &str) -> ExecutorResult<Vec<Record>> {
        (**self).execute(query).await
    }
}
