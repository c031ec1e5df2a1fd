//! Error types for cmsquery

use thiserror::Error;

/// Boxed cause carried by a failed query.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("query failed: {cause}\n  query: {query}")]
    QueryFailure {
        query: String,
        #[source]
        cause: BoxError,
    },

    #[error("invalid identifier {id:?}: {reason}")]
    InvalidIdentifier { id: String, reason: &'static str },

    #[error("no identifiers to look up")]
    EmptySelection,

    #[error("folder tree deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("unknown object type: {0} (expected Reports, Connections, Universes or Folders)")]
    UnknownObjectType(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn query_failure(
        query: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self::QueryFailure {
            query: query.into(),
            cause: cause.into(),
        }
    }

    /// The query text of a failed call, if this is a query failure.
    pub fn failed_query(&self) -> Option<&str> {
        match self {
            Self::QueryFailure { query, .. } => Some(query),
            _ => None,
        }
    }
}
