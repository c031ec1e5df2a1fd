//! cmsquery client - query executor trait and the HTTP query service adapter

pub mod executor;
pub mod http;

pub use executor::{ExecutorError, ExecutorResult, QueryExecutor};
pub use http::{ExecutorConfig, HttpQueryExecutor};
