//! cmsquery core - repository object types, query text, and error handling

pub mod error;
pub mod query;
pub mod types;

pub use error::{Error, Result};
pub use query::{children_query, in_list, lookup_query, quote_literal};
pub use types::*;
