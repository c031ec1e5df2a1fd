//! Final bulk lookup query

use crate::resolver::{DescendantResolver, ResolveStats};
use cmsquery_client::QueryExecutor;
use cmsquery_core::{lookup_query, Error, Identifier, ObjectType, Record, Result};
use indexmap::IndexSet;
use tracing::info;

/// The identifier set and query text for one lookup.
#[derive(Clone, Debug)]
pub struct Lookup {
    pub object_type: ObjectType,
    /// Requested identifiers first, then resolved descendants, without duplicates.
    pub ids: IndexSet<Identifier>,
    /// Crawl counters; `None` when no crawl ran.
    pub stats: Option<ResolveStats>,
    pub query: String,
}

impl Lookup {
    /// Run the lookup query.
    pub async fn execute<E: QueryExecutor>(&self, executor: &E) -> Result<Vec<Record>> {
        let records = executor
            .execute(&self.query)
            .await
            .map_err(|e| Error::query_failure(self.query.clone(), e))?;
        info!("lookup returned {} records for {} identifiers", records.len(), self.ids.len());
        Ok(records)
    }
}

/// Build the lookup for `requested`. Folder selections are expanded to every
/// descendant first; other object types are looked up as given and the
/// resolver is not touched.
pub async fn build_lookup<E: QueryExecutor>(
    resolver: &DescendantResolver<E>,
    object_type: ObjectType,
    requested: &IndexSet<Identifier>,
) -> Result<Lookup> {
    if requested.is_empty() {
        return Err(Error::EmptySelection);
    }

    let (ids, stats) = if object_type.expands_descendants() {
        let (descendants, stats) = resolver.resolve_with_stats(requested).await?;
        info!(
            "resolved {} descendants of {} folders in {} queries",
            descendants.len(),
            requested.len(),
            stats.queries
        );
        let mut ids = requested.clone();
        ids.extend(descendants);
        (ids, Some(stats))
    } else {
        (requested.clone(), None)
    };

    let query = lookup_query(&ids)?;
    Ok(Lookup {
        object_type,
        ids,
        stats,
        query,
    })
}
