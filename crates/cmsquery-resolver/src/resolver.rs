//! Descendant crawl.
//!
//! Breadth-first over the folder tree, one batched children query per level.
//! `seen` holds every identifier ever enqueued or recorded (the roots are
//! seeded into it), so no identifier is queried twice and cycles terminate.
//! Any failed query aborts the whole crawl and discards what was found.

use cmsquery_client::QueryExecutor;
use cmsquery_core::{children_query, ChildRecord, Error, Identifier, Result};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

/// Counters for one crawl.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Frontier expansions performed.
    pub levels: usize,
    /// Children queries issued.
    pub queries: usize,
    /// Distinct descendant folders found.
    pub folders: usize,
    /// Distinct descendant non-folders found.
    pub leaves: usize,
    /// Records dropped for lacking an identifier.
    pub skipped: usize,
}

pub struct DescendantResolver<E> {
    executor: E,
    max_depth: Option<usize>,
    batch_size: Option<usize>,
}

impl<E: QueryExecutor> DescendantResolver<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            max_depth: None,
            batch_size: None,
        }
    }

    /// Fail with [`Error::DepthExceeded`] instead of expanding more than `levels` levels.
    pub fn with_max_depth(mut self, levels: usize) -> Self {
        self.max_depth = Some(levels);
        self
    }

    /// Split each level's frontier into queries of at most `size` parents.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size.max(1));
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Every object beneath `roots`, folders and leaves alike, in discovery
    /// order. The roots themselves are not included.
    pub async fn resolve(&self, roots: &IndexSet<Identifier>) -> Result<IndexSet<Identifier>> {
        self.resolve_with_stats(roots).await.map(|(ids, _)| ids)
    }

    pub async fn resolve_with_stats(
        &self,
        roots: &IndexSet<Identifier>,
    ) -> Result<(IndexSet<Identifier>, ResolveStats)> {
        let mut stats = ResolveStats::default();
        if roots.is_empty() {
            return Ok((IndexSet::new(), stats));
        }

        let mut seen: IndexSet<Identifier> = roots.clone();
        let mut frontier: Vec<Identifier> = roots.iter().cloned().collect();

        while !frontier.is_empty() {
            if let Some(limit) = self.max_depth {
                if stats.levels >= limit {
                    warn!("crawl stopped: {} folders still unexpanded at depth {}", frontier.len(), limit);
                    return Err(Error::DepthExceeded { limit });
                }
            }
            stats.levels += 1;

            let before = seen.len();
            let mut next = Vec::new();
            let batch_size = self.batch_size.unwrap_or(frontier.len());

            for batch in frontier.chunks(batch_size) {
                let query = children_query(batch)?;
                stats.queries += 1;

                let records = match self.executor.execute(&query).await {
                    Ok(records) => records,
                    Err(e) => {
                        warn!("children query failed at level {}: {}", stats.levels, e);
                        return Err(Error::query_failure(query, e));
                    }
                };

                for record in &records {
                    let Some(child) = ChildRecord::from_record(record) else {
                        stats.skipped += 1;
                        debug!("skipping record without identifier: {:?}", record);
                        continue;
                    };
                    if !seen.insert(child.id.clone()) {
                        continue;
                    }
                    if child.kind.is_folder() {
                        stats.folders += 1;
                        next.push(child.id);
                    } else {
                        stats.leaves += 1;
                    }
                }
            }

            info!(
                level = stats.levels,
                parents = frontier.len(),
                discovered = seen.len() - before,
                folders = next.len(),
                "crawl level complete"
            );
            frontier = next;
        }

        let descendants = seen.into_iter().skip(roots.len()).collect();
        Ok((descendants, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmsquery_client::{ExecutorError, ExecutorResult};
    use cmsquery_core::Record;
    use std::sync::Mutex;

    /// Answers every call with the same batch.
    struct Fixed(Vec<Record>, Mutex<usize>);

    #[async_trait::async_trait]
    impl QueryExecutor for Fixed {
        async fn execute(&self, _query: &str) -> ExecutorResult<Vec<Record>> {
            *self.1.lock().unwrap() += 1;
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait::async_trait]
    impl QueryExecutor for Failing {
        async fn execute(&self, _query: &str) -> ExecutorResult<Vec<Record>> {
            Err(ExecutorError::InvalidResponse("truncated".into()))
        }
    }

    fn roots(ids: &[&str]) -> IndexSet<Identifier> {
        ids.iter().map(|s| Identifier::from(*s)).collect()
    }

    #[tokio::test]
    async fn self_referencing_folder_terminates() {
        let rec = serde_json::json!({"SI_CUID": "A", "SI_KIND": "Folder"});
        let exec = Fixed(vec![rec.as_object().cloned().unwrap()], Mutex::new(0));
        let resolver = DescendantResolver::new(&exec);
        let found = resolver.resolve(&roots(&["A"])).await.unwrap();
        assert!(found.is_empty());
        assert_eq!(*exec.1.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn failure_wraps_query_text() {
        let resolver = DescendantResolver::new(Failing);
        let err = resolver.resolve(&roots(&["A"])).await.unwrap_err();
        let query = err.failed_query().unwrap();
        assert!(query.contains("SI_PARENT_CUID IN ('A')"));
    }

    #[tokio::test]
    async fn invalid_root_fails_before_any_call() {
        let exec = Fixed(Vec::new(), Mutex::new(0));
        let resolver = DescendantResolver::new(&exec);
        let err = resolver.resolve(&roots(&["bad'id"])).await.unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier { .. }));
        assert_eq!(*exec.1.lock().unwrap(), 0);
    }
}
