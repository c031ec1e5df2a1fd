//! Subcommand drivers

use crate::config::{resolve_token, AppConfig};
use crate::output::write_records;
use anyhow::{Context, Result};
use cmsquery_client::{ExecutorConfig, HttpQueryExecutor, QueryExecutor};
use cmsquery_core::{parse_identifiers, Error, Identifier, ObjectType};
use cmsquery_folders::{FolderBrowser, FolderClient};
use cmsquery_resolver::{build_lookup, DescendantResolver, Lookup};
use indexmap::IndexSet;
use std::io::Write;
use tracing::info;

/// One `lookup` invocation, after argument parsing.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub object_type: ObjectType,
    pub ids: IndexSet<Identifier>,
    pub execute: bool,
    pub pretty: bool,
}

impl LookupRequest {
    pub fn new<I, S>(object_type: ObjectType, raw_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            object_type,
            ids: parse_identifiers(raw_ids),
            execute: false,
            pretty: false,
        }
    }

    /// Whether running this request talks to the query service.
    pub fn needs_service(&self) -> bool {
        self.execute || self.object_type.expands_descendants()
    }
}

/// Print the lookup query and, if requested, the records it returns.
/// Nothing is printed when the crawl fails.
pub async fn run_lookup<E: QueryExecutor>(
    resolver: &DescendantResolver<E>,
    request: &LookupRequest,
    out: &mut impl Write,
) -> Result<Lookup> {
    let lookup = build_lookup(resolver, request.object_type, &request.ids)
        .await
        .context("building lookup query")?;
    writeln!(out, "{}", lookup.query)?;

    if request.execute {
        let records = lookup
            .execute(resolver.executor())
            .await
            .context("running lookup query")?;
        write_records(out, &records, request.pretty)?;
    }
    Ok(lookup)
}

/// Crawl settings from the command line, falling back to the config file.
#[derive(Debug, Clone, Default)]
pub struct CrawlLimits {
    pub max_depth: Option<usize>,
    pub batch_size: Option<usize>,
}

pub async fn lookup(
    config: &AppConfig,
    env: Option<&str>,
    host: Option<&str>,
    token: Option<String>,
    limits: CrawlLimits,
    request: LookupRequest,
    out: &mut impl Write,
) -> Result<()> {
    let base_url = config.base_url(env, host)?;
    let token = match resolve_token(token) {
        Some(t) => t,
        None if request.needs_service() => {
            return Err(Error::configuration(
                "no logon token: pass --token or set CMSQUERY_TOKEN",
            )
            .into())
        }
        None => String::new(),
    };

    let executor = HttpQueryExecutor::new(
        ExecutorConfig::new(base_url, token).with_timeout(config.timeout()),
    )
    .context("creating HTTP client")?;

    let mut resolver = DescendantResolver::new(executor);
    if let Some(depth) = limits.max_depth.or(config.max_depth) {
        resolver = resolver.with_max_depth(depth);
    }
    if let Some(size) = limits.batch_size.or(config.batch_size) {
        resolver = resolver.with_batch_size(size);
    }

    info!(
        "{} lookup of {} identifiers against {}",
        request.object_type,
        request.ids.len(),
        resolver.executor().config().base_url
    );
    run_lookup(&resolver, &request, out).await?;
    Ok(())
}

/// List the top-level folders, or open `path` and list its entries. Named
/// entries in `select` are staged and committed, and the final selection
/// is printed.
pub async fn run_browse(
    browser: &mut FolderBrowser,
    path: Option<&str>,
    select: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let Some(path) = path else {
        for root in browser.roots().await.context("listing top-level folders")? {
            writeln!(out, "{}{}/", cmsquery_folders::ROOT_PATH, root.name)?;
        }
        return Ok(());
    };

    browser
        .open_path(path)
        .await
        .with_context(|| format!("opening {}", path))?;
    for (entry_path, _) in browser.entry_paths() {
        writeln!(out, "{}", entry_path)?;
    }

    if !select.is_empty() {
        for name in select {
            browser.stage(name, true)?;
        }
        browser.selection_mut().add_staged();
        writeln!(out)?;
        writeln!(out, "selected:")?;
        for p in browser.selection().finalized() {
            writeln!(out, "  {}", p)?;
        }
    }
    Ok(())
}

pub async fn browse(
    config: &AppConfig,
    env: Option<&str>,
    host: Option<&str>,
    path: Option<&str>,
    select: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let base_url = config.base_url(env, host)?;
    let client = FolderClient::with_timeout(base_url, config.timeout())
        .context("creating HTTP client")?;
    let mut browser = FolderBrowser::new(client);
    run_browse(&mut browser, path, select, out).await
}
