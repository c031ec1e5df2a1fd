//! cmsquery CLI

use anyhow::Context;
use clap::Parser;
use cmsquery::commands::{self, CrawlLimits, LookupRequest};
use cmsquery::{AppConfig, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cmsquery::logging::init(cli.verbose);

    let config = AppConfig::discover(cli.config.as_deref()).context("loading configuration")?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Lookup {
            target,
            token,
            object_type,
            execute,
            pretty,
            max_depth,
            batch_size,
            ids,
        } => {
            let mut request = LookupRequest::new(object_type, &ids);
            request.execute = execute;
            request.pretty = pretty;
            commands::lookup(
                &config,
                target.env.as_deref(),
                target.host.as_deref(),
                token,
                CrawlLimits { max_depth, batch_size },
                request,
                &mut stdout,
            )
            .await?;
        }

        Commands::Browse { target, path, select } => {
            commands::browse(
                &config,
                target.env.as_deref(),
                target.host.as_deref(),
                path.as_deref(),
                &select,
                &mut stdout,
            )
            .await?;
        }

        Commands::Config => {
            print!("{}", config.to_toml());
        }

        Commands::Version => {
            println!("cmsquery v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
