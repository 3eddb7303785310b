// overland — every shortest land route between two countries, from the terminal.

mod render;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use overland_core::{EngineConfig, RestResolver, RestResolverConfig, RouteEngine};

#[derive(Parser)]
#[command(name = "overland")]
#[command(about = "Overland — all shortest land routes between two countries", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the RESTCountries-compatible service
    /// (also `OVERLAND_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Raise log verbosity (-v: info, -vv: debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute all shortest land routes between two countries
    Route {
        /// Origin country name
        from: String,
        /// Destination country name
        to: String,
        /// Longest route considered, in border crossings
        #[arg(long, default_value_t = 10)]
        max_hops: u32,
        /// Most tied shortest routes worth reporting
        #[arg(long, default_value_t = 10)]
        max_routes: usize,
    },
    /// List known countries, largest first
    Countries,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = RestResolverConfig::from_env().context("invalid resolver configuration")?;
    if let Some(api_url) = &cli.api_url {
        config.base_url = api_url.parse().context("invalid --api-url")?;
    }
    let resolver =
        Arc::new(RestResolver::new(config).context("failed to build the country client")?);

    match cli.command {
        Commands::Route {
            from,
            to,
            max_hops,
            max_routes,
        } => {
            let engine = RouteEngine::with_config(
                resolver,
                EngineConfig {
                    max_hops,
                    max_routes,
                },
            );
            render::pending(&from, &to);
            let outcome = engine
                .plan(&from, &to)
                .await
                .context("route calculation failed")?;
            render::outcome(&outcome);
            Ok(())
        }
        Commands::Countries => {
            let engine = RouteEngine::new(resolver);
            let catalog = engine
                .country_catalog()
                .await
                .context("failed to load the country list")?;
            render::catalog(&catalog);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
