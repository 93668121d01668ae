use std::path::PathBuf;

use clap::{Parser, Subcommand};
use navcompat::{
    BackendConfig, NavcompatConfig, backfill_by_slug, build_matcher, load_blobs_json, open_catalog,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "navcompat")]
#[command(about = "Vehicle compatibility lookup over the storefront catalog")]
struct Cli {
    /// YAML configuration file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the compatibility result for one brand/model as JSON.
    Match {
        /// JSON export to seed the catalog from, overriding `catalog.seed_file`.
        catalog: PathBuf,
        brand: String,
        model: String,
        /// Seed for placeholder generation, for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List brands with active products.
    Brands {
        catalog: PathBuf,
    },
    /// Merge JSON blobs into a redb catalog by slug.
    Import {
        /// redb catalog file (created if missing).
        db: PathBuf,
        /// JSON array of product blobs.
        blobs: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<NavcompatConfig> {
    Ok(match path {
        Some(path) => NavcompatConfig::from_file(path)?,
        None => NavcompatConfig::default(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Match {
            brand,
            model,
            catalog,
            seed,
        } => {
            config.catalog.seed_file = Some(catalog.to_string_lossy().into_owned());
            let store = open_catalog(&config.catalog).await?;
            let matcher = build_matcher(&config, store)?;
            let mut rng = match seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            let result = matcher
                .match_vehicle_model_with_rng(&brand, &model, &mut rng)
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Brands { catalog } => {
            config.catalog.seed_file = Some(catalog.to_string_lossy().into_owned());
            let store = open_catalog(&config.catalog).await?;
            println!("{}", serde_json::to_string_pretty(&store.list_brands().await?)?);
        }
        Command::Import { db, blobs } => {
            let store = BackendConfig::redb(db.to_string_lossy()).build()?;
            let blobs = load_blobs_json(&blobs)?;
            let report = backfill_by_slug(store.as_ref(), blobs).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
