use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simplified_core::domain::analysis::mock_analysis;
use simplified_core::domain::earnings::EarningsSummary;
use simplified_core::ingest::alpha_vantage::AlphaVantageClient;
use simplified_core::ingest::yahoo::YahooChartClient;
use simplified_core::ingest::{EarningsProvider, QuoteProvider};
use simplified_core::ticker::{normalize_symbol, search_stock};

#[derive(Debug, Parser)]
#[command(name = "simplified_cli")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// One year of daily prices for a ticker.
    Quote { symbol: String },

    /// Latest earnings with a plain-English explanation.
    Earnings { symbol: String },

    /// Mock analysis of a news event.
    Analyze {
        event: String,

        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Resolve free text to a ticker.
    Search { query: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = simplified_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let result = run(args.command, &settings).await;
    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %err, "command failed");
    }
    let output = result?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(
    command: Command,
    settings: &simplified_core::config::Settings,
) -> anyhow::Result<serde_json::Value> {
    match command {
        Command::Quote { symbol } => {
            let symbol = normalize_symbol(&symbol).context("symbol must be non-empty")?;
            let client = YahooChartClient::from_settings(settings)?;
            let quote = client.fetch_chart(&symbol).await?;
            Ok(serde_json::to_value(quote)?)
        }
        Command::Earnings { symbol } => {
            let symbol = normalize_symbol(&symbol).context("symbol must be non-empty")?;
            let client = AlphaVantageClient::from_settings(settings)?;
            let (earnings, overview) = client.fetch_earnings(&symbol).await?;
            let summary = EarningsSummary::build(&symbol, &earnings, &overview)?;
            Ok(serde_json::to_value(summary)?)
        }
        Command::Analyze { event, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let analysis = mock_analysis(&mut rng, &event, Some("cli"))?;
            Ok(serde_json::to_value(analysis)?)
        }
        Command::Search { query } => Ok(serde_json::to_value(search_stock(&query))?),
    }
}

fn init_sentry(settings: &simplified_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
