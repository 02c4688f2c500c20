//! main.rs - Entry point for the HopYield migration advisor
//!
//! `analyze` (the default) runs one analysis and prints the recommendation;
//! `serve` exposes the same analysis over HTTP.

use clap::{Parser, Subcommand};
use hopyield::api::{start_server, AppState};
use hopyield::models::BASE_CHAIN_ID;
use hopyield::report::format_recommendation;
use hopyield::{
    AdvisorConfig, LifiQuoteProvider, MigrationAdvisor, MockQuoteProvider, Position, QuoteProvider,
    NAME, VERSION,
};
use log::{info, warn};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about = "Yield migration advisor for Uniswap LP positions")]
struct Args {
    /// Path to config file (optional)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip live bridge quotes and use static estimates
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one position and print the recommendation
    Analyze(AnalyzeArgs),

    /// Serve POST /analyze over HTTP
    Serve {
        /// Listen address (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    #[arg(long, default_value = "base")]
    chain: String,

    #[arg(long, default_value_t = BASE_CHAIN_ID)]
    chain_id: u64,

    /// Position size in token units
    #[arg(long, default_value = "1000")]
    amount: Decimal,

    #[arg(long, default_value = "USDC")]
    token: String,

    /// Current APY in percent
    #[arg(long, default_value = "8")]
    current_apy: Decimal,

    /// Pair the position sits in (e.g. USDC/ETH)
    #[arg(long)]
    pair: Option<String>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        AnalyzeArgs {
            chain: "base".to_string(),
            chain_id: BASE_CHAIN_ID,
            amount: Decimal::from(1000),
            token: "USDC".to_string(),
            current_apy: Decimal::from(8),
            pair: None,
            json: false,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let cfg = AdvisorConfig::load(args.config.as_deref())?;

    info!("Starting {} v{}", NAME, VERSION);

    let quotes: Arc<dyn QuoteProvider> = if args.offline {
        warn!("Offline mode: cross-chain costs use static estimates");
        Arc::new(MockQuoteProvider::failing("offline mode"))
    } else {
        Arc::new(LifiQuoteProvider::new(&cfg.quote)?)
    };
    info!("✓ Quote provider: {}", quotes.name());

    let advisor = MigrationAdvisor::new(&cfg, quotes)?;
    info!("✓ Pool catalog: {} pools", advisor.catalog().len());

    match args.command {
        Some(Command::Serve { bind }) => {
            let bind = bind.unwrap_or(cfg.server.bind);
            start_server(AppState::new(advisor), &bind).await?;
        }
        Some(Command::Analyze(a)) => run_once(&advisor, a).await?,
        None => run_once(&advisor, AnalyzeArgs::default()).await?,
    }

    Ok(())
}

async fn run_once(advisor: &MigrationAdvisor, a: AnalyzeArgs) -> anyhow::Result<()> {
    let mut position = Position::new(&a.chain, a.chain_id, a.amount, &a.token, a.current_apy);
    if let Some(pair) = a.pair.as_deref() {
        position = position.with_pair(pair);
    }

    info!("Analyzing position: {}", position);
    let result = advisor.analyze(&position).await?;

    if a.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", format_recommendation(&result));

    let cost = &result.migration_cost;
    println!("Summary:");
    println!("  Current APY: {}%", result.current_apy().normalize());
    println!("  Best APY: {}%", result.best_apy().normalize());
    let gap = result.comparison.apy_difference;
    let sign = if gap > Decimal::ZERO { "+" } else { "" };
    println!("  APY Gain: {}{:.1}%", sign, gap);
    println!("  Extra Yearly Earnings: ${:.2}", result.comparison.extra_yearly_earnings);
    println!("  Migration Cost: ${:.2}", cost.total_cost_usd);
    println!("  Breakeven: {}", result.decision.breakeven);

    Ok(())
}
