//! HopYield Migration Advisor
//!
//! Recommends whether a liquidity position should move to a higher-yielding
//! pool once migration cost and payback period are accounted for.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │            CLI (run once)  /  POST /analyze          │
//! └────────────────────────┬────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                  MigrationAdvisor                    │
//! │  1. compare_yields(position, catalog)                │
//! │  2. MigrationCostEstimator::estimate()               │
//! │  3. MigrationPolicy::should_migrate()                │
//! └────────────────────────┬────────────────────────────┘
//!                          │
//!          ┌───────────────┴───────────────┐
//!          │                               │
//!          ▼                               ▼
//! ┌─────────────────┐           ┌─────────────────────┐
//! │  GasEstimator   │           │  QuoteProvider      │
//! │  (mock prices)  │           │  LI.FI / Mock       │
//! └─────────────────┘           └─────────────────────┘
//! ```

pub mod advisor;
pub mod api;
pub mod catalog;
pub mod comparator;
pub mod config;
pub mod cost;
pub mod decision;
pub mod gas;
pub mod models;
pub mod quote;
pub mod report;
pub mod tokens;

// Re-export commonly used types
pub use models::{
    Action,
    AnalysisResult,
    Breakeven,
    GasEstimate,
    MigrationCost,
    MigrationDecision,
    PoolRecord,
    Position,
    Token,
    YieldComparison,
};

pub use advisor::MigrationAdvisor;
pub use config::AdvisorConfig;
pub use decision::{should_migrate, MigrationPolicy};
pub use quote::{LifiQuoteProvider, MockQuoteProvider, QuoteProvider};

/// Version of the advisor
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the package
pub const NAME: &str = env!("CARGO_PKG_NAME");
