//! models.rs - Core data structures for the migration advisor
//!
//! Defines Position, PoolRecord, Token, GasEstimate, MigrationCost and the
//! decision/analysis outputs

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Base mainnet chain id
pub const BASE_CHAIN_ID: u64 = 8453;

/// Arbitrum One chain id
pub const ARBITRUM_CHAIN_ID: u64 = 42161;

/// Largest accepted position size, in token units
pub const MAX_POSITION_AMOUNT: u64 = 1_000_000_000_000_000_000;

/// Largest accepted APY, in percent
pub const MAX_APY_PERCENT: u64 = 100_000;

/// A user's current liquidity position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub chain: String,
    pub chain_id: u64,
    pub amount: Decimal,
    pub token: String,
    #[serde(rename = "currentAPY")]
    pub current_apy: Decimal,
    /// Pair label of the pool the position sits in, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
}

impl Position {
    pub fn new(chain: &str, chain_id: u64, amount: Decimal, token: &str, current_apy: Decimal) -> Self {
        Position {
            chain: chain.to_string(),
            chain_id,
            amount,
            token: token.to_string(),
            current_apy,
            pair: None,
        }
    }

    pub fn with_pair(mut self, pair: &str) -> Self {
        self.pair = Some(pair.to_string());
        self
    }

    /// Check the caller-supplied fields before an analysis
    pub fn validate(&self) -> Result<(), PositionError> {
        if self.amount <= Decimal::ZERO {
            return Err(PositionError::NonPositiveAmount(self.amount));
        }
        if self.amount > Decimal::from(MAX_POSITION_AMOUNT) {
            return Err(PositionError::AmountTooLarge(self.amount));
        }
        if self.current_apy < Decimal::ZERO {
            return Err(PositionError::NegativeApy(self.current_apy));
        }
        if self.current_apy > Decimal::from(MAX_APY_PERCENT) {
            return Err(PositionError::ApyTooLarge(self.current_apy));
        }
        if self.token.trim().is_empty() {
            return Err(PositionError::MissingToken);
        }
        Ok(())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {} @ {}% APY",
            self.amount,
            self.token,
            self.chain,
            self.current_apy
        )
    }
}

/// Validation failures for a caller-supplied position
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PositionError {
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("amount must not exceed {max}, got {0}", max = MAX_POSITION_AMOUNT)]
    AmountTooLarge(Decimal),

    #[error("currentAPY must not be negative, got {0}")]
    NegativeApy(Decimal),

    #[error("currentAPY must not exceed {max}%, got {0}", max = MAX_APY_PERCENT)]
    ApyTooLarge(Decimal),

    #[error("token symbol is required")]
    MissingToken,
}

/// A liquidity pool from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoolRecord {
    pub chain: String,
    #[serde(alias = "chain_id")]
    pub chain_id: u64,
    pub protocol: String,
    pub pair: String,
    pub apy: Decimal,
    pub tvl: Decimal,
    /// 1-10, lower is safer
    #[serde(alias = "risk_score")]
    pub risk_score: u8,
    #[serde(default, alias = "is_uniswap")]
    pub is_uniswap: bool,
}

impl PoolRecord {
    pub fn new(
        chain: &str,
        chain_id: u64,
        protocol: &str,
        pair: &str,
        apy: Decimal,
        tvl: Decimal,
        risk_score: u8,
    ) -> Self {
        PoolRecord {
            chain: chain.to_string(),
            chain_id,
            protocol: protocol.to_string(),
            pair: pair.to_string(),
            apy,
            tvl,
            risk_score,
            is_uniswap: protocol.starts_with("Uniswap"),
        }
    }

    /// Returns full identifier including chain (e.g., "arbitrum:Uniswap V3:USDC/ETH")
    pub fn full_id(&self) -> String {
        format!("{}:{}:{}", self.chain, self.protocol, self.pair)
    }
}

impl fmt::Display for PoolRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {} @ {}%",
            self.protocol,
            self.pair,
            self.chain,
            self.apy
        )
    }
}

/// Represents a token contract on a given chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Token {
    pub chain_id: u64,
    pub symbol: String,
    pub decimals: u8,
    pub address: String,
}

impl Token {
    pub fn new(chain_id: u64, symbol: &str, decimals: u8, address: &str) -> Self {
        Token {
            chain_id,
            symbol: symbol.to_string(),
            decimals,
            address: address.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Gas price and typical transaction cost for one chain
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimate {
    pub chain_id: u64,
    /// Whole wei
    pub gas_price_wei: Decimal,
    pub gas_price_gwei: Decimal,
    pub estimated_tx_cost_usd: Decimal,
}

/// Cost and duration of moving a position to another pool
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrationCost {
    pub bridge_fee_usd: Decimal,
    pub gas_cost_usd: Decimal,
    pub total_cost_usd: Decimal,
    /// Seconds
    pub estimated_time: u64,
}

impl MigrationCost {
    pub fn new(bridge_fee_usd: Decimal, gas_cost_usd: Decimal, estimated_time: u64) -> Self {
        MigrationCost {
            bridge_fee_usd,
            gas_cost_usd,
            total_cost_usd: bridge_fee_usd + gas_cost_usd,
            estimated_time,
        }
    }
}

/// Days needed for the extra yield to pay back the migration cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakeven {
    Days(Decimal),
    /// No APY gain, the cost is never recovered
    Never,
}

impl Breakeven {
    pub fn days(&self) -> Option<Decimal> {
        match self {
            Breakeven::Days(days) => Some(*days),
            Breakeven::Never => None,
        }
    }

    /// Wire form: days rounded to one decimal, or -1 for never
    pub fn to_wire(&self) -> Decimal {
        match self {
            Breakeven::Days(days) => days.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            Breakeven::Never => Decimal::NEGATIVE_ONE,
        }
    }
}

impl Serialize for Breakeven {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_wire(), serializer)
    }
}

impl fmt::Display for Breakeven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breakeven::Days(days) => write!(f, "{:.1} days", days),
            Breakeven::Never => write!(f, "N/A"),
        }
    }
}

/// Outcome of the breakeven rule
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MigrationDecision {
    pub migrate: bool,
    pub reason: String,
    pub breakeven: Breakeven,
}

/// Recommended action for a position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Migrate,
    Stay,
}

impl From<&MigrationDecision> for Action {
    fn from(decision: &MigrationDecision) -> Self {
        if decision.migrate {
            Action::Migrate
        } else {
            Action::Stay
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Migrate => write!(f, "MIGRATE"),
            Action::Stay => write!(f, "STAY"),
        }
    }
}

/// Yield comparison of a position against the pool catalog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldComparison {
    pub current_pool: Option<PoolRecord>,
    pub best_pool: PoolRecord,
    pub best_uniswap_pool: Option<PoolRecord>,
    /// A non-Uniswap pool beats every Uniswap pool
    pub has_better_non_uniswap: bool,
    pub apy_difference: Decimal,
    pub extra_yearly_earnings: Decimal,
}

/// Full result of one analysis
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub action: Action,
    pub reasoning: String,
    pub position: Position,
    pub comparison: YieldComparison,
    pub migration_cost: MigrationCost,
    pub decision: MigrationDecision,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl AnalysisResult {
    pub fn current_apy(&self) -> Decimal {
        self.position.current_apy
    }

    pub fn best_apy(&self) -> Decimal {
        self.comparison.best_pool.apy
    }

    pub fn is_cross_chain(&self) -> bool {
        self.position.chain_id != self.comparison.best_pool.chain_id
    }
}
