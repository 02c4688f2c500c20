//! config.rs - Advisor configuration
//!
//! Every section is optional; the defaults reproduce the mock pool, gas and
//! token tables for Base and Arbitrum.

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::decision::MigrationPolicy;
use crate::models::{PoolRecord, Token, ARBITRUM_CHAIN_ID, BASE_CHAIN_ID, MAX_APY_PERCENT};

/// Highest gas price accepted from configuration
pub const MAX_GWEI: u64 = 1_000_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerCfg {
    pub bind: String,
}

impl Default for ServerCfg {
    fn default() -> Self {
        ServerCfg {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuoteCfg {
    pub base_url: String,
    pub integrator: String,
    pub timeout_secs: u64,
    /// Sender used for quote requests; quotes never execute
    pub from_address: String,
}

impl Default for QuoteCfg {
    fn default() -> Self {
        QuoteCfg {
            base_url: "https://li.quest/v1".to_string(),
            integrator: "hopyield".to_string(),
            timeout_secs: 5,
            from_address: "0x0000000000000000000000000000000000000001".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChainGasPrice {
    pub chain_id: u64,
    pub gwei: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GasCfg {
    pub eth_price_usd: Decimal,
    /// Gas used by a typical swap/LP operation
    pub typical_gas_units: u64,
    /// Used for chains missing from `chains`
    pub default_gwei: Decimal,
    pub chains: Vec<ChainGasPrice>,
}

impl Default for GasCfg {
    fn default() -> Self {
        GasCfg {
            eth_price_usd: Decimal::from(3000),
            typical_gas_units: 200_000,
            default_gwei: Decimal::ONE,
            chains: vec![
                ChainGasPrice { chain_id: BASE_CHAIN_ID, gwei: Decimal::new(1, 2) },
                ChainGasPrice { chain_id: ARBITRUM_CHAIN_ID, gwei: Decimal::new(1, 1) },
            ],
        }
    }
}

impl GasCfg {
    pub fn validate(&self) -> Result<()> {
        let max = Decimal::from(MAX_GWEI);
        let prices = std::iter::once(("default_gwei".to_string(), self.default_gwei))
            .chain(self.chains.iter().map(|c| (format!("chain {} gwei", c.chain_id), c.gwei)));

        for (name, gwei) in prices {
            if gwei < Decimal::ZERO || gwei > max {
                bail!("gas: {} must be between 0 and {}, got {}", name, MAX_GWEI, gwei);
            }
        }
        if self.eth_price_usd < Decimal::ZERO {
            bail!("gas: eth_price_usd must not be negative, got {}", self.eth_price_usd);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Flat bridge fee used when no live quote is available
    pub fallback_bridge_fee_usd: Decimal,
    pub server: ServerCfg,
    pub quote: QuoteCfg,
    pub policy: MigrationPolicy,
    pub gas: GasCfg,
    pub pools: Vec<PoolRecord>,
    pub tokens: Vec<Token>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            fallback_bridge_fee_usd: Decimal::new(5, 1),
            server: ServerCfg::default(),
            quote: QuoteCfg::default(),
            policy: MigrationPolicy::default(),
            gas: GasCfg::default(),
            pools: default_pools(),
            tokens: default_tokens(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        Self::from_toml(&s)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse advisor config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the cost and yield arithmetic cannot use
    pub fn validate(&self) -> Result<()> {
        self.gas.validate()?;

        if self.fallback_bridge_fee_usd < Decimal::ZERO {
            bail!("fallback_bridge_fee_usd must not be negative, got {}", self.fallback_bridge_fee_usd);
        }
        for pool in &self.pools {
            if pool.apy < Decimal::ZERO || pool.apy > Decimal::from(MAX_APY_PERCENT) {
                bail!("pool {}: apy must be between 0 and {}, got {}", pool.full_id(), MAX_APY_PERCENT, pool.apy);
            }
        }
        Ok(())
    }

    /// Load from `path` when given, otherwise use the built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

/// Uniswap V3 pools on Base and Arbitrum
pub fn default_pools() -> Vec<PoolRecord> {
    vec![
        PoolRecord::new("base", BASE_CHAIN_ID, "Uniswap V3", "USDC/ETH", Decimal::from(8), Decimal::from(5_000_000), 3),
        PoolRecord::new("arbitrum", ARBITRUM_CHAIN_ID, "Uniswap V3", "USDC/ETH", Decimal::from(12), Decimal::from(3_000_000), 4),
        PoolRecord::new("base", BASE_CHAIN_ID, "Uniswap V3", "USDC/DAI", Decimal::from(6), Decimal::from(8_000_000), 2),
        PoolRecord::new("arbitrum", ARBITRUM_CHAIN_ID, "Uniswap V3", "USDC/DAI", Decimal::from(9), Decimal::from(6_000_000), 3),
    ]
}

/// Mainnet USDC and WETH contracts
pub fn default_tokens() -> Vec<Token> {
    vec![
        Token::new(BASE_CHAIN_ID, "USDC", 6, "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
        Token::new(BASE_CHAIN_ID, "WETH", 18, "0x4200000000000000000000000000000000000006"),
        Token::new(ARBITRUM_CHAIN_ID, "USDC", 6, "0xaf88d065e77c8cC2239327C5EDb3A432268e5831"),
        Token::new(ARBITRUM_CHAIN_ID, "WETH", 18, "0x82aF49447D8a07e3bd95BD0d56f35241523fBab1"),
    ]
}
