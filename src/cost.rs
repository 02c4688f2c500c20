//! cost.rs - Migration cost estimation
//!
//! Same-chain moves cost one swap's gas. Cross-chain moves use a live
//! bridge quote and fall back to a flat bridge fee plus gas on both chains
//! whenever the quote cannot be obtained.

use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AdvisorConfig;
use crate::gas::GasEstimator;
use crate::models::MigrationCost;
use crate::quote::{QuoteError, QuoteProvider, QuoteRequest};
use crate::tokens::{to_base_units, TokenRegistry};

/// Seconds for a same-chain swap
pub const SAME_CHAIN_DURATION_SECS: u64 = 30;

/// Seconds assumed for a bridge transfer
pub const DEFAULT_BRIDGE_DURATION_SECS: u64 = 300;

pub const DEFAULT_TOKEN: &str = "USDC";

pub struct MigrationCostEstimator {
    gas: GasEstimator,
    tokens: TokenRegistry,
    quotes: Arc<dyn QuoteProvider>,
    fallback_bridge_fee_usd: Decimal,
    from_address: String,
    quote_timeout: Duration,
}

impl MigrationCostEstimator {
    pub fn new(cfg: &AdvisorConfig, quotes: Arc<dyn QuoteProvider>) -> Self {
        MigrationCostEstimator {
            gas: GasEstimator::new(&cfg.gas),
            tokens: TokenRegistry::new(cfg.tokens.clone()),
            quotes,
            fallback_bridge_fee_usd: cfg.fallback_bridge_fee_usd,
            from_address: cfg.quote.from_address.clone(),
            quote_timeout: Duration::from_secs(cfg.quote.timeout_secs),
        }
    }

    pub fn with_quote_timeout(mut self, timeout: Duration) -> Self {
        self.quote_timeout = timeout;
        self
    }

    /// Cost of moving `amount` of `token` from one chain to another.
    /// Never fails: quote problems fall back to static estimates.
    pub async fn estimate(
        &self,
        from_chain_id: u64,
        to_chain_id: u64,
        amount: Decimal,
        token: Option<&str>,
    ) -> MigrationCost {
        let token = token.unwrap_or(DEFAULT_TOKEN);

        if from_chain_id == to_chain_id {
            let gas = self.gas.estimate(from_chain_id);
            debug!("Same-chain move on {}: ${} gas", from_chain_id, gas.estimated_tx_cost_usd);
            return MigrationCost::new(Decimal::ZERO, gas.estimated_tx_cost_usd, SAME_CHAIN_DURATION_SECS);
        }

        match self.live_quote(from_chain_id, to_chain_id, amount, token).await {
            Ok(cost) => {
                info!(
                    "Quote {} -> {} via {}: ${} total",
                    from_chain_id,
                    to_chain_id,
                    self.quotes.name(),
                    cost.total_cost_usd
                );
                cost
            }
            Err(e) => {
                warn!("Quote failed, using estimates: {}", e);
                self.fallback(from_chain_id, to_chain_id)
            }
        }
    }

    async fn live_quote(
        &self,
        from_chain_id: u64,
        to_chain_id: u64,
        amount: Decimal,
        token: &str,
    ) -> Result<MigrationCost, QuoteError> {
        for chain_id in [from_chain_id, to_chain_id] {
            if !self.tokens.supports_chain(chain_id) {
                return Err(QuoteError::UnsupportedChain(chain_id));
            }
        }

        let from_token = self.tokens.get(from_chain_id, token).ok_or_else(|| QuoteError::UnsupportedToken {
            token: token.to_string(),
            chain_id: from_chain_id,
        })?;
        let to_token = self.tokens.get(to_chain_id, token).ok_or_else(|| QuoteError::UnsupportedToken {
            token: token.to_string(),
            chain_id: to_chain_id,
        })?;

        let from_amount = to_base_units(amount, from_token.decimals)
            .ok_or_else(|| QuoteError::InvalidAmount(amount.to_string()))?;

        let request = QuoteRequest {
            from_chain_id,
            to_chain_id,
            from_token: from_token.address.clone(),
            to_token: to_token.address.clone(),
            from_amount,
            from_address: self.from_address.clone(),
        };

        let estimate = tokio::time::timeout(self.quote_timeout, self.quotes.get_quote(&request))
            .await
            .map_err(|_| QuoteError::Timeout(self.quote_timeout.as_secs()))??;

        Ok(MigrationCost::new(
            estimate.fee_cost_usd,
            estimate.gas_cost_usd,
            estimate.execution_duration.unwrap_or(DEFAULT_BRIDGE_DURATION_SECS),
        ))
    }

    /// Flat bridge fee plus gas on both chains
    pub fn fallback(&self, from_chain_id: u64, to_chain_id: u64) -> MigrationCost {
        let source = self.gas.estimate(from_chain_id);
        let dest = self.gas.estimate(to_chain_id);

        MigrationCost::new(
            self.fallback_bridge_fee_usd,
            source.estimated_tx_cost_usd + dest.estimated_tx_cost_usd,
            DEFAULT_BRIDGE_DURATION_SECS,
        )
    }
}
