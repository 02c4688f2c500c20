//! gas.rs - Mock gas prices and USD cost of a typical operation

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::config::GasCfg;
use crate::models::GasEstimate;

const WEI_PER_GWEI: u64 = 1_000_000_000;
const WEI_PER_ETH: u64 = 1_000_000_000_000_000_000;

/// Converts per-chain gas prices into USD transaction costs
#[derive(Debug, Clone)]
pub struct GasEstimator {
    prices_gwei: HashMap<u64, Decimal>,
    default_gwei: Decimal,
    eth_price_usd: Decimal,
    typical_gas_units: u64,
}

impl GasEstimator {
    pub fn new(cfg: &GasCfg) -> Self {
        GasEstimator {
            prices_gwei: cfg.chains.iter().map(|c| (c.chain_id, c.gwei)).collect(),
            default_gwei: cfg.default_gwei,
            eth_price_usd: cfg.eth_price_usd,
            typical_gas_units: cfg.typical_gas_units,
        }
    }

    /// Gas estimate for `chain_id`; unknown chains use the default price
    pub fn estimate(&self, chain_id: u64) -> GasEstimate {
        let gas_price_gwei = self
            .prices_gwei
            .get(&chain_id)
            .copied()
            .unwrap_or(self.default_gwei);

        let gas_price_wei = gas_price_gwei.saturating_mul(Decimal::from(WEI_PER_GWEI)).floor();

        let tx_cost_wei = gas_price_wei.saturating_mul(Decimal::from(self.typical_gas_units));
        let tx_cost_eth = tx_cost_wei / Decimal::from(WEI_PER_ETH);

        GasEstimate {
            chain_id,
            gas_price_wei,
            gas_price_gwei,
            estimated_tx_cost_usd: tx_cost_eth.saturating_mul(self.eth_price_usd),
        }
    }

    pub fn estimate_many(&self, chain_ids: &[u64]) -> HashMap<u64, GasEstimate> {
        chain_ids
            .iter()
            .map(|&id| (id, self.estimate(id)))
            .collect()
    }
}

impl Default for GasEstimator {
    fn default() -> Self {
        Self::new(&GasCfg::default())
    }
}
