//! comparator.rs - Compares a position's yield against the pool catalog

use log::debug;

use crate::catalog::PoolCatalog;
use crate::decision::extra_yearly_earnings;
use crate::models::{Position, YieldComparison};

/// Find the best pool for `position` and the yield it would add
pub fn compare_yields(position: &Position, catalog: &PoolCatalog) -> YieldComparison {
    let current_pool = catalog
        .find_current(position.chain_id, position.pair.as_deref(), position.current_apy)
        .cloned();

    let best_pool = catalog.best().clone();
    let best_uniswap_pool = catalog.best_uniswap(None).cloned();

    let has_better_non_uniswap = match &best_uniswap_pool {
        Some(uni) => best_pool.apy > uni.apy,
        None => true,
    };

    let apy_difference = best_pool.apy.saturating_sub(position.current_apy);
    let extra_yearly_earnings = extra_yearly_earnings(position.amount, apy_difference);

    debug!(
        "Best pool {} ({}% vs current {}%), extra yearly ${}",
        best_pool.full_id(),
        best_pool.apy,
        position.current_apy,
        extra_yearly_earnings
    );

    YieldComparison {
        current_pool,
        best_pool,
        best_uniswap_pool,
        has_better_non_uniswap,
        apy_difference,
        extra_yearly_earnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_pools;
    use crate::models::{PoolRecord, ARBITRUM_CHAIN_ID, BASE_CHAIN_ID};
    use rust_decimal_macros::dec;

    fn catalog() -> PoolCatalog {
        PoolCatalog::new(default_pools()).unwrap()
    }

    #[test]
    fn test_base_position_finds_arbitrum() {
        let position = Position::new("base", BASE_CHAIN_ID, dec!(1000), "USDC", dec!(8));
        let cmp = compare_yields(&position, &catalog());

        assert_eq!(cmp.best_pool.chain_id, ARBITRUM_CHAIN_ID);
        assert_eq!(cmp.apy_difference, dec!(4));
        assert_eq!(cmp.extra_yearly_earnings, dec!(40));
        assert_eq!(cmp.current_pool.as_ref().map(|p| p.pair.as_str()), Some("USDC/ETH"));
        assert!(!cmp.has_better_non_uniswap);
    }

    #[test]
    fn test_negative_gap() {
        let position = Position::new("arbitrum", ARBITRUM_CHAIN_ID, dec!(500), "USDC", dec!(15));
        let cmp = compare_yields(&position, &catalog());

        assert_eq!(cmp.apy_difference, dec!(-3));
        assert_eq!(cmp.extra_yearly_earnings, dec!(-15));
        assert!(cmp.current_pool.is_none());
    }

    #[test]
    fn test_non_uniswap_leader() {
        let mut pools = default_pools();
        pools.push(PoolRecord::new("base", BASE_CHAIN_ID, "Aerodrome", "USDC/ETH", dec!(20), dec!(900000), 6));
        let catalog = PoolCatalog::new(pools).unwrap();

        let position = Position::new("base", BASE_CHAIN_ID, dec!(1000), "USDC", dec!(8));
        let cmp = compare_yields(&position, &catalog);

        assert_eq!(cmp.best_pool.protocol, "Aerodrome");
        assert_eq!(cmp.best_uniswap_pool.unwrap().apy, dec!(12));
        assert!(cmp.has_better_non_uniswap);
    }
}
