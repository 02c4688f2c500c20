//! catalog.rs - Read-only pool catalog

use crate::models::PoolRecord;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("pool catalog is empty")]
    Empty,
}

/// Non-empty, immutable list of candidate pools
#[derive(Debug, Clone)]
pub struct PoolCatalog {
    pools: Vec<PoolRecord>,
}

/// First pool with the highest APY
fn max_apy<'a>(pools: impl Iterator<Item = &'a PoolRecord>) -> Option<&'a PoolRecord> {
    pools.fold(None, |best, pool| match best {
        Some(b) if pool.apy <= b.apy => Some(b),
        _ => Some(pool),
    })
}

impl PoolCatalog {
    pub fn new(pools: Vec<PoolRecord>) -> Result<Self, CatalogError> {
        if pools.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(PoolCatalog { pools })
    }

    pub fn pools(&self) -> &[PoolRecord] {
        &self.pools
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn by_chain(&self, chain_id: u64) -> Vec<&PoolRecord> {
        self.pools.iter().filter(|p| p.chain_id == chain_id).collect()
    }

    pub fn uniswap_pools(&self) -> Vec<&PoolRecord> {
        self.pools.iter().filter(|p| p.is_uniswap).collect()
    }

    /// Highest-APY pool; ties go to the earliest entry
    pub fn best(&self) -> &PoolRecord {
        // Construction guarantees at least one pool
        max_apy(self.pools.iter()).unwrap_or(&self.pools[0])
    }

    /// Highest-APY pool, optionally skipping one chain
    pub fn best_excluding(&self, exclude_chain_id: Option<u64>) -> Option<&PoolRecord> {
        max_apy(
            self.pools
                .iter()
                .filter(|p| Some(p.chain_id) != exclude_chain_id),
        )
    }

    pub fn best_uniswap(&self, exclude_chain_id: Option<u64>) -> Option<&PoolRecord> {
        max_apy(
            self.pools
                .iter()
                .filter(|p| p.is_uniswap && Some(p.chain_id) != exclude_chain_id),
        )
    }

    /// Pool a position currently sits in: by chain and pair when the pair
    /// is known, otherwise by chain and exact APY
    pub fn find_current(&self, chain_id: u64, pair: Option<&str>, apy: rust_decimal::Decimal) -> Option<&PoolRecord> {
        self.pools.iter().find(|p| {
            p.chain_id == chain_id
                && match pair {
                    Some(pair) => p.pair.eq_ignore_ascii_case(pair),
                    None => p.apy == apy,
                }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_pools;
    use crate::models::{ARBITRUM_CHAIN_ID, BASE_CHAIN_ID};
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(PoolCatalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn test_best_pool() {
        let catalog = PoolCatalog::new(default_pools()).unwrap();
        let best = catalog.best();

        assert_eq!(best.chain_id, ARBITRUM_CHAIN_ID);
        assert_eq!(best.pair, "USDC/ETH");
        assert_eq!(best.apy, dec!(12));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let mut pools = default_pools();
        pools.push(crate::models::PoolRecord::new(
            "base", BASE_CHAIN_ID, "Uniswap V3", "WETH/DAI", dec!(12), dec!(1000), 5,
        ));
        let catalog = PoolCatalog::new(pools).unwrap();

        assert_eq!(catalog.best().chain_id, ARBITRUM_CHAIN_ID);
    }

    #[test]
    fn test_best_excluding_chain() {
        let catalog = PoolCatalog::new(default_pools()).unwrap();

        let best_off_arbitrum = catalog.best_excluding(Some(ARBITRUM_CHAIN_ID)).unwrap();
        assert_eq!(best_off_arbitrum.chain_id, BASE_CHAIN_ID);
        assert_eq!(best_off_arbitrum.apy, dec!(8));

        assert_eq!(catalog.best_uniswap(None).unwrap().apy, dec!(12));
        assert_eq!(catalog.by_chain(BASE_CHAIN_ID).len(), 2);
        assert_eq!(catalog.uniswap_pools().len(), 4);
    }

    #[test]
    fn test_find_current() {
        let catalog = PoolCatalog::new(default_pools()).unwrap();

        let by_apy = catalog.find_current(BASE_CHAIN_ID, None, dec!(8.0)).unwrap();
        assert_eq!(by_apy.pair, "USDC/ETH");

        let by_pair = catalog.find_current(BASE_CHAIN_ID, Some("usdc/dai"), dec!(5.7)).unwrap();
        assert_eq!(by_pair.apy, dec!(6));

        assert!(catalog.find_current(BASE_CHAIN_ID, None, dec!(7)).is_none());
    }
}
