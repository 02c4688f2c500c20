//! advisor.rs - One analysis: compare yields, estimate cost, decide

use log::info;
use std::sync::Arc;

use crate::catalog::{CatalogError, PoolCatalog};
use crate::comparator::compare_yields;
use crate::config::AdvisorConfig;
use crate::cost::MigrationCostEstimator;
use crate::decision::MigrationPolicy;
use crate::models::{Action, AnalysisResult, Position, PositionError};
use crate::quote::QuoteProvider;
use crate::report::build_reasoning;

pub struct MigrationAdvisor {
    catalog: PoolCatalog,
    costs: MigrationCostEstimator,
    policy: MigrationPolicy,
}

impl MigrationAdvisor {
    pub fn new(cfg: &AdvisorConfig, quotes: Arc<dyn QuoteProvider>) -> Result<Self, CatalogError> {
        Ok(MigrationAdvisor {
            catalog: PoolCatalog::new(cfg.pools.clone())?,
            costs: MigrationCostEstimator::new(cfg, quotes),
            policy: cfg.policy.clone(),
        })
    }

    pub fn catalog(&self) -> &PoolCatalog {
        &self.catalog
    }

    pub async fn analyze(&self, position: &Position) -> Result<AnalysisResult, PositionError> {
        position.validate()?;

        let comparison = compare_yields(position, &self.catalog);

        let migration_cost = self
            .costs
            .estimate(
                position.chain_id,
                comparison.best_pool.chain_id,
                position.amount,
                Some(position.token.as_str()),
            )
            .await;

        let decision = self.policy.should_migrate(
            position.current_apy,
            comparison.best_pool.apy,
            &migration_cost,
            position.amount,
        );

        let action = Action::from(&decision);
        let reasoning = build_reasoning(position, &comparison, &migration_cost, &decision);

        info!(
            "{} -> {}: {} ({})",
            position,
            comparison.best_pool,
            action,
            decision.breakeven
        );

        Ok(AnalysisResult {
            action,
            reasoning,
            position: position.clone(),
            comparison,
            migration_cost,
            decision,
            timestamp: chrono::Utc::now(),
        })
    }
}
