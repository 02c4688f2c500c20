//! decision.rs - Breakeven-based migration rule
//!
//! Migrate when the extra yield pays back the migration cost quickly, or
//! when the APY gain is significant and the payback is still reasonable.

use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{Breakeven, MigrationCost, MigrationDecision};

const DAYS_PER_YEAR: u32 = 365;

/// Thresholds of the breakeven rule
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MigrationPolicy {
    /// Any APY gain is worth moving for when the payback is this fast
    pub fast_payback_days: Decimal,
    /// Upper payback bound for significant gains
    pub max_payback_days: Decimal,
    /// APY gap (percentage points) counted as significant
    pub significant_apy_gap: Decimal,
}

impl Default for MigrationPolicy {
    fn default() -> Self {
        MigrationPolicy {
            fast_payback_days: Decimal::from(30),
            max_payback_days: Decimal::from(90),
            significant_apy_gap: Decimal::ONE,
        }
    }
}

/// Extra yearly earnings for moving `amount` across an APY gap.
/// Saturates at the `Decimal` range instead of overflowing.
pub fn extra_yearly_earnings(amount: Decimal, apy_difference: Decimal) -> Decimal {
    amount.saturating_mul(apy_difference) / Decimal::ONE_HUNDRED
}

/// Days of extra yield needed to recover `cost`, `None` when out of range
fn breakeven_days(cost: Decimal, extra_yearly: Decimal) -> Option<Decimal> {
    // cost / (yearly / 365), kept as one division so exact inputs stay exact
    cost.checked_mul(Decimal::from(DAYS_PER_YEAR))?.checked_div(extra_yearly)
}

impl MigrationPolicy {
    /// Decide whether moving from `current_apy` to `best_apy` is worth `cost`
    pub fn should_migrate(
        &self,
        current_apy: Decimal,
        best_apy: Decimal,
        cost: &MigrationCost,
        position_size: Decimal,
    ) -> MigrationDecision {
        let apy_difference = best_apy.saturating_sub(current_apy);

        if apy_difference <= Decimal::ZERO {
            return MigrationDecision {
                migrate: false,
                reason: "Current position is already optimal: no pool offers a higher APY".to_string(),
                breakeven: Breakeven::Never,
            };
        }

        let extra_yearly = extra_yearly_earnings(position_size, apy_difference);
        if extra_yearly <= Decimal::ZERO {
            return MigrationDecision {
                migrate: false,
                reason: "Current position is already optimal: the position earns nothing extra elsewhere".to_string(),
                breakeven: Breakeven::Never,
            };
        }

        let breakeven_days = match breakeven_days(cost.total_cost_usd, extra_yearly) {
            Some(days) => days,
            None => {
                debug!("Breakeven out of range: cost ${}, extra yearly ${}", cost.total_cost_usd, extra_yearly);
                return MigrationDecision {
                    migrate: false,
                    reason: format!(
                        "Extra yearly earnings of ${} never recover the ${:.2} migration cost",
                        extra_yearly.normalize(),
                        cost.total_cost_usd
                    ),
                    breakeven: Breakeven::Never,
                };
            }
        };

        debug!(
            "APY gap {}%, extra yearly ${}, breakeven {} days",
            apy_difference, extra_yearly, breakeven_days
        );

        if breakeven_days <= self.fast_payback_days {
            return MigrationDecision {
                migrate: true,
                reason: format!(
                    "Migration pays off in {:.1} days. Extra yearly earnings: ${:.2}",
                    breakeven_days, extra_yearly
                ),
                breakeven: Breakeven::Days(breakeven_days),
            };
        }

        if apy_difference >= self.significant_apy_gap && breakeven_days <= self.max_payback_days {
            return MigrationDecision {
                migrate: true,
                reason: format!(
                    "Significant APY improvement of {:.1}%. Breakeven in {:.1} days",
                    apy_difference, breakeven_days
                ),
                breakeven: Breakeven::Days(breakeven_days),
            };
        }

        MigrationDecision {
            migrate: false,
            reason: format!(
                "Breakeven period of {:.1} days is too long for {:.1}% APY gain",
                breakeven_days, apy_difference
            ),
            breakeven: Breakeven::Days(breakeven_days),
        }
    }
}

/// Apply the default thresholds (30 days, 90 days, 1% gap)
pub fn should_migrate(
    current_apy: Decimal,
    best_apy: Decimal,
    cost: &MigrationCost,
    position_size: Decimal,
) -> MigrationDecision {
    MigrationPolicy::default().should_migrate(current_apy, best_apy, cost, position_size)
}
