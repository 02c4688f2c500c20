//! report.rs - Human-readable recommendation text

use rust_decimal::Decimal;

use crate::models::{AnalysisResult, MigrationCost, MigrationDecision, Position, YieldComparison};

const SEPARATOR_WIDTH: usize = 50;

pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{} seconds", seconds);
    }
    if seconds < 3600 {
        return format!("{} minutes", (seconds + 30) / 60);
    }
    format!("{:.1} hours", Decimal::from(seconds) / Decimal::from(3600))
}

/// Multi-line explanation of one analysis
pub fn build_reasoning(
    position: &Position,
    comparison: &YieldComparison,
    cost: &MigrationCost,
    decision: &MigrationDecision,
) -> String {
    let best = &comparison.best_pool;
    let gaining = comparison.apy_difference > Decimal::ZERO;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "Current Position: ${} {} on {} @ {}% APY",
        position.amount.normalize(),
        position.token,
        position.chain,
        position.current_apy.normalize()
    ));
    lines.push(String::new());

    if gaining {
        lines.push(format!("Best Opportunity Found: {} {} on {}", best.protocol, best.pair, best.chain));
        lines.push(format!("  APY: {}% (+{:.1}%)", best.apy.normalize(), comparison.apy_difference));
        lines.push(format!("  TVL: ${:.1}M", best.tvl / Decimal::from(1_000_000)));
        lines.push(format!("  Risk Score: {}/10", best.risk_score));
        lines.push(String::new());
    } else {
        lines.push("You already have the best available yield.".to_string());
        lines.push(String::new());
    }

    if gaining && position.chain_id != best.chain_id {
        lines.push("Migration Cost Breakdown:".to_string());
        lines.push(format!("  Bridge Fee: ${:.2}", cost.bridge_fee_usd));
        lines.push(format!("  Gas Cost: ${:.2}", cost.gas_cost_usd));
        lines.push(format!("  Total: ${:.2}", cost.total_cost_usd));
        lines.push(format!("  Estimated Time: {}", format_duration(cost.estimated_time)));
        lines.push(String::new());
    }

    if gaining {
        lines.push("Financial Analysis:".to_string());
        lines.push(format!("  Extra Yearly Earnings: ${:.2}", comparison.extra_yearly_earnings));
        lines.push(format!("  Breakeven Period: {}", decision.breakeven));
        lines.push(String::new());
    }

    if comparison.has_better_non_uniswap {
        lines.push(format!("Note: {} is not a Uniswap pool.", best.full_id()));
        lines.push(String::new());
    }

    lines.push(format!("Decision: {}", decision.reason));
    lines.join("\n")
}

/// Banner-framed recommendation for terminal output
pub fn format_recommendation(result: &AnalysisResult) -> String {
    let separator = "═".repeat(SEPARATOR_WIDTH);
    format!(
        "\n{sep}\nRECOMMENDATION: {action}\n{sep}\n\n{reasoning}\n\n{sep}\n",
        sep = separator,
        action = result.action,
        reasoning = result.reasoning
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Breakeven, PoolRecord, ARBITRUM_CHAIN_ID, BASE_CHAIN_ID};
    use rust_decimal_macros::dec;

    fn comparison(current_apy: Decimal) -> YieldComparison {
        let best = PoolRecord::new("arbitrum", ARBITRUM_CHAIN_ID, "Uniswap V3", "USDC/ETH", dec!(12), dec!(3000000), 4);
        YieldComparison {
            current_pool: None,
            best_uniswap_pool: Some(best.clone()),
            has_better_non_uniswap: false,
            apy_difference: best.apy - current_apy,
            extra_yearly_earnings: dec!(1000) * (best.apy - current_apy) / dec!(100),
            best_pool: best,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30), "30 seconds");
        assert_eq!(format_duration(300), "5 minutes");
        assert_eq!(format_duration(90), "2 minutes");
        assert_eq!(format_duration(5400), "1.5 hours");
    }

    #[test]
    fn test_cross_chain_reasoning() {
        let position = Position::new("base", BASE_CHAIN_ID, dec!(1000), "USDC", dec!(8));
        let cost = MigrationCost::new(dec!(2), dec!(0.5), 300);
        let decision = MigrationDecision {
            migrate: true,
            reason: "Migration pays off in 22.8 days. Extra yearly earnings: $40.00".to_string(),
            breakeven: Breakeven::Days(dec!(22.8125)),
        };

        let text = build_reasoning(&position, &comparison(dec!(8)), &cost, &decision);

        assert!(text.starts_with("Current Position: $1000 USDC on base @ 8% APY"));
        assert!(text.contains("Best Opportunity Found: Uniswap V3 USDC/ETH on arbitrum"));
        assert!(text.contains("  APY: 12% (+4.0%)"));
        assert!(text.contains("  TVL: $3.0M"));
        assert!(text.contains("  Total: $2.50"));
        assert!(text.contains("  Estimated Time: 5 minutes"));
        assert!(text.contains("  Breakeven Period: 22.8 days"));
        assert!(text.ends_with("Decision: Migration pays off in 22.8 days. Extra yearly earnings: $40.00"));
    }

    #[test]
    fn test_optimal_reasoning_omits_costs() {
        let position = Position::new("arbitrum", ARBITRUM_CHAIN_ID, dec!(1000), "USDC", dec!(12));
        let cost = MigrationCost::new(dec!(0), dec!(0.06), 30);
        let decision = MigrationDecision {
            migrate: false,
            reason: "Current position is already optimal: no pool offers a higher APY".to_string(),
            breakeven: Breakeven::Never,
        };

        let text = build_reasoning(&position, &comparison(dec!(12)), &cost, &decision);

        assert!(text.contains("You already have the best available yield."));
        assert!(!text.contains("Migration Cost Breakdown"));
        assert!(!text.contains("Financial Analysis"));
    }
}
