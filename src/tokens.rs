//! tokens.rs - Per-chain token contract lookup

use rust_decimal::Decimal;

use crate::models::Token;

/// Token contracts keyed by chain and symbol
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
}

impl TokenRegistry {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenRegistry { tokens }
    }

    pub fn supports_chain(&self, chain_id: u64) -> bool {
        self.tokens.iter().any(|t| t.chain_id == chain_id)
    }

    /// Symbol match is case-insensitive ("usdc" finds USDC)
    pub fn get(&self, chain_id: u64, symbol: &str) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.chain_id == chain_id && t.symbol.eq_ignore_ascii_case(symbol))
    }
}

/// Base units of `amount` for a token with `decimals` places, truncated
pub fn to_base_units(amount: Decimal, decimals: u8) -> Option<String> {
    let scale = (0..decimals).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(Decimal::TEN))?;
    let units = amount.checked_mul(scale)?.trunc();
    if units.is_sign_negative() {
        return None;
    }
    Some(units.normalize().to_string())
}
