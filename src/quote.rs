//! quote.rs - Bridge quote providers for the migration cost estimator
//!
//! Live quotes come from the LI.FI REST API. Failures are returned as a
//! typed `QuoteError` so callers can fall back to static estimates.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::config::QuoteCfg;

/// Parameters of a cross-chain transfer quote
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub from_chain_id: u64,
    pub to_chain_id: u64,
    pub from_token: String,
    pub to_token: String,
    /// Amount in the source token's base units
    pub from_amount: String,
    pub from_address: String,
}

/// Cost and duration estimate returned by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteEstimate {
    pub gas_cost_usd: Decimal,
    pub fee_cost_usd: Decimal,
    /// Seconds; None when the provider did not say
    pub execution_duration: Option<u64>,
    /// Bridge or exchange the route goes through
    pub tool: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("unsupported chain: {0}")]
    UnsupportedChain(u64),

    #[error("token {token} not supported on chain {chain_id}")]
    UnsupportedToken { token: String, chain_id: u64 },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("quote request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quote service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed quote response: {0}")]
    Decode(String),

    #[error("quote timed out after {0}s")]
    Timeout(u64),

    #[error("quote service unavailable: {0}")]
    Unavailable(String),
}

/// Trait defining the interface for quote providers
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Quote moving tokens between chains
    async fn get_quote(&self, request: &QuoteRequest) -> Result<QuoteEstimate, QuoteError>;
}

// ============================================================================
// LI.FI API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct LifiQuoteResponse {
    estimate: LifiEstimate,

    #[serde(default)]
    tool: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LifiEstimate {
    #[serde(default)]
    gas_costs: Vec<LifiCost>,

    #[serde(default)]
    fee_costs: Vec<LifiCost>,

    execution_duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LifiCost {
    #[serde(rename = "amountUSD")]
    amount_usd: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LifiErrorBody {
    message: Option<String>,
}

/// USD amount of the first cost entry, zero when absent
fn first_cost_usd(costs: &[LifiCost]) -> Result<Decimal, QuoteError> {
    match costs.first().and_then(|c| c.amount_usd.as_deref()) {
        Some(raw) => Decimal::from_str(raw)
            .map_err(|e| QuoteError::Decode(format!("amountUSD '{}': {}", raw, e))),
        None => Ok(Decimal::ZERO),
    }
}

impl TryFrom<LifiQuoteResponse> for QuoteEstimate {
    type Error = QuoteError;

    fn try_from(data: LifiQuoteResponse) -> Result<Self, Self::Error> {
        let gas_cost_usd = first_cost_usd(&data.estimate.gas_costs)?;
        let fee_cost_usd = first_cost_usd(&data.estimate.fee_costs)?;

        if gas_cost_usd.checked_add(fee_cost_usd).is_none() {
            return Err(QuoteError::Decode(format!(
                "costs out of range: gas {} fee {}",
                gas_cost_usd, fee_cost_usd
            )));
        }

        let execution_duration = data
            .estimate
            .execution_duration
            .filter(|d| d.is_finite() && *d >= 0.0)
            .map(|d| d.round() as u64);

        Ok(QuoteEstimate {
            gas_cost_usd,
            fee_cost_usd,
            execution_duration,
            tool: data.tool,
        })
    }
}

/// Error for a non-2xx reply; prefers the JSON `message` over the raw body
fn status_error(status: u16, body: String) -> QuoteError {
    let message = serde_json::from_str::<LifiErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or(body);
    QuoteError::Status { status, message }
}

fn parse_quote_body(body: &str) -> Result<QuoteEstimate, QuoteError> {
    let data: LifiQuoteResponse = serde_json::from_str(body).map_err(|e| QuoteError::Decode(e.to_string()))?;
    QuoteEstimate::try_from(data)
}

// ============================================================================
// LifiQuoteProvider - Live quotes from the LI.FI API
// ============================================================================

/// Live quote provider backed by `GET {base_url}/quote`
#[derive(Debug, Clone)]
pub struct LifiQuoteProvider {
    client: Client,
    base_url: String,
    integrator: String,
}

impl LifiQuoteProvider {
    pub fn new(cfg: &QuoteCfg) -> Result<Self, QuoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(LifiQuoteProvider {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            integrator: cfg.integrator.clone(),
        })
    }
}

#[async_trait]
impl QuoteProvider for LifiQuoteProvider {
    fn name(&self) -> &str {
        "li.fi"
    }

    async fn get_quote(&self, request: &QuoteRequest) -> Result<QuoteEstimate, QuoteError> {
        let url = format!("{}/quote", self.base_url);
        debug!("Getting quote: {} -> {}", request.from_chain_id, request.to_chain_id);

        let from_chain = request.from_chain_id.to_string();
        let to_chain = request.to_chain_id.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("fromChain", from_chain.as_str()),
                ("toChain", to_chain.as_str()),
                ("fromToken", request.from_token.as_str()),
                ("toToken", request.to_token.as_str()),
                ("fromAmount", request.from_amount.as_str()),
                ("fromAddress", request.from_address.as_str()),
                ("integrator", self.integrator.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!("LI.FI returned status {}", status);
            return Err(status_error(status.as_u16(), body));
        }

        parse_quote_body(&body)
    }
}

// ============================================================================
// MockQuoteProvider - For testing and offline runs
// ============================================================================

/// Fixed-answer provider that counts how often it is asked
#[derive(Debug)]
pub struct MockQuoteProvider {
    answer: Result<QuoteEstimate, String>,
    calls: AtomicUsize,
}

impl MockQuoteProvider {
    pub fn new(estimate: QuoteEstimate) -> Self {
        MockQuoteProvider {
            answer: Ok(estimate),
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider whose every quote fails with `reason`
    pub fn failing(reason: &str) -> Self {
        MockQuoteProvider {
            answer: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockQuoteProvider {
    /// $2.00 bridge fee plus $0.50 gas, two minutes
    fn default() -> Self {
        Self::new(QuoteEstimate {
            gas_cost_usd: Decimal::new(5, 1),
            fee_cost_usd: Decimal::new(2, 0),
            execution_duration: Some(120),
            tool: Some("mock".to_string()),
        })
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_quote(&self, request: &QuoteRequest) -> Result<QuoteEstimate, QuoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!("MockQuoteProvider quote {} -> {}", request.from_chain_id, request.to_chain_id);

        match &self.answer {
            Ok(estimate) => Ok(estimate.clone()),
            Err(reason) => Err(QuoteError::Unavailable(reason.clone())),
        }
    }
}
