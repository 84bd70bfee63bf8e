use serde::{Deserialize, Serialize};

use crate::token::TokenMeta;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotMarket {
    pub market_id: String,
    pub market_status: String,
    pub ticker: String,
    pub base_denom: String,
    pub quote_denom: String,

    #[serde(default)]
    pub maker_fee_rate: String,

    #[serde(default)]
    pub taker_fee_rate: String,

    #[serde(default)]
    pub min_price_tick_size: String,

    #[serde(default)]
    pub min_quantity_tick_size: String,
}

/// Perpetual or expiry-futures market; both enrich the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivativeMarket {
    pub market_id: String,
    pub market_status: String,
    pub ticker: String,
    pub quote_denom: String,

    #[serde(default)]
    pub oracle_base: String,

    #[serde(default)]
    pub oracle_quote: String,

    #[serde(default)]
    pub is_perpetual: bool,

    /// Set for expiry futures only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryOptionsMarket {
    pub market_id: String,
    pub market_status: String,
    pub ticker: String,
    pub quote_denom: String,

    #[serde(default)]
    pub oracle_symbol: String,

    #[serde(default)]
    pub expiration_timestamp: i64,

    #[serde(default)]
    pub settlement_timestamp: i64,
}

/// A market with its slug and resolved tokens.
///
/// Batch enrichment only emits markets where both tokens are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketWithTokens<M> {
    #[serde(flatten)]
    pub market: M,

    pub slug: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_token: Option<TokenMeta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<TokenMeta>,
}

impl<M> MarketWithTokens<M> {
    pub fn is_resolved(&self) -> bool {
        self.base_token.is_some() && self.quote_token.is_some()
    }
}

pub type SpotMarketWithToken = MarketWithTokens<SpotMarket>;
pub type DerivativeMarketWithToken = MarketWithTokens<DerivativeMarket>;
pub type BinaryOptionsMarketWithToken = MarketWithTokens<BinaryOptionsMarket>;
