use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMeta {
    pub symbol: String,

    #[serde(default)]
    pub name: String,

    pub decimals: u8,

    #[serde(default)]
    pub logo: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub coin_gecko_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub erc20_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cw20_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibc_hash: Option<String>,
}

/// Trait for denom → token metadata providers.
///
/// The identifier may be a denom, a symbol or a contract address depending on
/// the caller. Unknown identifiers resolve to `Ok(None)`; `Err` is reserved
/// for transport failures.
#[async_trait]
pub trait DenomLookup: Send + Sync {
    async fn resolve(&self, identifier: &str) -> Result<Option<TokenMeta>, LookupError>;
}

#[async_trait]
impl<'a, L: DenomLookup + ?Sized> DenomLookup for &'a L {
    async fn resolve(&self, identifier: &str) -> Result<Option<TokenMeta>, LookupError> {
        (**self).resolve(identifier).await
    }
}

#[async_trait]
impl<L: DenomLookup + ?Sized> DenomLookup for std::sync::Arc<L> {
    async fn resolve(&self, identifier: &str) -> Result<Option<TokenMeta>, LookupError> {
        (**self).resolve(identifier).await
    }
}

/// A no-op lookup that always returns None.
pub struct EmptyDenomLookup;

#[async_trait]
impl DenomLookup for EmptyDenomLookup {
    async fn resolve(&self, _identifier: &str) -> Result<Option<TokenMeta>, LookupError> {
        Ok(None)
    }
}

/// In-memory lookup keyed by the exact identifier, for testing.
pub struct StaticDenomLookup {
    tokens: HashMap<String, TokenMeta>,
}

impl StaticDenomLookup {
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    pub fn insert(&mut self, identifier: &str, meta: TokenMeta) {
        self.tokens.insert(identifier.to_string(), meta);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, identifier: &str, meta: TokenMeta) -> Self {
        self.insert(identifier, meta);
        self
    }
}

impl Default for StaticDenomLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DenomLookup for StaticDenomLookup {
    async fn resolve(&self, identifier: &str) -> Result<Option<TokenMeta>, LookupError> {
        Ok(self.tokens.get(identifier).cloned())
    }
}
