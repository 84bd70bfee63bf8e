use std::collections::HashMap;

use tracing::debug;

use crate::error::Error;
use crate::token::TokenMeta;

/// Normalized-key index over a single catalog field.
pub type TokenIndex = HashMap<String, TokenMeta>;

/// Immutable lookup indices built from one catalog snapshot.
///
/// Every index is derived from the same entries; rebuilding means creating a
/// new registry. When two entries normalize to the same key the later entry
/// in iteration order wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenRegistry {
    by_symbol: TokenIndex,
    by_erc20_address: TokenIndex,
    by_cw20_address: TokenIndex,
    by_hash: TokenIndex,
    by_name: TokenIndex,
}

impl TokenRegistry {
    /// Build the registry from `(symbol, meta)` catalog entries.
    ///
    /// The catalog key is the symbol index key; it is usually, but not
    /// necessarily, equal to `meta.symbol` (variants such as `USDCet` map to a
    /// token whose display symbol is `USDC`).
    pub fn from_catalog<I>(catalog: I) -> Self
    where
        I: IntoIterator<Item = (String, TokenMeta)>,
    {
        let entries: Vec<(String, TokenMeta)> = catalog.into_iter().collect();

        let registry = Self {
            by_symbol: index_by_symbol(&entries),
            by_erc20_address: index_by_erc20_address(&entries),
            by_cw20_address: index_by_cw20_address(&entries),
            by_hash: index_by_hash(&entries),
            by_name: index_by_name(&entries),
        };

        debug!(
            tokens = entries.len(),
            symbols = registry.by_symbol.len(),
            erc20 = registry.by_erc20_address.len(),
            cw20 = registry.by_cw20_address.len(),
            hashes = registry.by_hash.len(),
            names = registry.by_name.len(),
            "built token registry"
        );

        registry
    }

    /// Build the registry from a JSON object of `symbol → TokenMeta`.
    ///
    /// Entry order follows the document order of the object.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let entries: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| Error::Catalog(e.to_string()))?;

        let catalog = entries
            .into_iter()
            .map(|(symbol, value)| {
                serde_json::from_value::<TokenMeta>(value)
                    .map(|meta| (symbol.clone(), meta))
                    .map_err(|e| Error::Catalog(format!("{symbol}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_catalog(catalog))
    }

    pub fn by_symbol(&self) -> &TokenIndex {
        &self.by_symbol
    }

    pub fn by_erc20_address(&self) -> &TokenIndex {
        &self.by_erc20_address
    }

    pub fn by_cw20_address(&self) -> &TokenIndex {
        &self.by_cw20_address
    }

    pub fn by_hash(&self) -> &TokenIndex {
        &self.by_hash
    }

    pub fn by_name(&self) -> &TokenIndex {
        &self.by_name
    }
}

fn index_by_symbol(entries: &[(String, TokenMeta)]) -> TokenIndex {
    let mut index = TokenIndex::new();
    for (symbol, meta) in entries {
        index.insert(symbol.to_uppercase(), meta.clone());
    }
    index
}

fn index_by_erc20_address(entries: &[(String, TokenMeta)]) -> TokenIndex {
    let mut index = TokenIndex::new();
    for (_, meta) in entries {
        if let Some(ref address) = meta.erc20_address {
            index.insert(address.to_lowercase(), meta.clone());
        }
    }
    index
}

fn index_by_cw20_address(entries: &[(String, TokenMeta)]) -> TokenIndex {
    let mut index = TokenIndex::new();
    for (_, meta) in entries {
        if let Some(ref address) = meta.cw20_address {
            index.insert(address.to_lowercase(), meta.clone());
        }
    }
    index
}

fn index_by_hash(entries: &[(String, TokenMeta)]) -> TokenIndex {
    let mut index = TokenIndex::new();
    for (_, meta) in entries {
        if let Some(ref hash) = meta.ibc_hash {
            index.insert(hash.to_uppercase(), meta.clone());
        }
    }
    index
}

fn index_by_name(entries: &[(String, TokenMeta)]) -> TokenIndex {
    let mut index = TokenIndex::new();
    for (_, meta) in entries {
        if !meta.name.is_empty() {
            index.insert(meta.name.to_lowercase(), meta.clone());
        }
    }
    index
}
