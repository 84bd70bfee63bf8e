use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use crate::error::LookupError;
use crate::registry::{TokenIndex, TokenRegistry};
use crate::token::{DenomLookup, TokenMeta};

const ERC20_PREFIX: &str = "0x";
const PEGGY_PREFIX: &str = "peggy";
const IBC_PREFIX: &str = "ibc/";

/// Lookup signature shared by the per-kind resolvers.
type LookupFn = for<'r> fn(&'r TokenResolver, &str) -> Option<&'r TokenMeta>;

/// Stateless lookup API over a [`TokenRegistry`].
///
/// Every lookup tries the key as given before its canonical-case form, so
/// callers already holding canonical keys hit on the first attempt.
#[derive(Debug, Clone)]
pub struct TokenResolver {
    registry: Arc<TokenRegistry>,
}

impl TokenResolver {
    pub fn new(registry: Arc<TokenRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Symbol may be a primary symbol, an IBC base-denom alias or a variant
    /// (e.g. `USDCet`). No substring or fuzzy matching.
    pub fn by_symbol(&self, symbol: &str) -> Option<&TokenMeta> {
        first_hit(
            self.registry.by_symbol(),
            [Cow::Borrowed(symbol), Cow::Owned(symbol.to_uppercase())],
        )
    }

    /// `0x`-prefixed addresses are ERC20, anything else is treated as CW20.
    pub fn by_address(&self, address: &str) -> Option<&TokenMeta> {
        if address.starts_with(ERC20_PREFIX) {
            self.by_erc20_address(address)
        } else {
            self.by_cw20_address(address)
        }
    }

    pub fn by_erc20_address(&self, address: &str) -> Option<&TokenMeta> {
        first_hit(
            self.registry.by_erc20_address(),
            [Cow::Owned(address.to_lowercase())],
        )
    }

    pub fn by_cw20_address(&self, address: &str) -> Option<&TokenMeta> {
        first_hit(
            self.registry.by_cw20_address(),
            [Cow::Owned(address.to_lowercase())],
        )
    }

    pub fn by_hash(&self, hash: &str) -> Option<&TokenMeta> {
        first_hit(
            self.registry.by_hash(),
            [Cow::Borrowed(hash), Cow::Owned(hash.to_uppercase())],
        )
    }

    pub fn by_name(&self, name: &str) -> Option<&TokenMeta> {
        first_hit(
            self.registry.by_name(),
            [Cow::Borrowed(name), Cow::Owned(name.to_lowercase())],
        )
    }

    /// Coin-gecko id of the token registered under `symbol`, or `""`.
    pub fn coin_gecko_id(&self, symbol: &str) -> &str {
        self.registry
            .by_symbol()
            .get(&symbol.to_uppercase())
            .map(|meta| meta.coin_gecko_id.as_str())
            .unwrap_or("")
    }

    /// Resolve a chain denom by its structure.
    ///
    /// `ibc/<hash>` goes to the hash index and `peggy0x…` / `0x…` to the
    /// ERC20 index. Any other denom is tried as a symbol, a CW20 address and
    /// a display name, in that order.
    pub fn by_denom(&self, denom: &str) -> Option<&TokenMeta> {
        if let Some(hash) = denom.strip_prefix(IBC_PREFIX) {
            return self.by_hash(hash);
        }

        if let Some(address) = denom.strip_prefix(PEGGY_PREFIX) {
            return self.by_erc20_address(address);
        }

        if denom.starts_with(ERC20_PREFIX) {
            return self.by_erc20_address(denom);
        }

        const FALLBACKS: [LookupFn; 3] = [
            TokenResolver::by_symbol,
            TokenResolver::by_cw20_address,
            TokenResolver::by_name,
        ];

        FALLBACKS.iter().find_map(|lookup| lookup(self, denom))
    }
}

/// First candidate key present in the index wins.
fn first_hit<'i, const N: usize>(
    index: &'i TokenIndex,
    candidates: [Cow<'_, str>; N],
) -> Option<&'i TokenMeta> {
    candidates
        .iter()
        .find_map(|key| index.get(key.as_ref()))
}

/// [`DenomLookup`] backed directly by an in-process registry.
///
/// Never fails; unknown denoms resolve to `None`.
#[derive(Debug, Clone)]
pub struct RegistryLookup {
    resolver: TokenResolver,
}

impl RegistryLookup {
    pub fn new(resolver: TokenResolver) -> Self {
        Self { resolver }
    }

    pub fn from_registry(registry: TokenRegistry) -> Self {
        Self::new(TokenResolver::new(Arc::new(registry)))
    }

    pub fn resolver(&self) -> &TokenResolver {
        &self.resolver
    }
}

#[async_trait]
impl DenomLookup for RegistryLookup {
    async fn resolve(&self, identifier: &str) -> Result<Option<TokenMeta>, LookupError> {
        let token = self.resolver.by_denom(identifier).cloned();
        trace!(identifier, found = token.is_some(), "registry lookup");
        Ok(token)
    }
}
