pub mod config;
pub mod enrich;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod slug;
pub mod token;
pub mod types;

use std::sync::Arc;

use error::Error;

// Re-exports for convenience
pub use config::EnrichConfig;
pub use enrich::TokenService;
pub use registry::TokenRegistry;
pub use resolver::{RegistryLookup, TokenResolver};
pub use token::{DenomLookup, TokenMeta};
pub use types::WithToken;

/// Build a resolver over a JSON catalog of `symbol → TokenMeta`.
pub fn resolver_from_json(catalog: &str) -> Result<TokenResolver, Error> {
    let registry = TokenRegistry::from_json(catalog)?;
    Ok(TokenResolver::new(Arc::new(registry)))
}

/// High-level convenience: a token service resolving denoms against an
/// in-process JSON catalog.
pub fn service_from_json(
    catalog: &str,
    config: EnrichConfig,
) -> Result<TokenService<RegistryLookup>, Error> {
    let resolver = resolver_from_json(catalog)?;
    Ok(TokenService::with_config(RegistryLookup::new(resolver), config))
}
