use thiserror::Error;

/// Unified error type for the token-meta library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("config error: {0}")]
    Config(String),
}

/// Failures raised by a [`DenomLookup`](crate::token::DenomLookup) implementation.
///
/// A token that simply does not exist is not an error; lookups report it as
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response for {identifier}: {reason}")]
    InvalidResponse { identifier: String, reason: String },
}
