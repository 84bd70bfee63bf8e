pub mod balance;
pub mod bridge;
pub mod market;

use serde::{Deserialize, Serialize};

use crate::token::TokenMeta;

/// A record with resolved token metadata attached.
///
/// All fields of the wrapped record are serialized alongside `token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithToken<R> {
    #[serde(flatten)]
    pub record: R,

    pub token: TokenMeta,
}

impl<R> WithToken<R> {
    pub fn new(record: R, token: TokenMeta) -> Self {
        Self { record, token }
    }
}
