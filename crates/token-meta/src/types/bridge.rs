use serde::{Deserialize, Serialize};

use crate::types::WithToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BridgeTransactionState {
    Cancelled,
    Completed,
    Confirming,
    EthereumConfirming,
    Failed,
    InjectiveConfirming,
    #[default]
    Submitted,
    #[serde(rename = "failed-cancelled")]
    FailedCancelled,
    #[serde(rename = "in-progress")]
    InProgress,
}

/// A cross-chain transfer as shown in bridge history.
///
/// Every field defaults so partially populated (or empty) payloads still
/// deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeTransaction {
    pub amount: String,
    pub denom: String,
    pub receiver: String,
    pub sender: String,
    pub tx_hash: String,
    pub explorer_link: String,
    pub timestamp: u64,
    pub state: BridgeTransactionState,

    /// `<source>-<destination>` network pair, e.g. `ethereum-injective`.
    #[serde(rename = "type")]
    pub transfer_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge_fee: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_timestamp: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tx_hashes: Vec<String>,
}

impl BridgeTransaction {
    /// Degenerate input carrying no denom.
    pub fn is_empty(&self) -> bool {
        self.denom.is_empty()
    }
}

/// Enriched bridge transaction.
///
/// Degenerate input maps to `Empty`, which serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BridgeTransactionWithToken {
    Resolved(WithToken<BridgeTransaction>),
    Empty {},
}

impl BridgeTransactionWithToken {
    pub fn is_empty(&self) -> bool {
        matches!(self, BridgeTransactionWithToken::Empty {})
    }

    pub fn resolved(&self) -> Option<&WithToken<BridgeTransaction>> {
        match self {
            BridgeTransactionWithToken::Resolved(tx) => Some(tx),
            BridgeTransactionWithToken::Empty {} => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_deserializes() {
        let tx: BridgeTransaction = serde_json::from_str("{}").unwrap();
        assert!(tx.is_empty());
        assert_eq!(tx.state, BridgeTransactionState::Submitted);
    }

    #[test]
    fn test_state_names() {
        let tx: BridgeTransaction = serde_json::from_str(
            r#"{ "denom": "inj", "state": "in-progress", "type": "osmosis-injective" }"#,
        )
        .unwrap();
        assert_eq!(tx.state, BridgeTransactionState::InProgress);
        assert_eq!(tx.transfer_type, "osmosis-injective");
    }

    #[test]
    fn test_empty_serializes_as_object() {
        let value = serde_json::to_value(BridgeTransactionWithToken::Empty {}).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
