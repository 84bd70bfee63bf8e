use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Chain-specific knobs for the enrichment pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrichConfig {
    /// Symbol looked up when a bridge transaction falls back to the native token.
    pub native_symbol: String,

    /// Inbound transfers of the native asset look like `transfer/<channel>/inj`.
    pub native_transfer_prefix: String,
    pub native_transfer_suffix: String,

    pub ibc_prefix: String,

    /// Logo and icon of synthetic binary-options base tokens.
    pub placeholder_logo: String,
    pub placeholder_decimals: u8,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            native_symbol: "INJ".to_string(),
            native_transfer_prefix: "transfer".to_string(),
            native_transfer_suffix: "inj".to_string(),
            ibc_prefix: "ibc/".to_string(),
            placeholder_logo: "injective-v3.svg".to_string(),
            placeholder_decimals: 18,
        }
    }
}

impl EnrichConfig {
    /// Parse a config from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn is_native_transfer(&self, denom: &str) -> bool {
        denom.starts_with(&self.native_transfer_prefix)
            && denom.ends_with(&self.native_transfer_suffix)
    }

    pub fn is_ibc_denom(&self, denom: &str) -> bool {
        denom.starts_with(&self.ibc_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EnrichConfig::from_json(r#"{ "nativeSymbol": "OSMO" }"#).unwrap();
        assert_eq!(config.native_symbol, "OSMO");
        assert_eq!(config.placeholder_decimals, 18);
        assert_eq!(config.ibc_prefix, "ibc/");
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            EnrichConfig::from_json("{ nativeSymbol"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_native_transfer() {
        let config = EnrichConfig::default();
        assert!(config.is_native_transfer("transfer/channel-0/inj"));
        assert!(!config.is_native_transfer("transfer/channel-0/uosmo"));
        assert!(!config.is_native_transfer("inj"));
    }
}
