use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::token::TokenMeta;
use crate::types::WithToken;

/// Bank balances keyed by denom; amounts are base-unit integer strings.
pub type BankBalances = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankBalance {
    pub denom: String,
    pub balance: String,
}

pub type BankBalanceWithToken = WithToken<BankBalance>;

/// Output of bank balance enrichment; the two lists are resolved independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesWithToken {
    pub bank_balances_with_token: Vec<BankBalanceWithToken>,
    pub ibc_bank_balances_with_token: Vec<BankBalanceWithToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

/// A supply coin with a display label (token symbol, or the raw denom).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinWithLabel {
    #[serde(flatten)]
    pub coin: Coin,

    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyWithLabel {
    pub bank_supply: Vec<CoinWithLabel>,
    pub ibc_bank_supply: Vec<CoinWithLabel>,
}

/// A CW20 balance as reported by an explorer for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cw20Balance {
    pub contract_address: String,
    pub account: String,
    pub balance: String,

    #[serde(default)]
    pub updated_at: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDetails {
    pub address: String,
}

/// CW20 balance whose display denom is re-derived from the resolved token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cw20BalanceWithToken {
    #[serde(flatten)]
    pub balance: Cw20Balance,

    pub token: TokenMeta,
    pub denom: String,
    pub contract_details: ContractDetails,
}

/// One account's balance held in a given CW20 contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAccountBalance {
    pub account: String,
    pub balance: String,

    #[serde(default)]
    pub updated_at: u64,
}

pub type ContractAccountBalanceWithToken = WithToken<ContractAccountBalance>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubaccountBalance {
    pub denom: String,
    pub available_balance: String,
    pub total_balance: String,
}

pub type SubaccountBalanceWithToken = WithToken<SubaccountBalance>;
