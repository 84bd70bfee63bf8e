use futures::future::try_join_all;
use tokio::sync::OnceCell;
use tracing::{debug, instrument, trace};

use crate::config::EnrichConfig;
use crate::error::Error;
use crate::slug::{
    binary_options_base_symbol, derivative_base_symbol, spot_slug, ticker_slug,
};
use crate::token::{DenomLookup, TokenMeta};
use crate::types::balance::{
    BalancesWithToken, BankBalance, BankBalanceWithToken, BankBalances, Coin, CoinWithLabel,
    ContractAccountBalance, ContractAccountBalanceWithToken, ContractDetails, Cw20Balance,
    Cw20BalanceWithToken, SubaccountBalance, SubaccountBalanceWithToken, SupplyWithLabel,
};
use crate::types::bridge::{BridgeTransaction, BridgeTransactionWithToken};
use crate::types::market::{
    BinaryOptionsMarket, BinaryOptionsMarketWithToken, DerivativeMarket,
    DerivativeMarketWithToken, MarketWithTokens, SpotMarket, SpotMarketWithToken,
};
use crate::types::WithToken;

/// Attaches token metadata to balances, markets and bridge transactions.
///
/// Every batch operation resolves its records concurrently and waits for all
/// of them. Records whose token does not resolve are dropped, except bridge
/// transactions (native token fallback) and the base side of binary-options
/// markets (placeholder token). A lookup transport failure fails the whole
/// batch. Output order is not guaranteed to follow input order.
pub struct TokenService<L> {
    lookup: L,
    config: EnrichConfig,
}

impl<L: DenomLookup> TokenService<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_config(lookup, EnrichConfig::default())
    }

    pub fn with_config(lookup: L, config: EnrichConfig) -> Self {
        Self { lookup, config }
    }

    pub fn config(&self) -> &EnrichConfig {
        &self.config
    }

    async fn token(&self, identifier: &str) -> Result<Option<TokenMeta>, Error> {
        let token = self.lookup.resolve(identifier).await?;
        trace!(identifier, found = token.is_some(), "token lookup");
        Ok(token)
    }

    // --- supply ---

    #[instrument(skip_all, fields(coins = supply.len()))]
    pub async fn to_coins_with_token(&self, supply: &[Coin]) -> Result<Vec<TokenMeta>, Error> {
        let tokens = try_join_all(supply.iter().map(|coin| self.token(&coin.denom))).await?;
        Ok(tokens.into_iter().flatten().collect())
    }

    pub async fn to_supply_with_token(&self, supply: &[Coin]) -> Result<Vec<TokenMeta>, Error> {
        self.to_coins_with_token(supply).await
    }

    /// Label every coin with its token symbol (or its denom when unresolved)
    /// and split the supply into native and IBC denoms.
    #[instrument(skip_all, fields(coins = supply.len()))]
    pub async fn to_supply_with_token_and_label(
        &self,
        supply: &[Coin],
    ) -> Result<SupplyWithLabel, Error> {
        let labelled =
            try_join_all(supply.iter().map(|coin| self.to_coin_with_label(coin))).await?;

        let (ibc_bank_supply, bank_supply): (Vec<_>, Vec<_>) = labelled
            .into_iter()
            .partition(|coin| self.config.is_ibc_denom(&coin.coin.denom));

        Ok(SupplyWithLabel {
            bank_supply,
            ibc_bank_supply,
        })
    }

    async fn to_coin_with_label(&self, coin: &Coin) -> Result<CoinWithLabel, Error> {
        let label = match self.token(&coin.denom).await? {
            Some(token) => token.symbol,
            None => coin.denom.clone(),
        };

        Ok(CoinWithLabel {
            coin: coin.clone(),
            code: coin.denom.clone(),
            label,
        })
    }

    // --- balances ---

    /// Bank and IBC bank balances are resolved by two independent fan-outs.
    #[instrument(skip_all, fields(bank = balances.len(), ibc = ibc_balances.len()))]
    pub async fn to_balances_with_token(
        &self,
        balances: &BankBalances,
        ibc_balances: &BankBalances,
    ) -> Result<BalancesWithToken, Error> {
        let (bank_balances_with_token, ibc_bank_balances_with_token) = futures::try_join!(
            self.to_bank_balances_with_token(balances),
            self.to_bank_balances_with_token(ibc_balances)
        )?;

        Ok(BalancesWithToken {
            bank_balances_with_token,
            ibc_bank_balances_with_token,
        })
    }

    async fn to_bank_balances_with_token(
        &self,
        balances: &BankBalances,
    ) -> Result<Vec<BankBalanceWithToken>, Error> {
        let enriched = try_join_all(
            balances
                .iter()
                .map(|(denom, balance)| self.to_bank_balance_with_token(denom, balance)),
        )
        .await?;

        Ok(enriched.into_iter().flatten().collect())
    }

    async fn to_bank_balance_with_token(
        &self,
        denom: &str,
        balance: &str,
    ) -> Result<Option<BankBalanceWithToken>, Error> {
        let Some(token) = self.token(denom).await? else {
            debug!(denom, "dropping bank balance with unresolved token");
            return Ok(None);
        };

        Ok(Some(WithToken::new(
            BankBalance {
                denom: denom.to_string(),
                balance: balance.to_string(),
            },
            token,
        )))
    }

    /// Resolves each balance by its contract address and re-derives `denom`
    /// from the token symbol.
    #[instrument(skip_all, fields(balances = balances.len()))]
    pub async fn to_cw20_balances_with_token(
        &self,
        balances: &[Cw20Balance],
    ) -> Result<Vec<Cw20BalanceWithToken>, Error> {
        let enriched = try_join_all(
            balances
                .iter()
                .map(|balance| self.to_cw20_balance_with_token(balance)),
        )
        .await?;

        Ok(enriched.into_iter().flatten().collect())
    }

    async fn to_cw20_balance_with_token(
        &self,
        balance: &Cw20Balance,
    ) -> Result<Option<Cw20BalanceWithToken>, Error> {
        let Some(token) = self.token(&balance.contract_address).await? else {
            debug!(
                contract = %balance.contract_address,
                "dropping cw20 balance with unresolved token"
            );
            return Ok(None);
        };

        Ok(Some(Cw20BalanceWithToken {
            denom: token.symbol.clone(),
            contract_details: ContractDetails {
                address: balance.contract_address.clone(),
            },
            balance: balance.clone(),
            token,
        }))
    }

    /// All balances share `contract_address`, so the token is looked up once
    /// and attached to every row.
    #[instrument(skip_all, fields(contract = contract_address, balances = balances.len()))]
    pub async fn to_contract_cw20_balances_with_token(
        &self,
        contract_address: &str,
        balances: &[ContractAccountBalance],
    ) -> Result<Vec<ContractAccountBalanceWithToken>, Error> {
        let Some(token) = self.token(contract_address).await? else {
            debug!("dropping contract balances with unresolved token");
            return Ok(Vec::new());
        };

        Ok(balances
            .iter()
            .map(|balance| WithToken::new(balance.clone(), token.clone()))
            .collect())
    }

    pub async fn to_subaccount_balance_with_token(
        &self,
        balance: &SubaccountBalance,
    ) -> Result<Option<SubaccountBalanceWithToken>, Error> {
        Ok(self
            .token(&balance.denom)
            .await?
            .map(|token| WithToken::new(balance.clone(), token)))
    }

    #[instrument(skip_all, fields(balances = balances.len()))]
    pub async fn to_subaccount_balances_with_token(
        &self,
        balances: &[SubaccountBalance],
    ) -> Result<Vec<SubaccountBalanceWithToken>, Error> {
        let enriched = try_join_all(
            balances
                .iter()
                .map(|balance| self.to_subaccount_balance_with_token(balance)),
        )
        .await?;

        Ok(balances
            .iter()
            .zip(enriched)
            .filter_map(|(balance, enriched)| {
                if enriched.is_none() {
                    debug!(denom = %balance.denom, "dropping subaccount balance with unresolved token");
                }
                enriched
            })
            .collect())
    }

    // --- markets ---

    pub async fn to_spot_market_with_token(
        &self,
        market: &SpotMarket,
    ) -> Result<SpotMarketWithToken, Error> {
        let (base_token, quote_token) = futures::try_join!(
            self.token(&market.base_denom),
            self.token(&market.quote_denom)
        )?;
        let slug = spot_slug(&market.ticker, base_token.as_ref(), quote_token.as_ref());

        Ok(MarketWithTokens {
            market: market.clone(),
            slug,
            base_token,
            quote_token,
        })
    }

    #[instrument(skip_all, fields(markets = markets.len()))]
    pub async fn to_spot_markets_with_token(
        &self,
        markets: &[SpotMarket],
    ) -> Result<Vec<SpotMarketWithToken>, Error> {
        let enriched = try_join_all(
            markets
                .iter()
                .map(|market| self.to_spot_market_with_token(market)),
        )
        .await?;

        Ok(keep_resolved(enriched, |m| m.ticker.as_str()))
    }

    /// The base token is looked up by the first slug segment of the ticker,
    /// e.g. `btc` for `BTC/USDT PERP`.
    pub async fn to_derivative_market_with_token(
        &self,
        market: &DerivativeMarket,
    ) -> Result<DerivativeMarketWithToken, Error> {
        let slug = ticker_slug(&market.ticker);
        let (base_token, quote_token) = futures::try_join!(
            self.token(derivative_base_symbol(&slug)),
            self.token(&market.quote_denom)
        )?;

        Ok(MarketWithTokens {
            market: market.clone(),
            slug,
            base_token,
            quote_token,
        })
    }

    #[instrument(skip_all, fields(markets = markets.len()))]
    pub async fn to_derivative_markets_with_token(
        &self,
        markets: &[DerivativeMarket],
    ) -> Result<Vec<DerivativeMarketWithToken>, Error> {
        let enriched = try_join_all(
            markets
                .iter()
                .map(|market| self.to_derivative_market_with_token(market)),
        )
        .await?;

        Ok(keep_resolved(enriched, |m| m.ticker.as_str()))
    }

    /// Only the quote token is looked up; the base side is always a
    /// placeholder token named after the ticker.
    pub async fn to_binary_options_market_with_token(
        &self,
        market: &BinaryOptionsMarket,
    ) -> Result<BinaryOptionsMarketWithToken, Error> {
        let quote_token = self.token(&market.quote_denom).await?;
        let slug = ticker_slug(&market.ticker);
        let base_symbol = binary_options_base_symbol(&market.ticker, quote_token.as_ref());

        Ok(MarketWithTokens {
            market: market.clone(),
            slug,
            base_token: Some(self.placeholder_token(base_symbol)),
            quote_token,
        })
    }

    #[instrument(skip_all, fields(markets = markets.len()))]
    pub async fn to_binary_options_markets_with_token(
        &self,
        markets: &[BinaryOptionsMarket],
    ) -> Result<Vec<BinaryOptionsMarketWithToken>, Error> {
        let enriched = try_join_all(
            markets
                .iter()
                .map(|market| self.to_binary_options_market_with_token(market)),
        )
        .await?;

        Ok(keep_resolved(enriched, |m| m.ticker.as_str()))
    }

    fn placeholder_token(&self, symbol: String) -> TokenMeta {
        TokenMeta {
            name: symbol.clone(),
            symbol,
            decimals: self.config.placeholder_decimals,
            logo: self.config.placeholder_logo.clone(),
            icon: self.config.placeholder_logo.clone(),
            coin_gecko_id: String::new(),
            ..Default::default()
        }
    }

    // --- bridge ---

    /// `None` only when neither the denom nor the native token resolves.
    pub async fn to_bridge_transaction_with_token(
        &self,
        transaction: &BridgeTransaction,
    ) -> Result<Option<BridgeTransactionWithToken>, Error> {
        self.bridge_transaction_with_token(transaction, &OnceCell::new())
            .await
    }

    /// Unresolved denoms fall back to the native token and empty inputs yield
    /// an empty shape. A transaction is dropped only if the native token
    /// itself is unknown.
    #[instrument(skip_all, fields(transactions = transactions.len()))]
    pub async fn to_bridge_transactions_with_token(
        &self,
        transactions: &[BridgeTransaction],
    ) -> Result<Vec<BridgeTransactionWithToken>, Error> {
        let native = OnceCell::new();

        let enriched = try_join_all(
            transactions
                .iter()
                .map(|transaction| self.bridge_transaction_with_token(transaction, &native)),
        )
        .await?;

        Ok(enriched.into_iter().flatten().collect())
    }

    async fn bridge_transaction_with_token(
        &self,
        transaction: &BridgeTransaction,
        native: &OnceCell<Option<TokenMeta>>,
    ) -> Result<Option<BridgeTransactionWithToken>, Error> {
        if transaction.is_empty() {
            return Ok(Some(BridgeTransactionWithToken::Empty {}));
        }

        let token = if self.config.is_native_transfer(&transaction.denom) {
            self.native_token(native).await?
        } else if let Some(token) = self.token(&transaction.denom).await? {
            Some(token)
        } else {
            debug!(
                denom = %transaction.denom,
                tx_hash = %transaction.tx_hash,
                "bridge transaction falls back to native token"
            );
            self.native_token(native).await?
        };

        let Some(token) = token else {
            debug!(
                denom = %transaction.denom,
                native = %self.config.native_symbol,
                "dropping bridge transaction, native token unresolved"
            );
            return Ok(None);
        };

        Ok(Some(BridgeTransactionWithToken::Resolved(WithToken::new(
            transaction.clone(),
            token,
        ))))
    }

    /// Looked up at most once per cell, shared by every transaction of a batch.
    async fn native_token(
        &self,
        cell: &OnceCell<Option<TokenMeta>>,
    ) -> Result<Option<TokenMeta>, Error> {
        let token = cell
            .get_or_try_init(|| self.token(&self.config.native_symbol))
            .await?;
        Ok(token.clone())
    }
}

/// Keep markets with both tokens present.
fn keep_resolved<M>(
    markets: Vec<MarketWithTokens<M>>,
    ticker: impl Fn(&M) -> &str,
) -> Vec<MarketWithTokens<M>> {
    markets
        .into_iter()
        .filter(|market| {
            let resolved = market.is_resolved();
            if !resolved {
                debug!(
                    ticker = ticker(&market.market),
                    base = market.base_token.is_some(),
                    quote = market.quote_token.is_some(),
                    "dropping market with unresolved token"
                );
            }
            resolved
        })
        .collect()
}
