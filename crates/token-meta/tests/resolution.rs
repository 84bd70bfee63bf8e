use std::sync::Arc;

use token_meta::token::{EmptyDenomLookup, StaticDenomLookup};
use token_meta::types::balance::{BankBalances, ContractAccountBalance};
use token_meta::types::bridge::BridgeTransaction;
use token_meta::{RegistryLookup, TokenMeta, TokenRegistry, TokenResolver, TokenService};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn catalog() -> Vec<(String, TokenMeta)> {
    let tokens = [
        ("INJ", "Injective", 18, Some("0xe28b3B32B6c345A34Ff64674606124Dd5Aceca30"), None, None),
        ("USDT", "Tether", 6, Some("0xdAC17F958D2ee523a2206206994597C13D831ec7"), None, None),
        (
            "ATOM",
            "Cosmos",
            6,
            None,
            None,
            Some("C4CFF46FD6DE35CA4CF4CE031E643C8FDC9BA4B99AE598E9B0ED98FE3A2319F9"),
        ),
        ("SHROOM", "Shroomin", 18, None, Some("inj1300xcg9naqy00fujsr9r8alwk7dh65uqu87xm8"), None),
    ];

    tokens
        .into_iter()
        .map(|(symbol, name, decimals, erc20, cw20, hash)| {
            (
                symbol.to_string(),
                TokenMeta {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    decimals,
                    logo: format!("{}.svg", symbol.to_lowercase()),
                    icon: format!("{}.svg", symbol.to_lowercase()),
                    coin_gecko_id: name.to_lowercase(),
                    erc20_address: erc20.map(str::to_string),
                    cw20_address: cw20.map(str::to_string),
                    ibc_hash: hash.map(str::to_string),
                },
            )
        })
        .collect()
}

fn resolver() -> TokenResolver {
    TokenResolver::new(Arc::new(TokenRegistry::from_catalog(catalog())))
}

#[test]
fn test_every_catalog_token_resolves_by_each_identifier() {
    let resolver = resolver();

    for (_, token) in catalog() {
        assert_eq!(resolver.by_symbol(&token.symbol.to_uppercase()), Some(&token));
        assert_eq!(resolver.by_name(&token.name.to_lowercase()), Some(&token));

        if let Some(ref address) = token.erc20_address {
            assert_eq!(resolver.by_erc20_address(&address.to_lowercase()), Some(&token));
            assert_eq!(resolver.by_address(address), Some(&token));
        }
        if let Some(ref address) = token.cw20_address {
            assert_eq!(resolver.by_cw20_address(&address.to_lowercase()), Some(&token));
            assert_eq!(resolver.by_address(address), Some(&token));
        }
        if let Some(ref hash) = token.ibc_hash {
            assert_eq!(resolver.by_hash(&hash.to_lowercase()), Some(&token));
            assert_eq!(resolver.by_hash(hash), Some(&token));
        }
    }
}

#[test]
fn test_registry_rebuild_matches() {
    assert_eq!(
        TokenRegistry::from_catalog(catalog()),
        TokenRegistry::from_catalog(catalog())
    );
}

#[tokio::test]
async fn test_bank_balances_keep_only_resolved_denoms() {
    init_tracing();
    let lookup = StaticDenomLookup::new().with(
        "A",
        TokenMeta {
            symbol: "A".to_string(),
            decimals: 6,
            ..Default::default()
        },
    );
    let service = TokenService::new(lookup);
    let balances = BankBalances::from([
        ("A".to_string(), "10".to_string()),
        ("B".to_string(), "5".to_string()),
    ]);

    let result = service
        .to_balances_with_token(&balances, &BankBalances::new())
        .await
        .unwrap();

    assert_eq!(result.bank_balances_with_token.len(), 1);
    assert_eq!(result.bank_balances_with_token[0].record.denom, "A");
    assert_eq!(result.bank_balances_with_token[0].record.balance, "10");
    assert!(result.ibc_bank_balances_with_token.is_empty());
}

#[tokio::test]
async fn test_contract_balances_share_one_token() {
    init_tracing();
    let service = TokenService::new(RegistryLookup::new(resolver()));
    let rows: Vec<_> = (0..3)
        .map(|i| ContractAccountBalance {
            account: format!("inj1holder{i}"),
            balance: "1".to_string(),
            updated_at: 1_700_000_000,
        })
        .collect();

    let result = service
        .to_contract_cw20_balances_with_token("INJ1300XCG9NAQY00FUJSR9R8ALWK7DH65UQU87XM8", &rows)
        .await
        .unwrap();

    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|row| row.token.symbol == "SHROOM"));
}

#[tokio::test]
async fn test_bridge_transfer_denom_is_native_even_without_direct_hit() {
    init_tracing();
    // Only the native symbol is known; the transfer denom itself is not.
    let lookup = StaticDenomLookup::new().with(
        "INJ",
        TokenMeta {
            symbol: "INJ".to_string(),
            decimals: 18,
            ..Default::default()
        },
    );
    let service = TokenService::new(lookup);
    let tx = BridgeTransaction {
        denom: "transfer/channel-0/inj".to_string(),
        amount: "1".to_string(),
        ..Default::default()
    };

    let enriched = service.to_bridge_transaction_with_token(&tx).await.unwrap();
    assert_eq!(enriched.unwrap().resolved().unwrap().token.symbol, "INJ");
}

#[tokio::test]
async fn test_empty_bridge_transaction_needs_no_lookup() {
    init_tracing();
    let service = TokenService::new(EmptyDenomLookup);
    let enriched = service
        .to_bridge_transactions_with_token(&[BridgeTransaction::default()])
        .await
        .unwrap();

    assert_eq!(enriched.len(), 1);
    assert!(enriched[0].is_empty());
}

#[tokio::test]
async fn test_unknown_native_symbol_drops_only_fallback_rows() {
    init_tracing();
    let service = TokenService::with_config(
        RegistryLookup::new(resolver()),
        token_meta::EnrichConfig::from_json(r#"{ "nativeSymbol": "OSMO" }"#).unwrap(),
    );
    let transactions = [
        BridgeTransaction {
            denom: "atom".to_string(),
            ..Default::default()
        },
        BridgeTransaction {
            denom: "uunknown".to_string(),
            ..Default::default()
        },
    ];

    let enriched = service
        .to_bridge_transactions_with_token(&transactions)
        .await
        .unwrap();

    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].resolved().unwrap().token.symbol, "ATOM");

    let single = service
        .to_bridge_transaction_with_token(&transactions[1])
        .await
        .unwrap();
    assert!(single.is_none());
}
