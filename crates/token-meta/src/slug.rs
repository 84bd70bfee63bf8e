//! Market slug derivation.
//!
//! Spot slugs prefer the resolved token symbols and only replace the first
//! `/` and the first space when falling back to the ticker. Derivative and
//! binary-options slugs always come from the ticker with every `/` and space
//! replaced.

use crate::token::TokenMeta;

/// Slug for a spot market.
pub fn spot_slug(ticker: &str, base: Option<&TokenMeta>, quote: Option<&TokenMeta>) -> String {
    match (base, quote) {
        (Some(base), Some(quote)) => format!(
            "{}-{}",
            base.symbol.to_lowercase(),
            quote.symbol.to_lowercase()
        ),
        _ => ticker.replacen('/', "-", 1).replacen(' ', "-", 1).to_lowercase(),
    }
}

/// Slug derived from a ticker alone, used by derivative and binary-options markets.
pub fn ticker_slug(ticker: &str) -> String {
    ticker.replace(['/', ' '], "-").to_lowercase()
}

/// Base symbol of a derivative market: the first `-` segment of its slug.
pub fn derivative_base_symbol(slug: &str) -> &str {
    slug.split('-').next().unwrap_or(slug)
}

/// Base symbol of a binary-options market.
///
/// With a resolved quote token its symbol is removed from the ticker,
/// otherwise the first `/` is removed. Only the separator left dangling at
/// either end is trimmed; interior `/` characters are kept.
pub fn binary_options_base_symbol(ticker: &str, quote: Option<&TokenMeta>) -> String {
    let stripped = match quote {
        Some(quote) if !quote.symbol.is_empty() => ticker.replacen(quote.symbol.as_str(), "", 1),
        _ => ticker.replacen('/', "", 1),
    };

    let trimmed = stripped.trim();
    let trimmed = trimmed
        .strip_suffix('/')
        .or_else(|| trimmed.strip_prefix('/'))
        .unwrap_or(trimmed);

    trimmed.trim().to_string()
}
