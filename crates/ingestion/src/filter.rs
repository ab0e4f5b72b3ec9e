//! Listing filters with per-stage diagnostic counters.
//!
//! Filtering happens client-side, by normalized payment-method name,
//! because the server's internal payment-type tokens are not reliably
//! known. Matching is substring containment: the token "banesco" matches
//! a method named "Banesco (Panama)".

use p2p_core::Listing;

use crate::normalize::normalize;

/// Counters describing how many listings survived each filter stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Raw listings in the response page.
    pub total: usize,
    /// Listings whose payment methods matched the configured tokens.
    pub after_payment: usize,
    /// Listings that also accept the target order amount.
    pub after_order: usize,
    /// Listings that also carry a parseable price.
    pub with_price: usize,
}

/// Normalize configured payment tokens once, dropping any that fold to
/// nothing.
pub fn normalize_tokens(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| normalize(t))
        .filter(|t| !t.is_empty())
        .collect()
}

/// True when any method name contains any token.
///
/// `tokens` must be pre-normalized (see [`normalize_tokens`]). An empty
/// token list disables payment filtering entirely.
pub fn matches_payment(methods: &[String], tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    methods.iter().any(|method| {
        let name = normalize(method);
        tokens.iter().any(|token| name.contains(token.as_str()))
    })
}

/// True when the listing can be traded at `target` fiat units.
///
/// A declared minimum above the target or a declared maximum below it
/// excludes the listing; an absent bound is unbounded in that direction.
pub fn passes_order_window(listing: &Listing, target: f64) -> bool {
    if let Some(min) = listing.min_order_amount {
        if min > target {
            return false;
        }
    }
    if let Some(max) = listing.max_order_amount {
        if max < target {
            return false;
        }
    }
    true
}

/// Apply the payment filter, then the order-window filter, then drop
/// listings without a parseable price, counting each stage.
pub fn filter_listings(
    listings: &[Listing],
    tokens: &[String],
    target: f64,
) -> (Vec<f64>, FilterStats) {
    let mut stats = FilterStats {
        total: listings.len(),
        ..FilterStats::default()
    };
    let mut prices = Vec::new();
    for listing in listings {
        if !matches_payment(&listing.payment_methods, tokens) {
            continue;
        }
        stats.after_payment += 1;
        if !passes_order_window(listing, target) {
            continue;
        }
        stats.after_order += 1;
        if let Some(price) = listing.price {
            stats.with_price += 1;
            prices.push(price);
        }
    }
    (prices, stats)
}
