//! Direction-aware summary statistics over filtered price sets.

use ordered_float::OrderedFloat;
use p2p_core::{SideSummary, TradeSide};

/// Number of listings in the trimmed average.
pub const TOP_N: usize = 10;

/// Trimmed mean of the `n` most favorable prices on a side.
///
/// SELL selects the n cheapest prices, BUY the n most expensive. `None`
/// for an empty price set. This is deliberately not a full-population
/// mean: it approximates the price a user would realistically get among
/// the best competing offers while damping single-listing outliers.
pub fn top_n_average(prices: &[f64], side: TradeSide, n: usize) -> Option<f64> {
    if prices.is_empty() || n == 0 {
        return None;
    }
    let mut sorted: Vec<OrderedFloat<f64>> = prices.iter().copied().map(OrderedFloat).collect();
    sorted.sort_unstable();
    if side == TradeSide::Buy {
        sorted.reverse();
    }
    let top = &sorted[..n.min(sorted.len())];
    let sum: f64 = top.iter().map(|p| p.0).sum();
    Some(sum / top.len() as f64)
}

/// Summarize one side's filtered prices.
///
/// The best price is the minimum for SELL (cheapest way to acquire
/// asset) and the maximum for BUY (highest bid when disposing of it).
pub fn summarize(side: TradeSide, prices: Vec<f64>) -> SideSummary {
    let min_price = prices.iter().copied().map(OrderedFloat).min().map(|p| p.0);
    let max_price = prices.iter().copied().map(OrderedFloat).max().map(|p| p.0);
    let best = match side {
        TradeSide::Sell => min_price,
        TradeSide::Buy => max_price,
    };
    let avg_top = top_n_average(&prices, side, TOP_N);
    SideSummary {
        prices,
        best,
        min_price,
        max_price,
        avg_top,
    }
}

/// Spread between the two sides' best prices: `best_buy - best_sell`.
///
/// Absent when either side produced no best price.
pub fn spread(sell: &SideSummary, buy: &SideSummary) -> Option<f64> {
    match (sell.best, buy.best) {
        (Some(s), Some(b)) => Some(b - s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_top_n_average_empty() {
        assert!(top_n_average(&[], TradeSide::Sell, TOP_N).is_none());
    }

    #[test]
    fn test_top_n_average_sell_takes_cheapest() {
        let avg = top_n_average(&[30.0, 10.0, 20.0], TradeSide::Sell, 2).unwrap();
        assert_abs_diff_eq!(avg, 15.0, epsilon = 1e-10);
    }

    #[test]
    fn test_top_n_average_buy_takes_most_expensive() {
        let avg = top_n_average(&[10.0, 30.0, 20.0], TradeSide::Buy, 2).unwrap();
        assert_abs_diff_eq!(avg, 25.0, epsilon = 1e-10);
    }

    #[test]
    fn test_top_n_average_short_population() {
        // Fewer prices than n: average over what exists.
        let avg = top_n_average(&[10.0, 20.0], TradeSide::Sell, 10).unwrap();
        assert_abs_diff_eq!(avg, 15.0, epsilon = 1e-10);
    }

    #[test]
    fn test_summarize_empty_side() {
        let summary = summarize(TradeSide::Sell, Vec::new());
        assert_eq!(summary.count(), 0);
        assert!(summary.best.is_none());
        assert!(summary.min_price.is_none());
        assert!(summary.max_price.is_none());
        assert!(summary.avg_top.is_none());
    }

    #[test]
    fn test_summarize_sell_best_is_min() {
        let summary = summarize(TradeSide::Sell, vec![36.5, 36.0, 36.2]);
        assert_eq!(summary.count(), 3);
        assert_eq!(summary.best, Some(36.0));
        assert_eq!(summary.min_price, Some(36.0));
        assert_eq!(summary.max_price, Some(36.5));
    }

    #[test]
    fn test_summarize_buy_best_is_max() {
        let summary = summarize(TradeSide::Buy, vec![35.0, 35.8]);
        assert_eq!(summary.best, Some(35.8));
        assert_eq!(summary.min_price, Some(35.0));
        assert_eq!(summary.max_price, Some(35.8));
    }

    #[test]
    fn test_spread_requires_both_sides() {
        let sell = summarize(TradeSide::Sell, vec![36.0, 36.2]);
        let buy = summarize(TradeSide::Buy, vec![35.0, 35.8]);
        let empty = summarize(TradeSide::Buy, Vec::new());

        assert_abs_diff_eq!(spread(&sell, &buy).unwrap(), -0.2, epsilon = 1e-10);
        assert!(spread(&sell, &empty).is_none());
        assert!(spread(&empty, &buy).is_none());
    }
}
