//! One sampling pass: window gate, two side fetches, row assembly.

use chrono::Utc;
use p2p_core::{Config, Observation, TradeSide};
use p2p_stats::{spread, summarize};
use reqwest::Client;
use tracing::info;

use crate::fetch::SideFetcher;
use crate::window;

/// Run one sampling pass.
///
/// Outside the capture window no network I/O happens and nothing is
/// recorded. Otherwise both sides are fetched concurrently (they share
/// no state) and exactly one observation is assembled; a side whose
/// fetch failed contributes NA fields, never a partial row.
pub async fn run_once(config: &Config, client: Client) -> Option<Observation> {
    let now = Utc::now();
    if !window::in_window(
        now,
        config.window.start.as_deref(),
        config.window.end.as_deref(),
    ) {
        info!("outside capture window, nothing recorded");
        return None;
    }

    let fetcher = SideFetcher::new(client, config);
    let (sell_fetch, buy_fetch) =
        tokio::join!(fetcher.fetch(TradeSide::Sell), fetcher.fetch(TradeSide::Buy));

    let sell = summarize(TradeSide::Sell, sell_fetch.prices);
    let buy = summarize(TradeSide::Buy, buy_fetch.prices);
    let spread = spread(&sell, &buy);

    Some(Observation {
        timestamp: now,
        asset: config.market.asset.clone(),
        fiat: config.market.fiat.clone(),
        pay_types: config.filter.pay_types.join(","),
        min_order: config.filter.min_order,
        sell,
        buy,
        spread,
        rows_considered: config.market.rows,
    })
}
