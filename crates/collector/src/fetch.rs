//! One-sided order-book fetch with retry and local filtering.
//!
//! The request asks for a single page with no server-side payment
//! filter; payment matching happens locally by normalized name, because
//! the server's internal payment-type tokens are not reliably known.

use std::time::Duration;

use p2p_core::{Config, Error, Result, TradeSide};
use p2p_ingestion::{
    decode_listings, filter_listings, normalize_tokens, FilterStats, SearchResponse,
};
use reqwest::Client;
use serde_json::json;
use tokio::time::sleep;
use tracing::{info, warn};

/// Filtered prices plus diagnostic counters for one side-fetch.
#[derive(Debug, Clone, Default)]
pub struct SideFetch {
    /// Prices of listings that passed every filter.
    pub prices: Vec<f64>,
    /// Per-stage survivor counts.
    pub stats: FilterStats,
}

/// Fetches one page of the order book for a trade direction.
pub struct SideFetcher {
    client: Client,
    config: Config,
    /// Configured payment tokens, normalized once.
    tokens: Vec<String>,
}

impl SideFetcher {
    /// Create a fetcher over a shared HTTP client.
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            tokens: normalize_tokens(&config.filter.pay_types),
            config: config.clone(),
        }
    }

    /// Build the HTTP client with the configured request timeout.
    pub fn client(config: &Config) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .build()
            .map_err(|e| Error::http(e.to_string()))
    }

    /// Sample one side of the order book.
    ///
    /// Transport failures and non-success statuses are retried with a
    /// linearly increasing backoff. Exhausting retries degrades to an
    /// empty result; the caller still records a row with NA fields for
    /// this side.
    pub async fn fetch(&self, side: TradeSide) -> SideFetch {
        let attempts = self.config.fetch.retries + 1;
        for attempt in 1..=attempts {
            match self.request(side).await {
                Ok(response) => {
                    let listings = decode_listings(response);
                    let (prices, stats) =
                        filter_listings(&listings, &self.tokens, self.config.filter.min_order);
                    info!(
                        %side,
                        total = stats.total,
                        after_payment = stats.after_payment,
                        after_order = stats.after_order,
                        with_price = stats.with_price,
                        "order book sampled"
                    );
                    return SideFetch { prices, stats };
                }
                Err(err) => {
                    warn!(%side, attempt, error = %err, "order book request failed");
                    if attempt < attempts {
                        sleep(self.backoff(attempt)).await;
                    }
                }
            }
        }
        warn!(%side, "retries exhausted, recording empty side");
        SideFetch::default()
    }

    /// Linear backoff: attempt n waits n x the configured base.
    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.config.fetch.backoff_ms * u64::from(attempt))
    }

    async fn request(&self, side: TradeSide) -> Result<SearchResponse> {
        let body = json!({
            "page": 1,
            "rows": self.config.market.rows,
            "payTypes": [],
            "publisherType": null,
            "asset": self.config.market.asset,
            "tradeType": side.as_query(),
            "fiat": self.config.market.fiat,
            "merchantCheck": false,
        });
        let response = self
            .client
            .post(&self.config.market.endpoint)
            .header("Accept", "*/*")
            .header("Origin", "https://p2p.binance.com")
            .header("User-Agent", "Mozilla/5.0")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::http(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::http(format!("status {}", response.status().as_u16())));
        }
        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| Error::decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page(prices: &[&str]) -> Value {
        let data: Vec<Value> = prices
            .iter()
            .map(|p| {
                json!({
                    "adv": {
                        "price": p,
                        "minSingleTransAmount": "50",
                        "maxSingleTransAmount": "5000",
                        "tradeMethods": [{"tradeMethodName": "Banesco"}]
                    }
                })
            })
            .collect();
        json!({ "data": data })
    }

    fn test_config(server: &MockServer) -> Config {
        let mut config = Config::default();
        config.market.endpoint = format!("{}/adv/search", server.uri());
        config.fetch.backoff_ms = 1;
        config
    }

    #[tokio::test]
    async fn test_fetch_sends_documented_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/adv/search"))
            .and(body_partial_json(json!({
                "page": 1,
                "rows": 50,
                "payTypes": [],
                "asset": "USDT",
                "tradeType": "SELL",
                "fiat": "VES",
                "merchantCheck": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(&["36.0"])))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server);
        let fetcher = SideFetcher::new(SideFetcher::client(&config).unwrap(), &config);
        let fetched = fetcher.fetch(TradeSide::Sell).await;
        assert_eq!(fetched.prices, vec![36.0]);
        assert_eq!(fetched.stats.total, 1);
    }

    #[tokio::test]
    async fn test_fetch_recovers_after_transient_failure() {
        let server = MockServer::start().await;
        // First attempt fails, the retry succeeds.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(&["36.0", "36.2"])))
            .mount(&server)
            .await;

        let config = test_config(&server);
        let fetcher = SideFetcher::new(SideFetcher::client(&config).unwrap(), &config);
        let fetched = fetcher.fetch(TradeSide::Sell).await;
        assert_eq!(fetched.prices, vec![36.0, 36.2]);
    }

    #[tokio::test]
    async fn test_fetch_exhausts_retries_to_empty() {
        let server = MockServer::start().await;
        // retries = 2 means three attempts total.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let config = test_config(&server);
        let fetcher = SideFetcher::new(SideFetcher::client(&config).unwrap(), &config);
        let fetched = fetcher.fetch(TradeSide::Buy).await;
        assert!(fetched.prices.is_empty());
        assert_eq!(fetched.stats, FilterStats::default());
    }

    #[tokio::test]
    async fn test_fetch_applies_configured_filters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"adv": {"price": "36.0", "tradeMethods": [{"tradeMethodName": "Banesco"}]}},
                    {"adv": {"price": "36.4", "tradeMethods": [{"tradeMethodName": "Zelle"}]}},
                    {"adv": {"price": "36.8", "minSingleTransAmount": "500",
                             "tradeMethods": [{"tradeMethodName": "Banesco Panama"}]}}
                ]
            })))
            .mount(&server)
            .await;

        let mut config = test_config(&server);
        config.filter.pay_types = vec!["Banesco".to_string()];
        let fetcher = SideFetcher::new(SideFetcher::client(&config).unwrap(), &config);
        let fetched = fetcher.fetch(TradeSide::Sell).await;
        assert_eq!(fetched.prices, vec![36.0]);
        assert_eq!(fetched.stats.total, 3);
        assert_eq!(fetched.stats.after_payment, 2);
        assert_eq!(fetched.stats.after_order, 1);
        assert_eq!(fetched.stats.with_price, 1);
    }
}
