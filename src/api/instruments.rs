//! Instruments service for candles and order/position books.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::ClientInner;
use crate::models::{Book, CandlesResponse, Granularity};
use crate::Result;

/// Service for instrument data operations.
///
/// # Example
///
/// ```no_run
/// use oanda_rs::models::Granularity;
///
/// # async fn example(client: oanda_rs::OandaClient) -> oanda_rs::Result<()> {
/// // Last 100 five-minute mid candles
/// let candles = client.instruments().candles("EUR_USD", 100, Granularity::M5).await?;
/// for candle in candles.complete() {
///     println!("{} close={:?}", candle.time, candle.mid.map(|m| m.c));
/// }
///
/// // Order book snapshot
/// let book = client.instruments().order_book("EUR_USD").await?;
/// # Ok(())
/// # }
/// ```
pub struct InstrumentsService {
    inner: Arc<ClientInner>,
}

/// Query parameters for the candles endpoint.
#[derive(Debug, Serialize)]
struct CandlesQuery {
    count: u32,
    granularity: Granularity,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<&'static str>,
    /// Unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<i64>,
    /// Unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<i64>,
}

impl CandlesQuery {
    fn new(count: u32, granularity: Granularity) -> Self {
        Self {
            count,
            granularity,
            price: None,
            from: None,
            to: None,
        }
    }
}

impl InstrumentsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    async fn fetch_candles(&self, instrument: &str, query: CandlesQuery) -> Result<CandlesResponse> {
        let path = format!("/instruments/{}/candles", urlencoding::encode(instrument));
        self.inner.get_with_query(&path, &query).await
    }

    /// Get the most recent `count` mid-price candles.
    pub async fn candles(
        &self,
        instrument: &str,
        count: u32,
        granularity: Granularity,
    ) -> Result<CandlesResponse> {
        self.fetch_candles(instrument, CandlesQuery::new(count, granularity))
            .await
    }

    /// Get `count` mid-price candles ending at `to`.
    pub async fn candles_to(
        &self,
        instrument: &str,
        count: u32,
        granularity: Granularity,
        to: DateTime<Utc>,
    ) -> Result<CandlesResponse> {
        let query = CandlesQuery {
            to: Some(to.timestamp()),
            ..CandlesQuery::new(count, granularity)
        };
        self.fetch_candles(instrument, query).await
    }

    /// Get `count` mid-price candles starting at `from`.
    pub async fn candles_from(
        &self,
        instrument: &str,
        count: u32,
        granularity: Granularity,
        from: DateTime<Utc>,
    ) -> Result<CandlesResponse> {
        let query = CandlesQuery {
            from: Some(from.timestamp()),
            ..CandlesQuery::new(count, granularity)
        };
        self.fetch_candles(instrument, query).await
    }

    /// Get the most recent `count` candles with separate bid and ask prices.
    pub async fn bid_ask_candles(
        &self,
        instrument: &str,
        count: u32,
        granularity: Granularity,
    ) -> Result<CandlesResponse> {
        let query = CandlesQuery {
            price: Some("BA"),
            ..CandlesQuery::new(count, granularity)
        };
        self.fetch_candles(instrument, query).await
    }

    /// Get the latest order book snapshot.
    pub async fn order_book(&self, instrument: &str) -> Result<Book> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            order_book: Book,
        }
        let path = format!("/instruments/{}/orderBook", urlencoding::encode(instrument));
        let response: Response = self.inner.get(&path).await?;
        Ok(response.order_book)
    }

    /// Get the latest position book snapshot.
    pub async fn position_book(&self, instrument: &str) -> Result<Book> {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            position_book: Book,
        }
        let path = format!("/instruments/{}/positionBook", urlencoding::encode(instrument));
        let response: Response = self.inner.get(&path).await?;
        Ok(response.position_book)
    }
}
