//! Trades service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{
    CloseResponse, CloseTradeRequest, CloseUnits, Trade, TradeId, TradeResponse, TradesResponse,
};
use crate::Result;

/// Service for trade operations on the client's account.
///
/// # Example
///
/// ```no_run
/// use oanda_rs::models::CloseUnits;
///
/// # async fn example(client: oanda_rs::OandaClient) -> oanda_rs::Result<()> {
/// for trade in client.trades().open().await? {
///     println!("{} {} @ {}", trade.id, trade.current_units, trade.price);
///     client.trades().close(&trade.id.as_str().into(), CloseUnits::All).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct TradesService {
    inner: Arc<ClientInner>,
}

impl TradesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List trades for one instrument.
    pub async fn list_for_instrument(&self, instrument: &str) -> Result<Vec<Trade>> {
        let response: TradesResponse = self
            .inner
            .get_with_query(
                &self.inner.account_path("/trades"),
                &[("instrument", instrument)],
            )
            .await?;
        Ok(response.trades)
    }

    /// List all open trades.
    pub async fn open(&self) -> Result<Vec<Trade>> {
        let response: TradesResponse = self
            .inner
            .get(&self.inner.account_path("/openTrades"))
            .await?;
        Ok(response.trades)
    }

    /// Get one trade.
    pub async fn get(&self, trade_id: &TradeId) -> Result<Trade> {
        let response: TradeResponse = self
            .inner
            .get(&self.inner.account_path(&format!("/trades/{}", trade_id)))
            .await?;
        Ok(response.trade)
    }

    /// Close all or part of a trade with a market order.
    pub async fn close(&self, trade_id: &TradeId, units: CloseUnits) -> Result<CloseResponse> {
        tracing::info!(trade = %trade_id, units = ?units, "Closing trade");
        self.inner
            .put(
                &self.inner.account_path(&format!("/trades/{}/close", trade_id)),
                &CloseTradeRequest { units },
            )
            .await
    }
}
