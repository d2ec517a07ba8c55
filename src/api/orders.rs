//! Orders service for order placement and management.

use std::sync::Arc;

use serde::Serialize;

use crate::client::ClientInner;
use crate::models::order::OrderEnvelope;
use crate::models::{
    Order, OrderCancelResponse, OrderCreateResponse, OrderReplaceResponse, OrderRequest,
    OrderResponse, OrderSpecifier, OrdersResponse,
};
use crate::Result;

/// Service for order operations on the client's account.
///
/// # Example
///
/// ```no_run
/// use oanda_rs::models::{OnFill, OrderRequestBuilder, OrderType, TimeInForce};
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: oanda_rs::OandaClient) -> oanda_rs::Result<()> {
/// // Build a limit order with a stop loss
/// let order = OrderRequestBuilder::new()
///     .order_type(OrderType::Limit)
///     .instrument("EUR_USD")
///     .units(dec!(1000))
///     .price(dec!(1.0800))
///     .time_in_force(TimeInForce::Gtc)
///     .stop_loss_on_fill(OnFill::at_price(dec!(1.0750)))
///     .build()?;
///
/// // Place the order
/// let result = client.orders().create(&order).await?;
/// println!("Created: {:?}", result.order_create_transaction.map(|t| t.id));
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

/// Query parameters for listing orders.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    /// Filter by instrument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    /// Filter by state (`PENDING`, `FILLED`, `TRIGGERED`, `CANCELLED`, `ALL`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Maximum number of orders to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Only orders with an id lower than this
    #[serde(rename = "beforeID", skip_serializing_if = "Option::is_none")]
    pub before_id: Option<String>,
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Submit a new order.
    pub async fn create(&self, order: &OrderRequest) -> Result<OrderCreateResponse> {
        tracing::info!(
            instrument = ?order.instrument,
            units = ?order.units,
            order_type = ?order.order_type,
            "Creating order"
        );
        self.inner
            .post(&self.inner.account_path("/orders"), &OrderEnvelope { order })
            .await
    }

    /// List orders, optionally only those for one instrument.
    pub async fn list(&self, instrument: Option<&str>) -> Result<Vec<Order>> {
        self.query(OrdersQuery {
            instrument: instrument.map(String::from),
            ..Default::default()
        })
        .await
    }

    /// List orders matching a query.
    pub async fn query(&self, query: OrdersQuery) -> Result<Vec<Order>> {
        let response: OrdersResponse = self
            .inner
            .get_with_query(&self.inner.account_path("/orders"), &query)
            .await?;
        Ok(response.orders)
    }

    /// List all pending orders.
    pub async fn pending(&self) -> Result<Vec<Order>> {
        let response: OrdersResponse = self
            .inner
            .get(&self.inner.account_path("/pendingOrders"))
            .await?;
        Ok(response.orders)
    }

    /// Get one order by id or client id.
    pub async fn get(&self, specifier: &OrderSpecifier) -> Result<Order> {
        let response: OrderResponse = self
            .inner
            .get(&self.inner.account_path(&format!("/orders/{}", specifier)))
            .await?;
        Ok(response.order)
    }

    /// Replace an order: cancels it and creates `order` in its place.
    pub async fn replace(
        &self,
        specifier: &OrderSpecifier,
        order: &OrderRequest,
    ) -> Result<OrderReplaceResponse> {
        tracing::info!(order = %specifier, "Replacing order");
        self.inner
            .put(
                &self.inner.account_path(&format!("/orders/{}", specifier)),
                &OrderEnvelope { order },
            )
            .await
    }

    /// Cancel a pending order.
    pub async fn cancel(&self, specifier: &OrderSpecifier) -> Result<OrderCancelResponse> {
        tracing::info!(order = %specifier, "Cancelling order");
        self.inner
            .put(
                &self.inner.account_path(&format!("/orders/{}/cancel", specifier)),
                &serde_json::json!({}),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_query_serialization() {
        let query = OrdersQuery {
            instrument: Some("EUR_USD".into()),
            count: Some(10),
            before_id: Some("100".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"instrument": "EUR_USD", "count": 10, "beforeID": "100"})
        );
    }
}
