//! Order models for placing and managing orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::*;
use super::transaction::Transaction;

/// Client-supplied metadata attached to orders and trades.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientExtensions {
    /// Client id (usable as `@id` order specifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Free-form tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Free-form comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Take-profit or stop-loss details created when an order fills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnFill {
    /// Trigger price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Distance from the fill price, alternative to `price`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Decimal>,
    /// Time in force of the dependent order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
}

impl OnFill {
    /// Dependent order at an absolute price.
    pub fn at_price(price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }

    /// Dependent order at a distance from the fill price.
    pub fn at_distance(distance: Decimal) -> Self {
        Self {
            distance: Some(distance),
            ..Default::default()
        }
    }
}

/// An order to be submitted with `POST /accounts/{id}/orders` or used to
/// replace an existing order.
///
/// Use [`OrderRequestBuilder`] to construct one.
///
/// # Example
///
/// ```
/// use oanda_rs::models::{OrderRequestBuilder, OrderType, TimeInForce, OnFill};
/// use rust_decimal_macros::dec;
///
/// let order = OrderRequestBuilder::new()
///     .instrument("EUR_USD")
///     .units(dec!(100))
///     .order_type(OrderType::Limit)
///     .price(dec!(1.0800))
///     .time_in_force(TimeInForce::Gtc)
///     .stop_loss_on_fill(OnFill::at_price(dec!(1.0750)))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Instrument to trade
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    /// Units to trade; negative to sell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<Decimal>,
    /// How long the order remains active
    pub time_in_force: TimeInForce,
    /// Expiry for GTD orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime<Utc>>,
    /// Trigger/limit price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Worst acceptable fill price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<Decimal>,
    /// Effect of the fill on existing positions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_fill: Option<OrderPositionFill>,
    /// Trade the order depends on (dependent orders only)
    #[serde(rename = "tradeID", skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,
    /// Take profit created on fill
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_on_fill: Option<OnFill>,
    /// Stop loss created on fill
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_on_fill: Option<OnFill>,
    /// Client metadata for the order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
}

/// Builder for [`OrderRequest`] with validation.
#[derive(Debug, Default, Clone)]
pub struct OrderRequestBuilder {
    order_type: Option<OrderType>,
    instrument: Option<String>,
    units: Option<Decimal>,
    time_in_force: Option<TimeInForce>,
    gtd_time: Option<DateTime<Utc>>,
    price: Option<Decimal>,
    price_bound: Option<Decimal>,
    position_fill: Option<OrderPositionFill>,
    trade_id: Option<String>,
    take_profit_on_fill: Option<OnFill>,
    stop_loss_on_fill: Option<OnFill>,
    client_extensions: Option<ClientExtensions>,
}

impl OrderRequestBuilder {
    /// Create a new order builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for a fill-or-kill market order.
    pub fn market(instrument: impl Into<String>, units: Decimal) -> Self {
        Self::new()
            .order_type(OrderType::Market)
            .instrument(instrument)
            .units(units)
            .time_in_force(TimeInForce::Fok)
            .position_fill(OrderPositionFill::Default)
    }

    /// Set the order type.
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    /// Set the instrument.
    pub fn instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = Some(instrument.into());
        self
    }

    /// Set the units; negative values sell.
    pub fn units(mut self, units: Decimal) -> Self {
        self.units = Some(units);
        self
    }

    /// Set the time in force.
    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set the expiry of a GTD order.
    pub fn gtd_time(mut self, time: DateTime<Utc>) -> Self {
        self.gtd_time = Some(time);
        self
    }

    /// Set the trigger/limit price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the worst acceptable fill price.
    pub fn price_bound(mut self, bound: Decimal) -> Self {
        self.price_bound = Some(bound);
        self
    }

    /// Set the position fill behaviour.
    pub fn position_fill(mut self, fill: OrderPositionFill) -> Self {
        self.position_fill = Some(fill);
        self
    }

    /// Attach the order to an existing trade.
    pub fn trade_id(mut self, trade_id: impl Into<String>) -> Self {
        self.trade_id = Some(trade_id.into());
        self
    }

    /// Create a take profit when the order fills.
    pub fn take_profit_on_fill(mut self, details: OnFill) -> Self {
        self.take_profit_on_fill = Some(details);
        self
    }

    /// Create a stop loss when the order fills.
    pub fn stop_loss_on_fill(mut self, details: OnFill) -> Self {
        self.stop_loss_on_fill = Some(details);
        self
    }

    /// Attach client extensions.
    pub fn client_extensions(mut self, extensions: ClientExtensions) -> Self {
        self.client_extensions = Some(extensions);
        self
    }

    /// Build the order, validating all fields.
    pub fn build(self) -> crate::Result<OrderRequest> {
        let order_type = self.order_type.ok_or_else(|| {
            crate::Error::InvalidInput("order_type is required".to_string())
        })?;

        let time_in_force = self.time_in_force.unwrap_or(match order_type {
            OrderType::Market => TimeInForce::Fok,
            _ => TimeInForce::Gtc,
        });

        let dependent = matches!(
            order_type,
            OrderType::TakeProfit
                | OrderType::StopLoss
                | OrderType::GuaranteedStopLoss
                | OrderType::TrailingStopLoss
        );

        if dependent {
            if self.trade_id.is_none() {
                return Err(crate::Error::InvalidInput(
                    "trade_id is required for dependent orders".to_string(),
                ));
            }
        } else {
            if self.instrument.as_deref().map_or(true, str::is_empty) {
                return Err(crate::Error::InvalidInput(
                    "instrument is required".to_string(),
                ));
            }
            match self.units {
                None => {
                    return Err(crate::Error::InvalidInput(
                        "units is required".to_string(),
                    ))
                }
                Some(units) if units.is_zero() => {
                    return Err(crate::Error::InvalidInput(
                        "units must be non-zero".to_string(),
                    ))
                }
                Some(_) => {}
            }
        }

        if order_type.requires_price() && self.price.is_none() {
            return Err(crate::Error::InvalidInput(format!(
                "price is required for {:?} orders",
                order_type
            )));
        }

        if time_in_force == TimeInForce::Gtd && self.gtd_time.is_none() {
            return Err(crate::Error::InvalidInput(
                "gtd_time is required for GTD orders".to_string(),
            ));
        }

        Ok(OrderRequest {
            order_type,
            instrument: self.instrument,
            units: self.units,
            time_in_force,
            gtd_time: self.gtd_time,
            price: self.price,
            price_bound: self.price_bound,
            position_fill: self.position_fill,
            trade_id: self.trade_id,
            take_profit_on_fill: self.take_profit_on_fill,
            stop_loss_on_fill: self.stop_loss_on_fill,
            client_extensions: self.client_extensions,
        })
    }
}

/// Wire envelope `{"order": ...}` used by create and replace.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct OrderEnvelope<'a> {
    pub order: &'a OrderRequest,
}

/// An order as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    pub id: String,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Current state
    pub state: OrderState,
    /// When the order was created
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    /// Instrument, absent for dependent orders
    #[serde(default)]
    pub instrument: Option<String>,
    /// Units, absent for dependent orders
    #[serde(default)]
    pub units: Option<Decimal>,
    /// Trigger/limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Time in force
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    /// Position fill behaviour
    #[serde(default)]
    pub position_fill: Option<OrderPositionFill>,
    /// Trigger condition for price-dependent orders
    #[serde(default)]
    pub trigger_condition: Option<OrderTriggerCondition>,
    /// Trade a dependent order belongs to
    #[serde(rename = "tradeID", default)]
    pub trade_id: Option<String>,
    /// Order this one replaced
    #[serde(rename = "replacesOrderID", default)]
    pub replaces_order_id: Option<String>,
    /// Transaction that filled the order
    #[serde(rename = "fillingTransactionID", default)]
    pub filling_transaction_id: Option<String>,
    /// Trade opened by the fill
    #[serde(rename = "tradeOpenedID", default)]
    pub trade_opened_id: Option<String>,
    /// Client extensions
    #[serde(default)]
    pub client_extensions: Option<ClientExtensions>,
}

/// Response of `POST /accounts/{id}/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateResponse {
    /// Transaction that created the order
    #[serde(default)]
    pub order_create_transaction: Option<Transaction>,
    /// Fill, for orders filled immediately
    #[serde(default)]
    pub order_fill_transaction: Option<Transaction>,
    /// Cancellation, for orders cancelled immediately
    #[serde(default)]
    pub order_cancel_transaction: Option<Transaction>,
    /// Ids of every transaction created
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<String>,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID", default)]
    pub last_transaction_id: Option<String>,
}

impl OrderCreateResponse {
    /// Id of the trade opened by an immediate fill.
    pub fn opened_trade_id(&self) -> Option<&str> {
        self.order_fill_transaction
            .as_ref()
            .and_then(|fill| fill.trade_opened.as_ref())
            .map(|opened| opened.trade_id.as_str())
    }
}

/// Response of `PUT /accounts/{id}/orders/{spec}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReplaceResponse {
    /// Cancellation of the replaced order
    #[serde(default)]
    pub order_cancel_transaction: Option<Transaction>,
    /// Creation of the replacing order
    #[serde(default)]
    pub order_create_transaction: Option<Transaction>,
    /// Fill, if the replacing order filled immediately
    #[serde(default)]
    pub order_fill_transaction: Option<Transaction>,
    /// Ids of every transaction created
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<String>,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID", default)]
    pub last_transaction_id: Option<String>,
}

/// Response of `PUT /accounts/{id}/orders/{spec}/cancel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCancelResponse {
    /// The cancellation
    pub order_cancel_transaction: Transaction,
    /// Ids of every transaction created
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<String>,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID", default)]
    pub last_transaction_id: Option<String>,
}

/// Response of order listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    /// Orders matching the request
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

/// Response of `GET /accounts/{id}/orders/{spec}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// The requested order
    pub order: Order,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID", default)]
    pub last_transaction_id: Option<String>,
}
