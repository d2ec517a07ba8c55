//! Messages carried by the pricing and transaction streams.
//!
//! Every line of a stream body is one JSON object. A line is either a
//! heartbeat, a server error envelope, or an event of the stream's kind.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::PriceBucket;
use crate::{Error, Result};
use rust_decimal::Decimal;

/// Discriminator of heartbeat lines.
pub const HEARTBEAT_TYPE: &str = "HEARTBEAT";

/// A price tick from the pricing stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdate {
    /// Raw discriminator, `PRICE` for price ticks
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Server timestamp as sent
    pub time: String,
    /// Instrument name
    #[serde(default)]
    pub instrument: String,
    /// Bid ladder in wire order
    #[serde(default)]
    pub bids: Vec<PriceBucket>,
    /// Ask ladder in wire order
    #[serde(default)]
    pub asks: Vec<PriceBucket>,
    /// Price used to close long positions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closeout_bid: Option<Decimal>,
    /// Price used to close short positions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closeout_ask: Option<Decimal>,
    /// Deprecated status string, superseded by `tradeable`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Whether the instrument can currently be traded
    #[serde(default)]
    pub tradeable: bool,
}

impl PriceUpdate {
    /// Best bid, if any.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|b| b.price)
    }

    /// Best ask, if any.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|a| a.price)
    }
}

/// An event from the transaction stream.
///
/// The header fields are typed. Everything else on the line, whether a
/// nested `transaction` object or the flat fields of an `ORDER_FILL`, is
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    /// Transaction type as sent, e.g. `ORDER_FILL`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Server timestamp as sent
    pub time: String,
    /// Id of a flat transaction line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Id of the transaction this line reports
    #[serde(rename = "transactionID", default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Owning account
    #[serde(rename = "accountID", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Id of the first transaction in the batch
    #[serde(rename = "batchID", default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    /// Client request that caused the transaction
    #[serde(rename = "requestID", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Nested transaction payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Value>,
    /// Every other field on the line, keyed by its wire name
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keep-alive line; never delivered to handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heartbeat {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub time: String,
    /// Last transaction id, sent on transaction stream heartbeats
    #[serde(
        rename = "lastTransactionID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_transaction_id: Option<String>,
}

/// Error envelope sent in place of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorNotice {
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// One classified stream line.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage<T> {
    /// A domain event for the handler
    Event(T),
    /// Keep-alive
    Heartbeat(Heartbeat),
    /// The server reported an error; the stream is over
    ErrorNotice(ErrorNotice),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(rename = "errorMessage", default)]
    error_message: Option<String>,
}

impl<T: DeserializeOwned> StreamMessage<T> {
    /// Classify one non-blank line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamDecode`] if the line is not JSON or does not
    /// match the shape its discriminator announces.
    ///
    /// # Example
    ///
    /// ```
    /// use oanda_rs::streaming::{PriceUpdate, StreamMessage};
    ///
    /// let line = r#"{"type":"HEARTBEAT","time":"2024-03-01T12:00:00Z"}"#;
    /// let message = StreamMessage::<PriceUpdate>::parse(line).unwrap();
    /// assert!(matches!(message, StreamMessage::Heartbeat(_)));
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        let envelope: Envelope = decode(line)?;
        let kind = envelope.kind.as_deref().unwrap_or("");

        if kind == HEARTBEAT_TYPE {
            return decode(line).map(StreamMessage::Heartbeat);
        }

        if kind.is_empty() {
            if let Some(message) = envelope.error_message.filter(|m| !m.is_empty()) {
                let error_code = serde_json::from_str::<Value>(line)
                    .ok()
                    .and_then(|v| v.get("errorCode")?.as_str().map(String::from));
                return Ok(StreamMessage::ErrorNotice(ErrorNotice {
                    error_message: message,
                    error_code,
                }));
            }
        }

        decode(line).map(StreamMessage::Event)
    }
}

fn decode<D: DeserializeOwned>(line: &str) -> Result<D> {
    serde_json::from_str(line).map_err(|source| Error::StreamDecode {
        line: line.to_string(),
        source,
    })
}
