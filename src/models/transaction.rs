//! Transaction models.
//!
//! OANDA defines dozens of transaction types that share a common header.
//! [`Transaction`] models that header plus the fields common to fills and
//! order creation; everything else is kept in [`Transaction::extra`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single account transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction id
    pub id: String,
    /// Transaction type, e.g. `ORDER_FILL` or `MARKET_ORDER`
    #[serde(rename = "type")]
    pub kind: String,
    /// When the transaction was created
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    /// User that initiated the transaction
    #[serde(rename = "userID", default)]
    pub user_id: Option<i64>,
    /// Account the transaction belongs to
    #[serde(rename = "accountID", default)]
    pub account_id: Option<String>,
    /// Id of the batch the transaction was created in
    #[serde(rename = "batchID", default)]
    pub batch_id: Option<String>,
    /// Request that produced the transaction
    #[serde(rename = "requestID", default)]
    pub request_id: Option<String>,
    /// Instrument involved, if any
    #[serde(default)]
    pub instrument: Option<String>,
    /// Units involved (negative for sells)
    #[serde(default)]
    pub units: Option<Decimal>,
    /// Execution price for fills
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Realized profit/loss
    #[serde(default)]
    pub pl: Option<Decimal>,
    /// Financing paid/collected
    #[serde(default)]
    pub financing: Option<Decimal>,
    /// Commission charged
    #[serde(default)]
    pub commission: Option<Decimal>,
    /// Account balance after the transaction
    #[serde(default)]
    pub account_balance: Option<Decimal>,
    /// Why the transaction was created
    #[serde(default)]
    pub reason: Option<String>,
    /// Related order id
    #[serde(rename = "orderID", default)]
    pub order_id: Option<String>,
    /// Trade opened by a fill
    #[serde(default)]
    pub trade_opened: Option<TradeOpen>,
    /// Trade partially closed by a fill
    #[serde(default)]
    pub trade_reduced: Option<TradeReduce>,
    /// Trades fully closed by a fill
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trades_closed: Vec<TradeReduce>,
    /// Every field not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Returns `true` for `ORDER_FILL` transactions.
    pub fn is_fill(&self) -> bool {
        self.kind == "ORDER_FILL"
    }
}

/// A trade opened by an order fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOpen {
    /// Id of the new trade
    #[serde(rename = "tradeID")]
    pub trade_id: String,
    /// Units opened
    pub units: Decimal,
    /// Average fill price
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// A trade reduced or closed by an order fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeReduce {
    /// Id of the affected trade
    #[serde(rename = "tradeID")]
    pub trade_id: String,
    /// Units closed
    pub units: Decimal,
    /// Realized profit/loss
    #[serde(rename = "realizedPL", default)]
    pub realized_pl: Option<Decimal>,
    /// Financing realized
    #[serde(default)]
    pub financing: Option<Decimal>,
}

/// Response of `GET /accounts/{id}/transactions`: page links, not the
/// transactions themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPages {
    /// Start of the requested range
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    /// End of the requested range
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
    /// Page size used by the server
    #[serde(default)]
    pub page_size: u32,
    /// Number of transactions in the range
    #[serde(default)]
    pub count: u64,
    /// URLs of the pages
    #[serde(default)]
    pub pages: Vec<String>,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

/// Response of `GET /accounts/{id}/transactions/{txn}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// The requested transaction
    pub transaction: Transaction,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

/// Response of `GET /accounts/{id}/transactions/sinceid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    /// Transactions after the given id
    pub transactions: Vec<Transaction>,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}
