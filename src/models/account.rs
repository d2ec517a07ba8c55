//! Account models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::instrument::Instrument;
use super::order::Order;
use super::position::Position;
use super::pricing::UnitsAvailable;
use super::trade::Trade;
use super::transaction::Transaction;

/// Entry of `GET /accounts`: an account the token may access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProperties {
    /// Account id
    pub id: String,
    /// Linked MT4 account, if any
    #[serde(rename = "mt4AccountID", default)]
    pub mt4_account_id: Option<i64>,
    /// Tags attached to the account
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Account balances and counters, without the open trades, positions and
/// orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// Account id
    pub id: String,
    /// Client-assigned alias
    #[serde(default)]
    pub alias: Option<String>,
    /// Home currency
    pub currency: String,
    /// Current balance
    pub balance: Decimal,
    #[serde(rename = "createdByUserID", default)]
    pub created_by_user_id: Option<i64>,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    /// Lifetime profit/loss
    #[serde(default)]
    pub pl: Option<Decimal>,
    #[serde(rename = "resettablePL", default)]
    pub resettable_pl: Option<Decimal>,
    #[serde(rename = "unrealizedPL", default)]
    pub unrealized_pl: Option<Decimal>,
    #[serde(default)]
    pub financing: Option<Decimal>,
    #[serde(default)]
    pub commission: Option<Decimal>,
    /// Left-shifted leverage, e.g. `0.02` for 50:1
    #[serde(default)]
    pub margin_rate: Option<Decimal>,
    #[serde(default)]
    pub open_trade_count: u32,
    #[serde(default)]
    pub open_position_count: u32,
    #[serde(default)]
    pub pending_order_count: u32,
    #[serde(default)]
    pub hedging_enabled: bool,
    /// Net asset value
    #[serde(rename = "NAV", default)]
    pub nav: Option<Decimal>,
    #[serde(default)]
    pub margin_used: Option<Decimal>,
    #[serde(default)]
    pub margin_available: Option<Decimal>,
    #[serde(default)]
    pub position_value: Option<Decimal>,
    #[serde(default)]
    pub margin_closeout_percent: Option<Decimal>,
    #[serde(default)]
    pub withdrawal_limit: Option<Decimal>,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID", default)]
    pub last_transaction_id: Option<String>,
}

/// Full account state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Balances and counters
    #[serde(flatten)]
    pub summary: AccountSummary,
    /// Open trades
    #[serde(default)]
    pub trades: Vec<Trade>,
    /// Positions, including ones with no open units
    #[serde(default)]
    pub positions: Vec<Position>,
    /// Pending orders
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Response of `GET /accounts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsResponse {
    pub accounts: Vec<AccountProperties>,
}

/// Response of `GET /accounts/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDetails {
    pub account: Account,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

/// Response of `GET /accounts/{id}/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummaryResponse {
    pub account: AccountSummary,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

/// Response of `GET /accounts/{id}/instruments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInstrumentsResponse {
    pub instruments: Vec<Instrument>,
    #[serde(rename = "lastTransactionID", default)]
    pub last_transaction_id: Option<String>,
}

/// What changed on an account since a given transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountChanges {
    #[serde(default)]
    pub orders_created: Vec<Order>,
    #[serde(default)]
    pub orders_cancelled: Vec<Order>,
    #[serde(default)]
    pub orders_filled: Vec<Order>,
    #[serde(default)]
    pub orders_triggered: Vec<Order>,
    #[serde(default)]
    pub trades_opened: Vec<Trade>,
    #[serde(default)]
    pub trades_reduced: Vec<Trade>,
    #[serde(default)]
    pub trades_closed: Vec<Trade>,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Unrealized profit/loss of one open trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedTradeState {
    pub id: String,
    #[serde(rename = "unrealizedPL")]
    pub unrealized_pl: Decimal,
    #[serde(default)]
    pub margin_used: Option<Decimal>,
}

/// Unrealized profit/loss of one position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedPositionState {
    pub instrument: String,
    #[serde(rename = "netUnrealizedPL")]
    pub net_unrealized_pl: Decimal,
    #[serde(rename = "longUnrealizedPL", default)]
    pub long_unrealized_pl: Option<Decimal>,
    #[serde(rename = "shortUnrealizedPL", default)]
    pub short_unrealized_pl: Option<Decimal>,
}

/// Price-dependent account state at the time of an account changes request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountChangesState {
    #[serde(rename = "unrealizedPL", default)]
    pub unrealized_pl: Option<Decimal>,
    #[serde(rename = "NAV", default)]
    pub nav: Option<Decimal>,
    #[serde(default)]
    pub margin_used: Option<Decimal>,
    #[serde(default)]
    pub margin_available: Option<Decimal>,
    #[serde(default)]
    pub position_value: Option<Decimal>,
    #[serde(default)]
    pub withdrawal_limit: Option<Decimal>,
    #[serde(default)]
    pub trades: Vec<CalculatedTradeState>,
    #[serde(default)]
    pub positions: Vec<CalculatedPositionState>,
    /// Dynamic order state (trailing stop levels), kept as raw JSON
    #[serde(default)]
    pub orders: Vec<serde_json::Value>,
}

/// Response of `GET /accounts/{id}/changes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountChangesResponse {
    #[serde(default)]
    pub changes: AccountChanges,
    #[serde(default)]
    pub state: AccountChangesState,
    /// Pass as `since_transaction_id` to poll the next batch of changes
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

/// Cost and margin of a hypothetical order under one position fill mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitValue {
    #[serde(default)]
    pub units: Decimal,
    #[serde(default)]
    pub commission: Decimal,
    #[serde(default)]
    pub position_value_change: Decimal,
    #[serde(default)]
    pub position_value: Decimal,
    #[serde(default)]
    pub margin_required: Decimal,
    #[serde(default)]
    pub margin_used: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitValues {
    #[serde(default)]
    pub isolation: Option<UnitValue>,
    #[serde(default)]
    pub position_default: Option<UnitValue>,
    #[serde(default)]
    pub position_open_only: Option<UnitValue>,
    #[serde(default)]
    pub position_reduce_first: Option<UnitValue>,
    #[serde(default)]
    pub position_reduce_only: Option<UnitValue>,
}

/// Response of `GET /accounts/{id}/orderEntryData`: what an order of a
/// given size would cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEntryData {
    #[serde(default)]
    pub gain_per_pip_per_million_units: Option<Decimal>,
    #[serde(default)]
    pub loss_per_pip_per_million_units: Option<Decimal>,
    #[serde(default)]
    pub units_available: UnitsAvailable,
    #[serde(default)]
    pub unit_values: UnitValues,
    /// Commission tables, kept as raw JSON
    #[serde(default)]
    pub value_tables: Option<serde_json::Value>,
    #[serde(rename = "lastTransactionID", default)]
    pub last_transaction_id: Option<String>,
}
