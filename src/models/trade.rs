//! Trade models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::TradeState;
use super::order::ClientExtensions;
use super::position::CloseUnits;

/// An open or closed trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Trade id
    pub id: String,
    /// Instrument traded
    pub instrument: String,
    /// Open price
    pub price: Decimal,
    /// When the trade was opened
    #[serde(default)]
    pub open_time: Option<DateTime<Utc>>,
    /// Current state
    pub state: TradeState,
    /// Units at open (negative for shorts)
    pub initial_units: Decimal,
    /// Units still open
    #[serde(default)]
    pub current_units: Decimal,
    /// Realized profit/loss
    #[serde(rename = "realizedPL", default)]
    pub realized_pl: Option<Decimal>,
    /// Unrealized profit/loss
    #[serde(rename = "unrealizedPL", default)]
    pub unrealized_pl: Option<Decimal>,
    /// Margin used by the trade
    #[serde(default)]
    pub margin_used: Option<Decimal>,
    /// Financing paid/collected
    #[serde(default)]
    pub financing: Option<Decimal>,
    /// When the trade was fully closed
    #[serde(default)]
    pub close_time: Option<DateTime<Utc>>,
    /// Client extensions attached to the trade
    #[serde(default)]
    pub client_extensions: Option<ClientExtensions>,
}

impl Trade {
    /// Returns `true` if the trade is long.
    pub fn is_long(&self) -> bool {
        self.initial_units.is_sign_positive()
    }
}

/// Body of `PUT /accounts/{id}/trades/{trade}/close`.
#[derive(Debug, Clone, Serialize)]
pub struct CloseTradeRequest {
    /// Units to close
    pub units: CloseUnits,
}

impl CloseTradeRequest {
    /// Close the whole trade.
    pub fn all() -> Self {
        Self {
            units: CloseUnits::All,
        }
    }

    /// Close part of the trade.
    pub fn partial(units: Decimal) -> Self {
        Self {
            units: CloseUnits::Units(units),
        }
    }
}

/// Response of trade listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradesResponse {
    /// Trades matching the request
    pub trades: Vec<Trade>,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

/// Response of `GET /accounts/{id}/trades/{trade}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    /// The requested trade
    pub trade: Trade,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_trade() {
        let json = r#"{
            "id": "1",
            "instrument": "EUR_USD",
            "price": "1.1000",
            "openTime": "2024-03-01T12:00:00.000000000Z",
            "state": "OPEN",
            "initialUnits": "-100",
            "currentUnits": "-100",
            "realizedPL": "0.0000",
            "unrealizedPL": "-1.5000",
            "financing": "0.0000"
        }"#;

        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.state, TradeState::Open);
        assert_eq!(trade.unrealized_pl, Some(dec!(-1.5)));
        assert!(!trade.is_long());
    }

    #[test]
    fn test_close_trade_request() {
        assert_eq!(
            serde_json::to_value(CloseTradeRequest::all()).unwrap(),
            serde_json::json!({"units": "ALL"})
        );
        assert_eq!(
            serde_json::to_value(CloseTradeRequest::partial(dec!(10))).unwrap(),
            serde_json::json!({"units": "10"})
        );
    }
}
