//! Position models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::transaction::Transaction;

/// The aggregated position in one instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Instrument name
    pub instrument: String,
    /// Lifetime profit/loss
    #[serde(default)]
    pub pl: Option<Decimal>,
    /// Profit/loss since the last reset
    #[serde(rename = "resettablePL", default)]
    pub resettable_pl: Option<Decimal>,
    /// Unrealized profit/loss
    #[serde(rename = "unrealizedPL", default)]
    pub unrealized_pl: Option<Decimal>,
    /// Margin used by the position
    #[serde(default)]
    pub margin_used: Option<Decimal>,
    /// Long side
    pub long: PositionSide,
    /// Short side
    pub short: PositionSide,
}

impl Position {
    /// Net units (long units plus the negative short units).
    pub fn net_units(&self) -> Decimal {
        self.long.units + self.short.units
    }
}

/// One side (long or short) of a position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSide {
    /// Units held; negative for the short side
    #[serde(default)]
    pub units: Decimal,
    /// Volume-weighted average open price
    #[serde(default)]
    pub average_price: Option<Decimal>,
    /// Open trades contributing to this side
    #[serde(rename = "tradeIDs", default)]
    pub trade_ids: Vec<String>,
    /// Lifetime profit/loss
    #[serde(default)]
    pub pl: Option<Decimal>,
    /// Profit/loss since the last reset
    #[serde(rename = "resettablePL", default)]
    pub resettable_pl: Option<Decimal>,
    /// Unrealized profit/loss
    #[serde(rename = "unrealizedPL", default)]
    pub unrealized_pl: Option<Decimal>,
}

/// How many units of a trade or position side to close.
///
/// # Example
///
/// ```
/// use oanda_rs::models::CloseUnits;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(serde_json::to_string(&CloseUnits::All).unwrap(), "\"ALL\"");
/// assert_eq!(serde_json::to_string(&CloseUnits::Units(dec!(50))).unwrap(), "\"50\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseUnits {
    /// Close everything
    All,
    /// Close this many units
    Units(Decimal),
    /// Close nothing (only meaningful for position sides)
    None,
}

impl Serialize for CloseUnits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CloseUnits::All => serializer.serialize_str("ALL"),
            CloseUnits::None => serializer.serialize_str("NONE"),
            CloseUnits::Units(units) => serializer.serialize_str(&units.to_string()),
        }
    }
}

/// Body of `PUT /accounts/{id}/positions/{instrument}/close`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePositionRequest {
    /// Units of the long side to close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_units: Option<CloseUnits>,
    /// Units of the short side to close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_units: Option<CloseUnits>,
}

impl ClosePositionRequest {
    /// Close the whole long side.
    pub fn long_all() -> Self {
        Self {
            long_units: Some(CloseUnits::All),
            short_units: None,
        }
    }

    /// Close the whole short side.
    pub fn short_all() -> Self {
        Self {
            long_units: None,
            short_units: Some(CloseUnits::All),
        }
    }

    /// Close both sides entirely.
    pub fn all() -> Self {
        Self {
            long_units: Some(CloseUnits::All),
            short_units: Some(CloseUnits::All),
        }
    }
}

/// Transactions produced by closing a trade or position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseResponse {
    /// Closing market order for the long side, or for a trade
    #[serde(alias = "longOrderCreateTransaction", default)]
    pub order_create_transaction: Option<Transaction>,
    /// Fill of the closing order
    #[serde(alias = "longOrderFillTransaction", default)]
    pub order_fill_transaction: Option<Transaction>,
    /// Cancellation of the closing order, if it could not be filled
    #[serde(alias = "longOrderCancelTransaction", default)]
    pub order_cancel_transaction: Option<Transaction>,
    /// Closing market order for the short side of a position
    #[serde(default)]
    pub short_order_create_transaction: Option<Transaction>,
    /// Fill of the short side closing order
    #[serde(default)]
    pub short_order_fill_transaction: Option<Transaction>,
    /// Ids of every transaction created
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<String>,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID", default)]
    pub last_transaction_id: Option<String>,
}

/// Response of `GET /accounts/{id}/openPositions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionsResponse {
    /// Open positions
    pub positions: Vec<Position>,
    /// Most recent transaction id on the account
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_position() {
        let json = r#"{
            "instrument": "EUR_USD",
            "pl": "10.00",
            "resettablePL": "10.00",
            "unrealizedPL": "5.00",
            "long": {
                "averagePrice": "1.1000",
                "pl": "10.00",
                "resettablePL": "10.00",
                "tradeIDs": ["1", "2"],
                "units": "100",
                "unrealizedPL": "5.00"
            },
            "short": {"units": "0", "pl": "0.0000"}
        }"#;

        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.long.trade_ids, vec!["1", "2"]);
        assert_eq!(position.long.average_price, Some(dec!(1.1000)));
        assert_eq!(position.net_units(), dec!(100));
    }

    #[test]
    fn test_close_position_request_serialization() {
        let body = serde_json::to_value(ClosePositionRequest::long_all()).unwrap();
        assert_eq!(body, serde_json::json!({"longUnits": "ALL"}));

        let body = serde_json::to_value(ClosePositionRequest {
            long_units: Some(CloseUnits::Units(dec!(25))),
            short_units: Some(CloseUnits::None),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"longUnits": "25", "shortUnits": "NONE"}));
    }
}
