//! Pricing models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One level of the order book: a price and the liquidity available at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBucket {
    /// Price of the level
    pub price: Decimal,
    /// Units available at this price
    #[serde(default)]
    pub liquidity: i64,
}

/// Units available to trade, long and short.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitsAvailableDetails {
    /// Units available for a long order
    #[serde(default)]
    pub long: Decimal,
    /// Units available for a short order
    #[serde(default)]
    pub short: Decimal,
}

/// Units available under each position fill mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitsAvailable {
    #[serde(default)]
    pub default: UnitsAvailableDetails,
    #[serde(default)]
    pub open_only: UnitsAvailableDetails,
    #[serde(default)]
    pub reduce_first: UnitsAvailableDetails,
    #[serde(default)]
    pub reduce_only: UnitsAvailableDetails,
}

/// Factors converting quote currency amounts into the account's home currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteHomeConversionFactors {
    /// Factor for positive amounts
    #[serde(default)]
    pub positive_units: Decimal,
    /// Factor for negative amounts
    #[serde(default)]
    pub negative_units: Decimal,
}

/// A snapshot price for one instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Instrument name
    pub instrument: String,
    /// When the price was produced
    pub time: DateTime<Utc>,
    /// Bid ladder, best first
    #[serde(default)]
    pub bids: Vec<PriceBucket>,
    /// Ask ladder, best first
    #[serde(default)]
    pub asks: Vec<PriceBucket>,
    /// Price used to close long positions
    #[serde(default)]
    pub closeout_bid: Option<Decimal>,
    /// Price used to close short positions
    #[serde(default)]
    pub closeout_ask: Option<Decimal>,
    /// Whether the instrument can currently be traded
    #[serde(default)]
    pub tradeable: bool,
    /// Deprecated status string (`tradeable`, `non-tradeable`, ...)
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub units_available: Option<UnitsAvailable>,
    #[serde(default)]
    pub quote_home_conversion_factors: Option<QuoteHomeConversionFactors>,
}

impl Price {
    /// Best bid, if any.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|b| b.price)
    }

    /// Best ask, if any.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|a| a.price)
    }

    /// Mid of the best bid and ask.
    pub fn mid(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }

    /// Ask minus bid.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }
}

/// Response of `GET /accounts/{id}/pricing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricesResponse {
    /// One price per requested instrument
    #[serde(default)]
    pub prices: Vec<Price>,
    /// Server time of the snapshot
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_prices_response() {
        let json = r#"{
            "time": "2024-03-01T12:00:00.000000000Z",
            "prices": [{
                "type": "PRICE",
                "instrument": "EUR_USD",
                "time": "2024-03-01T11:59:59.123456789Z",
                "bids": [{"price": "1.08450", "liquidity": 1000000}, {"price": "1.08449", "liquidity": 2000000}],
                "asks": [{"price": "1.08462", "liquidity": 1000000}],
                "closeoutBid": "1.08440",
                "closeoutAsk": "1.08472",
                "status": "tradeable",
                "tradeable": true,
                "unitsAvailable": {
                    "default": {"long": "2500000", "short": "2500000"},
                    "openOnly": {"long": "2500000", "short": "2500000"},
                    "reduceFirst": {"long": "2500000", "short": "2500000"},
                    "reduceOnly": {"long": "0", "short": "0"}
                },
                "quoteHomeConversionFactors": {"positiveUnits": "1.00000000", "negativeUnits": "1.00000000"}
            }]
        }"#;

        let response: PricesResponse = serde_json::from_str(json).unwrap();
        let price = &response.prices[0];
        assert_eq!(price.instrument, "EUR_USD");
        assert_eq!(price.bids.len(), 2);
        assert_eq!(price.best_bid(), Some(dec!(1.08450)));
        assert_eq!(price.spread(), Some(dec!(0.00012)));
        assert_eq!(price.mid(), Some(dec!(1.08456)));
        assert!(price.tradeable);
        assert_eq!(
            price.units_available.as_ref().unwrap().default.long,
            dec!(2500000)
        );
    }

    #[test]
    fn test_price_bucket_preserves_scale() {
        let bucket: PriceBucket =
            serde_json::from_str(r#"{"price":"1.1000","liquidity":10}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&bucket).unwrap(),
            r#"{"price":"1.1000","liquidity":10}"#
        );
    }
}
