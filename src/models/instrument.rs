//! Instrument, candlestick and order/position book models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{Granularity, InstrumentType};

/// A tradeable instrument as listed for an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Instrument name, e.g. `EUR_USD`
    pub name: String,
    /// Instrument kind
    #[serde(rename = "type")]
    pub instrument_type: InstrumentType,
    /// Human-readable name, e.g. `EUR/USD`
    #[serde(default)]
    pub display_name: Option<String>,
    /// Location of the pip (`-4` means 0.0001)
    #[serde(default)]
    pub pip_location: i32,
    /// Decimal places used when displaying prices
    #[serde(default)]
    pub display_precision: u32,
    /// Decimal places allowed in units
    #[serde(default)]
    pub trade_units_precision: u32,
    #[serde(default)]
    pub minimum_trade_size: Option<Decimal>,
    #[serde(default)]
    pub maximum_trailing_stop_distance: Option<Decimal>,
    #[serde(default)]
    pub minimum_trailing_stop_distance: Option<Decimal>,
    #[serde(default)]
    pub maximum_position_size: Option<Decimal>,
    #[serde(default)]
    pub maximum_order_units: Option<Decimal>,
    /// Margin rate for positions in this instrument
    #[serde(default)]
    pub margin_rate: Option<Decimal>,
}

impl Instrument {
    /// Size of one pip, derived from [`Instrument::pip_location`].
    pub fn pip_size(&self) -> Decimal {
        if self.pip_location >= 0 {
            Decimal::from(10_i64.pow(self.pip_location.unsigned_abs()))
        } else {
            Decimal::new(1, self.pip_location.unsigned_abs())
        }
    }
}

/// Open/high/low/close prices of one candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandlestickData {
    /// Open
    pub o: Decimal,
    /// High
    pub h: Decimal,
    /// Low
    pub l: Decimal,
    /// Close
    pub c: Decimal,
}

/// One candle. Which of `mid`, `bid` and `ask` are present depends on the
/// `price` query parameter of the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candlestick {
    /// Start of the candle
    pub time: DateTime<Utc>,
    /// Number of price updates in the candle
    #[serde(default)]
    pub volume: u64,
    /// `false` while the candle is still forming
    #[serde(default)]
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<CandlestickData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<CandlestickData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<CandlestickData>,
}

/// Response of `GET /instruments/{instrument}/candles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandlesResponse {
    /// Instrument the candles belong to
    #[serde(default)]
    pub instrument: Option<String>,
    /// Granularity of the candles
    #[serde(default)]
    pub granularity: Option<Granularity>,
    /// Candles, oldest first
    #[serde(default)]
    pub candles: Vec<Candlestick>,
}

impl CandlesResponse {
    /// Candles that have finished forming.
    pub fn complete(&self) -> impl Iterator<Item = &Candlestick> {
        self.candles.iter().filter(|c| c.complete)
    }
}

/// One price bucket of an order or position book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookBucket {
    /// Lowest price of the bucket
    pub price: Decimal,
    /// Share of long orders/positions in the bucket
    pub long_count_percent: Decimal,
    /// Share of short orders/positions in the bucket
    pub short_count_percent: Decimal,
}

/// Order book or position book snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Instrument name
    pub instrument: String,
    /// When the snapshot was taken
    pub time: DateTime<Utc>,
    /// Instrument price at snapshot time
    pub price: Decimal,
    /// Price width of every bucket
    pub bucket_width: Decimal,
    /// Buckets, lowest price first
    #[serde(default)]
    pub buckets: Vec<BookBucket>,
}
