//! Enumeration types for the OANDA v20 API.
//!
//! OANDA sends enumerations as SCREAMING_SNAKE_CASE strings. Enums that the
//! server may extend carry an `Unknown` catch-all for forward-compatibility.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Type of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Fill immediately at the current market price
    Market,
    /// Fill at the given price or better
    Limit,
    /// Fill at the given price or worse once it is reached
    Stop,
    /// Market order triggered at a price threshold
    MarketIfTouched,
    /// Take profit attached to a trade
    TakeProfit,
    /// Stop loss attached to a trade
    StopLoss,
    /// Guaranteed stop loss attached to a trade
    GuaranteedStopLoss,
    /// Trailing stop loss attached to a trade
    TrailingStopLoss,
    /// Fixed price order
    FixedPrice,
    /// Unknown order type (forward-compatibility)
    #[serde(other)]
    Unknown,
}

impl OrderType {
    /// Returns `true` if this order type requires a price.
    pub fn requires_price(&self) -> bool {
        matches!(
            self,
            OrderType::Limit
                | OrderType::Stop
                | OrderType::MarketIfTouched
                | OrderType::TakeProfit
                | OrderType::StopLoss
                | OrderType::GuaranteedStopLoss
                | OrderType::FixedPrice
        )
    }
}

/// Time in force specification for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good until cancelled
    #[serde(rename = "GTC")]
    Gtc,
    /// Good until date
    #[serde(rename = "GTD")]
    Gtd,
    /// Good for day
    #[serde(rename = "GFD")]
    Gfd,
    /// Filled entirely or cancelled
    #[serde(rename = "FOK")]
    Fok,
    /// Immediate (partial) fill or cancel
    #[serde(rename = "IOC")]
    Ioc,
}

/// How an order fill affects existing positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPositionFill {
    /// Only open new positions
    OpenOnly,
    /// Reduce existing positions first, then open
    ReduceFirst,
    /// Only reduce existing positions
    ReduceOnly,
    /// REDUCE_FIRST or OPEN_ONLY depending on account hedging
    #[default]
    Default,
}

impl OrderPositionFill {
    /// Wire representation, used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderPositionFill::OpenOnly => "OPEN_ONLY",
            OrderPositionFill::ReduceFirst => "REDUCE_FIRST",
            OrderPositionFill::ReduceOnly => "REDUCE_ONLY",
            OrderPositionFill::Default => "DEFAULT",
        }
    }
}

/// Current state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Order is waiting to be triggered
    Pending,
    /// Order has been filled
    Filled,
    /// Order has been triggered
    Triggered,
    /// Order has been cancelled
    Cancelled,
    /// Unknown state (forward-compatibility)
    #[serde(other)]
    Unknown,
}

impl OrderState {
    /// Returns `true` if the order can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Filled | OrderState::Cancelled)
    }
}

/// Current state of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeState {
    /// Trade is open
    Open,
    /// Trade is fully closed
    Closed,
    /// Trade will be closed once the instrument is tradeable
    CloseWhenTradeable,
    /// Unknown state (forward-compatibility)
    #[serde(other)]
    Unknown,
}

/// Which price component triggers a price-dependent order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderTriggerCondition {
    /// Natural side: ask for long, bid for short
    Default,
    /// Opposite side of DEFAULT
    Inverse,
    /// Bid price
    Bid,
    /// Ask price
    Ask,
    /// Midpoint
    Mid,
}

/// Kind of tradeable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentType {
    /// Currency pair
    Currency,
    /// Contract for difference
    Cfd,
    /// Precious metal
    Metal,
    /// Unknown instrument type (forward-compatibility)
    #[serde(other)]
    Unknown,
}

/// Candlestick granularity.
///
/// # Example
///
/// ```
/// use oanda_rs::models::Granularity;
/// use std::time::Duration;
///
/// assert_eq!(Granularity::M5.as_str(), "M5");
/// assert_eq!(
///     Granularity::from_duration(Duration::from_secs(300)),
///     Some(Granularity::M5)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// 5 second candles
    S5,
    /// 10 second candles
    S10,
    /// 15 second candles
    S15,
    /// 30 second candles
    S30,
    /// 1 minute candles
    M1,
    /// 2 minute candles
    M2,
    /// 4 minute candles
    M4,
    /// 5 minute candles
    M5,
    /// 10 minute candles
    M10,
    /// 15 minute candles
    M15,
    /// 30 minute candles
    M30,
    /// 1 hour candles
    H1,
    /// 2 hour candles
    H2,
    /// 3 hour candles
    H3,
    /// 4 hour candles
    H4,
    /// 6 hour candles
    H6,
    /// 8 hour candles
    H8,
    /// 12 hour candles
    H12,
    /// Daily candles
    D,
    /// Weekly candles
    W,
    /// Monthly candles
    M,
}

impl Granularity {
    /// All granularities, smallest first.
    pub const ALL: [Granularity; 21] = [
        Granularity::S5,
        Granularity::S10,
        Granularity::S15,
        Granularity::S30,
        Granularity::M1,
        Granularity::M2,
        Granularity::M4,
        Granularity::M5,
        Granularity::M10,
        Granularity::M15,
        Granularity::M30,
        Granularity::H1,
        Granularity::H2,
        Granularity::H3,
        Granularity::H4,
        Granularity::H6,
        Granularity::H8,
        Granularity::H12,
        Granularity::D,
        Granularity::W,
        Granularity::M,
    ];

    /// Wire representation, e.g. `"M5"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::S5 => "S5",
            Granularity::S10 => "S10",
            Granularity::S15 => "S15",
            Granularity::S30 => "S30",
            Granularity::M1 => "M1",
            Granularity::M2 => "M2",
            Granularity::M4 => "M4",
            Granularity::M5 => "M5",
            Granularity::M10 => "M10",
            Granularity::M15 => "M15",
            Granularity::M30 => "M30",
            Granularity::H1 => "H1",
            Granularity::H2 => "H2",
            Granularity::H3 => "H3",
            Granularity::H4 => "H4",
            Granularity::H6 => "H6",
            Granularity::H8 => "H8",
            Granularity::H12 => "H12",
            Granularity::D => "D",
            Granularity::W => "W",
            Granularity::M => "M",
        }
    }

    /// Nominal length of one candle. Months are counted as 30 days.
    pub fn duration(&self) -> Duration {
        const MINUTE: u64 = 60;
        const HOUR: u64 = 60 * MINUTE;
        const DAY: u64 = 24 * HOUR;

        let secs = match self {
            Granularity::S5 => 5,
            Granularity::S10 => 10,
            Granularity::S15 => 15,
            Granularity::S30 => 30,
            Granularity::M1 => MINUTE,
            Granularity::M2 => 2 * MINUTE,
            Granularity::M4 => 4 * MINUTE,
            Granularity::M5 => 5 * MINUTE,
            Granularity::M10 => 10 * MINUTE,
            Granularity::M15 => 15 * MINUTE,
            Granularity::M30 => 30 * MINUTE,
            Granularity::H1 => HOUR,
            Granularity::H2 => 2 * HOUR,
            Granularity::H3 => 3 * HOUR,
            Granularity::H4 => 4 * HOUR,
            Granularity::H6 => 6 * HOUR,
            Granularity::H8 => 8 * HOUR,
            Granularity::H12 => 12 * HOUR,
            Granularity::D => DAY,
            Granularity::W => 7 * DAY,
            Granularity::M => 30 * DAY,
        };
        Duration::from_secs(secs)
    }

    /// Find the granularity whose candle length is exactly `duration`.
    pub fn from_duration(duration: Duration) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.duration() == duration)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderType::MarketIfTouched).unwrap(),
            "\"MARKET_IF_TOUCHED\""
        );
        let parsed: OrderType = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(parsed, OrderType::Unknown);
        assert!(OrderType::Limit.requires_price());
        assert!(!OrderType::Market.requires_price());
    }

    #[test]
    fn test_time_in_force_wire_names() {
        assert_eq!(serde_json::to_string(&TimeInForce::Fok).unwrap(), "\"FOK\"");
        let parsed: TimeInForce = serde_json::from_str("\"GTC\"").unwrap();
        assert_eq!(parsed, TimeInForce::Gtc);
    }

    #[test]
    fn test_position_fill_as_str_matches_serde() {
        for fill in [
            OrderPositionFill::OpenOnly,
            OrderPositionFill::ReduceFirst,
            OrderPositionFill::ReduceOnly,
            OrderPositionFill::Default,
        ] {
            assert_eq!(
                serde_json::to_string(&fill).unwrap(),
                format!("\"{}\"", fill.as_str())
            );
        }
    }

    #[test]
    fn test_granularity_strings_match_serde() {
        for g in Granularity::ALL {
            assert_eq!(serde_json::to_string(&g).unwrap(), format!("\"{}\"", g));
        }
    }

    #[test]
    fn test_granularity_from_duration() {
        assert_eq!(
            Granularity::from_duration(Duration::from_secs(5)),
            Some(Granularity::S5)
        );
        assert_eq!(
            Granularity::from_duration(Duration::from_secs(86_400)),
            Some(Granularity::D)
        );
        assert_eq!(Granularity::from_duration(Duration::from_secs(7)), None);
    }
}
