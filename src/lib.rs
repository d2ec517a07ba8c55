//! # oanda-rs
//!
//! An async Rust client for the OANDA v20 REST and streaming API.
//!
//! This crate provides typed access to OANDA's trading platform: accounts,
//! orders, trades, positions, pricing, instruments and transactions over
//! REST, plus the long-lived newline-delimited JSON streams for prices and
//! account transactions.
//!
//! ## Features
//!
//! - **Authentication**: Personal access tokens held as secrets
//! - **Account Management**: Accounts, summaries, instruments, changes
//! - **Order Management**: Create, replace and cancel orders with a validating builder
//! - **Market Data**: Price snapshots, candles, order and position books
//! - **Streaming**: Price and transaction streams with cancellation
//! - **Type Safety**: Exact decimal prices and strongly-typed identifiers
//! - **Async-first**: Built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oanda_rs::{ClientConfig, Credentials, OandaClient};
//!
//! #[tokio::main]
//! async fn main() -> oanda_rs::Result<()> {
//!     let credentials = Credentials::new("101-004-1234567-001", "my-token");
//!     let client = OandaClient::connect(credentials, ClientConfig::default()).await?;
//!
//!     // Account balance
//!     let summary = client.accounts().summary().await?;
//!     println!("Balance: {} {}", summary.account.balance, summary.account.currency);
//!
//!     // Current prices
//!     for price in client.pricing().get(&["EUR_USD", "USD_JPY"]).await? {
//!         println!("{}: {:?} / {:?}", price.instrument, price.best_bid(), price.best_ask());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming Example
//!
//! ```rust,no_run
//! use oanda_rs::{ClientConfig, Credentials, OandaClient};
//! use oanda_rs::streaming::{CancellationToken, PriceUpdate};
//!
//! #[tokio::main]
//! async fn main() -> oanda_rs::Result<()> {
//!     let (credentials, env) = Credentials::from_env()?;
//!     let client = OandaClient::new(credentials, ClientConfig::new().with_environment(env))?;
//!
//!     let cancel = CancellationToken::new();
//!     let mut session = client.streaming();
//!     session
//!         .stream_prices(&["EUR_USD"], &cancel, |update: PriceUpdate| {
//!             println!("{}: bid={:?} ask={:?}", update.instrument, update.best_bid(), update.best_ask());
//!             Ok(())
//!         })
//!         .await
//! }
//! ```
//!
//! ## Order Placement
//!
//! ```rust,no_run
//! use oanda_rs::{ClientConfig, Credentials, OandaClient};
//! use oanda_rs::models::{OnFill, OrderRequestBuilder};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> oanda_rs::Result<()> {
//!     let client = OandaClient::new(
//!         Credentials::new("101-004-1234567-001", "my-token"),
//!         ClientConfig::default(),
//!     )?;
//!
//!     // Market buy with a take profit
//!     let order = OrderRequestBuilder::market("EUR_USD", dec!(1000))
//!         .take_profit_on_fill(OnFill::at_price(dec!(1.1000)))
//!         .build()?;
//!
//!     let response = client.orders().create(&order).await?;
//!     println!("Opened trade: {:?}", response.opened_trade_id());
//!
//!     Ok(())
//! }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
#[cfg(feature = "streaming")]
pub mod streaming;

// Re-export primary types at crate root for convenience
pub use error::{BoxError, Error, Result};
pub use models::{
    AccountId, Environment, InstrumentName, OrderSpecifier, TradeId, TransactionId,
};
pub use client::{ClientConfig, OandaClient};
pub use auth::Credentials;

#[cfg(feature = "streaming")]
pub use streaming::StreamingSession;

/// Prelude module for convenient imports.
///
/// ```rust
/// use oanda_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        AccountId, Environment, InstrumentName, OrderSpecifier, TradeId, TransactionId,
        // Enums
        Granularity, OrderPositionFill, OrderState, OrderType, TimeInForce, TradeState,
        // Models
        Account, AccountSummary, Candlestick, CloseUnits, ClosePositionRequest, OnFill,
        Order, OrderRequest, OrderRequestBuilder, Position, Price, PriceBucket, Trade,
        Transaction,
    };
    pub use crate::client::{ClientConfig, OandaClient};
    pub use crate::auth::Credentials;
    #[cfg(feature = "streaming")]
    pub use crate::streaming::{
        CancellationToken, HandlerResult, PriceUpdate, StreamingSession, TransactionUpdate,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_creation() {
        let account = AccountId::new("101-004-1234567-001");
        assert_eq!(account.as_str(), "101-004-1234567-001");
    }

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            Environment::Practice.api_base_url(),
            "https://api-fxpractice.oanda.com/v3"
        );
        assert_eq!(
            Environment::Live.stream_base_url(),
            "https://stream-fxtrade.oanda.com/v3"
        );
    }

    #[cfg(feature = "streaming")]
    #[test]
    fn test_stream_urls() {
        let client = OandaClient::new(
            Credentials::new("101-004-1234567-001", "token"),
            ClientConfig::default().with_base_url("https://api-fxtrade.oanda.com/v3"),
        )
        .unwrap();
        let session = client.streaming();

        assert_eq!(session.stream_base_url(), "https://stream-fxtrade.oanda.com/v3");
        assert_eq!(
            session.price_stream_url(&["EUR_USD", "USD_JPY"]).unwrap().as_str(),
            "https://stream-fxtrade.oanda.com/v3/accounts/101-004-1234567-001/pricing/stream?instruments=EUR_USD%2CUSD_JPY"
        );
        assert_eq!(
            session.transaction_stream_url().unwrap().as_str(),
            "https://stream-fxtrade.oanda.com/v3/accounts/101-004-1234567-001/transactions/stream"
        );

        let empty: [&str; 0] = [];
        assert!(matches!(
            session.price_stream_url(&empty),
            Err(Error::InvalidInput(_))
        ));
    }
}
