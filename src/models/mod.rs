//! Data models for the OANDA v20 API.
//!
//! This module contains the strongly-typed data structures exchanged with the
//! REST endpoints. Models are organized by domain:
//!
//! - [`primitives`] - Identifier newtypes and the trading [`Environment`]
//! - [`enums`] - Order types, states, time in force, granularities
//! - [`account`] - Accounts, summaries, account changes, order entry data
//! - [`order`] - Order requests, orders and order responses
//! - [`trade`] - Trades and trade close requests
//! - [`position`] - Positions and position close requests
//! - [`pricing`] - Price snapshots and order book levels
//! - [`instrument`] - Instruments, candles and order/position books
//! - [`transaction`] - Account transactions
//!
//! Streaming payloads live in [`crate::streaming`].

pub mod primitives;
pub mod enums;
pub mod account;
pub mod order;
pub mod trade;
pub mod position;
pub mod pricing;
pub mod instrument;
pub mod transaction;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use account::*;
pub use order::*;
pub use trade::*;
pub use position::*;
pub use pricing::*;
pub use instrument::*;
pub use transaction::*;
