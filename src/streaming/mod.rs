//! Streaming prices and account transactions.
//!
//! OANDA streams over a single long-lived HTTP GET whose body is
//! newline-delimited JSON. A [`StreamingSession`] opens the request, splits
//! the body into lines and classifies each one:
//!
//! - **Heartbeats** (`{"type":"HEARTBEAT",..}`) are absorbed and logged at
//!   trace level.
//! - **Error envelopes** (`{"errorMessage":..}` with no `type`) end the
//!   stream with [`Error::StreamServer`](crate::Error::StreamServer).
//! - Every other line is decoded as the stream's event type and handed to
//!   the caller's handler, in wire order, on the reading task.
//!
//! A stream ends with exactly one result: `Ok(())` when the server closes the
//! body, [`Error::Cancelled`](crate::Error::Cancelled) when the caller's
//! [`CancellationToken`] fires, or the first transport, decode, server or
//! handler error. Nothing is retried; reconnect policy belongs to the caller.
//!
//! # Pricing stream
//!
//! ```no_run
//! use oanda_rs::streaming::{CancellationToken, PriceUpdate};
//!
//! # async fn example(client: oanda_rs::OandaClient) -> oanda_rs::Result<()> {
//! let cancel = CancellationToken::new();
//! let stop = cancel.clone();
//! tokio::spawn(async move {
//!     tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//!     stop.cancel();
//! });
//!
//! let mut session = client.streaming();
//! let result = session
//!     .stream_prices(&["EUR_USD"], &cancel, |update: PriceUpdate| {
//!         println!("{} {:?}/{:?}", update.instrument, update.best_bid(), update.best_ask());
//!         Ok(())
//!     })
//!     .await;
//!
//! match result {
//!     Ok(()) | Err(oanda_rs::Error::Cancelled) => {}
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Transaction stream
//!
//! ```no_run
//! use oanda_rs::streaming::{CancellationToken, TransactionUpdate};
//!
//! # async fn example(client: oanda_rs::OandaClient) -> oanda_rs::Result<()> {
//! let cancel = CancellationToken::new();
//! let mut session = client.streaming();
//! session
//!     .stream_transactions(&cancel, |txn: TransactionUpdate| {
//!         println!("{} at {}", txn.kind, txn.time);
//!         Ok(())
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod events;
mod session;

pub use events::{
    ErrorNotice, Heartbeat, PriceUpdate, StreamMessage, TransactionUpdate, HEARTBEAT_TYPE,
};
pub use session::{read_stream, HandlerResult, StreamingSession, MAX_LINE_LENGTH};
pub use tokio_util::sync::CancellationToken;
