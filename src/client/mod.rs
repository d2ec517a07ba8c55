//! HTTP client and service layer for the OANDA v20 API.
//!
//! This module provides the main entry point [`OandaClient`] for
//! interacting with the OANDA v20 REST and streaming endpoints.
//!
//! # Example
//!
//! ```no_run
//! use oanda_rs::{ClientConfig, Credentials, OandaClient};
//!
//! # async fn example() -> oanda_rs::Result<()> {
//! let client = OandaClient::new(
//!     Credentials::new("101-004-1234567-001", "my-token"),
//!     ClientConfig::default(),
//! )?;
//!
//! // List the accounts the token can access
//! let accounts = client.accounts().list().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::ClientConfig;
pub use http::OandaClient;
pub(crate) use http::ClientInner;
