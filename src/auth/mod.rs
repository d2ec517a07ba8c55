//! Authentication for the OANDA v20 API.
//!
//! OANDA authenticates every request with a personal access token sent as a
//! bearer token. Tokens do not expire on their own, so there is no session to
//! refresh: [`Credentials`] pairs the token with the account it acts on.
//!
//! ```no_run
//! use oanda_rs::{Credentials, ClientConfig, OandaClient};
//!
//! # async fn example() -> oanda_rs::Result<()> {
//! let (credentials, env) = Credentials::from_env()?;
//! let client = OandaClient::connect(credentials, ClientConfig::new().with_environment(env)).await?;
//! # Ok(())
//! # }
//! ```

mod credentials;

pub use credentials::{Credentials, ACCOUNT_ID_VAR, API_KEY_VAR, LIVE_VAR};
