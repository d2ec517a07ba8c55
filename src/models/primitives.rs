//! Primitive types and newtypes for type-safe API interactions.
//!
//! OANDA identifies accounts, instruments, orders, trades and transactions
//! with plain strings. The newtypes here keep them from being mixed up at
//! compile time while serializing transparently.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id! {
    /// A v20 account identifier, e.g. `001-001-1234567-001`.
    ///
    /// # Example
    ///
    /// ```
    /// use oanda_rs::AccountId;
    ///
    /// let account = AccountId::new("001-001-1234567-001");
    /// println!("Account: {}", account);
    /// ```
    AccountId
}

string_id! {
    /// An instrument name such as `EUR_USD` or `XAU_USD`.
    ///
    /// # Example
    ///
    /// ```
    /// use oanda_rs::InstrumentName;
    ///
    /// let instrument = InstrumentName::new("EUR_USD");
    /// assert_eq!(instrument.as_str(), "EUR_USD");
    /// ```
    InstrumentName
}

string_id! {
    /// Either an order id or `@` followed by a client order id.
    OrderSpecifier
}

string_id! {
    /// A trade id (the id of the transaction that opened the trade).
    TradeId
}

string_id! {
    /// A transaction id.
    TransactionId
}

impl OrderSpecifier {
    /// Build a specifier that refers to an order by its client extension id.
    pub fn client_id(id: impl AsRef<str>) -> Self {
        Self(format!("@{}", id.as_ref()))
    }
}

/// Trading environment for the OANDA v20 API.
///
/// Determines which REST and streaming hosts are used.
///
/// # Example
///
/// ```
/// use oanda_rs::Environment;
///
/// let env = Environment::Practice;
/// assert_eq!(env.api_base_url(), "https://api-fxpractice.oanda.com/v3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// fxTrade Practice: paper trading.
    #[default]
    Practice,
    /// fxTrade: real trading with real money.
    Live,
}

impl Environment {
    /// Get the base URL for REST API requests.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Practice => "https://api-fxpractice.oanda.com/v3",
            Environment::Live => "https://api-fxtrade.oanda.com/v3",
        }
    }

    /// Get the base URL for the streaming API.
    pub fn stream_base_url(&self) -> &'static str {
        match self {
            Environment::Practice => "https://stream-fxpractice.oanda.com/v3",
            Environment::Live => "https://stream-fxtrade.oanda.com/v3",
        }
    }

    /// Infer the environment from a REST base URL.
    ///
    /// Only a URL naming the `fxtrade` host is live; every other URL,
    /// including local mock servers, is treated as practice.
    pub fn from_api_url(url: &str) -> Self {
        if url.contains("fxtrade") {
            Environment::Live
        } else {
            Environment::Practice
        }
    }

    /// Returns `true` if this is the live environment.
    pub fn is_live(&self) -> bool {
        matches!(self, Environment::Live)
    }

    /// Returns `true` if this is the practice environment.
    pub fn is_practice(&self) -> bool {
        matches!(self, Environment::Practice)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Practice => write!(f, "practice"),
            Environment::Live => write!(f, "live"),
        }
    }
}
