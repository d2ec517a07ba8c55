//! Account credentials for the OANDA v20 API.

use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::{AccountId, Environment, Error, Result};

/// Environment variable holding the account id.
pub const ACCOUNT_ID_VAR: &str = "OANDA_ACCOUNT_ID";
/// Environment variable holding the personal access token.
pub const API_KEY_VAR: &str = "OANDA_API_KEY";
/// Environment variable selecting the live environment when set to `1`/`true`.
pub const LIVE_VAR: &str = "OANDA_LIVE";

/// The account a client acts on and the token it authenticates with.
///
/// The token never appears in `Debug` output.
///
/// # Example
///
/// ```
/// use oanda_rs::Credentials;
///
/// let credentials = Credentials::new("101-004-1234567-001", "my-token");
/// assert_eq!(credentials.account_id().as_str(), "101-004-1234567-001");
/// ```
#[derive(Clone)]
pub struct Credentials {
    account_id: AccountId,
    token: SecretString,
}

impl Credentials {
    /// Create credentials from an account id and a personal access token.
    pub fn new(account_id: impl Into<AccountId>, token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            token: SecretString::from(token.into()),
        }
    }

    /// Read credentials and the environment from `OANDA_ACCOUNT_ID`,
    /// `OANDA_API_KEY` and the optional `OANDA_LIVE`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if either required variable is missing or
    /// empty.
    pub fn from_env() -> Result<(Self, Environment)> {
        let account_id = required_var(ACCOUNT_ID_VAR)?;
        let token = required_var(API_KEY_VAR)?;

        let live = std::env::var(LIVE_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let env = if live {
            Environment::Live
        } else {
            Environment::Practice
        };

        Ok((Self::new(account_id, token), env))
    }

    /// The account requests are made for.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// `Authorization` header value for this token.
    pub(crate) fn bearer(&self) -> Result<HeaderValue> {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
                .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.account_id.as_str().trim().is_empty() {
            return Err(Error::Config("account id must not be empty".to_string()));
        }
        if self.token.expose_secret().trim().is_empty() {
            return Err(Error::Config("API token must not be empty".to_string()));
        }
        Ok(())
    }
}

fn required_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} is not set", name))),
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
