//! HTTP client implementation for the OANDA v20 API.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::api::{
    AccountsService, InstrumentsService, OrdersService, PositionsService, PricingService,
    TradesService, TransactionsService,
};
use crate::auth::Credentials;
use crate::{AccountId, Environment, Error, Result};

use super::config::ClientConfig;

/// Header asking the server for a timestamp format.
pub(crate) const ACCEPT_DATETIME_FORMAT: &str = "Accept-Datetime-Format";

/// Timestamps are always requested as RFC 3339; every model and stream
/// event decodes them in that form.
const DATETIME_FORMAT: &str = "RFC3339";

/// The main client for interacting with the OANDA v20 API.
///
/// This client provides access to all API services through method calls
/// that return service structs. The client owns the credentials, builds
/// authenticated requests and decodes responses. Cloning is cheap and
/// clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use oanda_rs::{ClientConfig, Credentials, OandaClient};
///
/// # async fn example() -> oanda_rs::Result<()> {
/// let credentials = Credentials::new("101-004-1234567-001", "my-token");
/// let client = OandaClient::connect(credentials, ClientConfig::default()).await?;
///
/// let summary = client.accounts().summary().await?;
/// println!("balance: {}", summary.account.balance);
///
/// let trades = client.trades().open().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OandaClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    /// Client without a whole-request timeout, for long-lived streams
    #[cfg_attr(not(feature = "streaming"), allow(dead_code))]
    pub(crate) stream_http: reqwest::Client,
    pub(crate) credentials: Credentials,
    pub(crate) config: ClientConfig,
    pub(crate) api_base: String,
    #[cfg_attr(not(feature = "streaming"), allow(dead_code))]
    pub(crate) stream_base: String,
}

impl OandaClient {
    /// Create a client. No request is made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for empty credentials and [`Error::Http`]
    /// if the HTTP client cannot be built.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        credentials.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let stream_http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let api_base = config.api_base_url();
        let stream_base = config.stream_base_url();

        tracing::debug!(
            account_id = %credentials.account_id(),
            api_base = %api_base,
            stream_base = %stream_base,
            "Created OANDA client"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                stream_http,
                credentials,
                config,
                api_base,
                stream_base,
            }),
        })
    }

    /// Create a client and verify the credentials by fetching the account.
    pub async fn connect(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let client = Self::new(credentials, config)?;
        client.check_connection().await?;
        Ok(client)
    }

    /// Verify that the token can read the configured account.
    pub async fn check_connection(&self) -> Result<()> {
        let path = self.inner.account_path("");
        let _: serde::de::IgnoredAny = self.inner.get(&path).await?;
        tracing::info!(account_id = %self.account_id(), "OANDA connection verified");
        Ok(())
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// Get the trades service.
    pub fn trades(&self) -> TradesService {
        TradesService::new(self.inner.clone())
    }

    /// Get the positions service.
    pub fn positions(&self) -> PositionsService {
        PositionsService::new(self.inner.clone())
    }

    /// Get the pricing service.
    pub fn pricing(&self) -> PricingService {
        PricingService::new(self.inner.clone())
    }

    /// Get the instruments service.
    pub fn instruments(&self) -> InstrumentsService {
        InstrumentsService::new(self.inner.clone())
    }

    /// Get the transactions service.
    pub fn transactions(&self) -> TransactionsService {
        TransactionsService::new(self.inner.clone())
    }

    /// Create a streaming session for prices or transactions.
    ///
    /// Each session runs one stream at a time; create two sessions to run
    /// a price and a transaction stream concurrently.
    #[cfg(feature = "streaming")]
    pub fn streaming(&self) -> crate::streaming::StreamingSession {
        crate::streaming::StreamingSession::new(self.inner.clone())
    }

    /// The account this client acts on.
    pub fn account_id(&self) -> &AccountId {
        self.inner.credentials.account_id()
    }

    /// Environment inferred from the REST base URL.
    pub fn environment(&self) -> Environment {
        Environment::from_api_url(&self.inner.api_base)
    }

    /// REST base URL in use.
    pub fn base_url(&self) -> &str {
        &self.inner.api_base
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// `/accounts/{account_id}{suffix}`
    pub(crate) fn account_path(&self, suffix: &str) -> String {
        format!("/accounts/{}{}", self.credentials.account_id(), suffix)
    }

    /// Build request headers with authentication.
    pub(crate) fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(AUTHORIZATION, self.credentials.bearer()?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            ACCEPT_DATETIME_FORMAT,
            HeaderValue::from_static(DATETIME_FORMAT),
        );

        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_url(&self.url(path)).await
    }

    /// Make a GET request against an absolute URL, such as a transaction
    /// page link returned by the server.
    pub(crate) async fn get_url<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let headers = self.build_headers()?;

        tracing::debug!(method = "GET", url = %url, "Sending request");
        let response = self.http.get(url).headers(headers).send().await?;

        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let url = self.url(path);
        let headers = self.build_headers()?;

        tracing::debug!(method = "GET", url = %url, "Sending request");
        let response = self
            .http
            .get(&url)
            .headers(headers)
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let headers = self.build_headers()?;

        tracing::debug!(method = "POST", url = %url, "Sending request");
        let response = self
            .http
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make a PUT request.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let headers = self.build_headers()?;

        tracing::debug!(method = "PUT", url = %url, "Sending request");
        let response = self
            .http
            .put(&url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Open a long-lived GET against the streaming host.
    ///
    /// Returns the response once the status line has arrived; the body is
    /// left unread for the caller to consume.
    #[cfg(feature = "streaming")]
    pub(crate) async fn open_stream(&self, url: url::Url) -> Result<reqwest::Response> {
        let headers = self.build_headers()?;

        tracing::debug!(method = "GET", url = %url, "Opening stream");
        let response = self.stream_http.get(url).headers(headers).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Handle an API response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if status.is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Map a non-success response to an [`Error`].
    async fn error_from_response(response: reqwest::Response) -> Error {
        let status_code = response.status().as_u16();

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let text = response.text().await.unwrap_or_default();
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        tracing::warn!(status = status_code, body = %body, "API request failed");

        match status_code {
            429 => Error::RateLimited {
                retry_after_secs: retry_after.unwrap_or(60),
            },
            401 => Error::Unauthorized(Error::message_from_body(&body, "Unauthorized")),
            404 => Error::NotFound(Error::message_from_body(&body, "Resource not found")),
            _ => Error::from_api_response(status_code, body),
        }
    }
}

impl std::fmt::Debug for OandaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OandaClient")
            .field("credentials", &self.inner.credentials)
            .field("api_base", &self.inner.api_base)
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OandaClient {
        OandaClient::new(
            Credentials::new("101-004-1234567-001", "token"),
            ClientConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_account_path() {
        let client = client();
        assert_eq!(
            client.inner.account_path("/openTrades"),
            "/accounts/101-004-1234567-001/openTrades"
        );
    }

    #[test]
    fn test_headers() {
        let headers = client().inner.build_headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer token");
        assert_eq!(headers.get(ACCEPT_DATETIME_FORMAT).unwrap(), "RFC3339");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_environment_follows_base_url() {
        let client = client();
        assert_eq!(client.environment(), Environment::Practice);
        assert_eq!(client.base_url(), "https://api-fxpractice.oanda.com/v3");

        let live = OandaClient::new(
            Credentials::new("001-001-1234567-001", "token"),
            ClientConfig::default().with_environment(Environment::Live),
        )
        .unwrap();
        assert!(live.environment().is_live());
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let result = OandaClient::new(Credentials::new("", "token"), ClientConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", client());
        assert!(!debug.contains("Bearer token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
