//! Client configuration options.

use std::time::Duration;

use crate::Environment;

/// Configuration for the OANDA client.
///
/// # Example
///
/// ```
/// use oanda_rs::{ClientConfig, Environment};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_environment(Environment::Live)
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("my-app/1.0");
///
/// assert_eq!(config.api_base_url(), "https://api-fxtrade.oanda.com/v3");
/// assert_eq!(config.stream_base_url(), "https://stream-fxtrade.oanda.com/v3");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Environment selecting the default REST and streaming hosts
    pub environment: Environment,
    /// REST base URL override
    pub base_url: Option<String>,
    /// Streaming base URL override
    pub stream_url: Option<String>,
    /// Whole-request timeout for REST calls; never applied to streams
    pub timeout: Duration,
    /// TCP/TLS connect timeout, applied to REST calls and streams
    pub connect_timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            stream_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("oanda-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the practice or live environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the REST base URL, e.g. to point at a proxy or mock server.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the streaming base URL.
    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream_url = Some(url.into());
        self
    }

    /// Set the REST request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// REST base URL without a trailing slash.
    pub fn api_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => self.environment.api_base_url().to_string(),
        }
    }

    /// Streaming base URL without a trailing slash.
    ///
    /// Without an override this is derived from the REST base URL: a live
    /// (`fxtrade`) REST host maps to the live streaming host and anything
    /// else to the practice streaming host.
    pub fn stream_base_url(&self) -> String {
        match &self.stream_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => Environment::from_api_url(&self.api_base_url())
                .stream_base_url()
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.environment, Environment::Practice);
        assert!(config.user_agent.starts_with("oanda-rs/"));
    }

    #[test]
    fn test_practice_urls() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url(), "https://api-fxpractice.oanda.com/v3");
        assert_eq!(
            config.stream_base_url(),
            "https://stream-fxpractice.oanda.com/v3"
        );
    }

    #[test]
    fn test_stream_url_follows_base_url_override() {
        let config = ClientConfig::default().with_base_url("https://api-fxtrade.oanda.com/v3/");
        assert_eq!(config.api_base_url(), "https://api-fxtrade.oanda.com/v3");
        assert_eq!(config.stream_base_url(), "https://stream-fxtrade.oanda.com/v3");

        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080");
        assert_eq!(
            config.stream_base_url(),
            "https://stream-fxpractice.oanda.com/v3"
        );
    }

    #[test]
    fn test_stream_url_override_wins() {
        let config = ClientConfig::default()
            .with_environment(Environment::Live)
            .with_stream_url("http://127.0.0.1:9090/v3/");
        assert_eq!(config.stream_base_url(), "http://127.0.0.1:9090/v3");
    }
}
