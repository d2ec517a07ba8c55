//! Transactions service for account history.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

use crate::client::ClientInner;
use crate::models::{
    Transaction, TransactionId, TransactionPages, TransactionResponse, TransactionsResponse,
};
use crate::{Error, Result};

/// Service for transaction history operations.
///
/// # Example
///
/// ```no_run
/// use chrono::{Duration, Utc};
///
/// # async fn example(client: oanda_rs::OandaClient) -> oanda_rs::Result<()> {
/// let to = Utc::now();
/// let pages = client.transactions().pages(to - Duration::days(7), to).await?;
/// println!("{} transactions in {} pages", pages.count, pages.pages.len());
///
/// for url in &pages.pages {
///     for txn in client.transactions().page(url).await? {
///         println!("{} {}", txn.id, txn.kind);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct TransactionsService {
    inner: Arc<ClientInner>,
}

impl TransactionsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the page links for transactions in a time range.
    pub async fn pages(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<TransactionPages> {
        let from = from.to_rfc3339_opts(SecondsFormat::Secs, true);
        let to = to.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.inner
            .get_with_query(
                &self.inner.account_path("/transactions"),
                &[("from", from.as_str()), ("to", to.as_str())],
            )
            .await
    }

    /// Fetch one page returned by [`pages`](Self::pages).
    ///
    /// The URL must live under the client's REST base URL, since the
    /// request carries the bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for any other URL; no request is made.
    pub async fn page(&self, url: &str) -> Result<Vec<Transaction>> {
        check_page_url(&self.inner.api_base, url)?;
        let response: TransactionsResponse = self.inner.get_url(url).await?;
        Ok(response.transactions)
    }

    /// Get one transaction.
    pub async fn get(&self, id: &TransactionId) -> Result<Transaction> {
        let response: TransactionResponse = self
            .inner
            .get(&self.inner.account_path(&format!("/transactions/{}", id)))
            .await?;
        Ok(response.transaction)
    }

    /// Get every transaction after `id`.
    pub async fn since_id(&self, id: &TransactionId) -> Result<TransactionsResponse> {
        self.inner
            .get_with_query(
                &self.inner.account_path("/transactions/sinceid"),
                &[("id", id.as_str())],
            )
            .await
    }
}

/// Same scheme, host and port as `base`, with a path under the base path.
fn check_page_url(base: &str, url: &str) -> Result<()> {
    let base = Url::parse(base)?;
    let page = Url::parse(url)
        .map_err(|e| Error::InvalidInput(format!("invalid page URL {url}: {e}")))?;

    let base_path = base.path().trim_end_matches('/');
    let page_path = page.path();
    let under_base =
        page_path == base_path || page_path.starts_with(&format!("{base_path}/"));

    if page.origin() != base.origin() || !under_base {
        return Err(Error::InvalidInput(format!(
            "page URL {url} is not under the REST base URL {base}"
        )));
    }
    Ok(())
}
