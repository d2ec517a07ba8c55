//! Pricing service for price snapshots.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{Price, PricesResponse};
use crate::{Error, Result};

/// Service for one-shot price snapshots. For continuous prices use
/// [`StreamingSession::stream_prices`](crate::streaming::StreamingSession::stream_prices).
pub struct PricingService {
    inner: Arc<ClientInner>,
}

impl PricingService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get current prices for a set of instruments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `instruments` is empty.
    pub async fn get<S: AsRef<str>>(&self, instruments: &[S]) -> Result<Vec<Price>> {
        let joined = join_instruments(instruments)?;
        let response: PricesResponse = self
            .inner
            .get_with_query(
                &self.inner.account_path("/pricing"),
                &[("instruments", joined.as_str())],
            )
            .await?;
        Ok(response.prices)
    }
}

/// Comma-join instrument names, rejecting an empty list.
pub(crate) fn join_instruments<S: AsRef<str>>(instruments: &[S]) -> Result<String> {
    if instruments.is_empty() {
        return Err(Error::InvalidInput(
            "at least one instrument is required".to_string(),
        ));
    }
    Ok(instruments
        .iter()
        .map(|i| i.as_ref())
        .collect::<Vec<_>>()
        .join(","))
}
