//! Positions service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{ClosePositionRequest, CloseResponse, Position, PositionsResponse};
use crate::Result;

/// Service for position operations on the client's account.
pub struct PositionsService {
    inner: Arc<ClientInner>,
}

impl PositionsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List positions with open units.
    pub async fn open(&self) -> Result<Vec<Position>> {
        let response: PositionsResponse = self
            .inner
            .get(&self.inner.account_path("/openPositions"))
            .await?;
        Ok(response.positions)
    }

    /// Close one or both sides of the position in an instrument.
    pub async fn close(
        &self,
        instrument: &str,
        request: &ClosePositionRequest,
    ) -> Result<CloseResponse> {
        tracing::info!(instrument = %instrument, request = ?request, "Closing position");
        let path = format!("/positions/{}/close", urlencoding::encode(instrument));
        self.inner
            .put(&self.inner.account_path(&path), request)
            .await
    }
}
