//! Accounts service for account-level operations.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::client::ClientInner;
use crate::models::{
    AccountChangesResponse, AccountDetails, AccountId, AccountInstrumentsResponse,
    AccountProperties, AccountSummaryResponse, AccountsResponse, Instrument, OrderEntryData,
    OrderPositionFill, TransactionId,
};
use crate::Result;

/// Service for account-related operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: oanda_rs::OandaClient) -> oanda_rs::Result<()> {
/// // List accounts
/// let accounts = client.accounts().list().await?;
/// for account in accounts {
///     println!("Account: {}", account.id);
/// }
///
/// // Balances of the client's own account
/// let summary = client.accounts().summary().await?;
/// println!("NAV: {:?}", summary.account.nav);
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List all accounts the token has access to.
    pub async fn list(&self) -> Result<Vec<AccountProperties>> {
        let response: AccountsResponse = self.inner.get("/accounts").await?;
        Ok(response.accounts)
    }

    /// Get full details (trades, positions, orders) of an account.
    pub async fn get(&self, account_id: &AccountId) -> Result<AccountDetails> {
        self.inner.get(&format!("/accounts/{}", account_id)).await
    }

    /// Get the summary of the client's account.
    pub async fn summary(&self) -> Result<AccountSummaryResponse> {
        self.inner.get(&self.inner.account_path("/summary")).await
    }

    /// List the instruments an account may trade.
    pub async fn instruments(&self, account_id: &AccountId) -> Result<Vec<Instrument>> {
        let response: AccountInstrumentsResponse = self
            .inner
            .get(&format!("/accounts/{}/instruments", account_id))
            .await?;
        Ok(response.instruments)
    }

    /// Get the changes to an account since a transaction.
    ///
    /// Poll by passing the returned `last_transaction_id` to the next call.
    pub async fn changes(
        &self,
        account_id: &AccountId,
        since_transaction_id: &TransactionId,
    ) -> Result<AccountChangesResponse> {
        self.inner
            .get_with_query(
                &format!("/accounts/{}/changes", account_id),
                &[("sinceTransactionID", since_transaction_id.as_str())],
            )
            .await
    }

    /// Get the margin, cost and available units for a prospective order
    /// on the client's account.
    pub async fn order_entry_data(
        &self,
        instrument: &str,
        units: Decimal,
    ) -> Result<OrderEntryData> {
        let units = units.to_string();
        self.inner
            .get_with_query(
                &self.inner.account_path("/orderEntryData"),
                &[
                    ("disableFiltering", "true"),
                    ("instrument", instrument),
                    ("orderPositionFill", OrderPositionFill::Default.as_str()),
                    ("units", units.as_str()),
                ],
            )
            .await
    }
}
