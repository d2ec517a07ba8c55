//! API service modules for OANDA v20 endpoints.
//!
//! Each service provides methods for interacting with a specific
//! group of REST endpoints.

mod accounts;
mod instruments;
mod orders;
mod positions;
pub(crate) mod pricing;
mod trades;
mod transactions;

pub use accounts::AccountsService;
pub use instruments::InstrumentsService;
pub use orders::{OrdersQuery, OrdersService};
pub use positions::PositionsService;
pub use pricing::PricingService;
pub use trades::TradesService;
pub use transactions::TransactionsService;
