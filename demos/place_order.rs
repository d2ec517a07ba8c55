//! Order placement example.
//!
//! Places a small market order with a stop loss and take profit on the
//! practice account, then closes the resulting trade.
//!
//! Requires OANDA_ACCOUNT_ID and OANDA_API_KEY.
//!
//! Run with: cargo run --example place_order

use oanda_rs::models::{CloseUnits, OnFill, OrderRequestBuilder};
use oanda_rs::{ClientConfig, Credentials, OandaClient, TradeId};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> oanda_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (credentials, environment) = Credentials::from_env()?;
    if environment.is_live() {
        println!("Refusing to place demo orders on a live account.");
        return Ok(());
    }

    let client = OandaClient::connect(credentials, ClientConfig::default()).await?;

    // Price the bracket off the current quote
    let prices = client.pricing().get(&["EUR_USD"]).await?;
    let Some(ask) = prices.first().and_then(|p| p.best_ask()) else {
        println!("No EUR_USD quote available.");
        return Ok(());
    };
    println!("EUR_USD ask: {}", ask);

    let order = OrderRequestBuilder::market("EUR_USD", dec!(100))
        .stop_loss_on_fill(OnFill::at_price((ask - dec!(0.0050)).round_dp(5)))
        .take_profit_on_fill(OnFill::at_price((ask + dec!(0.0050)).round_dp(5)))
        .build()?;

    println!("Placing order: {:?}", order);
    let response = client.orders().create(&order).await?;

    let Some(trade_id) = response.opened_trade_id().map(TradeId::new) else {
        println!(
            "Order did not open a trade: {:?}",
            response.order_cancel_transaction.and_then(|t| t.reason)
        );
        return Ok(());
    };
    println!("Opened trade {}", trade_id);

    let trade = client.trades().get(&trade_id).await?;
    println!(
        "  {} units of {} @ {}",
        trade.current_units, trade.instrument, trade.price
    );

    let closed = client.trades().close(&trade_id, CloseUnits::All).await?;
    if let Some(fill) = closed.order_fill_transaction {
        println!("Closed at {:?}, realized P/L {:?}", fill.price, fill.pl);
    }

    println!("\nDone!");
    Ok(())
}
