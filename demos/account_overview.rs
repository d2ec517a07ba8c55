//! Account overview example.
//!
//! Prints the account summary, open trades, open positions, pending orders
//! and the last day of hourly candles for EUR_USD.
//!
//! Requires OANDA_ACCOUNT_ID and OANDA_API_KEY; set OANDA_LIVE=1 for live.
//!
//! Run with: cargo run --example account_overview

use oanda_rs::models::Granularity;
use oanda_rs::{ClientConfig, Credentials, OandaClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> oanda_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (credentials, environment) = Credentials::from_env()?;
    let client = OandaClient::connect(
        credentials,
        ClientConfig::new().with_environment(environment),
    )
    .await?;

    println!("Connected to {} ({})", client.account_id(), client.environment());

    // Accounts visible to the token
    let accounts = client.accounts().list().await?;
    println!("\nFound {} account(s):", accounts.len());
    for account in &accounts {
        println!("  - {} {:?}", account.id, account.tags);
    }

    // Summary
    let summary = client.accounts().summary().await?.account;
    println!("\nBalance: {} {}", summary.balance, summary.currency);
    println!("NAV: {:?}", summary.nav);
    println!("Unrealized P/L: {:?}", summary.unrealized_pl);
    println!("Margin available: {:?}", summary.margin_available);

    // Open trades
    let trades = client.trades().open().await?;
    println!("\nOpen trades: {}", trades.len());
    for trade in &trades {
        println!(
            "  #{} {} {} @ {} (uPL {:?})",
            trade.id, trade.instrument, trade.current_units, trade.price, trade.unrealized_pl
        );
    }

    // Open positions
    let positions = client.positions().open().await?;
    println!("\nOpen positions: {}", positions.len());
    for position in &positions {
        println!("  {} net {}", position.instrument, position.net_units());
    }

    // Pending orders
    let orders = client.orders().pending().await?;
    println!("\nPending orders: {}", orders.len());
    for order in &orders {
        println!(
            "  #{} {:?} {:?} {:?} @ {:?}",
            order.id, order.order_type, order.instrument, order.units, order.price
        );
    }

    // Candles
    let candles = client
        .instruments()
        .candles("EUR_USD", 24, Granularity::H1)
        .await?;
    println!("\nEUR_USD hourly closes:");
    for candle in candles.complete() {
        if let Some(mid) = candle.mid {
            println!("  {} {}", candle.time.format("%Y-%m-%d %H:%M"), mid.c);
        }
    }

    println!("\nDone!");
    Ok(())
}
