//! Real-time price streaming example.
//!
//! This example streams prices for a few major pairs until Ctrl+C or until
//! 100 ticks have arrived.
//!
//! Requires OANDA_ACCOUNT_ID and OANDA_API_KEY; set OANDA_LIVE=1 to use the
//! live environment instead of practice.
//!
//! Run with: cargo run --example stream_prices

use oanda_rs::streaming::{CancellationToken, PriceUpdate};
use oanda_rs::{ClientConfig, Credentials, Error, OandaClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> oanda_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (credentials, environment) = Credentials::from_env()?;
    let client = OandaClient::new(
        credentials,
        ClientConfig::new().with_environment(environment),
    )?;

    let instruments = ["EUR_USD", "USD_JPY", "GBP_USD"];
    println!("Streaming {:?} from {} (Ctrl+C to stop)...\n", instruments, environment);

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let mut count = 0;
    let stop = cancel.clone();
    let mut session = client.streaming();
    let result = session
        .stream_prices(&instruments, &cancel, |update: PriceUpdate| {
            println!(
                "[{}] {}: bid={:?} ask={:?} tradeable={}",
                update.time,
                update.instrument,
                update.best_bid(),
                update.best_ask(),
                update.tradeable
            );

            count += 1;
            // Stop after 100 ticks for demo purposes
            if count >= 100 {
                stop.cancel();
            }
            Ok(())
        })
        .await;

    match result {
        Ok(()) => println!("\nServer closed the stream."),
        Err(Error::Cancelled) => println!("\nStopped after {} ticks.", count),
        Err(e) => return Err(e),
    }
    Ok(())
}
