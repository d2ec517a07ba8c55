//! The streaming session and its read loop.

use std::sync::Arc;

use futures_util::{StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::events::{PriceUpdate, StreamMessage, TransactionUpdate};
use crate::api::pricing::join_instruments;
use crate::client::ClientInner;
use crate::{BoxError, Error, Result};

/// Longest line accepted from a stream body.
pub const MAX_LINE_LENGTH: usize = 4 * 1024 * 1024;

/// Return type of stream handlers. An `Err` stops the stream and is
/// surfaced as [`Error::Handler`].
pub type HandlerResult = std::result::Result<(), BoxError>;

/// A session for the OANDA pricing and transaction streams.
///
/// A session runs one stream at a time: both entry points take
/// `&mut self`. To consume prices and transactions concurrently, create one
/// session per stream with [`OandaClient::streaming`](crate::OandaClient::streaming).
///
/// # Example
///
/// ```no_run
/// use oanda_rs::streaming::PriceUpdate;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example(client: oanda_rs::OandaClient) -> oanda_rs::Result<()> {
/// let cancel = CancellationToken::new();
/// let mut session = client.streaming();
///
/// session
///     .stream_prices(&["EUR_USD", "USD_JPY"], &cancel, |update: PriceUpdate| {
///         println!("{} bid={:?} ask={:?}", update.instrument, update.best_bid(), update.best_ask());
///         Ok(())
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct StreamingSession {
    inner: Arc<ClientInner>,
}

impl StreamingSession {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Base URL of the streaming host.
    pub fn stream_base_url(&self) -> &str {
        &self.inner.stream_base
    }

    /// URL of the pricing stream for `instruments`.
    pub fn price_stream_url<S: AsRef<str>>(&self, instruments: &[S]) -> Result<Url> {
        let joined = join_instruments(instruments)?;
        let mut url = Url::parse(&format!(
            "{}{}",
            self.inner.stream_base,
            self.inner.account_path("/pricing/stream")
        ))?;
        url.query_pairs_mut().append_pair("instruments", &joined);
        Ok(url)
    }

    /// URL of the transaction stream.
    pub fn transaction_stream_url(&self) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}{}",
            self.inner.stream_base,
            self.inner.account_path("/transactions/stream")
        ))?)
    }

    /// Stream prices for `instruments` until cancelled, closed by the
    /// server, or failed.
    ///
    /// `on_event` runs inline for every price tick in wire order.
    /// Heartbeats are absorbed.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `instruments` is empty (no request made)
    /// - [`Error::Http`], [`Error::Api`] and friends if the stream cannot be opened
    /// - [`Error::StreamServer`] if the server sends an error envelope
    /// - [`Error::StreamDecode`] or [`Error::Io`] if the body is corrupt
    /// - [`Error::Handler`] if `on_event` fails
    /// - [`Error::Cancelled`] if `cancel` fires
    pub async fn stream_prices<S, F>(
        &mut self,
        instruments: &[S],
        cancel: &CancellationToken,
        on_event: F,
    ) -> Result<()>
    where
        S: AsRef<str>,
        F: FnMut(PriceUpdate) -> HandlerResult,
    {
        let url = self.price_stream_url(instruments)?;
        self.run(url, "pricing", cancel, on_event).await
    }

    /// Stream account transactions until cancelled, closed by the server,
    /// or failed. Errors are as for [`stream_prices`](Self::stream_prices).
    pub async fn stream_transactions<F>(
        &mut self,
        cancel: &CancellationToken,
        on_event: F,
    ) -> Result<()>
    where
        F: FnMut(TransactionUpdate) -> HandlerResult,
    {
        let url = self.transaction_stream_url()?;
        self.run(url, "transactions", cancel, on_event).await
    }

    async fn run<T, F>(
        &mut self,
        url: Url,
        stream: &'static str,
        cancel: &CancellationToken,
        on_event: F,
    ) -> Result<()>
    where
        T: DeserializeOwned,
        F: FnMut(T) -> HandlerResult,
    {
        tracing::info!(stream, url = %url, "Connecting to stream");

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::info!(stream, "Stream cancelled while connecting");
                return Err(Error::Cancelled);
            }
            response = self.inner.open_stream(url) => response?,
        };

        tracing::info!(stream, status = response.status().as_u16(), "Stream connected");

        let body = Box::pin(response.bytes_stream().map_err(std::io::Error::other));
        let result = read_stream(StreamReader::new(body), cancel, on_event).await;

        match &result {
            Ok(()) => tracing::info!(stream, "Stream closed by server"),
            Err(Error::Cancelled) => tracing::info!(stream, "Stream cancelled"),
            Err(e) => tracing::warn!(stream, error = %e, "Stream terminated"),
        }

        result
    }
}

impl std::fmt::Debug for StreamingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingSession")
            .field("stream_base", &self.inner.stream_base)
            .finish()
    }
}

/// Read newline-delimited stream messages from `reader` and feed events to
/// `on_event` until EOF, cancellation, or the first error.
///
/// This is the loop behind [`StreamingSession`]; it is public so recorded
/// stream bodies can be replayed through the same classification.
///
/// # Example
///
/// ```
/// use oanda_rs::streaming::{read_stream, PriceUpdate};
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main]
/// # async fn main() -> oanda_rs::Result<()> {
/// let body: &[u8] = b"{\"type\":\"HEARTBEAT\",\"time\":\"t0\"}\n{\"type\":\"PRICE\",\"time\":\"t1\",\"instrument\":\"EUR_USD\"}\n";
/// let mut seen = Vec::new();
/// read_stream(body, &CancellationToken::new(), |update: PriceUpdate| {
///     seen.push(update.instrument);
///     Ok(())
/// })
/// .await?;
/// assert_eq!(seen, vec!["EUR_USD"]);
/// # Ok(())
/// # }
/// ```
pub async fn read_stream<R, T, F>(
    reader: R,
    cancel: &CancellationToken,
    mut on_event: F,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
    F: FnMut(T) -> HandlerResult,
{
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            next = lines.next() => next,
        };

        let line = match next {
            None => return Ok(()),
            Some(Ok(line)) => line,
            Some(Err(LinesCodecError::Io(e))) => return Err(Error::Io(e)),
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("stream line exceeds {} bytes", MAX_LINE_LENGTH),
                )))
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match StreamMessage::<T>::parse(&line)? {
            StreamMessage::Event(event) => on_event(event).map_err(Error::Handler)?,
            StreamMessage::Heartbeat(heartbeat) => {
                tracing::trace!(time = %heartbeat.time, "Heartbeat");
            }
            StreamMessage::ErrorNotice(notice) => {
                tracing::warn!(message = %notice.error_message, "Stream error envelope");
                return Err(Error::StreamServer(notice.error_message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;

    const HEARTBEAT: &str = r#"{"type":"HEARTBEAT","time":"t0"}"#;

    fn price_line(instrument: &str, time: &str) -> String {
        format!(
            r#"{{"type":"PRICE","time":"{time}","instrument":"{instrument}","bids":[{{"price":"1.1000","liquidity":10}}],"asks":[{{"price":"1.1001","liquidity":10}}],"tradeable":true}}"#
        )
    }

    async fn collect_prices(body: String) -> (Result<()>, Vec<PriceUpdate>) {
        let mut seen = Vec::new();
        let result = read_stream(body.as_bytes(), &CancellationToken::new(), |u: PriceUpdate| {
            seen.push(u);
            Ok(())
        })
        .await;
        (result, seen)
    }

    #[tokio::test]
    async fn test_heartbeat_then_price_then_eof() {
        let body = format!("{HEARTBEAT}\n{}\n", price_line("EUR_USD", "t1"));
        let (result, seen) = collect_prices(body).await;

        assert!(result.is_ok());
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].instrument, "EUR_USD");
        assert_eq!(seen[0].time, "t1");
        assert_eq!(seen[0].kind, "PRICE");
    }

    #[tokio::test]
    async fn test_heartbeats_never_reach_handler() {
        let mut body = String::new();
        for i in 0..5 {
            body.push_str(HEARTBEAT);
            body.push('\n');
            body.push_str(&price_line("EUR_USD", &format!("t{i}")));
            body.push('\n');
        }
        body.push_str(HEARTBEAT);
        body.push('\n');

        let (result, seen) = collect_prices(body).await;
        assert!(result.is_ok());
        assert_eq!(seen.len(), 5);
    }

    #[tokio::test]
    async fn test_events_delivered_in_wire_order() {
        let body = ["EUR_USD", "USD_JPY", "GBP_USD", "AUD_USD"]
            .iter()
            .enumerate()
            .map(|(i, instrument)| price_line(instrument, &format!("t{i}")))
            .collect::<Vec<_>>()
            .join("\n");

        let (result, seen) = collect_prices(body).await;
        assert!(result.is_ok());
        let order: Vec<_> = seen.iter().map(|u| u.instrument.as_str()).collect();
        assert_eq!(order, vec!["EUR_USD", "USD_JPY", "GBP_USD", "AUD_USD"]);
    }

    #[tokio::test]
    async fn test_blank_and_crlf_lines() {
        let body = format!("\r\n   \n{}\r\n\n", price_line("EUR_USD", "t1"));
        let (result, seen) = collect_prices(body).await;
        assert!(result.is_ok());
        assert_eq!(seen.len(), 1);
    }

    #[tokio::test]
    async fn test_error_envelope_terminates_with_message() {
        let body = format!(
            "{HEARTBEAT}\n{}\n{}\n",
            r#"{"errorMessage":"Invalid value specified for 'accountID'"}"#,
            price_line("EUR_USD", "t1")
        );
        let (result, seen) = collect_prices(body).await;

        match result {
            Err(Error::StreamServer(message)) => {
                assert_eq!(message, "Invalid value specified for 'accountID'")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn test_error_envelope_on_transaction_stream() {
        let body = r#"{"errorMessage":"Insufficient authorization to perform request."}"#;
        let mut calls = 0;
        let result = read_stream(body.as_bytes(), &CancellationToken::new(), |_: TransactionUpdate| {
            calls += 1;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(Error::StreamServer(ref m)) if m == "Insufficient authorization to perform request."));
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_malformed_line_stops_reading() {
        let body = format!("{}\n{}\n", r#"{"type":"PRICE""#, price_line("EUR_USD", "t1"));
        let (result, seen) = collect_prices(body).await;

        assert!(matches!(result, Err(Error::StreamDecode { .. })));
        assert!(seen.is_empty());
    }

    #[tokio::test]
    async fn test_typeless_line_without_error_message_is_delivered() {
        let body = r#"{"time":"t1","instrument":"EUR_USD"}"#.to_string();
        let (result, seen) = collect_prices(body).await;
        assert!(result.is_ok());
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, "");

        let body = r#"{"type":"","time":"t1","errorMessage":""}"#;
        let mut seen = Vec::new();
        let result = read_stream(body.as_bytes(), &CancellationToken::new(), |u: TransactionUpdate| {
            seen.push(u);
            Ok(())
        })
        .await;
        assert!(result.is_ok());
        assert_eq!(seen.len(), 1);
    }

    #[tokio::test]
    async fn test_handler_error_stops_stream() {
        let body = format!(
            "{}\n{}\n{}\n",
            price_line("EUR_USD", "t1"),
            price_line("USD_JPY", "t2"),
            price_line("GBP_USD", "t3")
        );
        let mut calls = 0;
        let result = read_stream(body.as_bytes(), &CancellationToken::new(), |_: PriceUpdate| {
            calls += 1;
            if calls == 2 {
                return Err("enough".into());
            }
            Ok(())
        })
        .await;

        match result {
            Err(Error::Handler(e)) => assert_eq!(e.to_string(), "enough"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_cancel_while_parked_on_read() {
        let (mut writer, reader) = tokio::io::duplex(1024);
        writer
            .write_all(format!("{}\n", price_line("EUR_USD", "t1")).as_bytes())
            .await
            .unwrap();

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let mut seen = 0;
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            read_stream(reader, &cancel, |_: PriceUpdate| {
                seen += 1;
                Ok(())
            }),
        )
        .await
        .expect("read loop did not observe cancellation");

        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(result.unwrap_err().is_cancelled());
        assert_eq!(seen, 1);
        drop(writer);
    }

    #[tokio::test]
    async fn test_already_cancelled_reads_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let body = price_line("EUR_USD", "t1");
        let mut seen = 0;
        let result = read_stream(body.as_bytes(), &cancel, |_: PriceUpdate| {
            seen += 1;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(seen, 0);
    }

    #[tokio::test]
    async fn test_transport_error_mid_stream() {
        let chunks: Vec<std::io::Result<VecDeque<u8>>> = vec![
            Ok(VecDeque::from(format!("{}\n", price_line("EUR_USD", "t1")).into_bytes())),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ];
        let reader = StreamReader::new(futures_util::stream::iter(chunks));

        let mut seen = 0;
        let result = read_stream(reader, &CancellationToken::new(), |_: PriceUpdate| {
            seen += 1;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(Error::Io(ref e)) if e.kind() == std::io::ErrorKind::ConnectionReset));
        assert_eq!(seen, 1);
    }
}
