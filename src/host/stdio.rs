//! Stdin/stdout JSON bridge for the site core.
//!
//! Reads newline-delimited JSON [`UiEvent`] messages, dispatches them
//! through a [`SiteHost`], and writes [`Envelope`] messages as
//! newline-delimited JSON.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use std::sync::Arc;

use etya_search::WebLookup;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::mpsc;

use crate::error::SiteError;
use crate::events::UiEvent;
use crate::host::site::{Envelope, SiteHost};

/// Run the bridge over stdin/stdout until stdin closes.
pub async fn run_stdio_bridge<W: WebLookup + 'static>(
    host: Arc<SiteHost<W>>,
    outbound: mpsc::UnboundedReceiver<Envelope>,
) -> crate::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    run_bridge(host, outbound, stdin, tokio::io::stdout()).await
}

/// Run the bridge over arbitrary streams until `reader` reaches EOF.
///
/// Two tasks operate concurrently:
///
/// 1. **Reader** -- runs on the calling task, parses each line as a
///    [`UiEvent`] and hands it to the host. Malformed lines produce an
///    `error` envelope and the loop continues.
/// 2. **Writer** -- drains the host's outbound channel into `writer`.
///
/// On EOF the host is drained, so in-flight searches and pending timers
/// still report before the bridge returns.
pub async fn run_bridge<W, R, O>(
    host: Arc<SiteHost<W>>,
    mut outbound: mpsc::UnboundedReceiver<Envelope>,
    reader: R,
    writer: O,
) -> crate::Result<()>
where
    W: WebLookup + 'static,
    R: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin + Send + 'static,
{
    let writer_handle = tokio::spawn(async move {
        let mut writer = BufWriter::new(writer);
        while let Some(envelope) = outbound.recv().await {
            match serde_json::to_string(&envelope) {
                Ok(json) => {
                    if let Err(e) = write_line(&mut writer, &json).await {
                        tracing::warn!(error = %e, "failed to write envelope; stopping writer");
                        return Err(e);
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize envelope; skipping");
                }
            }
        }
        Ok(())
    });

    let reader_result = run_reader(&host, reader).await;

    host.drain().await;
    drop(host);

    let writer_result = writer_handle
        .await
        .map_err(|e| SiteError::Bridge(format!("writer task failed: {e}")))?;

    reader_result.and(writer_result)
}

async fn run_reader<W, R>(host: &Arc<SiteHost<W>>, mut reader: R) -> crate::Result<()>
where
    W: WebLookup + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| SiteError::Bridge(format!("failed to read event: {e}")))?;

        if bytes_read == 0 {
            tracing::info!("input closed (EOF); shutting down bridge");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<UiEvent>(trimmed) {
            Ok(event) => {
                tracing::debug!(kind = ?event.kind(), "event received");
                host.handle_event(event);
            }
            Err(e) => {
                tracing::warn!(error = %e, raw_line = %trimmed, "failed to parse event");
                host.report_error(format!("failed to parse event: {e}"));
            }
        }
    }

    Ok(())
}

/// Write a single JSON line and flush.
async fn write_line<O: AsyncWrite + Unpin>(
    writer: &mut BufWriter<O>,
    json: &str,
) -> crate::Result<()> {
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| SiteError::Bridge(format!("failed to write envelope: {e}")))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| SiteError::Bridge(format!("failed to write newline: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| SiteError::Bridge(format!("failed to flush output: {e}")))?;
    Ok(())
}
