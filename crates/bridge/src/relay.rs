//! Serial relay loop.
//!
//! Reads device lines and forwards tagged reports to the API, while a
//! ticker polls the command mailbox and writes pending commands back to
//! the device. Backend failures are logged and skipped; only a broken
//! serial link ends a session.

use std::path::Path;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::MissedTickBehavior;

use biogate_core::command::is_idle_wire;

use crate::client::Backend;
use crate::config::SETTLE_DELAY;
use crate::error::BridgeError;
use crate::frame::{self, Frame};
use crate::link;

/// Delay before reopening the serial device after a failure.
const REOPEN_DELAY: Duration = Duration::from_secs(5);

/// Run the relay indefinitely, reopening the serial device whenever the
/// session ends.
pub async fn run<B>(serial_port: &Path, poll_interval: Duration, backend: &B)
where
    B: Backend + ?Sized,
{
    loop {
        tracing::info!(port = %serial_port.display(), "Opening serial link");

        match link::open(serial_port).await {
            Ok(link) => {
                tokio::time::sleep(SETTLE_DELAY).await;
                tracing::info!("Serial link ready");

                match run_session(link.reader, link.writer, backend, poll_interval).await {
                    Ok(()) => tracing::warn!("Serial link closed, reopening"),
                    Err(e) => tracing::error!(error = %e, "Serial session failed, reopening"),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to open serial link");
            }
        }

        tokio::time::sleep(REOPEN_DELAY).await;
    }
}

/// Drive one serial session until the device side reaches end of input
/// (`Ok`) or the link fails (`Err`).
pub async fn run_session<R, W, B>(
    mut reader: R,
    mut writer: W,
    backend: &B,
    poll_interval: Duration,
) -> Result<(), BridgeError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    B: Backend + ?Sized,
{
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // Kept across iterations: a read interrupted by the ticker resumes
    // appending to the same buffer.
    let mut buf = Vec::new();

    loop {
        tokio::select! {
            read = reader.read_until(b'\n', &mut buf) => {
                if read? == 0 {
                    if !buf.is_empty() {
                        handle_line(&String::from_utf8_lossy(&buf), backend).await;
                    }
                    tracing::info!("Serial input exhausted");
                    return Ok(());
                }
                // Firmware noise can carry invalid UTF-8; decode lossily.
                let line = String::from_utf8_lossy(&buf).into_owned();
                buf.clear();
                handle_line(&line, backend).await;
            }
            _ = ticker.tick() => {
                deliver_command(&mut writer, backend).await?;
            }
        }
    }
}

/// Decode a device line and forward it. Never fails the session.
async fn handle_line<B>(line: &str, backend: &B)
where
    B: Backend + ?Sized,
{
    let frame = match frame::parse_line(line) {
        Ok(Some(frame)) => frame,
        Ok(None) => return,
        Err(e) => {
            tracing::warn!(error = %e, line = line.trim(), "Dropping malformed device report");
            return;
        }
    };

    match frame {
        Frame::Access(payload) => {
            tracing::info!(%payload, "Scan result");
            if let Err(e) = backend.post_access(&payload).await {
                tracing::error!(error = %e, "Failed to report scan");
            }
        }
        Frame::Users(payload) => {
            tracing::info!(%payload, "Enrolled slots");
            if let Err(e) = backend.post_active_users(&payload).await {
                tracing::error!(error = %e, "Failed to report enrolled slots");
            }
        }
        Frame::Log(text) => {
            tracing::debug!(device = %text, "Device output");
        }
    }
}

/// Poll the mailbox and write a pending command to the device.
///
/// Only link errors are returned. The mailbox is reset after the command
/// has been flushed to the device.
async fn deliver_command<W, B>(writer: &mut W, backend: &B) -> Result<(), BridgeError>
where
    W: AsyncWrite + Unpin,
    B: Backend + ?Sized,
{
    let command = match backend.poll_command().await {
        Ok(command) => command,
        Err(e) => {
            tracing::debug!(error = %e, "Command poll failed");
            return Ok(());
        }
    };

    if command.is_empty() || is_idle_wire(&command) {
        return Ok(());
    }

    tracing::info!(%command, "Sending command to device");
    writer.write_all(format!("{command}\n").as_bytes()).await?;
    writer.flush().await?;

    if let Err(e) = backend.reset_command().await {
        tracing::error!(error = %e, %command, "Failed to reset command mailbox");
    }
    Ok(())
}
