//! # Bluetooth RFCOMM Transport
//!
//! Talks to receipt printers over the Bluetooth Serial Port Profile (SPP).
//! SPP is RFCOMM with a well-known service UUID; the printer treats the link
//! as a serial cable and prints whatever bytes arrive.
//!
//! ## Connection Sequence
//!
//! 1. Connect an RFCOMM stream to the printer's SPP channel (1 unless
//!    configured otherwise), giving up after [`CONNECT_TIMEOUT`].
//! 2. Write the receipt in chunks, flush.
//! 3. The stream is closed when [`RfcommSocket`] is dropped, on every path.
//!
//! Sockets are async (`bluer`); each call is driven to completion on a
//! current-thread tokio runtime shared with the platform, so callers see a
//! plain blocking [`Write`].
//!
//! ## Bluetooth Setup (Linux)
//!
//! The printer must already be paired:
//!
//! ```bash
//! $ bluetoothctl
//! [bluetooth]# scan on
//! [bluetooth]# pair 00:11:22:33:44:55
//! [bluetooth]# trust 00:11:22:33:44:55
//! ```
//!
//! ## Chunked Writes
//!
//! Large buffers are written in 4096 byte chunks with a short pause so
//! cheap printers with small receive buffers keep up.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use bluer::Address;
use bluer::rfcomm::{Socket, SocketAddr, Stream};
use tokio::io::AsyncWriteExt;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::BlueReceiptError;

/// Serial Port Profile service class UUID.
pub const SPP_UUID: Uuid = Uuid::from_u128(0x0000_1101_0000_1000_8000_0080_5F9B_34FB);

/// RFCOMM channel of the SPP service. Nearly every SPP printer serves on 1.
pub const DEFAULT_CHANNEL: u8 = 1;

/// Default chunk size for writes (bytes)
pub const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
pub const CHUNK_DELAY_MS: u64 = 2;

/// Upper bound on establishing the RFCOMM link.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Build the runtime that drives Bluetooth I/O.
pub fn new_runtime() -> io::Result<Runtime> {
    Builder::new_current_thread().enable_all().build()
}

/// # RFCOMM Printer Socket
///
/// A connected RFCOMM stream to one printer.
///
/// ```no_run
/// use std::io::Write;
/// use std::sync::Arc;
/// use bluereceipt::transport::bluetooth::{self, RfcommSocket};
///
/// let runtime = Arc::new(bluetooth::new_runtime()?);
/// let address = bluetooth::parse_address("00:11:22:33:44:55")?;
/// let mut socket = RfcommSocket::connect(runtime, address, 1)?;
/// socket.write_all(b"Hello\n")?;
/// socket.flush()?;
/// // closed here
/// # Ok::<(), bluereceipt::BlueReceiptError>(())
/// ```
pub struct RfcommSocket {
    // Dropped before `runtime`.
    stream: Stream,
    runtime: Arc<Runtime>,
    peer: Address,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl RfcommSocket {
    /// Connect to `address` on RFCOMM `channel`.
    ///
    /// ## Errors
    ///
    /// Returns [`BlueReceiptError::Transport`] if the device is out of range,
    /// switched off, refuses the link, or does not answer in time.
    #[instrument(skip(runtime), fields(peer = %address))]
    pub fn connect(
        runtime: Arc<Runtime>,
        address: Address,
        channel: u8,
    ) -> Result<Self, BlueReceiptError> {
        let target = SocketAddr::new(address, channel);
        let stream = runtime
            .block_on(async { tokio::time::timeout(CONNECT_TIMEOUT, Stream::connect(target)).await })
            .map_err(|_| {
                BlueReceiptError::Transport(format!(
                    "Connect to {} on channel {} timed out after {}s",
                    address,
                    channel,
                    CONNECT_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| {
                BlueReceiptError::Transport(format!(
                    "Failed to connect to {} on channel {}: {}",
                    address, channel, e
                ))
            })?;
        info!(channel, "RFCOMM connected");

        Ok(Self {
            stream,
            runtime,
            peer: address,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Set the chunk size for large writes. Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks. Default is 2ms.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }
}

impl Write for RfcommSocket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Self {
            stream, runtime, ..
        } = self;
        runtime.block_on(stream.write(buf))
    }

    /// Small writes go out directly; large writes are chunked.
    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        let Self {
            stream,
            runtime,
            chunk_size,
            chunk_delay,
            ..
        } = self;
        let (chunk_size, chunk_delay) = (*chunk_size, *chunk_delay);

        runtime.block_on(async move {
            if data.len() <= chunk_size {
                return stream.write_all(data).await;
            }

            for chunk in data.chunks(chunk_size) {
                stream.write_all(chunk).await?;

                if !chunk_delay.is_zero() {
                    tokio::time::sleep(chunk_delay).await;
                }
            }

            Ok(())
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        let Self {
            stream, runtime, ..
        } = self;
        runtime.block_on(stream.flush())
    }
}

impl Drop for RfcommSocket {
    fn drop(&mut self) {
        debug!(peer = %self.peer, "closing RFCOMM socket");
    }
}

/// Parse a `XX:XX:XX:XX:XX:XX` device address.
pub fn parse_address(mac: &str) -> Result<Address, BlueReceiptError> {
    mac.trim()
        .parse()
        .map_err(|_| BlueReceiptError::InvalidAddress(mac.to_string()))
}

/// Check whether this process may open Bluetooth sockets.
///
/// `Ok` also covers kernels without Bluetooth support; that case surfaces
/// later as a missing adapter.
pub fn check_socket_access() -> io::Result<()> {
    let runtime = new_runtime()?;
    match runtime.block_on(async { Socket::new() }) {
        Ok(_) => Ok(()),
        Err(e) if e.raw_os_error() == Some(libc::EAFNOSUPPORT) => Ok(()),
        Err(e) => Err(e),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spp_uuid() {
        assert_eq!(
            SPP_UUID.hyphenated().to_string().to_uppercase(),
            "00001101-0000-1000-8000-00805F9B34FB"
        );
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address("00:11:22:AA:bb:FF").unwrap(),
            Address::new([0x00, 0x11, 0x22, 0xAA, 0xBB, 0xFF])
        );
        assert_eq!(
            parse_address("00:11:22:33:44:55").unwrap().to_string(),
            "00:11:22:33:44:55"
        );
    }

    #[test]
    fn test_invalid_addresses() {
        for bad in [
            "00:11:22:33:44",       // too short
            "00:11:22:33:44:55:66", // too long
            "00-11-22-33-44-55",    // wrong separator
            "GG:HH:II:JJ:KK:LL",    // invalid hex
            "",
        ] {
            assert!(
                matches!(parse_address(bad), Err(BlueReceiptError::InvalidAddress(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    // Connecting to a real printer requires hardware; covered by manual runs.
}
