//! # BlueZ Platform (Linux)
//!
//! Talks to the BlueZ daemon over D-Bus with `bluer` and opens printer
//! links with [`RfcommSocket`].
//!
//! | Purpose | BlueZ object |
//! |---------|--------------|
//! | Adapter state | `Adapter1.Powered` on the default adapter |
//! | Bonded devices | `Device1` objects with `Paired = true` |
//! | Advertised services | `Device1.UUIDs` |
//!
//! Every D-Bus round trip is bounded by `DBUS_TIMEOUT`, so a stopped or
//! wedged `bluetoothd` turns into an error instead of a hang.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bluer::{Address, Session};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{AdapterState, BluetoothPlatform, PairedDevice, SppLink};
use crate::error::BlueReceiptError;
use crate::transport::bluetooth::{
    CHUNK_DELAY_MS, CHUNK_SIZE, DEFAULT_CHANNEL, RfcommSocket, new_runtime, parse_address,
};

/// Upper bound on one BlueZ D-Bus exchange.
const DBUS_TIMEOUT: Duration = Duration::from_secs(5);

/// BlueZ-backed platform.
pub struct BluezPlatform {
    // Dropped before `runtime`.
    session: Session,
    runtime: Arc<Runtime>,
    channel: u8,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl BluezPlatform {
    /// Connect to the system bus and make sure `bluetoothd` answers.
    pub fn open() -> Result<Self, BlueReceiptError> {
        let runtime = new_runtime().map_err(|e| {
            BlueReceiptError::Platform(format!("Failed to start Bluetooth runtime: {}", e))
        })?;

        let session = dbus_call(&runtime, "BlueZ session", DBUS_TIMEOUT, async {
            let session = Session::new().await?;
            session.adapter_names().await?;
            Ok::<_, bluer::Error>(session)
        })?;
        info!("connected to bluetoothd");

        Ok(Self {
            session,
            runtime: Arc::new(runtime),
            channel: DEFAULT_CHANNEL,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Connect on `channel` instead of the default SPP channel.
    pub fn with_channel(mut self, channel: Option<u8>) -> Self {
        self.channel = channel.unwrap_or(DEFAULT_CHANNEL);
        self
    }

    /// Override chunked-write tuning.
    pub fn with_chunking(mut self, chunk_size: usize, chunk_delay: Duration) -> Self {
        self.chunk_size = chunk_size;
        self.chunk_delay = chunk_delay;
        self
    }

    fn call<T, F>(&self, what: &str, request: F) -> Result<T, BlueReceiptError>
    where
        F: Future<Output = bluer::Result<T>>,
    {
        dbus_call(&self.runtime, what, DBUS_TIMEOUT, request)
    }

    /// Log when `address` does not list `service` among its UUIDs.
    ///
    /// Some printers omit SPP from their advertised UUIDs and still accept
    /// the connection, so this never blocks the attempt.
    fn check_service(&self, address: Address, service: Uuid) {
        let uuids = self.call("service query", async {
            let adapter = self.session.default_adapter().await?;
            let device = adapter.device(address)?;
            device.uuids().await
        });

        match uuids {
            Ok(Some(uuids)) if !uuids.contains(&service) => {
                warn!(%address, %service, "device does not advertise the service");
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "service query failed"),
        }
    }
}

/// Drive one D-Bus request on `runtime`, giving up after `limit`.
fn dbus_call<T, F>(
    runtime: &Runtime,
    what: &str,
    limit: Duration,
    request: F,
) -> Result<T, BlueReceiptError>
where
    F: Future<Output = bluer::Result<T>>,
{
    runtime
        .block_on(async { tokio::time::timeout(limit, request).await })
        .map_err(|_| {
            BlueReceiptError::Platform(format!(
                "{} timed out after {}ms (is bluetoothd running?)",
                what,
                limit.as_millis()
            ))
        })?
        .map_err(|e| BlueReceiptError::Platform(format!("{} failed: {}", what, e)))
}

/// Device entry for `address`. BlueZ falls back to the address when a
/// device never reported a name; an empty alias does the same here.
fn paired_device(address: Address, alias: Option<String>) -> PairedDevice {
    let address = address.to_string();
    let name = alias
        .map(|alias| alias.trim().to_string())
        .filter(|alias| !alias.is_empty())
        .unwrap_or_else(|| address.clone());
    PairedDevice::new(name, address)
}

impl BluetoothPlatform for BluezPlatform {
    fn name(&self) -> &'static str {
        "bluez"
    }

    fn adapter_state(&self) -> Result<AdapterState, BlueReceiptError> {
        let state = self.call("adapter query", async {
            if self.session.adapter_names().await?.is_empty() {
                return Ok(AdapterState::Missing);
            }
            let adapter = self.session.default_adapter().await?;
            let state = if adapter.is_powered().await? {
                AdapterState::Enabled
            } else {
                AdapterState::Disabled
            };
            Ok::<_, bluer::Error>(state)
        })?;
        debug!(?state, "adapter state");
        Ok(state)
    }

    fn bonded_devices(&self) -> Result<Vec<PairedDevice>, BlueReceiptError> {
        let devices = self.call("device query", async {
            let adapter = self.session.default_adapter().await?;
            let mut devices = Vec::new();
            for address in adapter.device_addresses().await? {
                let device = adapter.device(address)?;
                if device.is_paired().await? {
                    devices.push(paired_device(address, device.alias().await.ok()));
                }
            }
            Ok::<_, bluer::Error>(devices)
        })?;
        debug!(count = devices.len(), "bonded devices");
        Ok(devices)
    }

    fn connect_spp(
        &self,
        device: &PairedDevice,
        service: Uuid,
    ) -> Result<Box<dyn SppLink>, BlueReceiptError> {
        let address = parse_address(&device.address)?;
        self.check_service(address, service);
        info!(device = %device, channel = self.channel, %service, "opening SPP link");

        let mut socket = RfcommSocket::connect(Arc::clone(&self.runtime), address, self.channel)
            .inspect_err(|e| {
                warn!(device = %device, error = %e, "SPP connect failed");
            })?;
        socket.set_chunk_size(self.chunk_size);
        socket.set_chunk_delay(self.chunk_delay);
        Ok(Box::new(socket))
    }
}
