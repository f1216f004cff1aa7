//! Preset transmitter
//!
//! Turns a zero-based preset index into one bulk write on the Radar. Each
//! call walks the same sequence and always finishes:
//!
//! 1. discover the device by identity (nothing found: stop here)
//! 2. detach a kernel driver bound to the interface, if any
//! 3. claim the interface
//! 4. write the preset frame, retrying once on failure
//! 5. release the interface, whatever happened in 2-4
//!
//! Failures are logged and never returned. The device handle lives only for
//! the duration of one call.

use crate::error::TransmitError;
use common::{DeviceLink, UsbAccess};
use protocol::{
    DeviceIdentity, MAX_SEND_ATTEMPTS, PresetMessage, PresetTable, RADAR_ENDPOINT,
    RADAR_INTERFACE,
};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default bulk transfer timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Tunables for the transmitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitSettings {
    /// Device to drive
    pub identity: DeviceIdentity,
    /// Timeout of a single bulk write
    pub timeout: Duration,
}

impl Default for TransmitSettings {
    fn default() -> Self {
        Self {
            identity: DeviceIdentity::MOOER_RADAR,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// What happened to a preset change
///
/// Purely informational; the host is never told about failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Frame written after `attempts` tries
    Sent { attempts: u32 },
    /// No device to talk to (absent or enumeration failed)
    DeviceNotFound,
    /// Device found but the frame was not delivered
    Abandoned,
}

impl Delivery {
    pub fn is_sent(&self) -> bool {
        matches!(self, Delivery::Sent { .. })
    }
}

/// Sends preset frames to the Radar over a [`UsbAccess`] backend
pub struct PresetTransmitter<B> {
    backend: B,
    table: &'static PresetTable,
    settings: TransmitSettings,
}

impl<B: UsbAccess> PresetTransmitter<B> {
    /// Transmitter using the compiled-in Radar table
    pub fn new(backend: B, settings: TransmitSettings) -> Self {
        Self::with_table(backend, PresetTable::radar(), settings)
    }

    pub fn with_table(backend: B, table: &'static PresetTable, settings: TransmitSettings) -> Self {
        Self {
            backend,
            table,
            settings,
        }
    }

    /// Switch the Radar to preset `index`
    ///
    /// Never fails: every error is logged and reflected in the returned
    /// [`Delivery`] only.
    pub fn send_preset(&self, index: usize) -> Delivery {
        info!("Preset change to {} requested", index);

        let identity = self.settings.identity;
        info!("Finding Mooer Radar {} over USB...", identity);

        let mut link = match self.backend.find_device(identity) {
            Ok(Some(link)) => {
                info!("Device found");
                link
            }
            Ok(None) => {
                warn!("{}", TransmitError::DeviceNotFound(identity));
                return Delivery::DeviceNotFound;
            }
            Err(source) => {
                error!("{}", TransmitError::Discovery { identity, source });
                return Delivery::DeviceNotFound;
            }
        };

        let delivery = match self.deliver(&mut link, index) {
            Ok(attempts) => Delivery::Sent { attempts },
            Err(e) => {
                error!("Failed to communicate with Mooer Radar: {}", e);
                Delivery::Abandoned
            }
        };

        self.release(&mut link);
        delivery
    }

    fn deliver(&self, link: &mut B::Link, index: usize) -> Result<u32, TransmitError> {
        self.acquire(link)?;
        let message = self.table.get(index)?;
        self.transmit(link, message)
    }

    fn acquire(&self, link: &mut B::Link) -> Result<(), TransmitError> {
        let interface = RADAR_INTERFACE;

        match link.kernel_driver_active(interface) {
            Ok(true) => {
                info!(
                    "Kernel driver active on interface {}, detaching...",
                    interface
                );
                link.detach_kernel_driver(interface)
                    .map_err(|source| TransmitError::Acquisition {
                        step: "detach kernel driver from",
                        interface,
                        source,
                    })?;
                info!("Kernel driver detached");
            }
            Ok(false) => {
                debug!("No kernel driver active on interface {}", interface);
            }
            Err(rusb::Error::NotSupported) => {
                debug!("Kernel driver status not available on this platform");
            }
            Err(source) => {
                return Err(TransmitError::Acquisition {
                    step: "query kernel driver on",
                    interface,
                    source,
                });
            }
        }

        info!("Claiming interface {}...", interface);
        link.claim_interface(interface)
            .map_err(|source| TransmitError::Acquisition {
                step: "claim",
                interface,
                source,
            })?;
        info!("Interface {} claimed", interface);

        Ok(())
    }

    fn transmit(&self, link: &mut B::Link, message: &PresetMessage) -> Result<u32, TransmitError> {
        let data = message.as_bytes();
        let mut reason = String::new();

        for attempt in 1..=MAX_SEND_ATTEMPTS {
            info!(
                "Sending preset slot {} (attempt {}/{})...",
                message.slot(),
                attempt,
                MAX_SEND_ATTEMPTS
            );
            debug!("Frame: {}", message);

            match link.write_bulk(RADAR_ENDPOINT, data, self.settings.timeout) {
                Ok(written) if written == data.len() => {
                    info!("Attempt {} done", attempt);
                    return Ok(attempt);
                }
                Ok(written) => {
                    reason = format!("short write ({} of {} bytes)", written, data.len());
                }
                Err(e) => {
                    reason = e.to_string();
                }
            }
            warn!("Attempt {} failed: {}", attempt, reason);
        }

        Err(TransmitError::Transmission {
            attempts: MAX_SEND_ATTEMPTS,
            reason,
        })
    }

    fn release(&self, link: &mut B::Link) {
        let interface = RADAR_INTERFACE;

        info!("Releasing interface {}...", interface);
        match link.release_interface(interface) {
            Ok(()) => info!("Interface {} released", interface),
            Err(source) => error!("{}", TransmitError::Release { interface, source }),
        }
    }
}
