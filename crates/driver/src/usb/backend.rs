//! libusb backend
//!
//! Owning a [`RusbBackend`] is the proof that the USB subsystem initialized:
//! construction fails fast when libusb is unavailable.

use crate::usb::device::{RadarDevice, summarize};
use common::{DeviceSummary, UsbAccess};
use protocol::DeviceIdentity;
use rusb::{Context, UsbContext};
use tracing::{debug, info};

/// USB access through a private libusb context
pub struct RusbBackend {
    context: Context,
}

impl RusbBackend {
    /// Initialize libusb
    pub fn new() -> common::Result<Self> {
        let context = Context::new()?;
        info!("USB subsystem initialized");
        Ok(Self { context })
    }

    /// Describe every attached device
    pub fn list_devices(&self) -> common::Result<Vec<DeviceSummary>> {
        let devices = self.context.devices()?;

        let mut summaries = Vec::new();
        for device in devices.iter() {
            match device.device_descriptor() {
                Ok(descriptor) => summaries.push(summarize(&device, &descriptor)),
                Err(e) => debug!(
                    "Skipping device on bus {:03} address {:03}: {}",
                    device.bus_number(),
                    device.address(),
                    e
                ),
            }
        }

        Ok(summaries)
    }
}

impl UsbAccess for RusbBackend {
    type Link = RadarDevice;

    fn find_device(&self, identity: DeviceIdentity) -> rusb::Result<Option<RadarDevice>> {
        for device in self.context.devices()?.iter() {
            let descriptor = match device.device_descriptor() {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    debug!("Could not read device descriptor: {}", e);
                    continue;
                }
            };

            if identity.matches(descriptor.vendor_id(), descriptor.product_id()) {
                return RadarDevice::open(&device).map(Some);
            }
        }

        Ok(None)
    }
}
