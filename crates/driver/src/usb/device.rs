//! Opened Radar device
//!
//! Thin wrapper around a rusb handle implementing [`DeviceLink`]. The handle
//! is closed when the wrapper is dropped.

use common::{DeviceLink, DeviceSummary};
use rusb::{Context, Device, DeviceDescriptor, DeviceHandle};
use std::time::Duration;
use tracing::debug;

/// Open handle on a matched device
pub struct RadarDevice {
    handle: DeviceHandle<Context>,
}

impl RadarDevice {
    /// Open `device`
    pub fn open(device: &Device<Context>) -> Result<Self, rusb::Error> {
        let handle = device.open()?;
        debug!(
            "Opened device on bus {:03} address {:03}",
            device.bus_number(),
            device.address()
        );
        Ok(Self { handle })
    }
}

impl DeviceLink for RadarDevice {
    fn kernel_driver_active(&self, interface: u8) -> rusb::Result<bool> {
        self.handle.kernel_driver_active(interface)
    }

    fn detach_kernel_driver(&mut self, interface: u8) -> rusb::Result<()> {
        self.handle.detach_kernel_driver(interface)
    }

    fn claim_interface(&mut self, interface: u8) -> rusb::Result<()> {
        self.handle.claim_interface(interface)
    }

    fn release_interface(&mut self, interface: u8) -> rusb::Result<()> {
        self.handle.release_interface(interface)
    }

    fn write_bulk(&mut self, endpoint: u8, data: &[u8], timeout: Duration) -> rusb::Result<usize> {
        debug!(
            "Bulk transfer: endpoint={:#x}, data_len={}, timeout={}ms",
            endpoint,
            data.len(),
            timeout.as_millis()
        );
        self.handle.write_bulk(endpoint, data, timeout)
    }
}

/// Build a listing entry for `device`
///
/// String descriptors are read when the device can be opened, and left
/// empty otherwise.
pub fn summarize(device: &Device<Context>, descriptor: &DeviceDescriptor) -> DeviceSummary {
    let (manufacturer, product) = device
        .open()
        .ok()
        .map(|handle| read_string_descriptors(&handle, descriptor))
        .unwrap_or((None, None));

    DeviceSummary {
        vendor_id: descriptor.vendor_id(),
        product_id: descriptor.product_id(),
        bus_number: device.bus_number(),
        device_address: device.address(),
        manufacturer,
        product,
    }
}

fn read_string_descriptors(
    handle: &DeviceHandle<Context>,
    descriptor: &DeviceDescriptor,
) -> (Option<String>, Option<String>) {
    let manufacturer = descriptor
        .manufacturer_string_index()
        .and_then(|idx| handle.read_string_descriptor_ascii(idx).ok());

    let product = descriptor
        .product_string_index()
        .and_then(|idx| handle.read_string_descriptor_ascii(idx).ok());

    (manufacturer, product)
}
