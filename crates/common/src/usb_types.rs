//! USB access abstractions
//!
//! The preset transmitter only needs a handful of libusb operations. They are
//! expressed as two traits so that the real rusb backend and the scripted
//! double in [`crate::test_utils`] can be swapped freely.

use protocol::DeviceIdentity;
use std::time::Duration;

/// Entry point into a USB stack
pub trait UsbAccess {
    /// Open device handle produced by discovery
    type Link: DeviceLink;

    /// Find and open the first device matching `identity`
    ///
    /// Returns `Ok(None)` when nothing matching is attached.
    fn find_device(&self, identity: DeviceIdentity) -> rusb::Result<Option<Self::Link>>;
}

/// Operations on an opened device
///
/// Dropping the link closes the underlying handle.
pub trait DeviceLink {
    fn kernel_driver_active(&self, interface: u8) -> rusb::Result<bool>;

    fn detach_kernel_driver(&mut self, interface: u8) -> rusb::Result<()>;

    fn claim_interface(&mut self, interface: u8) -> rusb::Result<()>;

    fn release_interface(&mut self, interface: u8) -> rusb::Result<()>;

    /// Bulk OUT transfer, returning the number of bytes written
    fn write_bulk(&mut self, endpoint: u8, data: &[u8], timeout: Duration) -> rusb::Result<usize>;
}

/// Short description of an attached device, for listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSummary {
    pub vendor_id: u16,
    pub product_id: u16,
    pub bus_number: u8,
    pub device_address: u8,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

impl DeviceSummary {
    /// Whether this device is the one `identity` selects
    pub fn is(&self, identity: DeviceIdentity) -> bool {
        identity.matches(self.vendor_id, self.product_id)
    }
}
