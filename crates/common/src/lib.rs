//! Common utilities for the Mooer Radar driver
//!
//! This crate provides the pieces shared between the driver library and its
//! tests: the USB access traits the preset transmitter is written against,
//! error handling, logging setup and, behind the `test-utils` feature, a
//! scripted USB test double.

pub mod error;
pub mod logging;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod usb_types;

pub use error::{Error, Result};
pub use logging::setup_logging;
pub use usb_types::{DeviceLink, DeviceSummary, UsbAccess};
