//! USB subsystem
//!
//! rusb-backed implementation of the [`common::UsbAccess`] traits used by
//! the preset transmitter. Discovery enumerates the bus on every call; no
//! handle is kept between preset changes.

pub mod backend;
pub mod device;

pub use backend::RusbBackend;
pub use device::RadarDevice;
