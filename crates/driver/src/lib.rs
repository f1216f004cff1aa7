//! Mooer Radar preset driver
//!
//! Lets a synth host switch presets on a Mooer Radar amp modeler by writing
//! a fixed preset frame to the unit over USB.
//!
//! - [`transmitter`]: discovery, claim, bulk write with one retry, release
//! - [`engine`]: adapter between the host plugin lifecycle and the transmitter
//! - [`usb`]: libusb backend
//! - [`config`]: TOML configuration

pub mod config;
pub mod engine;
pub mod error;
pub mod transmitter;
pub mod usb;

pub use config::DriverConfig;
pub use engine::{Bank, Engine, LayerId, Preset, RadarEngine};
pub use error::TransmitError;
pub use transmitter::{Delivery, PresetTransmitter, TransmitSettings};
pub use usb::RusbBackend;
