//! Mooer Radar preset protocol
//!
//! This crate defines what goes over the wire when the Radar is asked to
//! switch presets: the fixed preset frames, the compiled-in table that maps
//! a zero-based preset index to its frame, and the USB identity and
//! addressing of the target device.
//!
//! # Example
//!
//! ```
//! use protocol::{DeviceIdentity, PresetTable, RADAR_ENDPOINT};
//!
//! let table = PresetTable::radar();
//! let frame = table.get(0).unwrap();
//! assert_eq!(frame.slot(), 1);
//! assert_eq!(frame.to_string(), "0BAA550500E700000001CAA1");
//!
//! assert_eq!(DeviceIdentity::MOOER_RADAR.to_string(), "0x0483:0x5703");
//! assert_eq!(RADAR_ENDPOINT, 2);
//! ```

pub mod error;
pub mod frame;
pub mod identity;
pub mod table;

pub use error::{ProtocolError, Result};
pub use frame::{FRAME_LEN, PresetMessage, SLOT_OFFSET};
pub use identity::{DeviceIdentity, MAX_SEND_ATTEMPTS, RADAR_ENDPOINT, RADAR_INTERFACE};
pub use table::{PRESET_COUNT, PresetTable};
