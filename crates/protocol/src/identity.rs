//! Target device identity and fixed USB addressing

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interface claimed for preset transfers
pub const RADAR_INTERFACE: u8 = 0;

/// Bulk OUT endpoint that accepts preset frames
pub const RADAR_ENDPOINT: u8 = 2;

/// Total bulk write attempts per preset change (first try plus one retry)
pub const MAX_SEND_ATTEMPTS: u32 = 2;

/// USB vendor/product pair identifying a kind of device
///
/// Several attached units with the same identity are indistinguishable;
/// discovery picks the first one enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceIdentity {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceIdentity {
    /// Mooer Radar (STMicroelectronics USB stack)
    pub const MOOER_RADAR: DeviceIdentity = DeviceIdentity::new(0x0483, 0x5703);

    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }

    /// Whether a device descriptor's IDs match this identity
    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self::MOOER_RADAR
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}:0x{:04x}", self.vendor_id, self.product_id)
    }
}

/// Parses `0xVID:0xPID` with 1-4 hex digits per half
impl FromStr for DeviceIdentity {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ProtocolError::InvalidIdentity(s.to_string());

        let (vid, pid) = s.trim().split_once(':').ok_or_else(invalid)?;
        let vendor_id = parse_hex_id(vid).ok_or_else(invalid)?;
        let product_id = parse_hex_id(pid).ok_or_else(invalid)?;

        Ok(Self::new(vendor_id, product_id))
    }
}

fn parse_hex_id(id: &str) -> Option<u16> {
    let hex_part = id
        .strip_prefix("0x")
        .or_else(|| id.strip_prefix("0X"))?;
    if hex_part.is_empty() || hex_part.len() > 4 {
        return None;
    }
    u16::from_str_radix(hex_part, 16).ok()
}

impl TryFrom<String> for DeviceIdentity {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeviceIdentity> for String {
    fn from(identity: DeviceIdentity) -> Self {
        identity.to_string()
    }
}
