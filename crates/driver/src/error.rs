//! Preset transmission errors
//!
//! None of these ever leave the transmitter; they exist so that every
//! abandoned preset change is logged with a precise cause.

use protocol::{DeviceIdentity, ProtocolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransmitError {
    /// No attached device matches the configured identity
    #[error("Mooer Radar {0} not found")]
    DeviceNotFound(DeviceIdentity),

    /// Enumerating or opening devices failed
    #[error("Failed to look up Mooer Radar {identity}: {source}")]
    Discovery {
        identity: DeviceIdentity,
        source: rusb::Error,
    },

    /// Kernel driver detach or interface claim failed
    #[error("Failed to {step} interface {interface}: {source}")]
    Acquisition {
        step: &'static str,
        interface: u8,
        source: rusb::Error,
    },

    /// Preset index has no frame
    #[error(transparent)]
    UnknownPreset(#[from] ProtocolError),

    /// Every bulk write attempt failed
    #[error("Preset frame not delivered after {attempts} attempt(s): {reason}")]
    Transmission { attempts: u32, reason: String },

    /// Interface release failed
    #[error("Failed to release interface {interface}: {source}")]
    Release { interface: u8, source: rusb::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisition_display() {
        let err = TransmitError::Acquisition {
            step: "claim",
            interface: 0,
            source: rusb::Error::Busy,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to claim interface 0"));
    }

    #[test]
    fn test_unknown_preset_is_transparent() {
        let err: TransmitError = ProtocolError::UnknownPreset { index: 36, len: 36 }.into();
        assert_eq!(err.to_string(), "Unknown preset 36 (table holds 36 presets)");
    }

    #[test]
    fn test_not_found_names_identity() {
        let err = TransmitError::DeviceNotFound(DeviceIdentity::MOOER_RADAR);
        assert_eq!(err.to_string(), "Mooer Radar 0x0483:0x5703 not found");
    }
}
