//! Preset selection frames
//!
//! A preset frame is the raw command the Radar expects on its bulk OUT
//! endpoint. Every frame has the same layout:
//!
//! ```text
//! 0B AA 55 05 00 E7 00 00 00 <slot> <checksum hi> <checksum lo>
//! ```
//!
//! The checksum is computed by the vendor software and baked into each
//! literal. Frames are opaque here: nothing is validated or recomputed.

use std::fmt;

/// Length of a preset frame in bytes
pub const FRAME_LEN: usize = 12;

/// Offset of the preset slot byte inside a frame
pub const SLOT_OFFSET: usize = 9;

/// Immutable preset selection frame
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PresetMessage([u8; FRAME_LEN]);

impl PresetMessage {
    /// Build a frame from a compile-time hex literal
    ///
    /// Intended for `static` tables: a malformed literal stops compilation
    /// instead of surfacing at runtime.
    pub const fn from_hex_literal(hex: &str) -> Self {
        let digits = hex.as_bytes();
        assert!(
            digits.len() == FRAME_LEN * 2,
            "preset frame literal has the wrong length"
        );

        let mut frame = [0u8; FRAME_LEN];
        let mut i = 0;
        while i < FRAME_LEN {
            let high = match nibble(digits[2 * i]) {
                Some(n) => n,
                None => panic!("preset frame literal contains a non-hex digit"),
            };
            let low = match nibble(digits[2 * i + 1]) {
                Some(n) => n,
                None => panic!("preset frame literal contains a non-hex digit"),
            };
            frame[i] = (high << 4) | low;
            i += 1;
        }

        Self(frame)
    }

    /// Raw frame bytes, as written to the device
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Device preset slot addressed by this frame
    pub fn slot(&self) -> u8 {
        self.0[SLOT_OFFSET]
    }
}

const fn nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for PresetMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for PresetMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PresetMessage({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "0BAA550500E700000001CAA1";

    #[test]
    fn test_literal_decoding() {
        let frame = PresetMessage::from_hex_literal(FIRST);
        assert_eq!(
            frame.as_bytes(),
            &[
                0x0B, 0xAA, 0x55, 0x05, 0x00, 0xE7, 0x00, 0x00, 0x00, 0x01, 0xCA, 0xA1
            ]
        );
        assert_eq!(frame.slot(), 1);
    }

    #[test]
    fn test_literal_accepts_lowercase() {
        let lower = PresetMessage::from_hex_literal("0baa550500e700000001caa1");
        assert_eq!(lower, PresetMessage::from_hex_literal(FIRST));
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        let frame = PresetMessage::from_hex_literal("0baa550500e700000024be66");
        assert_eq!(frame.to_string(), "0BAA550500E700000024BE66");
    }
}
