//! Compiled-in preset table
//!
//! Table indices are zero-based: index `i` selects device slot `i + 1`.

use crate::error::{ProtocolError, Result};
use crate::frame::PresetMessage;

/// Number of presets the Radar exposes
pub const PRESET_COUNT: usize = 36;

static RADAR_FRAMES: [PresetMessage; PRESET_COUNT] = [
    PresetMessage::from_hex_literal("0BAA550500E700000001CAA1"),
    PresetMessage::from_hex_literal("0BAA550500E700000002FAC2"),
    PresetMessage::from_hex_literal("0BAA550500E700000003EAE3"),
    PresetMessage::from_hex_literal("0BAA550500E7000000049A04"),
    PresetMessage::from_hex_literal("0BAA550500E7000000058A25"),
    PresetMessage::from_hex_literal("0BAA550500E700000006BA46"),
    PresetMessage::from_hex_literal("0BAA550500E700000007AA67"),
    PresetMessage::from_hex_literal("0BAA550500E7000000085B88"),
    PresetMessage::from_hex_literal("0BAA550500E7000000094BA9"),
    PresetMessage::from_hex_literal("0BAA550500E70000000A7BCA"),
    PresetMessage::from_hex_literal("0BAA550500E70000000B6BEB"),
    PresetMessage::from_hex_literal("0BAA550500E70000000C1B0C"),
    PresetMessage::from_hex_literal("0BAA550500E70000000D0B2D"),
    PresetMessage::from_hex_literal("0BAA550500E70000000E3B4E"),
    PresetMessage::from_hex_literal("0BAA550500E70000000F2B6F"),
    PresetMessage::from_hex_literal("0BAA550500E700000010C8B1"),
    PresetMessage::from_hex_literal("0BAA550500E700000011D890"),
    PresetMessage::from_hex_literal("0BAA550500E700000012E8F3"),
    PresetMessage::from_hex_literal("0BAA550500E700000013F8D2"),
    PresetMessage::from_hex_literal("0BAA550500E7000000148835"),
    PresetMessage::from_hex_literal("0BAA550500E7000000159814"),
    PresetMessage::from_hex_literal("0BAA550500E700000016A877"),
    PresetMessage::from_hex_literal("0BAA550500E700000017B856"),
    PresetMessage::from_hex_literal("0BAA550500E70000001849B9"),
    PresetMessage::from_hex_literal("0BAA550500E7000000195998"),
    PresetMessage::from_hex_literal("0BAA550500E70000001A69FB"),
    PresetMessage::from_hex_literal("0BAA550500E70000001B79DA"),
    PresetMessage::from_hex_literal("0BAA550500E70000001C093D"),
    PresetMessage::from_hex_literal("0BAA550500E70000001D191C"),
    PresetMessage::from_hex_literal("0BAA550500E70000001E297F"),
    PresetMessage::from_hex_literal("0BAA550500E70000001F395E"),
    PresetMessage::from_hex_literal("0BAA550500E700000020FEE2"),
    PresetMessage::from_hex_literal("0BAA550500E700000021EEC3"),
    PresetMessage::from_hex_literal("0BAA550500E700000022DEA0"),
    PresetMessage::from_hex_literal("0BAA550500E700000023CE81"),
    PresetMessage::from_hex_literal("0BAA550500E700000024BE66"),
];

static RADAR_TABLE: PresetTable = PresetTable::new(&RADAR_FRAMES);

/// Read-only, ordered sequence of preset frames
#[derive(Debug, Clone, Copy)]
pub struct PresetTable {
    frames: &'static [PresetMessage],
}

impl PresetTable {
    /// Wrap a static frame list
    pub const fn new(frames: &'static [PresetMessage]) -> Self {
        Self { frames }
    }

    /// The Mooer Radar table
    pub fn radar() -> &'static PresetTable {
        &RADAR_TABLE
    }

    /// Number of presets
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Look up the frame for a zero-based preset index
    pub fn get(&self, index: usize) -> Result<&'static PresetMessage> {
        self.frames.get(index).ok_or(ProtocolError::UnknownPreset {
            index,
            len: self.frames.len(),
        })
    }

    /// Iterate over `(index, frame)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static PresetMessage)> {
        self.frames.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radar_table_size() {
        assert_eq!(PresetTable::radar().len(), PRESET_COUNT);
        assert!(!PresetTable::radar().is_empty());
    }

    #[test]
    fn test_index_maps_to_next_slot() {
        for (index, frame) in PresetTable::radar().iter() {
            assert_eq!(frame.slot() as usize, index + 1);
        }
    }

    #[test]
    fn test_lookup_out_of_range() {
        let table = PresetTable::radar();
        assert!(table.get(PRESET_COUNT - 1).is_ok());
        assert_eq!(
            table.get(PRESET_COUNT),
            Err(ProtocolError::UnknownPreset {
                index: PRESET_COUNT,
                len: PRESET_COUNT
            })
        );
    }
}
