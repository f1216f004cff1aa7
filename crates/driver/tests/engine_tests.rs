//! Integration tests for the host engine adapter
//!
//! Checks the lifecycle contract the synth host relies on:
//! - start/stop and the USB capability check
//! - bank and preset listings
//! - forwarding of bank/preset selection to the transmitter

use common::test_utils::MockUsb;
use protocol::PRESET_COUNT;
use radar_driver::engine::{RADAR_BANK_NAME, RADAR_ENGINE_INFO};
use radar_driver::{Engine, LayerId, Preset, RadarEngine, TransmitSettings};

fn started_engine(usb: &MockUsb) -> RadarEngine<MockUsb> {
    let usb = usb.clone();
    let mut engine = RadarEngine::new(TransmitSettings::default(), move || Ok(usb.clone()));
    engine.start();
    engine
}

fn preset(index: usize) -> Preset {
    Preset {
        index,
        bank: 0,
        name: format!("Radar Preset {:02}", index + 1),
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn test_info() {
        let engine = started_engine(&MockUsb::new());
        assert_eq!(engine.info(), RADAR_ENGINE_INFO);
        assert_eq!(engine.info().name, "MooerRadarDriver");
        assert_eq!(engine.info().jackname, "mooerradardriver");
    }

    #[test]
    fn test_start_does_not_touch_the_device() {
        let usb = MockUsb::new();
        let engine = started_engine(&usb);

        assert!(engine.is_running());
        assert!(usb.calls().is_empty());
    }

    #[test]
    fn test_unavailable_usb_is_contained() {
        let mut engine: RadarEngine<MockUsb> =
            RadarEngine::new(TransmitSettings::default(), || {
                Err(common::Error::Usb(rusb::Error::Other))
            });

        engine.start();
        assert!(!engine.is_running());
        assert!(!engine.set_preset(LayerId(0), &preset(0)));
    }

    #[test]
    fn test_stopped_engine_ignores_presets() {
        let usb = MockUsb::new();
        let mut engine = started_engine(&usb);
        engine.stop();

        assert!(!engine.set_preset(LayerId(0), &preset(3)));
        assert!(!engine.set_bank(LayerId(0), 0));
        assert!(usb.calls().is_empty());
    }

    #[test]
    fn test_restart_after_stop() {
        let usb = MockUsb::new();
        let mut engine = started_engine(&usb);
        engine.stop();
        engine.start();

        assert!(engine.set_preset(LayerId(0), &preset(3)));
        assert_eq!(usb.writes().len(), 1);
    }
}

mod listings {
    use super::*;

    #[test]
    fn test_single_bank() {
        let engine = started_engine(&MockUsb::new());
        let banks = engine.bank_list(LayerId(0));

        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].index, 0);
        assert_eq!(banks[0].name, RADAR_BANK_NAME);
    }

    #[test]
    fn test_preset_list_covers_table() {
        let engine = started_engine(&MockUsb::new());
        let bank = &engine.bank_list(LayerId(0))[0];
        let presets = engine.preset_list(bank);

        assert_eq!(presets.len(), PRESET_COUNT);
        assert_eq!(presets[0], preset(0));
        assert_eq!(presets[PRESET_COUNT - 1].name, "Radar Preset 36");
        assert!(presets.iter().enumerate().all(|(i, p)| p.index == i));
    }

    #[test]
    fn test_cmp_presets_compares_index() {
        let engine = started_engine(&MockUsb::new());
        let mut renamed = preset(4);
        renamed.name = "Lead".to_string();

        assert!(engine.cmp_presets(&preset(4), &renamed));
        assert!(!engine.cmp_presets(&preset(4), &preset(5)));
    }
}

mod selection {
    use super::*;

    #[test]
    fn test_set_preset_sends_frame() {
        let usb = MockUsb::new();
        let mut engine = started_engine(&usb);

        assert!(engine.set_preset(LayerId(0), &preset(10)));

        let writes = usb.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0][9], 11);
    }

    #[test]
    fn test_set_bank_forwards_index() {
        let usb = MockUsb::new();
        let mut engine = started_engine(&usb);

        assert!(engine.set_bank(LayerId(0), 0));

        let writes = usb.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0][9], 1);
    }

    #[test]
    fn test_device_failure_is_not_reported_to_host() {
        let usb = MockUsb::empty();
        let mut engine = started_engine(&usb);

        assert!(engine.set_preset(LayerId(0), &preset(1)));
        assert!(usb.writes().is_empty());
    }

    #[test]
    fn test_out_of_range_preset_is_not_fatal() {
        let usb = MockUsb::new();
        let mut engine = started_engine(&usb);

        assert!(engine.set_preset(LayerId(0), &preset(PRESET_COUNT)));
        assert!(usb.writes().is_empty());
        assert_eq!(usb.release_count(), 1);
        assert!(engine.is_running());
    }
}
