//! Host engine adapter
//!
//! The synth host drives plugins through a small lifecycle contract: it
//! starts and stops them, asks for banks and presets, and calls back when
//! the user picks one. [`Engine`] captures that contract and [`RadarEngine`]
//! implements it on top of a [`PresetTransmitter`].
//!
//! Preset changes never report device failures back to the host; the
//! transmitter logs them and the host carries on.

use crate::transmitter::{Delivery, PresetTransmitter, TransmitSettings};
use crate::usb::RusbBackend;
use common::UsbAccess;
use protocol::PresetTable;
use tracing::{debug, error, info, warn};

/// Host-side layer a bank or preset applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerId(pub u32);

/// Bank entry shown by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    pub index: usize,
    pub name: String,
}

/// Preset entry shown by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Zero-based index into the preset table
    pub index: usize,
    /// Bank the preset belongs to
    pub bank: usize,
    pub name: String,
}

/// MIDI controller exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controller {
    pub name: &'static str,
    pub midi_cc: u8,
    pub default_value: u8,
    pub max_value: u8,
}

/// Named group of controllers shown together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerScreen {
    pub name: &'static str,
    pub controllers: &'static [&'static str],
}

/// Static description of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineInfo {
    pub name: &'static str,
    pub nickname: &'static str,
    pub jackname: &'static str,
    /// Whether the host should assign a MIDI channel
    pub midi_channel: bool,
}

/// Lifecycle contract between the host and a plugin engine
///
/// None of these calls may fail towards the host; implementations log
/// their own errors.
pub trait Engine {
    fn info(&self) -> EngineInfo;

    fn start(&mut self);

    fn stop(&mut self);

    fn is_running(&self) -> bool;

    fn bank_list(&self, layer: LayerId) -> Vec<Bank>;

    /// Select a bank; returns whether the engine acted on it
    fn set_bank(&mut self, layer: LayerId, bank: usize) -> bool;

    fn preset_list(&self, bank: &Bank) -> Vec<Preset>;

    /// Select a preset; returns whether the engine acted on it
    fn set_preset(&mut self, layer: LayerId, preset: &Preset) -> bool;

    fn cmp_presets(&self, a: &Preset, b: &Preset) -> bool;

    fn controllers(&self) -> &'static [Controller] {
        &[]
    }

    fn controller_screens(&self) -> &'static [ControllerScreen] {
        &[]
    }
}

pub const RADAR_ENGINE_INFO: EngineInfo = EngineInfo {
    name: "MooerRadarDriver",
    nickname: "RA",
    jackname: "mooerradardriver",
    midi_channel: false,
};

/// The Radar exposes a single bank
pub const RADAR_BANK_NAME: &str = "Mooer Radar Bank 0";

static RADAR_CONTROLLERS: [Controller; 1] = [Controller {
    name: "volume",
    midi_cc: 7,
    default_value: 96,
    max_value: 127,
}];

static RADAR_SCREENS: [ControllerScreen; 1] = [ControllerScreen {
    name: "main",
    controllers: &["volume"],
}];

type Connector<B> = Box<dyn Fn() -> common::Result<B>>;

/// Engine driving a Mooer Radar
///
/// `start` builds the USB backend through the connector; the transmitter
/// only exists while the engine runs.
pub struct RadarEngine<B> {
    settings: TransmitSettings,
    connect: Connector<B>,
    transmitter: Option<PresetTransmitter<B>>,
}

impl RadarEngine<RusbBackend> {
    /// Engine talking to real hardware through libusb
    pub fn with_rusb(settings: TransmitSettings) -> Self {
        Self::new(settings, RusbBackend::new)
    }
}

impl<B: UsbAccess> RadarEngine<B> {
    pub fn new(
        settings: TransmitSettings,
        connect: impl Fn() -> common::Result<B> + 'static,
    ) -> Self {
        Self {
            settings,
            connect: Box::new(connect),
            transmitter: None,
        }
    }

    pub fn transmitter(&self) -> Option<&PresetTransmitter<B>> {
        self.transmitter.as_ref()
    }

    /// Forward a preset change to the transmitter, if running
    fn send(&self, index: usize) -> Option<Delivery> {
        match &self.transmitter {
            Some(transmitter) => Some(transmitter.send_preset(index)),
            None => {
                warn!(
                    "Engine {} not started, ignoring preset {}",
                    RADAR_ENGINE_INFO.name, index
                );
                None
            }
        }
    }
}

impl<B: UsbAccess> Engine for RadarEngine<B> {
    fn info(&self) -> EngineInfo {
        RADAR_ENGINE_INFO
    }

    fn start(&mut self) {
        if self.transmitter.is_some() {
            return;
        }

        info!("Starting Engine {}", RADAR_ENGINE_INFO.name);
        match (self.connect)() {
            Ok(backend) => {
                self.transmitter = Some(PresetTransmitter::new(backend, self.settings));
            }
            Err(e) => error!("Can't start engine {} => {}", RADAR_ENGINE_INFO.name, e),
        }
    }

    fn stop(&mut self) {
        if self.transmitter.take().is_some() {
            info!("Stopping Engine {}", RADAR_ENGINE_INFO.name);
        }
    }

    fn is_running(&self) -> bool {
        self.transmitter.is_some()
    }

    fn bank_list(&self, _layer: LayerId) -> Vec<Bank> {
        vec![Bank {
            index: 0,
            name: RADAR_BANK_NAME.to_string(),
        }]
    }

    /// Bank selection is forwarded to the transmitter as a preset index
    fn set_bank(&mut self, _layer: LayerId, bank: usize) -> bool {
        self.send(bank).is_some()
    }

    fn preset_list(&self, bank: &Bank) -> Vec<Preset> {
        debug!("Preset list for bank {}", bank.name);
        PresetTable::radar()
            .iter()
            .map(|(index, frame)| Preset {
                index,
                bank: bank.index,
                name: format!("Radar Preset {:02}", frame.slot()),
            })
            .collect()
    }

    fn set_preset(&mut self, _layer: LayerId, preset: &Preset) -> bool {
        self.send(preset.index).is_some()
    }

    fn cmp_presets(&self, a: &Preset, b: &Preset) -> bool {
        a.index == b.index
    }

    fn controllers(&self) -> &'static [Controller] {
        &RADAR_CONTROLLERS
    }

    fn controller_screens(&self) -> &'static [ControllerScreen] {
        &RADAR_SCREENS
    }
}
