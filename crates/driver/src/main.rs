//! Mooer Radar preset driver CLI
//!
//! Switches presets on a Mooer Radar from the command line, using the same
//! engine the synth host loads.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use common::setup_logging;
use protocol::PresetTable;
use radar_driver::config::{self, DriverConfig};
use radar_driver::{Engine, LayerId, RadarEngine, RusbBackend};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mooer-radar")]
#[command(author, version, about = "Switch presets on a Mooer Radar over USB")]
#[command(long_about = "
Sends preset selection frames to a Mooer Radar amp modeler over USB.

EXAMPLES:
    # Select the first preset (indices are zero-based)
    mooer-radar --preset 0

    # Show the preset table
    mooer-radar --list-presets

    # Check that the Radar is attached
    mooer-radar --list-devices

    # Run with debug logging
    mooer-radar --preset 12 --log-level debug

CONFIGURATION:
    The driver looks for configuration files in the following order:
    1. Path specified with --config
    2. ~/.config/mooer-radar/driver.toml
    3. /etc/mooer-radar/driver.toml
    4. Built-in defaults
")]
struct Args {
    /// Zero-based preset to select
    #[arg(short, long, value_name = "INDEX")]
    preset: Option<usize>,

    /// Print the preset table and exit
    #[arg(long)]
    list_presets: bool,

    /// List USB devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Save default configuration to default location and exit
    #[arg(long)]
    save_config: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.save_config {
        let config = DriverConfig::default();
        let path = DriverConfig::default_path();
        config.save(&path).context("Failed to save configuration")?;
        println!("Configuration saved to: {}", path.display());
        return Ok(());
    }

    let (config, source) = if let Some(ref path) = args.config {
        config::load_config(path).context("Failed to load configuration")?
    } else {
        DriverConfig::load_or_default()
    };

    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.driver.log_level);
    setup_logging(log_level).context("Failed to setup logging")?;

    info!("Mooer Radar driver v{}", env!("CARGO_PKG_VERSION"));
    source.log();

    if args.list_presets {
        list_presets();
        return Ok(());
    }

    if args.list_devices {
        return list_devices(&config);
    }

    let Some(index) = args.preset else {
        bail!("Nothing to do, pass --preset <INDEX> (see --help)");
    };

    let mut engine = RadarEngine::with_rusb(config.transmit_settings());
    engine.start();
    if !engine.is_running() {
        return Err(anyhow!("USB subsystem unavailable"));
    }

    let delivery = engine
        .transmitter()
        .map(|transmitter| transmitter.send_preset(index));
    engine.stop();

    match delivery {
        Some(delivery) if delivery.is_sent() => {
            println!("Preset {} selected", index);
            Ok(())
        }
        Some(delivery) => Err(anyhow!("Preset {} not applied: {:?}", index, delivery)),
        None => Err(anyhow!("Engine stopped before the preset was sent")),
    }
}

fn list_presets() {
    let engine = RadarEngine::with_rusb(Default::default());
    let layer = LayerId::default();

    for bank in engine.bank_list(layer) {
        println!("{}", bank.name);
        for preset in engine.preset_list(&bank) {
            let frame = PresetTable::radar()
                .get(preset.index)
                .map(|frame| frame.to_string())
                .unwrap_or_default();
            println!("  [{:2}] {}  {}", preset.index, preset.name, frame);
        }
    }
}

fn list_devices(config: &DriverConfig) -> Result<()> {
    let backend = RusbBackend::new().context("Failed to initialize USB")?;
    let devices = backend.list_devices().context("Failed to list USB devices")?;
    let identity = config.device.identity;

    if devices.is_empty() {
        println!("No USB devices found.");
        return Ok(());
    }

    println!("Found {} USB device(s):\n", devices.len());
    for device in devices {
        let marker = if device.is(identity) { " <- Mooer Radar" } else { "" };
        println!(
            "  {:04x}:{:04x} - {} {}{}",
            device.vendor_id,
            device.product_id,
            device
                .manufacturer
                .as_deref()
                .unwrap_or("Unknown Manufacturer"),
            device.product.as_deref().unwrap_or("Unknown Product"),
            marker
        );
        println!(
            "      Bus {:03} Device {:03}",
            device.bus_number, device.device_address
        );
    }

    Ok(())
}
