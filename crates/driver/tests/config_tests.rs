//! Integration tests for configuration parsing
//!
//! Tests driver configuration handling, including:
//! - Minimal and full configuration files
//! - Defaults for missing sections
//! - Invalid configuration handling
//! - Save/load through the filesystem
//! - Reporting where the configuration came from

use protocol::DeviceIdentity;
use radar_driver::config::{ConfigSource, DriverConfig, load_config};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

const FULL_CONFIG: &str = r#"
[driver]
log_level = "debug"

[device]
identity = "0x0483:0x5703"
timeout_ms = 2500
"#;

mod parsing {
    use super::*;

    #[test]
    fn test_full_config() {
        let config = DriverConfig::parse(FULL_CONFIG).unwrap();

        assert_eq!(config.driver.log_level, "debug");
        assert_eq!(config.device.identity, DeviceIdentity::MOOER_RADAR);
        assert_eq!(config.device.timeout_ms, 2500);
        assert_eq!(
            config.transmit_settings().timeout,
            Duration::from_millis(2500)
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = DriverConfig::parse("").unwrap();

        assert_eq!(config.driver.log_level, "info");
        assert_eq!(config.device.identity, DeviceIdentity::MOOER_RADAR);
        assert_eq!(config.device.timeout_ms, 1000);
    }

    #[test]
    fn test_partial_device_section() {
        let config = DriverConfig::parse("[device]\nidentity = \"0x1234:0xabcd\"\n").unwrap();

        assert_eq!(config.device.identity, DeviceIdentity::new(0x1234, 0xabcd));
        assert_eq!(config.device.timeout_ms, 1000);
    }
}

mod invalid {
    use super::*;

    #[test]
    fn test_bad_log_level() {
        assert!(DriverConfig::parse("[driver]\nlog_level = \"loud\"\n").is_err());
    }

    #[test]
    fn test_bad_identity() {
        assert!(DriverConfig::parse("[device]\nidentity = \"0483:5703\"\n").is_err());
        assert!(DriverConfig::parse("[device]\nidentity = \"0x0483\"\n").is_err());
    }

    #[test]
    fn test_zero_timeout() {
        assert!(DriverConfig::parse("[device]\ntimeout_ms = 0\n").is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(DriverConfig::parse("[device\nidentity = ").is_err());
    }
}

mod filesystem {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("driver.toml");

        let mut config = DriverConfig::default();
        config.driver.log_level = "warn".to_string();
        config.device.timeout_ms = 300;
        config.save(&path).unwrap();

        let loaded = DriverConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.driver.log_level, "warn");
        assert_eq!(loaded.device.timeout_ms, 300);
        assert_eq!(loaded.device.identity, DeviceIdentity::MOOER_RADAR);
    }

    #[test]
    fn test_load_config_from_str_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("driver.toml");
        std::fs::write(&path, FULL_CONFIG).unwrap();

        let (config, source) = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(config.driver.log_level, "debug");
        assert!(matches!(source, ConfigSource::File(p) if p == path));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = DriverConfig::load(Some(dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_path_location() {
        let path = DriverConfig::default_path();
        assert!(path.ends_with("mooer-radar/driver.toml"));
    }
}

mod reporting {
    use super::*;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged(source: &ConfigSource) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || source.log());
        let bytes = buffer.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_file_source_is_logged() {
        let output = logged(&ConfigSource::File("/tmp/driver.toml".into()));

        assert!(output.contains("INFO"));
        assert!(output.contains("Loaded configuration from: /tmp/driver.toml"));
    }

    #[test]
    fn test_fallback_reason_is_logged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("driver.toml");
        std::fs::write(&path, "[device]\ntimeout_ms = 0\n").unwrap();

        let error = DriverConfig::load(Some(path)).unwrap_err();
        let output = logged(&ConfigSource::Defaults(error));

        assert!(output.contains("WARN"));
        assert!(output.contains("Failed to load config"));
        assert!(output.contains("timeout_ms must be greater than zero"));
        assert!(output.contains("using defaults"));
    }
}
