//! Common error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usb_error_conversion() {
        let err: Error = rusb::Error::NoDevice.into();
        assert!(matches!(err, Error::Usb(rusb::Error::NoDevice)));
        assert!(err.to_string().starts_with("USB error"));
    }

    #[test]
    fn test_protocol_error_conversion() {
        let err: Error = protocol::ProtocolError::InvalidIdentity("bogus".into()).into();
        assert!(err.to_string().contains("bogus"));
    }
}
