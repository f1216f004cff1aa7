//! Protocol error types

use thiserror::Error;

/// Errors raised while parsing identities or looking up presets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Device identity string is not of the form `0xVID:0xPID`
    #[error("Invalid device identity '{0}', expected VID:PID (e.g., '0x0483:0x5703')")]
    InvalidIdentity(String),

    /// Preset index outside of the table
    #[error("Unknown preset {index} (table holds {len} presets)")]
    UnknownPreset { index: usize, len: usize },
}

/// Type alias for protocol results
pub type Result<T> = std::result::Result<T, ProtocolError>;
