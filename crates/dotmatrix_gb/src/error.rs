//! Errors raised while turning a ROM image into a cartridge.

use std::fmt;

/// Reasons a ROM image cannot be loaded.
///
/// These are the only fatal conditions of the core: once a cartridge has
/// been constructed, run-time anomalies (unknown opcodes, unmapped
/// addresses) are logged and emulation continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartridgeError {
    /// The image is shorter than the header or than the bank count the
    /// header declares.
    TooSmall { len: usize, required: usize },
    /// The header does not carry the boot logo.
    InvalidFormat,
    /// Cartridge type byte (0x0147) names a controller we do not model.
    Unsupported(u8),
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartridgeError::TooSmall { len, required } => write!(
                f,
                "ROM image too small: {len} bytes, at least {required} required"
            ),
            CartridgeError::InvalidFormat => {
                write!(f, "not a Game Boy ROM image (header logo mismatch)")
            }
            CartridgeError::Unsupported(kind) => {
                write!(f, "unsupported cartridge type 0x{kind:02X}")
            }
        }
    }
}

impl std::error::Error for CartridgeError {}
