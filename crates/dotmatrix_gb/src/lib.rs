pub mod cpu;
pub mod error;
pub mod machine;

pub use error::CartridgeError;
pub use machine::{GameBoy, GameBoyConfig, RamInit, RtcMode};

pub use dotmatrix_common::Buttons;

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// CPU clock in T-cycles per second.
pub const CPU_CLOCK_HZ: u32 = 4_194_304;
/// T-cycles in one full frame (154 lines of 456 cycles).
pub const CYCLES_PER_FRAME: u32 = 70_224;
