mod bus;
pub mod cartridge;
mod config;
mod gameboy;
pub mod joypad;
pub mod ppu;
pub mod timer;

pub use bus::GameBoyBus;
pub use cartridge::Cartridge;
pub use config::{GameBoyConfig, RamInit, RtcMode};
pub use gameboy::GameBoy;
pub use joypad::Joypad;
pub use ppu::Ppu;
pub use timer::Timer;

#[cfg(test)]
mod tests;
