//! Cartridge bank controllers.
//!
//! A [`Cartridge`] is built once from a ROM image and owns the ROM banks and
//! any external RAM. Every controller exposes the same byte interface over
//! 0000-7FFF (ROM and control registers) and A000-BFFF (RAM or RTC).

mod header;
mod mbc1;
mod mbc2;
mod mbc3;
mod rom_only;
mod rtc;

pub use header::{CartridgeKind, Header, NINTENDO_LOGO};
pub use mbc1::Mbc1;
pub use mbc2::Mbc2;
pub use mbc3::Mbc3;
pub use rom_only::RomOnly;
pub use rtc::{Rtc, RtcRegisters};

use crate::error::CartridgeError;
use crate::machine::RtcMode;

/// Size of one switchable ROM bank.
pub const ROM_BANK_SIZE: usize = 0x4000;
/// Size of one switchable external RAM bank.
pub const RAM_BANK_SIZE: usize = 0x2000;

pub enum Cartridge {
    RomOnly(RomOnly),
    Mbc1(Mbc1),
    Mbc2(Mbc2),
    Mbc3(Mbc3),
}

impl Cartridge {
    /// Validate the header of `rom` and build the matching controller.
    pub fn from_rom(rom: &[u8], rtc_mode: RtcMode) -> Result<Self, CartridgeError> {
        let header = Header::parse(rom)?;
        let rom = rom[..header.rom_banks * ROM_BANK_SIZE].to_vec();

        log::info!(
            "loaded cartridge \"{}\": {:?} (type 0x{:02X}), {} ROM banks, {} bytes RAM",
            header.title,
            header.kind,
            header.cart_type,
            header.rom_banks,
            header.ram_size
        );

        let cartridge = match header.kind {
            CartridgeKind::RomOnly => Cartridge::RomOnly(RomOnly::new(rom, header.ram_size)),
            CartridgeKind::Mbc1 => Cartridge::Mbc1(Mbc1::new(rom, header.ram_size)),
            CartridgeKind::Mbc2 => Cartridge::Mbc2(Mbc2::new(rom)),
            CartridgeKind::Mbc3 { has_rtc } => {
                let rtc = has_rtc.then(|| Rtc::new(rtc_mode));
                Cartridge::Mbc3(Mbc3::new(rom, header.ram_size, rtc))
            }
        };
        Ok(cartridge)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Cartridge::RomOnly(_) => "ROM only",
            Cartridge::Mbc1(_) => "MBC1",
            Cartridge::Mbc2(_) => "MBC2",
            Cartridge::Mbc3(_) => "MBC3",
        }
    }

    /// Debug read. Identical to [`Cartridge::read`]: controllers have no
    /// read side effects.
    pub fn get(&self, addr: u16) -> u8 {
        match self {
            Cartridge::RomOnly(c) => c.read(addr),
            Cartridge::Mbc1(c) => c.read(addr),
            Cartridge::Mbc2(c) => c.read(addr),
            Cartridge::Mbc3(c) => c.read(addr),
        }
    }

    /// Debug write. Identical to [`Cartridge::write`].
    pub fn set(&mut self, addr: u16, value: u8) {
        match self {
            Cartridge::RomOnly(c) => c.write(addr, value),
            Cartridge::Mbc1(c) => c.write(addr, value),
            Cartridge::Mbc2(c) => c.write(addr, value),
            Cartridge::Mbc3(c) => c.write(addr, value),
        }
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.get(addr)
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.set(addr, value)
    }

    /// Advance the cartridge clock, if the controller has one.
    pub fn tick(&mut self, cycles: u32) {
        if let Cartridge::Mbc3(c) = self {
            c.tick(cycles);
        }
    }

    /// The MBC3 clock chip, when the cartridge carries one.
    pub fn rtc(&self) -> Option<&Rtc> {
        match self {
            Cartridge::Mbc3(c) => c.rtc(),
            _ => None,
        }
    }
}

/// Byte `addr & 0x3FFF` of ROM bank `bank`, wrapping the bank index over the
/// banks actually present.
#[inline]
fn rom_byte(rom: &[u8], bank: usize, addr: u16) -> u8 {
    let banks = (rom.len() / ROM_BANK_SIZE).max(1);
    let index = (bank % banks) * ROM_BANK_SIZE + (addr as usize & (ROM_BANK_SIZE - 1));
    rom.get(index).copied().unwrap_or(0xFF)
}

/// Index into external RAM for `addr` in bank `bank`, wrapping over the
/// RAM actually present. `None` when the cartridge has no RAM.
#[inline]
fn ram_index(ram: &[u8], bank: usize, addr: u16) -> Option<usize> {
    if ram.is_empty() {
        return None;
    }
    let offset = bank * RAM_BANK_SIZE + (addr as usize & (RAM_BANK_SIZE - 1));
    Some(offset % ram.len())
}
