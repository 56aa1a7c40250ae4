use super::cartridge::Cartridge;
use super::joypad::Joypad;
use super::ppu::Ppu;
use super::timer::Timer;
use crate::cpu::Bus;

mod dma;
mod init;
mod mmio;

pub const WRAM_SIZE: usize = 0x2000;
pub const HRAM_SIZE: usize = 0x7F;
pub const IO_SIZE: usize = 0x80;

/// The DMG address bus.
///
/// Owns every addressable component and routes 16-bit addresses to them.
/// `get`/`set` are debug accessors that bypass mode gating and DMA
/// contention; `read`/`write` are what the CPU sees.
pub struct GameBoyBus {
    pub cartridge: Cartridge,
    pub ppu: Ppu,
    pub timer: Timer,
    pub joypad: Joypad,
    pub(super) wram: [u8; WRAM_SIZE],
    pub(super) hram: [u8; HRAM_SIZE],
    /// Generic I/O slots FF00-FF7F. Registers owned by a component are
    /// mirrored here on write; reads go to the owner.
    pub(super) io: [u8; IO_SIZE],
    /// Interrupt request (FF0F), low 5 bits.
    pub if_reg: u8,
    /// Interrupt enable (FFFF).
    pub ie_reg: u8,
}

impl GameBoyBus {
    pub fn new(cartridge: Cartridge) -> Self {
        Self {
            cartridge,
            ppu: Ppu::new(),
            timer: Timer::new(),
            joypad: Joypad::new(),
            wram: [0; WRAM_SIZE],
            hram: [0; HRAM_SIZE],
            io: [0; IO_SIZE],
            if_reg: 0,
            ie_reg: 0,
        }
    }

    /// Whether an OAM DMA transfer currently owns the bus.
    pub fn dma_in_progress(&self) -> bool {
        self.ppu.dma_active()
    }
}

impl Bus for GameBoyBus {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.write(addr, value)
    }
}
