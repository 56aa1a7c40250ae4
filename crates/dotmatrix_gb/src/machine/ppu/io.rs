use super::{Mode, Ppu};

pub const LCDC: u16 = 0xFF40;
pub const STAT: u16 = 0xFF41;
pub const SCY: u16 = 0xFF42;
pub const SCX: u16 = 0xFF43;
pub const LY: u16 = 0xFF44;
pub const LYC: u16 = 0xFF45;
pub const DMA: u16 = 0xFF46;
pub const BGP: u16 = 0xFF47;
pub const OBP0: u16 = 0xFF48;
pub const OBP1: u16 = 0xFF49;
pub const WY: u16 = 0xFF4A;
pub const WX: u16 = 0xFF4B;

/// STAT bits writable from the CPU (interrupt selects).
const STAT_WRITABLE: u8 = 0x78;

impl Ppu {
    /// Debug read of VRAM, OAM or an LCD register, ignoring mode gating.
    pub fn get(&self, addr: u16) -> u8 {
        match addr {
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize],
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize],
            LCDC => self.lcdc,
            // Bit 7 is unused and reads high.
            STAT => self.stat | 0x80,
            SCY => self.scy,
            SCX => self.scx,
            LY => self.ly,
            LYC => self.lyc,
            DMA => self.dma,
            BGP => self.bgp,
            OBP0 => self.obp0,
            OBP1 => self.obp1,
            WY => self.wy,
            WX => self.wx,
            _ => {
                log::warn!("ppu: read from unknown address 0x{addr:04X}");
                0xFF
            }
        }
    }

    /// Debug write: stores the raw value without the side effects a CPU
    /// store would have (no DMA start, no LCD toggle, LY writable).
    pub fn set(&mut self, addr: u16, value: u8) {
        match addr {
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize] = value,
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize] = value,
            LCDC => self.lcdc = value,
            STAT => self.stat = value & 0x7F,
            SCY => self.scy = value,
            SCX => self.scx = value,
            LY => self.ly = value,
            LYC => self.lyc = value,
            DMA => self.dma = value,
            BGP => self.bgp = value,
            OBP0 => self.obp0 = value,
            OBP1 => self.obp1 = value,
            WY => self.wy = value,
            WX => self.wx = value,
            _ => log::warn!("ppu: write 0x{value:02X} to unknown address 0x{addr:04X}"),
        }
    }

    /// CPU read: VRAM and OAM read 0xFF while the PPU owns them.
    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x8000..=0x9FFF if !self.vram_accessible() => 0xFF,
            0xFE00..=0xFE9F if !self.oam_accessible() => 0xFF,
            _ => self.get(addr),
        }
    }

    /// CPU write.
    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x8000..=0x9FFF if !self.vram_accessible() => {}
            0xFE00..=0xFE9F if !self.oam_accessible() => {}
            LCDC => self.write_lcdc(value),
            STAT => self.stat = (self.stat & !STAT_WRITABLE) | (value & STAT_WRITABLE),
            LY => log::debug!("ppu: ignoring write 0x{value:02X} to read-only LY"),
            DMA => self.start_dma(value),
            _ => self.set(addr, value),
        }
    }

    fn write_lcdc(&mut self, value: u8) {
        let was_on = self.lcd_enabled();
        self.lcdc = value;
        let is_on = self.lcd_enabled();

        if was_on && !is_on {
            // LY and the line position are kept; the PPU simply stops.
            self.set_mode(Mode::HBlank);
            self.stat_line = false;
            log::debug!("ppu: LCD off at LY={} cycle={}", self.ly, self.line_cycles);
        } else if !was_on && is_on {
            self.ly = 0;
            self.line_cycles = 0;
            self.set_mode(Mode::OamScan);
            log::debug!("ppu: LCD on");
        }
    }
}
