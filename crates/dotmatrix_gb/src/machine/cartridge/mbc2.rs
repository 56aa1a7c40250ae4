use super::rom_byte;

const RAM_NIBBLES: usize = 512;

/// MBC2 controller: up to 256 KiB ROM and 512 4-bit RAM cells built in.
pub struct Mbc2 {
    rom: Vec<u8>,
    /// Only the low nibble of each cell is stored.
    ram: [u8; RAM_NIBBLES],
    ram_enabled: bool,
    rom_bank: u8,
}

impl Mbc2 {
    pub fn new(rom: Vec<u8>) -> Self {
        Self {
            rom,
            ram: [0; RAM_NIBBLES],
            ram_enabled: false,
            rom_bank: 1,
        }
    }

    pub fn rom_bank(&self) -> usize {
        self.rom_bank as usize
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => rom_byte(&self.rom, 0, addr),
            0x4000..=0x7FFF => rom_byte(&self.rom, self.rom_bank(), addr),
            0xA000..=0xBFFF => {
                if !self.ram_enabled {
                    return 0xFF;
                }
                // 512 cells mirrored across the whole window; the upper
                // nibble is open bus.
                self.ram[addr as usize & (RAM_NIBBLES - 1)] | 0xF0
            }
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            // Address bit 8 picks the register.
            0x0000..=0x3FFF if addr & 0x0100 == 0 => {
                self.ram_enabled = (value & 0x0F) == 0x0A;
            }
            0x0000..=0x3FFF => {
                let bank = value & 0x0F;
                self.rom_bank = if bank == 0 { 1 } else { bank };
            }
            0xA000..=0xBFFF => {
                if self.ram_enabled {
                    self.ram[addr as usize & (RAM_NIBBLES - 1)] = value & 0x0F;
                }
            }
            _ => {}
        }
    }
}
