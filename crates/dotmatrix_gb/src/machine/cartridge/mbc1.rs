use super::{ram_index, rom_byte};

/// MBC1 controller: up to 2 MiB ROM and 32 KiB RAM.
///
/// The 2-bit secondary register either extends the ROM bank number (mode 0)
/// or selects the RAM bank (mode 1).
pub struct Mbc1 {
    rom: Vec<u8>,
    ram: Vec<u8>,
    ram_enabled: bool,
    /// Low 5 bits of the ROM bank, never 0.
    bank_low: u8,
    /// Secondary 2-bit register (4000-5FFF).
    bank_high: u8,
    /// Banking mode select (6000-7FFF): false = ROM, true = RAM.
    ram_banking: bool,
}

impl Mbc1 {
    pub fn new(rom: Vec<u8>, ram_size: usize) -> Self {
        Self {
            rom,
            ram: vec![0; ram_size],
            ram_enabled: false,
            bank_low: 1,
            bank_high: 0,
            ram_banking: false,
        }
    }

    /// ROM bank mapped at 4000-7FFF.
    pub fn rom_bank(&self) -> usize {
        if self.ram_banking {
            self.bank_low as usize
        } else {
            ((self.bank_high as usize) << 5) | self.bank_low as usize
        }
    }

    /// RAM bank mapped at A000-BFFF.
    pub fn ram_bank(&self) -> usize {
        if self.ram_banking {
            self.bank_high as usize
        } else {
            0
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => rom_byte(&self.rom, 0, addr),
            0x4000..=0x7FFF => rom_byte(&self.rom, self.rom_bank(), addr),
            0xA000..=0xBFFF => {
                if !self.ram_enabled {
                    return 0xFF;
                }
                match ram_index(&self.ram, self.ram_bank(), addr) {
                    Some(i) => self.ram[i],
                    None => 0xFF,
                }
            }
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                self.ram_enabled = (value & 0x0F) == 0x0A;
            }
            0x2000..=0x3FFF => {
                // Zero in the 5-bit field selects bank 1.
                let low = value & 0x1F;
                self.bank_low = if low == 0 { 1 } else { low };
            }
            0x4000..=0x5FFF => {
                self.bank_high = value & 0x03;
            }
            0x6000..=0x7FFF => {
                self.ram_banking = (value & 0x01) != 0;
            }
            0xA000..=0xBFFF => {
                if !self.ram_enabled {
                    return;
                }
                if let Some(i) = ram_index(&self.ram, self.ram_bank(), addr) {
                    self.ram[i] = value;
                }
            }
            _ => {}
        }
    }
}
