use super::ram_index;

/// 32 KiB image without a controller, optionally with fixed external RAM.
pub struct RomOnly {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl RomOnly {
    pub fn new(rom: Vec<u8>, ram_size: usize) -> Self {
        Self {
            rom,
            ram: vec![0; ram_size],
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.rom.get(addr as usize).copied().unwrap_or(0xFF),
            0xA000..=0xBFFF => match ram_index(&self.ram, 0, addr) {
                Some(i) => self.ram[i],
                None => 0xFF,
            },
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        if let 0xA000..=0xBFFF = addr {
            if let Some(i) = ram_index(&self.ram, 0, addr) {
                self.ram[i] = value;
            }
        }
    }
}
