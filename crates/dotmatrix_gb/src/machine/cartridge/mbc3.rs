use super::{ram_index, rom_byte, Rtc};

/// MBC3 controller: up to 2 MiB ROM, 32 KiB RAM and an optional RTC.
pub struct Mbc3 {
    rom: Vec<u8>,
    ram: Vec<u8>,
    rtc: Option<Rtc>,
    /// Gates both RAM and the RTC registers.
    ram_enabled: bool,
    rom_bank: u8,
    /// RAM bank (0x00-0x03) or RTC register (0x08-0x0C).
    select: u8,
    /// Set by a 0 written to 6000-7FFF; a following 1 latches the clock.
    latch_armed: bool,
}

impl Mbc3 {
    pub fn new(rom: Vec<u8>, ram_size: usize, rtc: Option<Rtc>) -> Self {
        Self {
            rom,
            ram: vec![0; ram_size],
            rtc,
            ram_enabled: false,
            rom_bank: 1,
            select: 0,
            latch_armed: false,
        }
    }

    pub fn rom_bank(&self) -> usize {
        self.rom_bank as usize
    }

    pub fn rtc(&self) -> Option<&Rtc> {
        self.rtc.as_ref()
    }

    pub fn tick(&mut self, cycles: u32) {
        if let Some(rtc) = &mut self.rtc {
            rtc.tick(cycles);
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
                match self.select {
                    0x00..=0x03 => match ram_index(&self.ram, self.select as usize, addr) {
                        Some(i) => self.ram[i],
                        None => 0xFF,
                    },
                    0x08..=0x0C => self.rtc.as_ref().map_or(0xFF, |rtc| rtc.read(self.select)),
                    _ => 0xFF,
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
                let bank = value & 0x7F;
                self.rom_bank = if bank == 0 { 1 } else { bank };
            }
            0x4000..=0x5FFF => {
                self.select = value & 0x0F;
            }
            0x6000..=0x7FFF => {
                if self.latch_armed && value == 0x01 {
                    if let Some(rtc) = &mut self.rtc {
                        rtc.latch();
                    }
                }
                self.latch_armed = value == 0x00;
            }
            0xA000..=0xBFFF => {
                if !self.ram_enabled {
                    return;
                }
                match self.select {
                    0x00..=0x03 => {
                        if let Some(i) = ram_index(&self.ram, self.select as usize, addr) {
                            self.ram[i] = value;
                        }
                    }
                    0x08..=0x0C => {
                        if let Some(rtc) = &mut self.rtc {
                            rtc.write(self.select, value);
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}
