use super::GameBoyBus;

/// Who is accessing the bus.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Access {
    /// Debugger/test access: no gating, no side effects.
    Debug,
    /// CPU access: mode gating and DMA contention apply.
    Cpu,
}

impl GameBoyBus {
    /// Debug read.
    pub fn get(&self, addr: u16) -> u8 {
        self.load(addr, Access::Debug)
    }

    /// Debug write.
    pub fn set(&mut self, addr: u16, value: u8) {
        self.store(addr, value, Access::Debug)
    }

    /// CPU read.
    pub fn read(&self, addr: u16) -> u8 {
        self.load(addr, Access::Cpu)
    }

    /// CPU write.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.store(addr, value, Access::Cpu)
    }

    fn load(&self, addr: u16, access: Access) -> u8 {
        let cpu = access == Access::Cpu;
        match addr {
            0x0000..=0x7FFF | 0xA000..=0xBFFF => {
                if cpu {
                    self.cartridge.read(addr)
                } else {
                    self.cartridge.get(addr)
                }
            }
            0x8000..=0x9FFF | 0xFE00..=0xFE9F | 0xFF40..=0xFF4B => {
                if cpu {
                    self.ppu.read(addr)
                } else {
                    self.ppu.get(addr)
                }
            }
            0xC000..=0xFDFF => {
                if cpu && self.dma_in_progress() {
                    return 0xFF;
                }
                self.wram[(addr as usize - 0xC000) & 0x1FFF]
            }
            0xFEA0..=0xFEFF => {
                log::debug!("bus: read from unmapped 0x{addr:04X}");
                0xFF
            }
            0xFF00 => self.joypad.get(addr),
            0xFF04..=0xFF07 => self.timer.get(addr),
            0xFF0F => self.if_reg | 0xE0,
            0xFF01..=0xFF7F => self.io[(addr - 0xFF00) as usize],
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.ie_reg,
        }
    }

    fn store(&mut self, addr: u16, value: u8, access: Access) {
        let cpu = access == Access::Cpu;
        match addr {
            0x0000..=0x7FFF | 0xA000..=0xBFFF => {
                if cpu {
                    self.cartridge.write(addr, value)
                } else {
                    self.cartridge.set(addr, value)
                }
            }
            0x8000..=0x9FFF | 0xFE00..=0xFE9F => {
                if cpu {
                    self.ppu.write(addr, value)
                } else {
                    self.ppu.set(addr, value)
                }
            }
            0xC000..=0xFDFF => {
                if cpu && self.dma_in_progress() {
                    return;
                }
                self.wram[(addr as usize - 0xC000) & 0x1FFF] = value;
            }
            0xFEA0..=0xFEFF => {
                log::debug!("bus: dropped write 0x{value:02X} to unmapped 0x{addr:04X}");
            }
            0xFF00 => {
                if cpu {
                    self.joypad.write(addr, value)
                } else {
                    self.joypad.set(addr, value)
                }
                self.io[0x00] = value;
            }
            0xFF04..=0xFF07 => {
                if cpu {
                    self.timer.write(addr, value)
                } else {
                    self.timer.set(addr, value)
                }
                self.io[(addr - 0xFF00) as usize] = value;
            }
            0xFF40..=0xFF4B => {
                if cpu {
                    self.ppu.write(addr, value)
                } else {
                    self.ppu.set(addr, value)
                }
                self.io[(addr - 0xFF00) as usize] = value;
            }
            0xFF0F => {
                self.if_reg = value & 0x1F;
                self.io[0x0F] = value;
            }
            0xFF01..=0xFF7F => self.io[(addr - 0xFF00) as usize] = value,
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.ie_reg = value,
        }
    }
}
