use super::Timer;

pub const DIV: u16 = 0xFF04;
pub const TIMA: u16 = 0xFF05;
pub const TMA: u16 = 0xFF06;
pub const TAC: u16 = 0xFF07;

impl Timer {
    /// Debug read; no side effects.
    pub fn get(&self, addr: u16) -> u8 {
        match addr {
            DIV => (self.divider >> 8) as u8,
            TIMA => self.tima,
            TMA => self.tma,
            TAC => self.tac | 0xF8,
            _ => {
                log::warn!("timer: read from unknown register 0x{addr:04X}");
                0xFF
            }
        }
    }

    /// Debug write. Unlike [`Timer::write`], a DIV store loads the visible
    /// upper byte instead of clearing the counter.
    pub fn set(&mut self, addr: u16, value: u8) {
        match addr {
            DIV => self.divider = (value as u16) << 8,
            TIMA => self.tima = value,
            TMA => self.tma = value,
            TAC => self.tac = value & 0x07,
            _ => log::warn!("timer: write 0x{value:02X} to unknown register 0x{addr:04X}"),
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.get(addr)
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            // Any store resets the whole counter.
            DIV => self.divider = 0,
            _ => self.set(addr, value),
        }
    }
}
