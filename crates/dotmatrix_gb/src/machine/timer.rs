//! Divider and programmable timer (DIV, TIMA, TMA, TAC).
//!
//! Time only moves through [`Timer::run`]; the register accessors in `io`
//! never advance the counter themselves.
mod io;

pub use io::{DIV, TAC, TIMA, TMA};

/// Divider value the boot ROM leaves behind when it hands over at 0x0100.
pub const DIV_POST_BOOT: u16 = 0xABCC;

#[derive(Clone, Debug)]
pub struct Timer {
    /// 16-bit system counter; DIV exposes its upper byte.
    pub(super) divider: u16,
    pub(super) tima: u8,
    pub(super) tma: u8,
    /// Lower 3 bits only.
    pub(super) tac: u8,
    /// Latched on TIMA overflow until the board folds it into IF.
    pub interrupt_requested: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            divider: DIV_POST_BOOT,
            tima: 0,
            tma: 0,
            tac: 0,
            interrupt_requested: false,
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    pub fn divider(&self) -> u16 {
        self.divider
    }

    /// Divider bit whose falling edge clocks TIMA, per TAC[1:0]:
    /// 00 → bit 9 (4096 Hz), 01 → bit 3 (262144 Hz), 10 → bit 5
    /// (65536 Hz), 11 → bit 7 (16384 Hz).
    #[inline]
    fn input_bit(&self) -> u16 {
        match self.tac & 0x03 {
            0x00 => 1 << 9,
            0x01 => 1 << 3,
            0x02 => 1 << 5,
            _ => 1 << 7,
        }
    }

    /// Advance the timer by `cycles` T-cycles.
    pub fn run(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.tick();
        }
    }

    #[inline]
    fn tick(&mut self) {
        let mask = self.input_bit();
        let before = self.divider & mask != 0;
        self.divider = self.divider.wrapping_add(1);
        let after = self.divider & mask != 0;

        if self.enabled() && before && !after {
            self.increment_tima();
        }
    }

    fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        if overflow {
            self.tima = self.tma;
            self.interrupt_requested = true;
        } else {
            self.tima = next;
        }
    }
}
