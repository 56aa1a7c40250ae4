mod ime;
mod service;

use bitflags::bitflags;

/// Address of the interrupt request register (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Address of the interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;

bitflags! {
    /// The five interrupt lines shared by IE and IF, lowest bit first in
    /// priority order.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InterruptFlags: u8 {
        const VBLANK   = 0b0000_0001;
        const LCD_STAT = 0b0000_0010;
        const TIMER    = 0b0000_0100;
        const SERIAL   = 0b0000_1000;
        const JOYPAD   = 0b0001_0000;
    }
}

impl InterruptFlags {
    /// The highest priority line set in `self`, if any.
    pub fn highest_priority(self) -> Option<InterruptFlags> {
        if self.is_empty() {
            return None;
        }
        Some(InterruptFlags::from_bits_truncate(1 << self.bits().trailing_zeros()))
    }

    /// Dispatch vector of a single interrupt line.
    pub fn vector(self) -> u16 {
        0x0040 + (self.bits().trailing_zeros() as u16) * 8
    }
}
