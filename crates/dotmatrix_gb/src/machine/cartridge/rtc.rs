use crate::machine::RtcMode;
use crate::CPU_CLOCK_HZ;

/// Day counter bit 8, halt and day-carry flags in the DH register.
const DH_DAY_HIGH: u8 = 0x01;
const DH_HALT: u8 = 0x40;
const DH_CARRY: u8 = 0x80;

/// The five clock registers as seen through A000-BFFF.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RtcRegisters {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub days_low: u8,
    pub days_high: u8,
}

impl RtcRegisters {
    /// Register selected by 0x08..=0x0C in the MBC3 RAM bank register.
    fn get(&self, select: u8) -> u8 {
        match select {
            0x08 => self.seconds,
            0x09 => self.minutes,
            0x0A => self.hours,
            0x0B => self.days_low,
            0x0C => self.days_high,
            _ => 0xFF,
        }
    }

    fn set(&mut self, select: u8, value: u8) {
        match select {
            0x08 => self.seconds = value & 0x3F,
            0x09 => self.minutes = value & 0x3F,
            0x0A => self.hours = value & 0x1F,
            0x0B => self.days_low = value,
            0x0C => self.days_high = value & (DH_DAY_HIGH | DH_HALT | DH_CARRY),
            _ => {}
        }
    }

    fn days(&self) -> u16 {
        (((self.days_high & DH_DAY_HIGH) as u16) << 8) | self.days_low as u16
    }

    fn advance_second(&mut self) {
        // Each field counts within its register width; only the documented
        // limits carry into the next field.
        self.seconds = (self.seconds + 1) & 0x3F;
        if self.seconds != 60 {
            return;
        }
        self.seconds = 0;

        self.minutes = (self.minutes + 1) & 0x3F;
        if self.minutes != 60 {
            return;
        }
        self.minutes = 0;

        self.hours = (self.hours + 1) & 0x1F;
        if self.hours != 24 {
            return;
        }
        self.hours = 0;

        let days = self.days() + 1;
        if days > 0x1FF {
            self.days_low = 0;
            self.days_high = (self.days_high & !DH_DAY_HIGH) | DH_CARRY;
        } else {
            self.days_low = days as u8;
            self.days_high = (self.days_high & !DH_DAY_HIGH) | (days >> 8) as u8;
        }
    }
}

/// MBC3 real-time clock.
///
/// The live counters advance with emulated cycles unless halted (or the
/// clock is configured as frozen); software only ever reads the latched
/// copy.
#[derive(Clone, Debug)]
pub struct Rtc {
    live: RtcRegisters,
    latched: RtcRegisters,
    /// Cycles accumulated towards the next second.
    subsecond: u32,
    mode: RtcMode,
}

impl Rtc {
    pub fn new(mode: RtcMode) -> Self {
        Self {
            live: RtcRegisters::default(),
            latched: RtcRegisters::default(),
            subsecond: 0,
            mode,
        }
    }

    pub fn live(&self) -> RtcRegisters {
        self.live
    }

    pub fn latched(&self) -> RtcRegisters {
        self.latched
    }

    pub fn is_halted(&self) -> bool {
        self.live.days_high & DH_HALT != 0
    }

    pub fn tick(&mut self, cycles: u32) {
        if self.mode == RtcMode::Frozen || self.is_halted() {
            return;
        }
        self.subsecond += cycles;
        while self.subsecond >= CPU_CLOCK_HZ {
            self.subsecond -= CPU_CLOCK_HZ;
            self.live.advance_second();
        }
    }

    /// Copy the live counters into the readable registers.
    pub fn latch(&mut self) {
        self.latched = self.live;
    }

    pub fn read(&self, select: u8) -> u8 {
        self.latched.get(select)
    }

    pub fn write(&mut self, select: u8, value: u8) {
        if select == 0x08 {
            self.subsecond = 0;
        }
        self.live.set(select, value);
        self.latched.set(select, value);
    }
}
