use super::{Cpu, Registers};

/// Registers as the DMG boot ROM leaves them when it jumps to 0x0100.
const DMG_POST_BOOT: Registers = Registers {
    a: 0x01,
    f: 0xB0,
    b: 0x00,
    c: 0x13,
    d: 0x00,
    e: 0xD8,
    h: 0x01,
    l: 0x4D,
    sp: 0xFFFE,
    pc: 0x0100,
};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// CPU ready to run cartridge code, as if the boot ROM had just finished.
    pub fn new() -> Self {
        let mut cpu = Self::powered_off();
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// All registers zero and PC at 0x0000, for hosts that run a boot ROM.
    pub fn powered_off() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            ime_enable_pending: false,
        }
    }

    /// Back to the post-boot state, dropping HALT, STOP and any pending EI.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Load the post-boot registers. Interrupts stay disabled; cartridge
    /// code turns them on itself.
    pub fn apply_dmg_boot_state(&mut self) {
        self.regs = DMG_POST_BOOT;
        self.ime = false;
        self.ime_enable_pending = false;
    }
}
