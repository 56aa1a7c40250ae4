mod alu;
mod bus;
mod init;
pub mod interrupts;
pub mod opcodes;
mod operand;
mod ops;
mod regs;
mod step;

pub use bus::Bus;
pub use interrupts::InterruptFlags;
pub use regs::{Flag, Registers};

/// Game Boy CPU core (LR35902).
///
/// Holds the register file and the control flags. Memory and I/O are
/// reached exclusively through a [`Bus`] implementation passed to each call,
/// so the same core runs against the full machine bus or a flat test bus.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state. Left once a joypad input line reads low.
    pub stopped: bool,
    /// Set by EI; IME turns on after the following instruction completes.
    ime_enable_pending: bool,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.flag(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        if value {
            self.regs.f |= flag.mask();
        } else {
            self.regs.f &= !flag.mask();
        }
    }

    /// Whether an EI is waiting for the next instruction to finish.
    #[inline]
    pub fn ime_enable_pending(&self) -> bool {
        self.ime_enable_pending
    }
}
