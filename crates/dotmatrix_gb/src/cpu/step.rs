use super::opcodes::OPCODES;
use super::{Bus, Cpu};

impl Cpu {
    /// Execute a single instruction and return the number of T-cycles taken.
    ///
    /// The opcode's descriptor row supplies both the handler and the cost.
    /// Interrupts are not dispatched here; the caller runs
    /// [`Cpu::handle_interrupts`] first.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        // STOP is left as soon as a joypad input line (P10-P13) reads low.
        if self.stopped {
            if bus.read8(0xFF00) & 0x0F != 0x0F {
                self.stopped = false;
            }
            return 4;
        }

        if self.halted {
            return 4;
        }

        let armed_before = self.ime_enable_pending;
        let pc = self.regs.pc;
        let opcode = self.next_u8(bus);
        let info = &OPCODES[opcode as usize];

        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "{pc:04X}: {opcode:02X} {:<14} AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X}",
                info.mnemonic,
                self.regs.af(),
                self.regs.bc(),
                self.regs.de(),
                self.regs.hl(),
                self.regs.sp,
            );
        }

        let outcome = (info.exec)(self, bus, opcode);
        self.apply_ime_delay(armed_before);
        info.cost(outcome)
    }
}
