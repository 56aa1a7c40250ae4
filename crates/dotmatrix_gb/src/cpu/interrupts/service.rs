use super::super::{Bus, Cpu};
use super::{InterruptFlags, IE_ADDR, IF_ADDR};

impl Cpu {
    /// Service a pending maskable interrupt and return the cycles spent.
    ///
    /// With IME set, the highest priority line present in both IE and IF is
    /// acknowledged, PC is pushed and control moves to its vector (20
    /// cycles, plus 4 when the CPU was halted). Without IME a halted CPU
    /// still wakes up on any enabled request, for 4 cycles.
    pub fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let enabled = InterruptFlags::from_bits_truncate(bus.read8(IE_ADDR));
        let requested = InterruptFlags::from_bits_truncate(bus.read8(IF_ADDR));
        let pending = enabled & requested;

        let mut cycles = 0;

        if self.ime {
            if let Some(line) = pending.highest_priority() {
                bus.write8(IF_ADDR, (requested - line).bits());

                let ret = self.regs.pc;
                self.push(bus, ret);
                self.regs.pc = line.vector();
                self.ime = false;
                self.ime_enable_pending = false;

                cycles += 20;
                if self.halted {
                    self.halted = false;
                    cycles += 4;
                }

                log::debug!(
                    "interrupt {:?} dispatched to 0x{:04X} (return 0x{:04X})",
                    line,
                    self.regs.pc,
                    ret
                );
                return cycles;
            }
        }

        if self.halted && !pending.is_empty() {
            self.halted = false;
            cycles += 4;
        }

        cycles
    }
}
