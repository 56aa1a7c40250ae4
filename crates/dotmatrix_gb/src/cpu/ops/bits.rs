use crate::cpu::alu::{self, Shift};
use crate::cpu::opcodes::Outcome;
use crate::cpu::{Bus, Cpu, Flag};

/// Fetch the byte after 0xCB and run it: shifts, then BIT, RES and SET,
/// 64 encodings each. The register field sits in the low three bits.
pub(in crate::cpu) fn prefix_cb(cpu: &mut Cpu, bus: &mut dyn Bus, _op: u8) -> Outcome {
    let cb = cpu.next_u8(bus);
    let slot = cb & 0x07;
    let n = (cb >> 3) & 0x07;
    let value = cpu.r8(bus, slot);

    match cb >> 6 {
        0 => {
            let (result, carry) = Shift::from_bits(n).apply(value, cpu.regs.flag(Flag::C));
            cpu.set_r8(bus, slot, result);
            cpu.regs.f = alu::pack(result == 0, false, false, carry);
        }
        1 => cpu.regs.f = alu::bit(n, value, cpu.regs.f),
        2 => cpu.set_r8(bus, slot, value & !(1 << n)),
        _ => cpu.set_r8(bus, slot, value | (1 << n)),
    }
    Outcome::Prefixed(cb)
}
