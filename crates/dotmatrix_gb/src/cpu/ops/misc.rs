use crate::cpu::opcodes::Outcome;
use crate::cpu::{Bus, Cpu};

pub(in crate::cpu) fn nop(_cpu: &mut Cpu, _bus: &mut dyn Bus, _op: u8) -> Outcome {
    Outcome::Plain
}

pub(in crate::cpu) fn halt(cpu: &mut Cpu, _bus: &mut dyn Bus, _op: u8) -> Outcome {
    cpu.halted = true;
    Outcome::Plain
}

/// STOP takes a padding byte, skipped here.
pub(in crate::cpu) fn stop(cpu: &mut Cpu, bus: &mut dyn Bus, _op: u8) -> Outcome {
    cpu.next_u8(bus);
    cpu.stopped = true;
    log::debug!("STOP at PC=0x{:04X}", cpu.regs.pc.wrapping_sub(2));
    Outcome::Plain
}

pub(in crate::cpu) fn di(cpu: &mut Cpu, _bus: &mut dyn Bus, _op: u8) -> Outcome {
    cpu.ime = false;
    cpu.ime_enable_pending = false;
    Outcome::Plain
}

/// EI arms IME for after the next instruction. Repeating it is harmless.
pub(in crate::cpu) fn ei(cpu: &mut Cpu, _bus: &mut dyn Bus, _op: u8) -> Outcome {
    if !cpu.ime {
        cpu.ime_enable_pending = true;
    }
    Outcome::Plain
}

/// One of the eleven unused encodings. Hardware locks up; the core logs
/// the state and treats it as a NOP.
pub(in crate::cpu) fn illegal(cpu: &mut Cpu, _bus: &mut dyn Bus, op: u8) -> Outcome {
    let r = &cpu.regs;
    log::warn!(
        "illegal opcode 0x{op:02X} at PC=0x{:04X} (AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X})",
        r.pc.wrapping_sub(1),
        r.af(),
        r.bc(),
        r.de(),
        r.hl(),
        r.sp,
    );
    Outcome::Plain
}
