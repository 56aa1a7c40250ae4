use crate::cpu::alu::{self, AccOp, Shift};
use crate::cpu::opcodes::Outcome;
use crate::cpu::{Bus, Cpu, Flag};

fn accumulate(cpu: &mut Cpu, op: u8, operand: u8) {
    let (a, f) = AccOp::from_bits(op >> 3).apply(cpu.regs.a, operand, cpu.regs.f);
    cpu.regs.a = a;
    cpu.regs.f = f;
}

/// ADD ADC SUB SBC AND XOR OR CP against a register or (HL).
pub(in crate::cpu) fn acc_r(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let operand = cpu.r8(bus, op);
    accumulate(cpu, op, operand);
    Outcome::Plain
}

/// The accumulator group against an immediate byte.
pub(in crate::cpu) fn acc_d8(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let operand = cpu.next_u8(bus);
    accumulate(cpu, op, operand);
    Outcome::Plain
}

pub(in crate::cpu) fn inc_r(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let slot = op >> 3;
    let value = cpu.r8(bus, slot);
    let (result, f) = alu::inc(value, cpu.regs.f);
    cpu.set_r8(bus, slot, result);
    cpu.regs.f = f;
    Outcome::Plain
}

pub(in crate::cpu) fn dec_r(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let slot = op >> 3;
    let value = cpu.r8(bus, slot);
    let (result, f) = alu::dec(value, cpu.regs.f);
    cpu.set_r8(bus, slot, result);
    cpu.regs.f = f;
    Outcome::Plain
}

/// INC rr. No flags.
pub(in crate::cpu) fn inc_rr(cpu: &mut Cpu, _bus: &mut dyn Bus, op: u8) -> Outcome {
    let slot = op >> 4;
    cpu.set_r16(slot, cpu.r16(slot).wrapping_add(1));
    Outcome::Plain
}

/// DEC rr. No flags.
pub(in crate::cpu) fn dec_rr(cpu: &mut Cpu, _bus: &mut dyn Bus, op: u8) -> Outcome {
    let slot = op >> 4;
    cpu.set_r16(slot, cpu.r16(slot).wrapping_sub(1));
    Outcome::Plain
}

/// ADD HL,rr
pub(in crate::cpu) fn add_hl(cpu: &mut Cpu, _bus: &mut dyn Bus, op: u8) -> Outcome {
    let (hl, f) = alu::add_hl(cpu.regs.hl(), cpu.r16(op >> 4), cpu.regs.f);
    cpu.regs.set_hl(hl);
    cpu.regs.f = f;
    Outcome::Plain
}

/// ADD SP,e8
pub(in crate::cpu) fn add_sp(cpu: &mut Cpu, bus: &mut dyn Bus, _op: u8) -> Outcome {
    let offset = cpu.next_u8(bus);
    let (sp, f) = alu::add_sp(cpu.regs.sp, offset);
    cpu.regs.sp = sp;
    cpu.regs.f = f;
    Outcome::Plain
}

/// RLCA RRCA RLA RRA. Z always ends up clear, unlike the CB forms.
pub(in crate::cpu) fn rotate_a(cpu: &mut Cpu, _bus: &mut dyn Bus, op: u8) -> Outcome {
    let (a, carry) = Shift::from_bits(op >> 3).apply(cpu.regs.a, cpu.regs.flag(Flag::C));
    cpu.regs.a = a;
    cpu.regs.f = alu::pack(false, false, false, carry);
    Outcome::Plain
}

pub(in crate::cpu) fn daa(cpu: &mut Cpu, _bus: &mut dyn Bus, _op: u8) -> Outcome {
    let (a, f) = alu::daa(cpu.regs.a, cpu.regs.f);
    cpu.regs.a = a;
    cpu.regs.f = f;
    Outcome::Plain
}

pub(in crate::cpu) fn cpl(cpu: &mut Cpu, _bus: &mut dyn Bus, _op: u8) -> Outcome {
    cpu.regs.a = !cpu.regs.a;
    cpu.regs.f |= Flag::N.mask() | Flag::H.mask();
    Outcome::Plain
}

pub(in crate::cpu) fn scf(cpu: &mut Cpu, _bus: &mut dyn Bus, _op: u8) -> Outcome {
    cpu.regs.f = (cpu.regs.f & Flag::Z.mask()) | Flag::C.mask();
    Outcome::Plain
}

pub(in crate::cpu) fn ccf(cpu: &mut Cpu, _bus: &mut dyn Bus, _op: u8) -> Outcome {
    cpu.regs.f = (cpu.regs.f & (Flag::Z.mask() | Flag::C.mask())) ^ Flag::C.mask();
    Outcome::Plain
}
