use crate::cpu::alu;
use crate::cpu::opcodes::Outcome;
use crate::cpu::{Bus, Cpu};

/// LD rr,d16
pub(in crate::cpu) fn rr_d16(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let value = cpu.next_u16(bus);
    cpu.set_r16(op >> 4, value);
    Outcome::Plain
}

/// LD r,d8 and LD (HL),d8
pub(in crate::cpu) fn r_d8(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let value = cpu.next_u8(bus);
    cpu.set_r8(bus, op >> 3, value);
    Outcome::Plain
}

/// LD r,r' over 0x40..=0x7F, HALT excepted.
pub(in crate::cpu) fn r_r(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let value = cpu.r8(bus, op);
    cpu.set_r8(bus, op >> 3, value);
    Outcome::Plain
}

/// (BC), (DE), (HL+) or (HL-) by the high nibble. The HL forms step HL
/// after taking its value.
fn indirect(cpu: &mut Cpu, op: u8) -> u16 {
    let hl = cpu.regs.hl();
    match op >> 4 {
        0 => cpu.regs.bc(),
        1 => cpu.regs.de(),
        2 => {
            cpu.regs.set_hl(hl.wrapping_add(1));
            hl
        }
        _ => {
            cpu.regs.set_hl(hl.wrapping_sub(1));
            hl
        }
    }
}

/// LD (rr),A
pub(in crate::cpu) fn store_a(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let addr = indirect(cpu, op);
    bus.write8(addr, cpu.regs.a);
    Outcome::Plain
}

/// LD A,(rr)
pub(in crate::cpu) fn load_a(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let addr = indirect(cpu, op);
    cpu.regs.a = bus.read8(addr);
    Outcome::Plain
}

/// LD (a16),SP
pub(in crate::cpu) fn store_sp(cpu: &mut Cpu, bus: &mut dyn Bus, _op: u8) -> Outcome {
    let addr = cpu.next_u16(bus);
    bus.write16(addr, cpu.regs.sp);
    Outcome::Plain
}

/// LDH (a8), LD (C) and LD (a16) against A. The low nibble picks the
/// addressing mode; bit 4 set means a load into A.
pub(in crate::cpu) fn a_mem(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let addr = match op & 0x0F {
        0x0 => 0xFF00 | cpu.next_u8(bus) as u16,
        0x2 => 0xFF00 | cpu.regs.c as u16,
        _ => cpu.next_u16(bus),
    };
    if op & 0x10 == 0 {
        bus.write8(addr, cpu.regs.a);
    } else {
        cpu.regs.a = bus.read8(addr);
    }
    Outcome::Plain
}

/// LD SP,HL
pub(in crate::cpu) fn sp_hl(cpu: &mut Cpu, _bus: &mut dyn Bus, _op: u8) -> Outcome {
    cpu.regs.sp = cpu.regs.hl();
    Outcome::Plain
}

/// LD HL,SP+e8
pub(in crate::cpu) fn hl_sp_e8(cpu: &mut Cpu, bus: &mut dyn Bus, _op: u8) -> Outcome {
    let offset = cpu.next_u8(bus);
    let (value, f) = alu::add_sp(cpu.regs.sp, offset);
    cpu.regs.set_hl(value);
    cpu.regs.f = f;
    Outcome::Plain
}

pub(in crate::cpu) fn push(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let value = cpu.r16_stack(op >> 4);
    cpu.push(bus, value);
    Outcome::Plain
}

/// POP rr. POP AF drops the low nibble of F.
pub(in crate::cpu) fn pop(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let value = cpu.pop(bus);
    cpu.set_r16_stack(op >> 4, value);
    Outcome::Plain
}
