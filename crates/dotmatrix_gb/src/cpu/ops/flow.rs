use crate::cpu::opcodes::Outcome;
use crate::cpu::{Bus, Cpu};

fn relative(cpu: &mut Cpu, bus: &mut dyn Bus, go: bool) -> Outcome {
    let offset = cpu.next_u8(bus) as i8;
    if go {
        cpu.regs.pc = cpu.regs.pc.wrapping_add_signed(offset as i16);
    }
    Outcome::branch(go)
}

fn absolute(cpu: &mut Cpu, bus: &mut dyn Bus, go: bool) -> Outcome {
    let target = cpu.next_u16(bus);
    if go {
        cpu.regs.pc = target;
    }
    Outcome::branch(go)
}

fn subroutine(cpu: &mut Cpu, bus: &mut dyn Bus, go: bool) -> Outcome {
    let target = cpu.next_u16(bus);
    if go {
        let ret = cpu.regs.pc;
        cpu.push(bus, ret);
        cpu.regs.pc = target;
    }
    Outcome::branch(go)
}

fn leave(cpu: &mut Cpu, bus: &mut dyn Bus, go: bool) -> Outcome {
    if go {
        cpu.regs.pc = cpu.pop(bus);
    }
    Outcome::branch(go)
}

pub(in crate::cpu) fn jr(cpu: &mut Cpu, bus: &mut dyn Bus, _op: u8) -> Outcome {
    relative(cpu, bus, true)
}

pub(in crate::cpu) fn jr_cc(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let go = cpu.condition(op);
    relative(cpu, bus, go)
}

pub(in crate::cpu) fn jp(cpu: &mut Cpu, bus: &mut dyn Bus, _op: u8) -> Outcome {
    absolute(cpu, bus, true)
}

pub(in crate::cpu) fn jp_cc(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let go = cpu.condition(op);
    absolute(cpu, bus, go)
}

/// JP HL. Jumps to HL itself, not to memory at HL.
pub(in crate::cpu) fn jp_hl(cpu: &mut Cpu, _bus: &mut dyn Bus, _op: u8) -> Outcome {
    cpu.regs.pc = cpu.regs.hl();
    Outcome::Plain
}

pub(in crate::cpu) fn call(cpu: &mut Cpu, bus: &mut dyn Bus, _op: u8) -> Outcome {
    subroutine(cpu, bus, true)
}

pub(in crate::cpu) fn call_cc(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let go = cpu.condition(op);
    subroutine(cpu, bus, go)
}

pub(in crate::cpu) fn ret(cpu: &mut Cpu, bus: &mut dyn Bus, _op: u8) -> Outcome {
    leave(cpu, bus, true)
}

pub(in crate::cpu) fn ret_cc(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let go = cpu.condition(op);
    leave(cpu, bus, go)
}

/// RETI turns IME on at once, without the EI delay.
pub(in crate::cpu) fn reti(cpu: &mut Cpu, bus: &mut dyn Bus, _op: u8) -> Outcome {
    cpu.regs.pc = cpu.pop(bus);
    cpu.ime = true;
    cpu.ime_enable_pending = false;
    Outcome::Plain
}

/// RST n. The target is bits 3-5 of the opcode times 8.
pub(in crate::cpu) fn rst(cpu: &mut Cpu, bus: &mut dyn Bus, op: u8) -> Outcome {
    let ret = cpu.regs.pc;
    cpu.push(bus, ret);
    cpu.regs.pc = u16::from(op & 0x38);
    Outcome::Plain
}
