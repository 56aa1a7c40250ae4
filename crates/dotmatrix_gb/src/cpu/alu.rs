//! Flag arithmetic.
//!
//! Everything here is a pure function of its inputs: it returns the result
//! next to the new F byte and leaves writing them back to the handler.

use super::regs::Flag;

const Z: u8 = Flag::Z.mask();
const N: u8 = Flag::N.mask();
const H: u8 = Flag::H.mask();
const C: u8 = Flag::C.mask();

/// Z N H C packed into the upper nibble of F.
#[inline]
pub(super) const fn pack(z: bool, n: bool, h: bool, c: bool) -> u8 {
    (z as u8) << 7 | (n as u8) << 6 | (h as u8) << 5 | (c as u8) << 4
}

/// Accumulator operations, in the order of bits 3-5 of their encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum AccOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AccOp {
    pub(super) const fn from_bits(bits: u8) -> AccOp {
        match bits & 0x07 {
            0 => AccOp::Add,
            1 => AccOp::Adc,
            2 => AccOp::Sub,
            3 => AccOp::Sbc,
            4 => AccOp::And,
            5 => AccOp::Xor,
            6 => AccOp::Or,
            _ => AccOp::Cp,
        }
    }

    /// New accumulator and F after `a <op> operand`. CP keeps `a`.
    pub(super) fn apply(self, a: u8, operand: u8, f: u8) -> (u8, u8) {
        let carry = f & C != 0;
        match self {
            AccOp::Add => add(a, operand, false),
            AccOp::Adc => add(a, operand, carry),
            AccOp::Sub => sub(a, operand, false),
            AccOp::Sbc => sub(a, operand, carry),
            AccOp::And => {
                let r = a & operand;
                (r, pack(r == 0, false, true, false))
            }
            AccOp::Xor => logic(a ^ operand),
            AccOp::Or => logic(a | operand),
            AccOp::Cp => (a, sub(a, operand, false).1),
        }
    }
}

fn add(a: u8, b: u8, carry: bool) -> (u8, u8) {
    let c = carry as u8;
    let wide = a as u16 + b as u16 + c as u16;
    let half = (a & 0x0F) + (b & 0x0F) + c > 0x0F;
    let r = wide as u8;
    (r, pack(r == 0, false, half, wide > 0xFF))
}

fn sub(a: u8, b: u8, borrow: bool) -> (u8, u8) {
    let c = borrow as u8;
    let r = a.wrapping_sub(b).wrapping_sub(c);
    let half = (a & 0x0F) < (b & 0x0F) + c;
    let full = (a as u16) < b as u16 + c as u16;
    (r, pack(r == 0, true, half, full))
}

fn logic(r: u8) -> (u8, u8) {
    (r, pack(r == 0, false, false, false))
}

/// INC r. Carry passes through.
pub(super) fn inc(value: u8, f: u8) -> (u8, u8) {
    let r = value.wrapping_add(1);
    (r, pack(r == 0, false, value & 0x0F == 0x0F, f & C != 0))
}

/// DEC r. Carry passes through.
pub(super) fn dec(value: u8, f: u8) -> (u8, u8) {
    let r = value.wrapping_sub(1);
    (r, pack(r == 0, true, value & 0x0F == 0, f & C != 0))
}

/// BCD correction of A after an addition (N clear) or subtraction (N set).
pub(super) fn daa(a: u8, f: u8) -> (u8, u8) {
    let subtract = f & N != 0;
    let mut carry = f & C != 0;
    let mut fix = 0u8;

    if f & H != 0 || (!subtract && a & 0x0F > 0x09) {
        fix |= 0x06;
    }
    if carry || (!subtract && a > 0x99) {
        fix |= 0x60;
        carry = true;
    }

    let r = if subtract { a.wrapping_sub(fix) } else { a.wrapping_add(fix) };
    (r, pack(r == 0, subtract, false, carry))
}

/// ADD HL,rr. Half carry from bit 11, carry from bit 15, Z untouched.
pub(super) fn add_hl(hl: u16, rr: u16, f: u8) -> (u16, u8) {
    let (r, carry) = hl.overflowing_add(rr);
    let half = (hl & 0x0FFF) + (rr & 0x0FFF) > 0x0FFF;
    (r, pack(f & Z != 0, false, half, carry))
}

/// SP plus a signed byte, for ADD SP,e8 and LD HL,SP+e8. The flags come
/// from the unsigned low-byte addition.
pub(super) fn add_sp(sp: u16, e8: u8) -> (u16, u8) {
    let low = e8 as u16;
    let half = (sp & 0x0F) + (low & 0x0F) > 0x0F;
    let carry = (sp & 0xFF) + low > 0xFF;
    (sp.wrapping_add(e8 as i8 as u16), pack(false, false, half, carry))
}

/// Rotates and shifts of the CB block, in encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Shift {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl Shift {
    pub(super) const fn from_bits(bits: u8) -> Shift {
        match bits & 0x07 {
            0 => Shift::Rlc,
            1 => Shift::Rrc,
            2 => Shift::Rl,
            3 => Shift::Rr,
            4 => Shift::Sla,
            5 => Shift::Sra,
            6 => Shift::Swap,
            _ => Shift::Srl,
        }
    }

    /// Shifted value and the bit that fell out into carry.
    pub(super) fn apply(self, v: u8, carry_in: bool) -> (u8, bool) {
        let top = v & 0x80 != 0;
        let bottom = v & 0x01 != 0;
        match self {
            Shift::Rlc => (v.rotate_left(1), top),
            Shift::Rrc => (v.rotate_right(1), bottom),
            Shift::Rl => ((v << 1) | carry_in as u8, top),
            Shift::Rr => ((v >> 1) | ((carry_in as u8) << 7), bottom),
            Shift::Sla => (v << 1, top),
            Shift::Sra => ((v >> 1) | (v & 0x80), bottom),
            Shift::Swap => (v.rotate_left(4), false),
            Shift::Srl => (v >> 1, bottom),
        }
    }
}

/// BIT n,v: Z is the complement of the bit, carry passes through.
pub(super) fn bit(n: u8, v: u8, f: u8) -> u8 {
    pack(v & (1 << n) == 0, false, true, f & C != 0)
}
