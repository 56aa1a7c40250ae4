use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Register behind a 3-bit operand field (B C D E H L - A). Slot 6 is
    /// memory at HL and has no register.
    fn reg_slot(&mut self, slot: u8) -> Option<&mut u8> {
        let r = &mut self.regs;
        let reg = match slot & 0x07 {
            0 => &mut r.b,
            1 => &mut r.c,
            2 => &mut r.d,
            3 => &mut r.e,
            4 => &mut r.h,
            5 => &mut r.l,
            6 => return None,
            _ => &mut r.a,
        };
        Some(reg)
    }

    pub(super) fn r8(&mut self, bus: &mut dyn Bus, slot: u8) -> u8 {
        let hl = self.regs.hl();
        match self.reg_slot(slot) {
            Some(reg) => *reg,
            None => bus.read8(hl),
        }
    }

    pub(super) fn set_r8(&mut self, bus: &mut dyn Bus, slot: u8, value: u8) {
        let hl = self.regs.hl();
        match self.reg_slot(slot) {
            Some(reg) => *reg = value,
            None => bus.write8(hl, value),
        }
    }

    /// Pair behind a 2-bit field: BC DE HL SP.
    pub(super) fn r16(&self, slot: u8) -> u16 {
        match slot & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => self.regs.sp,
        }
    }

    pub(super) fn set_r16(&mut self, slot: u8, value: u16) {
        match slot & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            _ => self.regs.sp = value,
        }
    }

    /// PUSH/POP numbering, where AF takes the place of SP.
    pub(super) fn r16_stack(&self, slot: u8) -> u16 {
        if slot & 0x03 == 3 {
            self.regs.af()
        } else {
            self.r16(slot)
        }
    }

    pub(super) fn set_r16_stack(&mut self, slot: u8, value: u16) {
        if slot & 0x03 == 3 {
            self.regs.set_af(value);
        } else {
            self.set_r16(slot, value);
        }
    }

    pub(super) fn next_u8(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    pub(super) fn next_u16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = self.next_u8(bus);
        let hi = self.next_u8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// High byte goes down first; SP ends on the low byte.
    pub(super) fn push(&mut self, bus: &mut dyn Bus, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    pub(super) fn pop(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = bus.read8(self.regs.sp);
        let hi = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        u16::from_le_bytes([lo, hi])
    }

    /// The cc field in bits 3-4: NZ Z NC C.
    pub(super) fn condition(&self, opcode: u8) -> bool {
        let (flag, wanted) = match (opcode >> 3) & 0x03 {
            0 => (Flag::Z, false),
            1 => (Flag::Z, true),
            2 => (Flag::C, false),
            _ => (Flag::C, true),
        };
        self.regs.flag(flag) == wanted
    }
}
