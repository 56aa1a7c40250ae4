//! Descriptor tables for the primary and CB-prefixed opcodes.
//!
//! Each primary opcode has one row holding its mnemonic, encoded length,
//! cycle costs and handler. [`Cpu::step`] dispatches through [`OPCODES`]
//! and takes the cost of every instruction from the row it ran.

use super::ops::{arith, bits, flow, load, misc};
use super::{Bus, Cpu};

/// What an executed instruction reports back so its row can price it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Straight-line instruction, or a conditional one that fell through.
    Plain,
    /// Conditional branch taken.
    Taken,
    /// CB-prefixed instruction, carrying the byte after the prefix.
    Prefixed(u8),
}

impl Outcome {
    #[inline]
    pub(super) fn branch(taken: bool) -> Outcome {
        if taken {
            Outcome::Taken
        } else {
            Outcome::Plain
        }
    }
}

/// Executes one primary opcode. The opcode byte has been fetched and PC
/// points at the first operand byte, if any.
pub type Handler = fn(&mut Cpu, &mut dyn Bus, u8) -> Outcome;

/// Descriptor of one primary opcode.
#[derive(Clone, Copy)]
pub struct OpInfo {
    pub mnemonic: &'static str,
    /// Encoded length in bytes, opcode included.
    pub len: u8,
    /// Cycle cost. For conditional branches, the cost when not taken.
    pub cycles: u8,
    /// Cycle cost when a conditional branch is taken. Equal to `cycles`
    /// for every other instruction.
    pub cycles_taken: u8,
    pub exec: Handler,
}

impl OpInfo {
    /// Whether the slot is one of the unused opcode holes.
    pub fn is_invalid(&self) -> bool {
        self.mnemonic == "-"
    }

    pub fn is_conditional(&self) -> bool {
        self.cycles != self.cycles_taken
    }

    /// T-cycles for an execution of this row that ended in `outcome`.
    pub fn cost(&self, outcome: Outcome) -> u32 {
        let cycles = match outcome {
            Outcome::Plain => self.cycles,
            Outcome::Taken => self.cycles_taken,
            Outcome::Prefixed(cb) => cb_cycles(cb),
        };
        u32::from(cycles)
    }
}

const fn op(mnemonic: &'static str, len: u8, cycles: u8, cycles_taken: u8, exec: Handler) -> OpInfo {
    OpInfo {
        mnemonic,
        len,
        cycles,
        cycles_taken,
        exec,
    }
}

pub static OPCODES: [OpInfo; 256] = [
    /* 00 */ op("NOP", 1, 4, 4, misc::nop),
    /* 01 */ op("LD BC,d16", 3, 12, 12, load::rr_d16),
    /* 02 */ op("LD (BC),A", 1, 8, 8, load::store_a),
    /* 03 */ op("INC BC", 1, 8, 8, arith::inc_rr),
    /* 04 */ op("INC B", 1, 4, 4, arith::inc_r),
    /* 05 */ op("DEC B", 1, 4, 4, arith::dec_r),
    /* 06 */ op("LD B,d8", 2, 8, 8, load::r_d8),
    /* 07 */ op("RLCA", 1, 4, 4, arith::rotate_a),
    /* 08 */ op("LD (a16),SP", 3, 20, 20, load::store_sp),
    /* 09 */ op("ADD HL,BC", 1, 8, 8, arith::add_hl),
    /* 0A */ op("LD A,(BC)", 1, 8, 8, load::load_a),
    /* 0B */ op("DEC BC", 1, 8, 8, arith::dec_rr),
    /* 0C */ op("INC C", 1, 4, 4, arith::inc_r),
    /* 0D */ op("DEC C", 1, 4, 4, arith::dec_r),
    /* 0E */ op("LD C,d8", 2, 8, 8, load::r_d8),
    /* 0F */ op("RRCA", 1, 4, 4, arith::rotate_a),

    /* 10 */ op("STOP", 2, 4, 4, misc::stop),
    /* 11 */ op("LD DE,d16", 3, 12, 12, load::rr_d16),
    /* 12 */ op("LD (DE),A", 1, 8, 8, load::store_a),
    /* 13 */ op("INC DE", 1, 8, 8, arith::inc_rr),
    /* 14 */ op("INC D", 1, 4, 4, arith::inc_r),
    /* 15 */ op("DEC D", 1, 4, 4, arith::dec_r),
    /* 16 */ op("LD D,d8", 2, 8, 8, load::r_d8),
    /* 17 */ op("RLA", 1, 4, 4, arith::rotate_a),
    /* 18 */ op("JR r8", 2, 12, 12, flow::jr),
    /* 19 */ op("ADD HL,DE", 1, 8, 8, arith::add_hl),
    /* 1A */ op("LD A,(DE)", 1, 8, 8, load::load_a),
    /* 1B */ op("DEC DE", 1, 8, 8, arith::dec_rr),
    /* 1C */ op("INC E", 1, 4, 4, arith::inc_r),
    /* 1D */ op("DEC E", 1, 4, 4, arith::dec_r),
    /* 1E */ op("LD E,d8", 2, 8, 8, load::r_d8),
    /* 1F */ op("RRA", 1, 4, 4, arith::rotate_a),

    /* 20 */ op("JR NZ,r8", 2, 8, 12, flow::jr_cc),
    /* 21 */ op("LD HL,d16", 3, 12, 12, load::rr_d16),
    /* 22 */ op("LD (HL+),A", 1, 8, 8, load::store_a),
    /* 23 */ op("INC HL", 1, 8, 8, arith::inc_rr),
    /* 24 */ op("INC H", 1, 4, 4, arith::inc_r),
    /* 25 */ op("DEC H", 1, 4, 4, arith::dec_r),
    /* 26 */ op("LD H,d8", 2, 8, 8, load::r_d8),
    /* 27 */ op("DAA", 1, 4, 4, arith::daa),
    /* 28 */ op("JR Z,r8", 2, 8, 12, flow::jr_cc),
    /* 29 */ op("ADD HL,HL", 1, 8, 8, arith::add_hl),
    /* 2A */ op("LD A,(HL+)", 1, 8, 8, load::load_a),
    /* 2B */ op("DEC HL", 1, 8, 8, arith::dec_rr),
    /* 2C */ op("INC L", 1, 4, 4, arith::inc_r),
    /* 2D */ op("DEC L", 1, 4, 4, arith::dec_r),
    /* 2E */ op("LD L,d8", 2, 8, 8, load::r_d8),
    /* 2F */ op("CPL", 1, 4, 4, arith::cpl),

    /* 30 */ op("JR NC,r8", 2, 8, 12, flow::jr_cc),
    /* 31 */ op("LD SP,d16", 3, 12, 12, load::rr_d16),
    /* 32 */ op("LD (HL-),A", 1, 8, 8, load::store_a),
    /* 33 */ op("INC SP", 1, 8, 8, arith::inc_rr),
    /* 34 */ op("INC (HL)", 1, 12, 12, arith::inc_r),
    /* 35 */ op("DEC (HL)", 1, 12, 12, arith::dec_r),
    /* 36 */ op("LD (HL),d8", 2, 12, 12, load::r_d8),
    /* 37 */ op("SCF", 1, 4, 4, arith::scf),
    /* 38 */ op("JR C,r8", 2, 8, 12, flow::jr_cc),
    /* 39 */ op("ADD HL,SP", 1, 8, 8, arith::add_hl),
    /* 3A */ op("LD A,(HL-)", 1, 8, 8, load::load_a),
    /* 3B */ op("DEC SP", 1, 8, 8, arith::dec_rr),
    /* 3C */ op("INC A", 1, 4, 4, arith::inc_r),
    /* 3D */ op("DEC A", 1, 4, 4, arith::dec_r),
    /* 3E */ op("LD A,d8", 2, 8, 8, load::r_d8),
    /* 3F */ op("CCF", 1, 4, 4, arith::ccf),

    /* 40 */ op("LD B,B", 1, 4, 4, load::r_r),
    /* 41 */ op("LD B,C", 1, 4, 4, load::r_r),
    /* 42 */ op("LD B,D", 1, 4, 4, load::r_r),
    /* 43 */ op("LD B,E", 1, 4, 4, load::r_r),
    /* 44 */ op("LD B,H", 1, 4, 4, load::r_r),
    /* 45 */ op("LD B,L", 1, 4, 4, load::r_r),
    /* 46 */ op("LD B,(HL)", 1, 8, 8, load::r_r),
    /* 47 */ op("LD B,A", 1, 4, 4, load::r_r),
    /* 48 */ op("LD C,B", 1, 4, 4, load::r_r),
    /* 49 */ op("LD C,C", 1, 4, 4, load::r_r),
    /* 4A */ op("LD C,D", 1, 4, 4, load::r_r),
    /* 4B */ op("LD C,E", 1, 4, 4, load::r_r),
    /* 4C */ op("LD C,H", 1, 4, 4, load::r_r),
    /* 4D */ op("LD C,L", 1, 4, 4, load::r_r),
    /* 4E */ op("LD C,(HL)", 1, 8, 8, load::r_r),
    /* 4F */ op("LD C,A", 1, 4, 4, load::r_r),

    /* 50 */ op("LD D,B", 1, 4, 4, load::r_r),
    /* 51 */ op("LD D,C", 1, 4, 4, load::r_r),
    /* 52 */ op("LD D,D", 1, 4, 4, load::r_r),
    /* 53 */ op("LD D,E", 1, 4, 4, load::r_r),
    /* 54 */ op("LD D,H", 1, 4, 4, load::r_r),
    /* 55 */ op("LD D,L", 1, 4, 4, load::r_r),
    /* 56 */ op("LD D,(HL)", 1, 8, 8, load::r_r),
    /* 57 */ op("LD D,A", 1, 4, 4, load::r_r),
    /* 58 */ op("LD E,B", 1, 4, 4, load::r_r),
    /* 59 */ op("LD E,C", 1, 4, 4, load::r_r),
    /* 5A */ op("LD E,D", 1, 4, 4, load::r_r),
    /* 5B */ op("LD E,E", 1, 4, 4, load::r_r),
    /* 5C */ op("LD E,H", 1, 4, 4, load::r_r),
    /* 5D */ op("LD E,L", 1, 4, 4, load::r_r),
    /* 5E */ op("LD E,(HL)", 1, 8, 8, load::r_r),
    /* 5F */ op("LD E,A", 1, 4, 4, load::r_r),

    /* 60 */ op("LD H,B", 1, 4, 4, load::r_r),
    /* 61 */ op("LD H,C", 1, 4, 4, load::r_r),
    /* 62 */ op("LD H,D", 1, 4, 4, load::r_r),
    /* 63 */ op("LD H,E", 1, 4, 4, load::r_r),
    /* 64 */ op("LD H,H", 1, 4, 4, load::r_r),
    /* 65 */ op("LD H,L", 1, 4, 4, load::r_r),
    /* 66 */ op("LD H,(HL)", 1, 8, 8, load::r_r),
    /* 67 */ op("LD H,A", 1, 4, 4, load::r_r),
    /* 68 */ op("LD L,B", 1, 4, 4, load::r_r),
    /* 69 */ op("LD L,C", 1, 4, 4, load::r_r),
    /* 6A */ op("LD L,D", 1, 4, 4, load::r_r),
    /* 6B */ op("LD L,E", 1, 4, 4, load::r_r),
    /* 6C */ op("LD L,H", 1, 4, 4, load::r_r),
    /* 6D */ op("LD L,L", 1, 4, 4, load::r_r),
    /* 6E */ op("LD L,(HL)", 1, 8, 8, load::r_r),
    /* 6F */ op("LD L,A", 1, 4, 4, load::r_r),

    /* 70 */ op("LD (HL),B", 1, 8, 8, load::r_r),
    /* 71 */ op("LD (HL),C", 1, 8, 8, load::r_r),
    /* 72 */ op("LD (HL),D", 1, 8, 8, load::r_r),
    /* 73 */ op("LD (HL),E", 1, 8, 8, load::r_r),
    /* 74 */ op("LD (HL),H", 1, 8, 8, load::r_r),
    /* 75 */ op("LD (HL),L", 1, 8, 8, load::r_r),
    /* 76 */ op("HALT", 1, 4, 4, misc::halt),
    /* 77 */ op("LD (HL),A", 1, 8, 8, load::r_r),
    /* 78 */ op("LD A,B", 1, 4, 4, load::r_r),
    /* 79 */ op("LD A,C", 1, 4, 4, load::r_r),
    /* 7A */ op("LD A,D", 1, 4, 4, load::r_r),
    /* 7B */ op("LD A,E", 1, 4, 4, load::r_r),
    /* 7C */ op("LD A,H", 1, 4, 4, load::r_r),
    /* 7D */ op("LD A,L", 1, 4, 4, load::r_r),
    /* 7E */ op("LD A,(HL)", 1, 8, 8, load::r_r),
    /* 7F */ op("LD A,A", 1, 4, 4, load::r_r),

    /* 80 */ op("ADD A,B", 1, 4, 4, arith::acc_r),
    /* 81 */ op("ADD A,C", 1, 4, 4, arith::acc_r),
    /* 82 */ op("ADD A,D", 1, 4, 4, arith::acc_r),
    /* 83 */ op("ADD A,E", 1, 4, 4, arith::acc_r),
    /* 84 */ op("ADD A,H", 1, 4, 4, arith::acc_r),
    /* 85 */ op("ADD A,L", 1, 4, 4, arith::acc_r),
    /* 86 */ op("ADD A,(HL)", 1, 8, 8, arith::acc_r),
    /* 87 */ op("ADD A,A", 1, 4, 4, arith::acc_r),
    /* 88 */ op("ADC A,B", 1, 4, 4, arith::acc_r),
    /* 89 */ op("ADC A,C", 1, 4, 4, arith::acc_r),
    /* 8A */ op("ADC A,D", 1, 4, 4, arith::acc_r),
    /* 8B */ op("ADC A,E", 1, 4, 4, arith::acc_r),
    /* 8C */ op("ADC A,H", 1, 4, 4, arith::acc_r),
    /* 8D */ op("ADC A,L", 1, 4, 4, arith::acc_r),
    /* 8E */ op("ADC A,(HL)", 1, 8, 8, arith::acc_r),
    /* 8F */ op("ADC A,A", 1, 4, 4, arith::acc_r),

    /* 90 */ op("SUB B", 1, 4, 4, arith::acc_r),
    /* 91 */ op("SUB C", 1, 4, 4, arith::acc_r),
    /* 92 */ op("SUB D", 1, 4, 4, arith::acc_r),
    /* 93 */ op("SUB E", 1, 4, 4, arith::acc_r),
    /* 94 */ op("SUB H", 1, 4, 4, arith::acc_r),
    /* 95 */ op("SUB L", 1, 4, 4, arith::acc_r),
    /* 96 */ op("SUB (HL)", 1, 8, 8, arith::acc_r),
    /* 97 */ op("SUB A", 1, 4, 4, arith::acc_r),
    /* 98 */ op("SBC A,B", 1, 4, 4, arith::acc_r),
    /* 99 */ op("SBC A,C", 1, 4, 4, arith::acc_r),
    /* 9A */ op("SBC A,D", 1, 4, 4, arith::acc_r),
    /* 9B */ op("SBC A,E", 1, 4, 4, arith::acc_r),
    /* 9C */ op("SBC A,H", 1, 4, 4, arith::acc_r),
    /* 9D */ op("SBC A,L", 1, 4, 4, arith::acc_r),
    /* 9E */ op("SBC A,(HL)", 1, 8, 8, arith::acc_r),
    /* 9F */ op("SBC A,A", 1, 4, 4, arith::acc_r),

    /* A0 */ op("AND B", 1, 4, 4, arith::acc_r),
    /* A1 */ op("AND C", 1, 4, 4, arith::acc_r),
    /* A2 */ op("AND D", 1, 4, 4, arith::acc_r),
    /* A3 */ op("AND E", 1, 4, 4, arith::acc_r),
    /* A4 */ op("AND H", 1, 4, 4, arith::acc_r),
    /* A5 */ op("AND L", 1, 4, 4, arith::acc_r),
    /* A6 */ op("AND (HL)", 1, 8, 8, arith::acc_r),
    /* A7 */ op("AND A", 1, 4, 4, arith::acc_r),
    /* A8 */ op("XOR B", 1, 4, 4, arith::acc_r),
    /* A9 */ op("XOR C", 1, 4, 4, arith::acc_r),
    /* AA */ op("XOR D", 1, 4, 4, arith::acc_r),
    /* AB */ op("XOR E", 1, 4, 4, arith::acc_r),
    /* AC */ op("XOR H", 1, 4, 4, arith::acc_r),
    /* AD */ op("XOR L", 1, 4, 4, arith::acc_r),
    /* AE */ op("XOR (HL)", 1, 8, 8, arith::acc_r),
    /* AF */ op("XOR A", 1, 4, 4, arith::acc_r),

    /* B0 */ op("OR B", 1, 4, 4, arith::acc_r),
    /* B1 */ op("OR C", 1, 4, 4, arith::acc_r),
    /* B2 */ op("OR D", 1, 4, 4, arith::acc_r),
    /* B3 */ op("OR E", 1, 4, 4, arith::acc_r),
    /* B4 */ op("OR H", 1, 4, 4, arith::acc_r),
    /* B5 */ op("OR L", 1, 4, 4, arith::acc_r),
    /* B6 */ op("OR (HL)", 1, 8, 8, arith::acc_r),
    /* B7 */ op("OR A", 1, 4, 4, arith::acc_r),
    /* B8 */ op("CP B", 1, 4, 4, arith::acc_r),
    /* B9 */ op("CP C", 1, 4, 4, arith::acc_r),
    /* BA */ op("CP D", 1, 4, 4, arith::acc_r),
    /* BB */ op("CP E", 1, 4, 4, arith::acc_r),
    /* BC */ op("CP H", 1, 4, 4, arith::acc_r),
    /* BD */ op("CP L", 1, 4, 4, arith::acc_r),
    /* BE */ op("CP (HL)", 1, 8, 8, arith::acc_r),
    /* BF */ op("CP A", 1, 4, 4, arith::acc_r),

    /* C0 */ op("RET NZ", 1, 8, 20, flow::ret_cc),
    /* C1 */ op("POP BC", 1, 12, 12, load::pop),
    /* C2 */ op("JP NZ,a16", 3, 12, 16, flow::jp_cc),
    /* C3 */ op("JP a16", 3, 16, 16, flow::jp),
    /* C4 */ op("CALL NZ,a16", 3, 12, 24, flow::call_cc),
    /* C5 */ op("PUSH BC", 1, 16, 16, load::push),
    /* C6 */ op("ADD A,d8", 2, 8, 8, arith::acc_d8),
    /* C7 */ op("RST 00H", 1, 16, 16, flow::rst),
    /* C8 */ op("RET Z", 1, 8, 20, flow::ret_cc),
    /* C9 */ op("RET", 1, 16, 16, flow::ret),
    /* CA */ op("JP Z,a16", 3, 12, 16, flow::jp_cc),
    /* CB */ op("PREFIX CB", 1, 4, 4, bits::prefix_cb),
    /* CC */ op("CALL Z,a16", 3, 12, 24, flow::call_cc),
    /* CD */ op("CALL a16", 3, 24, 24, flow::call),
    /* CE */ op("ADC A,d8", 2, 8, 8, arith::acc_d8),
    /* CF */ op("RST 08H", 1, 16, 16, flow::rst),

    /* D0 */ op("RET NC", 1, 8, 20, flow::ret_cc),
    /* D1 */ op("POP DE", 1, 12, 12, load::pop),
    /* D2 */ op("JP NC,a16", 3, 12, 16, flow::jp_cc),
    /* D3 */ op("-", 1, 4, 4, misc::illegal),
    /* D4 */ op("CALL NC,a16", 3, 12, 24, flow::call_cc),
    /* D5 */ op("PUSH DE", 1, 16, 16, load::push),
    /* D6 */ op("SUB d8", 2, 8, 8, arith::acc_d8),
    /* D7 */ op("RST 10H", 1, 16, 16, flow::rst),
    /* D8 */ op("RET C", 1, 8, 20, flow::ret_cc),
    /* D9 */ op("RETI", 1, 16, 16, flow::reti),
    /* DA */ op("JP C,a16", 3, 12, 16, flow::jp_cc),
    /* DB */ op("-", 1, 4, 4, misc::illegal),
    /* DC */ op("CALL C,a16", 3, 12, 24, flow::call_cc),
    /* DD */ op("-", 1, 4, 4, misc::illegal),
    /* DE */ op("SBC A,d8", 2, 8, 8, arith::acc_d8),
    /* DF */ op("RST 18H", 1, 16, 16, flow::rst),

    /* E0 */ op("LDH (a8),A", 2, 12, 12, load::a_mem),
    /* E1 */ op("POP HL", 1, 12, 12, load::pop),
    /* E2 */ op("LD (C),A", 1, 8, 8, load::a_mem),
    /* E3 */ op("-", 1, 4, 4, misc::illegal),
    /* E4 */ op("-", 1, 4, 4, misc::illegal),
    /* E5 */ op("PUSH HL", 1, 16, 16, load::push),
    /* E6 */ op("AND d8", 2, 8, 8, arith::acc_d8),
    /* E7 */ op("RST 20H", 1, 16, 16, flow::rst),
    /* E8 */ op("ADD SP,r8", 2, 16, 16, arith::add_sp),
    /* E9 */ op("JP (HL)", 1, 4, 4, flow::jp_hl),
    /* EA */ op("LD (a16),A", 3, 16, 16, load::a_mem),
    /* EB */ op("-", 1, 4, 4, misc::illegal),
    /* EC */ op("-", 1, 4, 4, misc::illegal),
    /* ED */ op("-", 1, 4, 4, misc::illegal),
    /* EE */ op("XOR d8", 2, 8, 8, arith::acc_d8),
    /* EF */ op("RST 28H", 1, 16, 16, flow::rst),

    /* F0 */ op("LDH A,(a8)", 2, 12, 12, load::a_mem),
    /* F1 */ op("POP AF", 1, 12, 12, load::pop),
    /* F2 */ op("LD A,(C)", 1, 8, 8, load::a_mem),
    /* F3 */ op("DI", 1, 4, 4, misc::di),
    /* F4 */ op("-", 1, 4, 4, misc::illegal),
    /* F5 */ op("PUSH AF", 1, 16, 16, load::push),
    /* F6 */ op("OR d8", 2, 8, 8, arith::acc_d8),
    /* F7 */ op("RST 30H", 1, 16, 16, flow::rst),
    /* F8 */ op("LD HL,SP+r8", 2, 12, 12, load::hl_sp_e8),
    /* F9 */ op("LD SP,HL", 1, 8, 8, load::sp_hl),
    /* FA */ op("LD A,(a16)", 3, 16, 16, load::a_mem),
    /* FB */ op("EI", 1, 4, 4, misc::ei),
    /* FC */ op("-", 1, 4, 4, misc::illegal),
    /* FD */ op("-", 1, 4, 4, misc::illegal),
    /* FE */ op("CP d8", 2, 8, 8, arith::acc_d8),
    /* FF */ op("RST 38H", 1, 16, 16, flow::rst),
];

const CB_TARGETS: [&str; 8] = ["B", "C", "D", "E", "H", "L", "(HL)", "A"];
const CB_SHIFTS: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"];

/// Cycle cost of a CB-prefixed opcode, prefix included. Register forms
/// take 8; BIT on (HL) only reads and takes 12; the other (HL) forms
/// write back and take 16.
pub const fn cb_cycles(opcode: u8) -> u8 {
    match (opcode >> 6, opcode & 0x07) {
        (_, slot) if slot != 6 => 8,
        (1, _) => 12,
        _ => 16,
    }
}

/// Mnemonic and cycle cost of a CB-prefixed opcode.
pub fn cb_info(opcode: u8) -> (String, u8) {
    let target = CB_TARGETS[(opcode & 0x07) as usize];
    let n = (opcode >> 3) & 0x07;
    let mnemonic = match opcode >> 6 {
        0 => format!("{} {target}", CB_SHIFTS[n as usize]),
        1 => format!("BIT {n},{target}"),
        2 => format!("RES {n},{target}"),
        _ => format!("SET {n},{target}"),
    };
    (mnemonic, cb_cycles(opcode))
}
