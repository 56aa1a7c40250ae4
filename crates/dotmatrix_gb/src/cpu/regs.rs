/// The LR35902 register file.
///
/// Each pair is stored as two bytes, high register first. The 16-bit
/// views are assembled on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

macro_rules! pair {
    ($get:ident, $set:ident, $hi:ident, $lo:ident) => {
        #[inline]
        pub fn $get(&self) -> u16 {
            u16::from_be_bytes([self.$hi, self.$lo])
        }

        #[inline]
        pub fn $set(&mut self, value: u16) {
            [self.$hi, self.$lo] = value.to_be_bytes();
        }
    };
}

impl Registers {
    pair!(bc, set_bc, b, c);
    pair!(de, set_de, d, e);
    pair!(hl, set_hl, h, l);

    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & FLAG_MASK])
    }

    /// F only keeps its upper nibble.
    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.f = f & FLAG_MASK;
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        self.f & flag.mask() != 0
    }
}

/// Bits of F that exist in hardware.
const FLAG_MASK: u8 = 0xF0;

/// Condition flags, named after their bit in F.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    /// Zero, bit 7.
    Z,
    /// Subtract, bit 6.
    N,
    /// Half carry, bit 5.
    H,
    /// Carry, bit 4.
    C,
}

impl Flag {
    #[inline]
    pub const fn mask(self) -> u8 {
        match self {
            Flag::Z => 0x80,
            Flag::N => 0x40,
            Flag::H => 0x20,
            Flag::C => 0x10,
        }
    }
}
