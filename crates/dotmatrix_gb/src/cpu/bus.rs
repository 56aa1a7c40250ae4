/// Abstraction over the Game Boy bus (memory and IO) as seen by the CPU.
///
/// Every CPU access is a single byte. The 16-bit helpers are composed from
/// two byte accesses, low byte first, so that side effects on either half
/// happen in the same order for every caller.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Little-endian word read: `addr` holds the low byte.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian word write: the low byte lands at `addr` first.
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }
}
