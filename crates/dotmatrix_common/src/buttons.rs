use bitflags::bitflags;

bitflags! {
    /// Snapshot of the eight DMG buttons as seen by the host.
    ///
    /// A set bit means the button is currently held down. The bit layout
    /// matches the hardware key matrix: the low nibble is the direction
    /// group, the high nibble the action group.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Buttons: u8 {
        const RIGHT  = 0b0000_0001;
        const LEFT   = 0b0000_0010;
        const UP     = 0b0000_0100;
        const DOWN   = 0b0000_1000;
        const A      = 0b0001_0000;
        const B      = 0b0010_0000;
        const SELECT = 0b0100_0000;
        const START  = 0b1000_0000;
    }
}

impl Buttons {
    /// Direction keys only (right, left, up, down).
    pub const DIRECTIONS: Buttons = Buttons::from_bits_truncate(0x0F);
    /// Action keys only (A, B, select, start).
    pub const ACTIONS: Buttons = Buttons::from_bits_truncate(0xF0);

    /// Look up a button by its conventional name, case-insensitively.
    ///
    /// Used by host tools that accept button names on the command line.
    pub fn by_name(name: &str) -> Option<Buttons> {
        let button = match name.to_ascii_lowercase().as_str() {
            "right" => Buttons::RIGHT,
            "left" => Buttons::LEFT,
            "up" => Buttons::UP,
            "down" => Buttons::DOWN,
            "a" => Buttons::A,
            "b" => Buttons::B,
            "select" => Buttons::SELECT,
            "start" => Buttons::START,
            _ => return None,
        };
        Some(button)
    }
}
