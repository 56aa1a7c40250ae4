use dotmatrix_common::Buttons;

pub const P1: u16 = 0xFF00;

/// Joypad matrix behind P1 (FF00).
///
/// `keystates` holds one bit per button in [`Buttons`] order (Start, Select,
/// B, A, Down, Up, Left, Right from MSB to LSB), inverted so that 0 means
/// pressed, as the hardware reports it.
#[derive(Clone, Debug)]
pub struct Joypad {
    keystates: u8,
    /// Group select bits 4 (directions) and 5 (actions); 0 selects.
    p1: u8,
    /// Latched on a change within a selected group until the board folds it
    /// into IF.
    pub interrupt_requested: bool,
}

impl Default for Joypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Joypad {
    pub fn new() -> Self {
        Self {
            keystates: 0xFF,
            p1: 0xFF,
            interrupt_requested: false,
        }
    }

    #[inline]
    fn directions_selected(&self) -> bool {
        self.p1 & 0x10 == 0
    }

    #[inline]
    fn actions_selected(&self) -> bool {
        self.p1 & 0x20 == 0
    }

    /// Keystate bits visible through the currently selected groups.
    fn selected_mask(&self) -> u8 {
        let mut mask = 0;
        if self.directions_selected() {
            mask |= Buttons::DIRECTIONS.bits();
        }
        if self.actions_selected() {
            mask |= Buttons::ACTIONS.bits();
        }
        mask
    }

    /// Latch a new host input snapshot.
    pub fn update(&mut self, buttons: Buttons) {
        let next = !buttons.bits();
        let changed = self.keystates ^ next;
        if changed & self.selected_mask() != 0 {
            self.interrupt_requested = true;
        }
        self.keystates = next;
    }

    pub fn get(&self, addr: u16) -> u8 {
        if addr != P1 {
            log::warn!("joypad: read from unknown register 0x{addr:04X}");
            return 0xFF;
        }

        let mut lines = 0x0F;
        if self.directions_selected() {
            lines &= self.keystates & 0x0F;
        }
        if self.actions_selected() {
            lines &= self.keystates >> 4;
        }
        0xC0 | (self.p1 & 0x30) | lines
    }

    pub fn set(&mut self, addr: u16, value: u8) {
        if addr != P1 {
            log::warn!("joypad: write 0x{value:02X} to unknown register 0x{addr:04X}");
            return;
        }
        // Only the select lines are writable.
        self.p1 = (self.p1 & !0x30) | (value & 0x30);
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.get(addr)
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.set(addr, value)
    }
}
