use rand::Rng;

use super::GameBoyBus;
use crate::machine::RamInit;

/// Sound register values the boot ROM leaves behind. Nothing consumes them
/// but software may read them back.
const SOUND_DEFAULTS: [(u16, u8); 21] = [
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF13, 0xFF),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF17, 0x00),
    (0xFF18, 0xFF),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1D, 0xFF),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF21, 0x00),
    (0xFF22, 0x00),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
];

impl GameBoyBus {
    /// Initialize I/O registers to the DMG post-boot state.
    ///
    /// Goes through `write` so the components see the same stores the boot
    /// ROM would have made (in particular LCDC turning the LCD on).
    pub(in crate::machine) fn apply_dmg_initial_io_state(&mut self) {
        for (addr, value) in SOUND_DEFAULTS {
            self.write(addr, value);
        }

        self.write(0xFF40, 0x91); // LCDC
        self.write(0xFF47, 0xFC); // BGP
        self.write(0xFF48, 0xFF); // OBP0
        self.write(0xFF49, 0xFF); // OBP1

        self.write(0xFF0F, 0x01);
        self.write(0xFFFF, 0x00);
    }

    /// Fill work RAM and high RAM according to `init`.
    pub(in crate::machine) fn init_internal_ram(&mut self, init: RamInit) {
        match init {
            RamInit::Zeroed => {
                self.wram.fill(0);
                self.hram.fill(0);
            }
            RamInit::Random => {
                let mut rng = rand::thread_rng();
                rng.fill(&mut self.wram[..]);
                rng.fill(&mut self.hram[..]);
            }
        }
    }
}
