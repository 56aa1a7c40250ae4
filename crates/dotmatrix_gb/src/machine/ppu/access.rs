use super::{Mode, Ppu};

impl Ppu {
    /// VRAM is closed to the CPU while the PPU is drawing.
    pub fn vram_accessible(&self) -> bool {
        self.mode() != Mode::Draw
    }

    /// OAM is closed to the CPU during OAM scan and Draw.
    pub fn oam_accessible(&self) -> bool {
        matches!(self.mode(), Mode::HBlank | Mode::VBlank)
    }
}
