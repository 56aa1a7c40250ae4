use super::Ppu;

/// One waiting tick plus one tick per copied byte.
pub const DMA_TICKS: u16 = 161;
const OAM_LEN: u16 = 0xA0;

impl Ppu {
    pub(super) fn start_dma(&mut self, source: u8) {
        self.dma = source;
        self.dma_source = source;
        self.dma_ticks_left = DMA_TICKS;
    }

    /// Whether an OAM DMA transfer is still running.
    pub fn dma_active(&self) -> bool {
        self.dma_ticks_left > 0
    }

    /// Advance the transfer by one 4-cycle tick.
    ///
    /// Returns the source address and OAM index of the byte to copy on this
    /// tick, if any. The caller performs the copy since the source lives on
    /// the bus.
    pub fn dma_tick(&mut self) -> Option<(u16, usize)> {
        if self.dma_ticks_left == 0 {
            return None;
        }
        let elapsed = DMA_TICKS - self.dma_ticks_left;
        self.dma_ticks_left -= 1;

        if elapsed == 0 {
            return None;
        }
        let index = elapsed - 1;
        debug_assert!(index < OAM_LEN);
        let src = ((self.dma_source as u16) << 8) | index;
        Some((src, index as usize))
    }

    /// Store a DMA byte into OAM, bypassing mode gating.
    pub fn dma_write_oam(&mut self, index: usize, value: u8) {
        if let Some(slot) = self.oam.get_mut(index) {
            *slot = value;
        }
    }
}
