use super::GameBoyBus;

impl GameBoyBus {
    /// Advance OAM DMA and the PPU together, one 4-cycle step at a time.
    pub fn run_ppu(&mut self, cycles: u32) {
        for _ in 0..cycles / 4 {
            if let Some((src, index)) = self.ppu.dma_tick() {
                // The DMA unit itself is not subject to its own contention.
                let value = self.get(src);
                self.ppu.dma_write_oam(index, value);
            }
            self.ppu.tick(&mut self.if_reg);
        }
    }
}
