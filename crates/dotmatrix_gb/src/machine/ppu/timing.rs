use crate::cpu::InterruptFlags;

use super::{
    Mode, Ppu, DRAW_CYCLES, LINES_PER_FRAME, LINE_CYCLES, OAM_SCAN_CYCLES, VBLANK_LINE,
};

/// Offset into each line at which LY=LYC is compared and VBlank is raised.
const LINE_EVAL_OFFSET: u32 = 4;
/// Offset at which Draw ends and the line is rendered.
const HBLANK_OFFSET: u32 = OAM_SCAN_CYCLES + DRAW_CYCLES;

impl Ppu {
    /// Advance the PPU by one 4-cycle step, raising interrupt requests in
    /// `if_reg`. Does nothing while the LCD is off.
    pub fn tick(&mut self, if_reg: &mut u8) {
        if !self.lcd_enabled() {
            return;
        }

        self.line_cycles += 4;
        if self.line_cycles >= LINE_CYCLES {
            self.line_cycles = 0;
            self.ly = self.ly.wrapping_add(1);
            if self.ly >= LINES_PER_FRAME {
                self.ly = 0;
            }
            if self.ly < VBLANK_LINE {
                self.set_mode(Mode::OamScan);
            } else if self.ly == VBLANK_LINE {
                self.set_mode(Mode::VBlank);
            }
        }

        match self.line_cycles {
            LINE_EVAL_OFFSET => {
                self.update_coincidence();
                if self.ly == VBLANK_LINE {
                    *if_reg |= InterruptFlags::VBLANK.bits();
                    self.frame_ready = true;
                    self.frame_count += 1;
                }
            }
            OAM_SCAN_CYCLES if self.ly < VBLANK_LINE => self.set_mode(Mode::Draw),
            HBLANK_OFFSET if self.ly < VBLANK_LINE => {
                self.render_line(self.ly);
                self.set_mode(Mode::HBlank);
            }
            _ => {}
        }

        self.update_stat_line(if_reg);
    }

    fn update_coincidence(&mut self) {
        if self.ly == self.lyc {
            self.stat |= 0x04;
        } else {
            self.stat &= !0x04;
        }
    }

    /// Raise the STAT interrupt on a rising edge of the ORed enabled sources.
    fn update_stat_line(&mut self, if_reg: &mut u8) {
        let stat = self.stat;
        let mode = self.mode();
        let line = (stat & 0x40 != 0 && stat & 0x04 != 0)
            || (stat & 0x20 != 0 && mode == Mode::OamScan)
            || (stat & 0x10 != 0 && mode == Mode::VBlank)
            || (stat & 0x08 != 0 && mode == Mode::HBlank);

        if line && !self.stat_line {
            *if_reg |= InterruptFlags::LCD_STAT.bits();
        }
        self.stat_line = line;
    }
}
