//! Display controller (PPU).
//!
//! Owns VRAM, OAM, the LCD registers and the OAM DMA counter. The scanline
//! state machine in `timing` advances in 4-cycle steps; each visible line is
//! rendered into the frame buffer when Draw ends.

mod access;
mod dma;
mod io;
mod render;
mod timing;

pub use io::{BGP, DMA, LCDC, LY, LYC, OBP0, OBP1, SCX, SCY, STAT, WX, WY};

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Cycles in one scanline, OAM scan through HBlank.
pub const LINE_CYCLES: u32 = 456;
/// Length of mode 2 (OAM scan).
pub const OAM_SCAN_CYCLES: u32 = 80;
/// Length of mode 3 (Draw).
pub const DRAW_CYCLES: u32 = 172;
/// Lines per frame including VBlank.
pub const LINES_PER_FRAME: u8 = 154;
/// First VBlank line.
pub const VBLANK_LINE: u8 = 144;

/// STAT mode field (bits 0-1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Draw = 3,
}

impl Mode {
    fn from_bits(bits: u8) -> Mode {
        match bits & 0x03 {
            0 => Mode::HBlank,
            1 => Mode::VBlank,
            2 => Mode::OamScan,
            _ => Mode::Draw,
        }
    }
}

#[derive(Clone)]
pub struct Ppu {
    pub(super) vram: [u8; 0x2000],
    pub(super) oam: [u8; 0xA0],

    pub(super) lcdc: u8,
    /// Bits 3-6 interrupt selects, bit 2 coincidence, bits 0-1 mode.
    pub(super) stat: u8,
    pub(super) scy: u8,
    pub(super) scx: u8,
    pub(super) ly: u8,
    pub(super) lyc: u8,
    pub(super) dma: u8,
    pub(super) bgp: u8,
    pub(super) obp0: u8,
    pub(super) obp1: u8,
    pub(super) wy: u8,
    pub(super) wx: u8,

    /// Position within the current line, 0..LINE_CYCLES.
    pub(super) line_cycles: u32,
    /// Last level of the ORed STAT interrupt sources.
    pub(super) stat_line: bool,

    /// Shade (0-3) per pixel.
    pub(super) frame: Vec<u8>,
    /// Which layer produced each pixel: 0-3 BG/window colour number, 4+n
    /// sprite n.
    pub(super) source: Vec<u8>,
    pub(super) frame_ready: bool,
    pub(super) frame_count: u64,

    /// Remaining 4-cycle DMA ticks, including the initial wait.
    pub(super) dma_ticks_left: u16,
    pub(super) dma_source: u8,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            vram: [0; 0x2000],
            oam: [0; 0xA0],
            lcdc: 0,
            stat: 0,
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            dma: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            line_cycles: 0,
            stat_line: false,
            frame: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            source: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            frame_ready: false,
            frame_count: 0,
            dma_ticks_left: 0,
            dma_source: 0,
        }
    }

    #[inline]
    pub fn lcd_enabled(&self) -> bool {
        self.lcdc & 0x80 != 0
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        Mode::from_bits(self.stat)
    }

    pub(super) fn set_mode(&mut self, mode: Mode) {
        self.stat = (self.stat & !0x03) | mode as u8;
    }

    pub fn ly(&self) -> u8 {
        self.ly
    }

    pub fn line_cycles(&self) -> u32 {
        self.line_cycles
    }

    /// 160x144 shade indices, row-major.
    pub fn frame_buffer(&self) -> &[u8] {
        &self.frame
    }

    /// Per-pixel layer that produced [`Ppu::frame_buffer`].
    pub fn source_buffer(&self) -> &[u8] {
        &self.source
    }

    pub fn is_frame_ready(&self) -> bool {
        self.frame_ready
    }

    pub fn clear_frame_ready(&mut self) {
        self.frame_ready = false;
    }

    /// Frames completed since power-on (incremented on entering VBlank).
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
