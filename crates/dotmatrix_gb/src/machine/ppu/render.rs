use crate::SCREEN_WIDTH;

use super::Ppu;

const MAX_SPRITES_PER_LINE: usize = 10;

/// Sprite attribute bits (OAM byte 3).
const ATTR_BEHIND_BG: u8 = 0x80;
const ATTR_Y_FLIP: u8 = 0x40;
const ATTR_X_FLIP: u8 = 0x20;
const ATTR_PALETTE1: u8 = 0x10;

#[derive(Clone, Copy)]
struct Sprite {
    index: u8,
    /// Screen-space X of the leftmost column (OAM X - 8).
    x: i16,
    /// Row within the sprite for the current line, already Y-flipped.
    row: u8,
    tile: u8,
    attrs: u8,
}

#[inline]
fn apply_palette(palette: u8, color: u8) -> u8 {
    (palette >> (color * 2)) & 0x03
}

impl Ppu {
    /// 2-bit colour number of pixel `(x, row)` of the tile whose data starts
    /// at VRAM offset `tile_offset`.
    #[inline]
    fn tile_pixel(&self, tile_offset: usize, row: u8, x: u8) -> u8 {
        let addr = tile_offset + row as usize * 2;
        let lo = self.vram[addr];
        let hi = self.vram[addr + 1];
        let bit = 7 - x;
        (((hi >> bit) & 0x01) << 1) | ((lo >> bit) & 0x01)
    }

    /// VRAM offset of BG/window tile `tile` under the LCDC.4 addressing mode.
    #[inline]
    fn bg_tile_offset(&self, tile: u8) -> usize {
        if self.lcdc & 0x10 != 0 {
            tile as usize * 16
        } else {
            // Signed index around 0x9000.
            (0x1000 + (tile as i8 as isize) * 16) as usize
        }
    }

    /// Colour number at `(x, y)` of the 32x32 tile map at VRAM offset
    /// `map_offset`.
    fn map_pixel(&self, map_offset: usize, x: u8, y: u8) -> u8 {
        let tile_index = self.vram[map_offset + (y as usize / 8) * 32 + x as usize / 8];
        self.tile_pixel(self.bg_tile_offset(tile_index), y % 8, x % 8)
    }

    /// Up to ten sprites overlapping `line`, in OAM order.
    fn sprites_on_line(&self, line: u8) -> Vec<Sprite> {
        let height: i16 = if self.lcdc & 0x04 != 0 { 16 } else { 8 };
        let mut sprites = Vec::with_capacity(MAX_SPRITES_PER_LINE);

        for (index, entry) in self.oam.chunks_exact(4).enumerate() {
            let top = entry[0] as i16 - 16;
            let row = line as i16 - top;
            if !(0..height).contains(&row) {
                continue;
            }

            let attrs = entry[3];
            let row = if attrs & ATTR_Y_FLIP != 0 { height - 1 - row } else { row };
            let tile = if height == 16 { entry[2] & 0xFE } else { entry[2] };

            sprites.push(Sprite {
                index: index as u8,
                x: entry[1] as i16 - 8,
                row: row as u8,
                tile,
                attrs,
            });
            if sprites.len() == MAX_SPRITES_PER_LINE {
                break;
            }
        }
        sprites
    }

    /// Compose background, window and sprites for `line` into the frame
    /// and source buffers.
    pub(super) fn render_line(&mut self, line: u8) {
        let width = SCREEN_WIDTH;
        let bg_enabled = self.lcdc & 0x01 != 0;
        let sprites_enabled = self.lcdc & 0x02 != 0;
        let bg_map = if self.lcdc & 0x08 != 0 { 0x1C00 } else { 0x1800 };
        let window_map = if self.lcdc & 0x40 != 0 { 0x1C00 } else { 0x1800 };
        let window_visible = self.lcdc & 0x20 != 0 && line >= self.wy;
        let window_start = self.wx.saturating_sub(7) as usize;

        let sprites = if sprites_enabled {
            self.sprites_on_line(line)
        } else {
            Vec::new()
        };

        let row_start = line as usize * width;
        for x in 0..width {
            let mut color = 0;
            let mut shade = 0;

            if bg_enabled {
                let bx = (x as u8).wrapping_add(self.scx);
                let by = line.wrapping_add(self.scy);
                color = self.map_pixel(bg_map, bx, by);
                shade = apply_palette(self.bgp, color);
            }

            if window_visible && x >= window_start {
                let wx = (x - window_start) as u8;
                let wy = line - self.wy;
                color = self.map_pixel(window_map, wx, wy);
                shade = apply_palette(self.bgp, color);
            }

            let mut source = color;

            // The lowest OAM index with an opaque pixel here decides.
            for sprite in &sprites {
                let column = x as i16 - sprite.x;
                if !(0..8).contains(&column) {
                    continue;
                }
                let column = if sprite.attrs & ATTR_X_FLIP != 0 {
                    7 - column
                } else {
                    column
                };
                let sprite_color = self.tile_pixel(sprite.tile as usize * 16, sprite.row, column as u8);
                if sprite_color == 0 {
                    continue;
                }

                if sprite.attrs & ATTR_BEHIND_BG == 0 || color == 0 {
                    let palette = if sprite.attrs & ATTR_PALETTE1 != 0 {
                        self.obp1
                    } else {
                        self.obp0
                    };
                    shade = apply_palette(palette, sprite_color);
                    source = 4 + sprite.index;
                }
                break;
            }

            self.frame[row_start + x] = shade;
            self.source[row_start + x] = source;
        }
    }
}
