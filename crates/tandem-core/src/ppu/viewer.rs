//! Debug views of PPU memory: pattern tables, nametables and palette RAM.
//!
//! Each view is rendered straight from VRAM as NES color indices, with no
//! scrolling, sprites or masking applied.

use crate::{display::NTSC_PALETTE, memory::ppu as ppu_mem, ppu::Ppu};

/// Pattern tables are shown as 16x16 tiles.
pub const PATTERN_TABLE_PIXELS: usize = 128;
pub const NAMETABLE_WIDTH: usize = 256;
pub const NAMETABLE_HEIGHT: usize = 240;
/// Edge of one palette swatch in the palette view.
pub const PALETTE_SWATCH: usize = 8;

/// Pattern colors 0-3 drawn as a grey ramp, since tiles carry no palette.
const PATTERN_GREYS: [u8; 4] = [0x0F, 0x00, 0x10, 0x20];
const TILES_PER_ROW: usize = 16;
const NAMETABLE_COLUMNS: u16 = 32;
const NAMETABLE_ROWS: u16 = 30;
const PALETTE_ENTRIES: usize = 32;

/// A rendered view, one NES color index per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl ViewerImage {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0x0F; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color_index(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// Packed RGBA8 through the NTSC palette.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &index in &self.pixels {
            let (r, g, b) = NTSC_PALETTE[usize::from(index & 0x3F)];
            out.extend_from_slice(&[r, g, b, 0xFF]);
        }
        out
    }

    fn put(&mut self, x: usize, y: usize, color: u8) {
        self.pixels[y * self.width + x] = color & 0x3F;
    }
}

impl Ppu {
    /// Pattern table 0 (`$0000`) or 1 (`$1000`) as a 128x128 grid of tiles.
    pub fn pattern_table_image(&self, table: u8) -> ViewerImage {
        let base = u16::from(table & 1) * ppu_mem::PATTERN_TABLE_1;
        let mut image = ViewerImage::new(PATTERN_TABLE_PIXELS, PATTERN_TABLE_PIXELS);
        for tile in 0..256usize {
            let left = (tile % TILES_PER_ROW) * 8;
            let top = (tile / TILES_PER_ROW) * 8;
            let tile_addr = base | ((tile as u16) << 4);
            for row in 0..8 {
                let colors = self.tile_row(tile_addr, row);
                for (column, &color) in colors.iter().enumerate() {
                    image.put(
                        left + column,
                        top + usize::from(row),
                        PATTERN_GREYS[usize::from(color)],
                    );
                }
            }
        }
        image
    }

    /// Nametable `index` (0-3, after mirroring) with its attribute palettes,
    /// drawn from the current background pattern table.
    pub fn nametable_image(&self, index: u8) -> ViewerImage {
        let base = ppu_mem::NAMETABLE_BASE + u16::from(index & 0x03) * ppu_mem::NAMETABLE_SIZE;
        let pattern_base = self.registers.control.background_pattern_table();
        let mut image = ViewerImage::new(NAMETABLE_WIDTH, NAMETABLE_HEIGHT);

        for tile_y in 0..NAMETABLE_ROWS {
            for tile_x in 0..NAMETABLE_COLUMNS {
                let tile = self.memory.read(base + tile_y * NAMETABLE_COLUMNS + tile_x);
                let attribute = self
                    .memory
                    .read(base + ppu_mem::ATTRIBUTE_OFFSET + (tile_y / 4) * 8 + tile_x / 4);
                let shift = ((tile_y & 0x02) << 1) | (tile_x & 0x02);
                let palette = (attribute >> shift) & 0x03;
                let tile_addr = pattern_base | (u16::from(tile) << 4);

                for row in 0..8u16 {
                    let colors = self.tile_row(tile_addr, row);
                    for (column, &color) in colors.iter().enumerate() {
                        let entry = if color == 0 {
                            0
                        } else {
                            u16::from(palette) * 4 + u16::from(color)
                        };
                        let value = self.memory.read(ppu_mem::PALETTE_BASE + entry);
                        image.put(
                            usize::from(tile_x) * 8 + column,
                            usize::from(tile_y * 8 + row),
                            value,
                        );
                    }
                }
            }
        }
        image
    }

    /// The 32 palette RAM entries as two rows of swatches: background on top,
    /// sprites below.
    pub fn palette_image(&self) -> ViewerImage {
        let columns = PALETTE_ENTRIES / 2;
        let mut image = ViewerImage::new(columns * PALETTE_SWATCH, 2 * PALETTE_SWATCH);
        for entry in 0..PALETTE_ENTRIES {
            let value = self.memory.read(ppu_mem::PALETTE_BASE + entry as u16);
            let left = (entry % columns) * PALETTE_SWATCH;
            let top = (entry / columns) * PALETTE_SWATCH;
            for y in top..top + PALETTE_SWATCH {
                for x in left..left + PALETTE_SWATCH {
                    image.put(x, y, value);
                }
            }
        }
        image
    }

    /// 2-bit colors of one tile row, leftmost pixel first.
    fn tile_row(&self, tile_addr: u16, row: u16) -> [u8; 8] {
        let low = self.memory.read(tile_addr + row);
        let high = self.memory.read(tile_addr + row + 8);
        std::array::from_fn(|column| {
            let bit = 7 - column;
            ((low >> bit) & 1) | (((high >> bit) & 1) << 1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cartridge::header::Mirroring, memory::ppu::Register};

    fn poke(ppu: &mut Ppu, addr: u16, value: u8) {
        let [lo, hi] = addr.to_le_bytes();
        ppu.cpu_write(Register::Addr.addr(), hi);
        ppu.cpu_write(Register::Addr.addr(), lo);
        ppu.cpu_write(Register::Data.addr(), value);
    }

    #[test]
    fn pattern_table_uses_grey_ramp() {
        let mut ppu = Ppu::new();
        // Tile 0x11 of table 1, row 2: colors 1, 2, 3 in the first three pixels.
        poke(&mut ppu, 0x1112, 0b1010_0000);
        poke(&mut ppu, 0x111A, 0b0110_0000);

        let image = ppu.pattern_table_image(1);
        assert_eq!((image.width(), image.height()), (128, 128));
        let (x, y) = (8, 8 + 2);
        assert_eq!(image.color_index(x, y), 0x00);
        assert_eq!(image.color_index(x + 1, y), 0x10);
        assert_eq!(image.color_index(x + 2, y), 0x20);
        assert_eq!(image.color_index(x + 3, y), 0x0F);
        assert_eq!(ppu.pattern_table_image(0).color_index(x, y), 0x0F);
    }

    #[test]
    fn nametable_applies_attribute_palettes() {
        let mut ppu = Ppu::new();
        // Tile 1 solid color 1.
        for row in 0..8 {
            poke(&mut ppu, 0x0010 + row, 0xFF);
        }
        poke(&mut ppu, 0x3F00, 0x0F);
        poke(&mut ppu, 0x3F01, 0x11);
        poke(&mut ppu, 0x3F0D, 0x2C);
        // Tiles (0,0) and (2,0); the second sits in the top-right quadrant of
        // attribute byte 0, which selects palette 3.
        poke(&mut ppu, 0x2000, 0x01);
        poke(&mut ppu, 0x2002, 0x01);
        poke(&mut ppu, 0x23C0, 0b0000_1100);

        let image = ppu.nametable_image(0);
        assert_eq!((image.width(), image.height()), (256, 240));
        assert_eq!(image.color_index(3, 3), 0x11);
        assert_eq!(image.color_index(8 + 3, 3), 0x0F, "tile 0 shows the backdrop");
        assert_eq!(image.color_index(16 + 3, 3), 0x2C);
    }

    #[test]
    fn nametable_view_follows_mirroring() {
        let mut ppu = Ppu::new();
        ppu.attach_cartridge(&[], Mirroring::Vertical);
        for row in 0..8 {
            poke(&mut ppu, 0x0010 + row, 0xFF);
        }
        poke(&mut ppu, 0x3F01, 0x30);
        poke(&mut ppu, 0x2000, 0x01);
        assert_eq!(ppu.nametable_image(2), ppu.nametable_image(0));
        assert_ne!(ppu.nametable_image(1), ppu.nametable_image(0));
    }

    #[test]
    fn palette_swatches() {
        let mut ppu = Ppu::new();
        poke(&mut ppu, 0x3F05, 0x16);
        poke(&mut ppu, 0x3F1F, 0x2A);
        let image = ppu.palette_image();
        assert_eq!((image.width(), image.height()), (128, 16));
        assert_eq!(image.color_index(5 * 8, 0), 0x16);
        assert_eq!(image.color_index(5 * 8 + 7, 7), 0x16);
        assert_eq!(image.color_index(15 * 8 + 4, 12), 0x2A);
        assert_eq!(&image.to_rgba()[..4], &[84, 84, 84, 0xFF]);
    }
}
