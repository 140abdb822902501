//! Sprite unit: primary/secondary OAM, per-scanline evaluation and the
//! sprite pixel line buffer.
//!
//! Evaluation for scanline `n` runs during `n` itself and fans the selected
//! sprites out into a 256-entry line buffer that the compositor drains on
//! scanline `n + 1`, matching the one-line delay of sprite Y coordinates.

use bitflags::bitflags;

use crate::{
    display::SCREEN_WIDTH,
    memory::ppu as ppu_mem,
    ppu::{
        registers::{Control, Status},
        vram::VideoMemory,
    },
    ram::ppu::{OamRam, SecondaryOamRam},
};

const SPRITE_BYTES: usize = 4;
const SECONDARY_SLOTS: usize = ppu_mem::SECONDARY_OAM_RAM_SIZE / SPRITE_BYTES;
const PRIMARY_ENTRIES: u8 = (ppu_mem::OAM_RAM_SIZE / SPRITE_BYTES) as u8;
/// OAMDATA writes to attribute bytes drop the unimplemented bits 2-4.
const ATTRIBUTE_WRITE_MASK: u8 = 0xE3;

bitflags! {
    /// Sprite attribute byte (OAM byte 2).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct SpriteAttributes: u8 {
        const PALETTE = 0b0000_0011;
        /// Drawn behind opaque background pixels.
        const BEHIND_BACKGROUND = 0b0010_0000;
        const FLIP_HORIZONTAL = 0b0100_0000;
        const FLIP_VERTICAL = 0b1000_0000;
    }
}

/// One packed entry of the sprite line buffer.
///
/// ```text
/// 7 6 5 4 3 2 1 0
/// W B Z 1 p p c c
/// ```
/// `cc` color, `pp` palette, bit 4 selects the sprite half of palette RAM,
/// `Z` sprite 0, `B` behind background, `W` written this line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) struct SpritePixel(u8);

impl SpritePixel {
    const SPRITE_PALETTE: u8 = 0x10;
    const SPRITE_ZERO: u8 = 0x20;
    const BEHIND: u8 = 0x40;
    const WRITTEN: u8 = 0x80;

    pub(crate) fn new(color: u8, attributes: SpriteAttributes, sprite_zero: bool) -> Self {
        let mut bits = Self::WRITTEN | Self::SPRITE_PALETTE | (color & 0x03);
        bits |= (attributes & SpriteAttributes::PALETTE).bits() << 2;
        if attributes.contains(SpriteAttributes::BEHIND_BACKGROUND) {
            bits |= Self::BEHIND;
        }
        if sprite_zero {
            bits |= Self::SPRITE_ZERO;
        }
        Self(bits)
    }

    #[cfg(test)]
    pub(crate) fn bits(self) -> u8 {
        self.0
    }

    /// 2-bit pattern color; 0 is transparent.
    pub(crate) fn color(self) -> u8 {
        self.0 & 0x03
    }

    /// Offset into palette RAM (`$3F10-$3F1F` half).
    pub(crate) fn palette_index(self) -> u8 {
        self.0 & 0x1F
    }

    pub(crate) fn is_sprite_zero(self) -> bool {
        self.0 & Self::SPRITE_ZERO != 0
    }

    pub(crate) fn behind_background(self) -> bool {
        self.0 & Self::BEHIND != 0
    }
}

/// Timing inputs for one sprite-unit dot.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Dot {
    pub(crate) scanline: u16,
    pub(crate) cycle: u16,
    pub(crate) control: Control,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpriteUnit {
    primary: OamRam,
    secondary: SecondaryOamRam,
    /// OAMADDR.
    addr: u8,
    line: Box<[SpritePixel; SCREEN_WIDTH]>,
    /// Secondary OAM clear window is active; OAMDATA reads see `$FF`.
    clearing: bool,
    /// Next primary entry to examine.
    n: u8,
    /// Byte offset within the entry; only drifts during overflow scanning.
    m: u8,
    /// Next free byte in secondary OAM.
    secondary_len: usize,
    evaluation_done: bool,
    /// Primary entry 0 was copied into secondary slot 0 this line.
    sprite_zero_selected: bool,
    /// Sprite height in effect when each secondary slot was filled.
    heights: [u8; SECONDARY_SLOTS],
}

impl Default for SpriteUnit {
    fn default() -> Self {
        Self {
            primary: OamRam::filled(0xFF),
            secondary: SecondaryOamRam::filled(0xFF),
            addr: 0,
            line: Box::new([SpritePixel::default(); SCREEN_WIDTH]),
            clearing: false,
            n: 0,
            m: 0,
            secondary_len: 0,
            evaluation_done: false,
            sprite_zero_selected: false,
            heights: [8; SECONDARY_SLOTS],
        }
    }
}

impl SpriteUnit {
    pub(crate) fn write_addr(&mut self, value: u8) {
        self.addr = value;
    }

    /// OAMDATA read. Does not advance the pointer.
    pub(crate) fn read_data(&self) -> u8 {
        if self.clearing {
            0xFF
        } else {
            self.primary.read(usize::from(self.addr))
        }
    }

    /// OAMDATA write: stores at the pointer and advances it.
    pub(crate) fn write_data(&mut self, value: u8) {
        let value = if self.addr % 4 == 2 {
            value & ATTRIBUTE_WRITE_MASK
        } else {
            value
        };
        self.primary.write(usize::from(self.addr), value);
        self.addr = self.addr.wrapping_add(1);
    }

    /// OAM DMA: 256 bytes stored from the current pointer onward, wrapping.
    pub(crate) fn dma(&mut self, page: &[u8]) {
        let mut addr = self.addr;
        for &byte in page {
            self.primary.write(usize::from(addr), byte);
            addr = addr.wrapping_add(1);
        }
    }

    /// Takes the buffered sprite pixel for column `x`, leaving the slot empty.
    pub(crate) fn take_pixel(&mut self, x: usize) -> SpritePixel {
        self.line.get_mut(x).map(std::mem::take).unwrap_or_default()
    }

    pub(crate) fn clear_line(&mut self) {
        self.line.fill(SpritePixel::default());
        self.clearing = false;
    }

    /// A visible dot went by with rendering off; the clear window cannot be open.
    pub(crate) fn idle(&mut self) {
        self.clearing = false;
    }

    pub(crate) fn primary(&self) -> &[u8] {
        &self.primary
    }

    /// Advances the sprite unit by one dot of a visible scanline with rendering on.
    pub(crate) fn tick(&mut self, dot: Dot, status: &mut Status, memory: &VideoMemory) {
        match dot.cycle {
            1..=64 => {
                self.clearing = true;
                if dot.cycle % 2 == 0 {
                    let slot = usize::from(dot.cycle / 2 - 1);
                    let value = self.read_data();
                    self.secondary.write(slot, value);
                }
                if dot.cycle == 64 {
                    self.clearing = false;
                    self.n = 0;
                    self.m = 0;
                    self.secondary_len = 0;
                    self.evaluation_done = false;
                    self.sprite_zero_selected = false;
                }
            }
            65..=256 => {
                if !self.evaluation_done {
                    self.evaluate(dot, status);
                }
            }
            257..=320 => {
                self.addr = 0;
                if dot.cycle % 8 == 0 {
                    let slot = usize::from(dot.cycle / 8 - 33);
                    self.fetch(slot, dot, memory);
                }
            }
            _ => {}
        }
    }

    /// One evaluation step: examines a single primary entry.
    fn evaluate(&mut self, dot: Dot, status: &mut Status) {
        let height = dot.control.sprite_height();
        let base = usize::from(self.n) * SPRITE_BYTES;

        if self.secondary_len < ppu_mem::SECONDARY_OAM_RAM_SIZE {
            let y = self.primary.read(base);
            if in_range(y, dot.scanline, height) {
                self.heights[self.secondary_len / SPRITE_BYTES] = height as u8;
                for i in 0..SPRITE_BYTES {
                    self.secondary
                        .write(self.secondary_len + i, self.primary.read(base + i));
                }
                if self.n == 0 {
                    self.sprite_zero_selected = true;
                }
                self.secondary_len += SPRITE_BYTES;
            }
        } else {
            // Secondary OAM is full. The hardware keeps going but bumps the
            // byte offset on every miss, so it compares tile, attribute and
            // X bytes as if they were Y coordinates.
            let y = self.primary.read(base + usize::from(self.m));
            if in_range(y, dot.scanline, height) {
                status.insert(Status::SPRITE_OVERFLOW);
                self.evaluation_done = true;
                return;
            }
            self.m = (self.m + 1) & 0x03;
        }

        self.n += 1;
        if self.n == PRIMARY_ENTRIES {
            self.evaluation_done = true;
        }
    }

    /// Fetches pattern data for secondary slot `slot` and fans it out into
    /// the line buffer for the next scanline.
    fn fetch(&mut self, slot: usize, dot: Dot, memory: &VideoMemory) {
        if slot >= SECONDARY_SLOTS || slot * SPRITE_BYTES >= self.secondary_len {
            return;
        }
        let base = slot * SPRITE_BYTES;
        let y = self.secondary.read(base);
        let tile = self.secondary.read(base + 1);
        let attributes = SpriteAttributes::from_bits_truncate(self.secondary.read(base + 2));
        let x = usize::from(self.secondary.read(base + 3));

        let Some(row) = dot.scanline.checked_sub(u16::from(y)) else {
            return;
        };
        let height = u16::from(self.heights[slot]);
        if row >= height {
            return;
        }
        let addr = pattern_addr(tile, row, attributes, height, dot.control);
        let low = memory.read(addr);
        let high = memory.read(addr | 0x08);
        let sprite_zero = slot == 0 && self.sprite_zero_selected;

        for i in 0..8u8 {
            let bit = if attributes.contains(SpriteAttributes::FLIP_HORIZONTAL) {
                i
            } else {
                7 - i
            };
            let color = ((low >> bit) & 1) | (((high >> bit) & 1) << 1);
            let Some(cell) = self.line.get_mut(x + usize::from(i)) else {
                break;
            };
            // Lower OAM indices were fanned out first and win.
            if cell.color() == 0 {
                *cell = SpritePixel::new(color, attributes, sprite_zero);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn secondary(&self) -> &[u8] {
        &self.secondary
    }
}

fn in_range(y: u8, scanline: u16, height: u16) -> bool {
    let y = u16::from(y);
    y <= scanline && scanline < y + height
}

/// Pattern-table address of `row` (0-based from the sprite's top) of a sprite
/// selected with `height` (8 or 16). The row is folded into that height.
fn pattern_addr(
    tile: u8,
    row: u16,
    attributes: SpriteAttributes,
    height: u16,
    control: Control,
) -> u16 {
    let last = height - 1;
    let row = row & last;
    let row = if attributes.contains(SpriteAttributes::FLIP_VERTICAL) {
        last - row
    } else {
        row
    };
    if height == 16 {
        let table = u16::from(tile & 1) * ppu_mem::PATTERN_TABLE_1;
        let tile = u16::from(tile & 0xFE) + (row >> 3);
        table | (tile << 4) | (row & 0x07)
    } else {
        control.sprite_pattern_table() | (u16::from(tile) << 4) | row
    }
}
