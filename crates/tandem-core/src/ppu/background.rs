use std::collections::VecDeque;

use crate::ppu::{
    registers::{Control, VramAddr},
    vram::VideoMemory,
};

/// Tile-at-a-time background fetcher.
///
/// Each fetch turns one nametable entry into eight pixel values
/// (`palette << 2 | pattern bits`, leftmost pixel first) queued for the
/// compositor, which pops one per dot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct BackgroundPipeline {
    pixels: VecDeque<u8>,
}

impl BackgroundPipeline {
    /// Fetches the tile under `v` and queues its eight pixels. Coarse X moves
    /// on only while rendering is enabled.
    pub(crate) fn fetch_tile(
        &mut self,
        v: &mut VramAddr,
        control: Control,
        rendering: bool,
        memory: &VideoMemory,
    ) {
        let tile = memory.read(v.tile_addr());
        let attribute = memory.read(v.attribute_addr());
        let palette = (attribute >> v.attribute_shift()) & 0x03;

        let row = control.background_pattern_table() | (u16::from(tile) << 4) | u16::from(v.fine_y());
        let low = memory.read(row);
        let high = memory.read(row | 0x08);

        for bit in (0..8).rev() {
            let color = ((low >> bit) & 1) | (((high >> bit) & 1) << 1);
            self.pixels.push_back((palette << 2) | color);
        }

        if rendering {
            v.increment_x();
        }
    }

    /// Next background pixel, or 0 once the queue is exhausted.
    pub(crate) fn pop(&mut self) -> u8 {
        self.pixels.pop_front().unwrap_or(0)
    }

    /// Drops the first `fine_x` pixels of the scanline.
    pub(crate) fn skip(&mut self, fine_x: u8) {
        let n = usize::from(fine_x).min(self.pixels.len());
        self.pixels.drain(..n);
    }

    pub(crate) fn clear(&mut self) {
        self.pixels.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pixels.len()
    }
}
