use bitflags::bitflags;

use crate::memory::ppu as ppu_mem;

bitflags! {
    /// PPUCTRL (`$2000`).
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// V P H B S I N N
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub(crate) struct Control: u8 {
        /// Base nametable select, copied into `t` bits 10-11.
        const NAMETABLE = 0b0000_0011;
        /// `$2007` accesses advance `v` by 32 instead of 1.
        const INCREMENT_32 = 0b0000_0100;
        /// 8x8 sprite pattern table at `$1000`.
        const SPRITE_TABLE = 0b0000_1000;
        /// Background pattern table at `$1000`.
        const BACKGROUND_TABLE = 0b0001_0000;
        /// 8x16 sprites.
        const SPRITE_SIZE_16 = 0b0010_0000;
        /// Raise NMI when vblank starts.
        const GENERATE_NMI = 0b1000_0000;
    }
}

impl Control {
    pub(crate) fn nametable_index(self) -> u8 {
        (self & Control::NAMETABLE).bits()
    }

    pub(crate) fn vram_increment(self) -> u16 {
        if self.contains(Control::INCREMENT_32) { 32 } else { 1 }
    }

    pub(crate) fn sprite_pattern_table(self) -> u16 {
        if self.contains(Control::SPRITE_TABLE) {
            ppu_mem::PATTERN_TABLE_1
        } else {
            0
        }
    }

    pub(crate) fn background_pattern_table(self) -> u16 {
        if self.contains(Control::BACKGROUND_TABLE) {
            ppu_mem::PATTERN_TABLE_1
        } else {
            0
        }
    }

    /// Sprite height in scanlines: 8, or 16 in 8x16 mode.
    pub(crate) fn sprite_height(self) -> u16 {
        if self.contains(Control::SPRITE_SIZE_16) { 16 } else { 8 }
    }

    pub(crate) fn nmi_enabled(self) -> bool {
        self.contains(Control::GENERATE_NMI)
    }
}
