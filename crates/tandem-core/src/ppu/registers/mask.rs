use bitflags::bitflags;

bitflags! {
    /// PPUMASK (`$2001`).
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// B G R s b M m g
    /// ```
    /// The upper three bits emphasize blue, green and red; `g` selects greyscale.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub(crate) struct Mask: u8 {
        const GRAYSCALE = 0b0000_0001;
        /// Background visible in columns 0-7.
        const SHOW_BACKGROUND_LEFT = 0b0000_0010;
        /// Sprites visible in columns 0-7.
        const SHOW_SPRITES_LEFT = 0b0000_0100;
        const SHOW_BACKGROUND = 0b0000_1000;
        const SHOW_SPRITES = 0b0001_0000;
        const EMPHASIZE_RED = 0b0010_0000;
        const EMPHASIZE_GREEN = 0b0100_0000;
        const EMPHASIZE_BLUE = 0b1000_0000;
    }
}

impl Mask {
    /// Either layer enabled. Scroll updates and sprite evaluation only run
    /// while this holds.
    pub(crate) fn rendering_enabled(self) -> bool {
        self.intersects(Mask::SHOW_BACKGROUND | Mask::SHOW_SPRITES)
    }

    /// Whether the background layer is drawn at column `x`.
    pub(crate) fn background_visible_at(self, x: u16) -> bool {
        self.contains(Mask::SHOW_BACKGROUND) && (x >= 8 || self.contains(Mask::SHOW_BACKGROUND_LEFT))
    }

    /// Whether the sprite layer is drawn at column `x`.
    pub(crate) fn sprites_visible_at(self, x: u16) -> bool {
        self.contains(Mask::SHOW_SPRITES) && (x >= 8 || self.contains(Mask::SHOW_SPRITES_LEFT))
    }
}
