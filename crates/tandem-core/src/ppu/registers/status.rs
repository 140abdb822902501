use bitflags::bitflags;

bitflags! {
    /// PPUSTATUS (`$2002`). Only the top three bits are driven.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub(crate) struct Status: u8 {
        /// More than eight sprites found on a scanline (with the hardware's
        /// false positives and negatives).
        const SPRITE_OVERFLOW = 0b0010_0000;
        /// An opaque sprite 0 pixel overlapped an opaque background pixel.
        const SPRITE_ZERO_HIT = 0b0100_0000;
        /// Set at scanline 241 dot 1; cleared by reads and by the pre-render line.
        const VERTICAL_BLANK = 0b1000_0000;
    }
}
