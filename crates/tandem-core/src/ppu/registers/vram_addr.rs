use crate::bits::BitRange;

const COARSE_X: (u32, u32) = (0, 5);
const COARSE_Y: (u32, u32) = (5, 5);
const NAMETABLE: (u32, u32) = (10, 2);
const FINE_Y: (u32, u32) = (12, 3);

/// Bits copied from `t` at dot 257: coarse X and the horizontal nametable bit.
const HORIZONTAL_BITS: u16 = 0x041F;
/// Bits copied from `t` during pre-render dots 280-304.
const VERTICAL_BITS: u16 = 0x7BE0;
const ADDRESS_BITS: u16 = 0x7FFF;

/// The 15-bit `v`/`t` scroll address.
///
/// ```text
/// 14 13 12 11 10 9 8 7 6 5 4 3 2 1 0
///  fine_y   nt    coarse_y  coarse_x
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub(crate) struct VramAddr(u16);

impl VramAddr {
    pub(crate) fn new(raw: u16) -> Self {
        Self(raw & ADDRESS_BITS)
    }

    pub(crate) fn raw(self) -> u16 {
        self.0
    }

    pub(crate) fn coarse_x(self) -> u8 {
        self.0.extract(COARSE_X.0, COARSE_X.1) as u8
    }

    pub(crate) fn set_coarse_x(&mut self, value: u8) {
        self.0 = self.0.with_bits(COARSE_X.0, COARSE_X.1, u16::from(value));
    }

    pub(crate) fn coarse_y(self) -> u8 {
        self.0.extract(COARSE_Y.0, COARSE_Y.1) as u8
    }

    pub(crate) fn set_coarse_y(&mut self, value: u8) {
        self.0 = self.0.with_bits(COARSE_Y.0, COARSE_Y.1, u16::from(value));
    }

    pub(crate) fn nametable(self) -> u8 {
        self.0.extract(NAMETABLE.0, NAMETABLE.1) as u8
    }

    pub(crate) fn set_nametable(&mut self, value: u8) {
        self.0 = self.0.with_bits(NAMETABLE.0, NAMETABLE.1, u16::from(value));
    }

    pub(crate) fn fine_y(self) -> u8 {
        self.0.extract(FINE_Y.0, FINE_Y.1) as u8
    }

    pub(crate) fn set_fine_y(&mut self, value: u8) {
        self.0 = self.0.with_bits(FINE_Y.0, FINE_Y.1, u16::from(value));
    }

    /// Replaces bits `lsb..lsb + width`, used by the two-write register protocols.
    pub(crate) fn set_bits(&mut self, lsb: u32, width: u32, value: u16) {
        self.0 = self.0.with_bits(lsb, width, value) & ADDRESS_BITS;
    }

    /// Advances after a `$2007` access; the 15-bit latch wraps.
    pub(crate) fn increment(&mut self, step: u16) {
        self.0 = self.0.wrapping_add(step) & ADDRESS_BITS;
    }

    /// Moves one tile right, wrapping into the horizontally adjacent nametable.
    pub(crate) fn increment_x(&mut self) {
        if self.coarse_x() == 31 {
            self.set_coarse_x(0);
            self.0 ^= 0x0400;
        } else {
            self.0 += 1;
        }
    }

    /// Moves one pixel row down.
    ///
    /// Coarse Y wraps at 29 into the vertically adjacent nametable; values
    /// 30 and 31 (attribute rows) wrap to 0 without switching.
    pub(crate) fn increment_y(&mut self) {
        let fine_y = self.fine_y();
        if fine_y < 7 {
            self.set_fine_y(fine_y + 1);
            return;
        }
        self.set_fine_y(0);
        match self.coarse_y() {
            29 => {
                self.set_coarse_y(0);
                self.0 ^= 0x0800;
            }
            31 => self.set_coarse_y(0),
            y => self.set_coarse_y(y + 1),
        }
    }

    pub(crate) fn copy_horizontal(&mut self, t: VramAddr) {
        self.0 = (self.0 & !HORIZONTAL_BITS) | (t.0 & HORIZONTAL_BITS);
    }

    pub(crate) fn copy_vertical(&mut self, t: VramAddr) {
        self.0 = (self.0 & !VERTICAL_BITS) | (t.0 & VERTICAL_BITS);
    }

    /// Nametable byte address for the tile under `v`.
    pub(crate) fn tile_addr(self) -> u16 {
        0x2000 | (self.0 & 0x0FFF)
    }

    /// Attribute byte address covering the tile under `v`.
    pub(crate) fn attribute_addr(self) -> u16 {
        0x23C0 | (self.0 & 0x0C00) | ((self.0 >> 4) & 0x38) | ((self.0 >> 2) & 0x07)
    }

    /// Shift selecting this tile's 2-bit quadrant within its attribute byte.
    pub(crate) fn attribute_shift(self) -> u8 {
        ((self.coarse_y() & 0x02) << 1) | (self.coarse_x() & 0x02)
    }
}

impl std::fmt::Debug for VramAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VramAddr")
            .field("raw", &format_args!("{:#06X}", self.0))
            .field("fine_y", &self.fine_y())
            .field("nametable", &self.nametable())
            .field("coarse_y", &self.coarse_y())
            .field("coarse_x", &self.coarse_x())
            .finish()
    }
}
