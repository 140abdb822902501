//! Bit-range helpers for the 8-bit and 16-bit register words.
//!
//! Fields are addressed by their least significant bit and width, matching the
//! way register layouts are usually drawn:
//!
//! ```text
//! 14 13 12 11 10 9 8 7 6 5 4 3 2 1 0
//! [fine_y][nt][coarse_y ][coarse_x ]
//! ```
//!
//! `coarse_y` above is `extract(5, 5)`.

/// Range extraction and replacement on unsigned machine words.
pub trait BitRange: Copy {
    /// Returns `width` bits starting at `lsb`, shifted down to bit 0.
    fn extract(self, lsb: u32, width: u32) -> Self;

    /// Returns a copy with the `width` bits at `lsb` replaced by the low bits of `value`.
    fn with_bits(self, lsb: u32, width: u32, value: Self) -> Self;

    /// Returns a copy with the `width` bits at `lsb` cleared.
    fn without_bits(self, lsb: u32, width: u32) -> Self;

    /// Returns `true` when bit `n` is set.
    fn bit(self, n: u32) -> bool;
}

macro_rules! impl_bit_range {
    ($($ty:ty),*) => {
        $(
            impl BitRange for $ty {
                #[inline]
                fn extract(self, lsb: u32, width: u32) -> Self {
                    (self >> lsb) & field_mask::<$ty>(width)
                }

                #[inline]
                fn with_bits(self, lsb: u32, width: u32, value: Self) -> Self {
                    let mask = field_mask::<$ty>(width) << lsb;
                    (self & !mask) | ((value << lsb) & mask)
                }

                #[inline]
                fn without_bits(self, lsb: u32, width: u32) -> Self {
                    self & !(field_mask::<$ty>(width) << lsb)
                }

                #[inline]
                fn bit(self, n: u32) -> bool {
                    (self >> n) & 1 != 0
                }
            }
        )*
    };
}

impl_bit_range!(u8, u16);

trait Word: Copy {
    const BITS: u32;
    const MAX: Self;
    fn low_mask(width: u32) -> Self;
}

impl Word for u8 {
    const BITS: u32 = u8::BITS;
    const MAX: Self = u8::MAX;
    fn low_mask(width: u32) -> Self {
        (1u8 << width) - 1
    }
}

impl Word for u16 {
    const BITS: u32 = u16::BITS;
    const MAX: Self = u16::MAX;
    fn low_mask(width: u32) -> Self {
        (1u16 << width) - 1
    }
}

#[inline]
fn field_mask<T: Word>(width: u32) -> T {
    if width >= T::BITS {
        T::MAX
    } else {
        T::low_mask(width)
    }
}
