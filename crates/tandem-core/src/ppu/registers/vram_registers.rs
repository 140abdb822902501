use super::VramAddr;

/// Loopy registers: current address `v`, temporary address `t`, fine X and
/// the shared write toggle `w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) struct VramRegisters {
    pub(crate) v: VramAddr,
    pub(crate) t: VramAddr,
    /// Fine X scroll (0..7).
    pub(crate) x: u8,
    /// `false` before the first write of a pair.
    pub(crate) w: bool,
}

impl VramRegisters {
    /// `$2005`: coarse/fine X on the first write, coarse/fine Y on the second.
    pub(crate) fn write_scroll(&mut self, value: u8) {
        if self.w {
            self.t.set_coarse_y(value >> 3);
            self.t.set_fine_y(value & 0x07);
        } else {
            self.t.set_coarse_x(value >> 3);
            self.x = value & 0x07;
        }
        self.w = !self.w;
    }

    /// `$2006`: high six bits first (bit 14 cleared), then the low byte,
    /// which also transfers `t` into `v`.
    pub(crate) fn write_addr(&mut self, value: u8) {
        if self.w {
            self.t.set_bits(0, 8, u16::from(value));
            self.v = self.t;
        } else {
            self.t.set_bits(8, 7, u16::from(value & 0x3F));
        }
        self.w = !self.w;
    }
}
