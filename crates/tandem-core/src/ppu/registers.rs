//! CPU-visible PPU registers and the internal scroll latches.

mod control;
mod mask;
mod status;
mod vram_addr;
mod vram_registers;

pub(crate) use control::Control;
pub(crate) use mask::Mask;
pub(crate) use status::Status;
pub(crate) use vram_addr::VramAddr;
pub(crate) use vram_registers::VramRegisters;

/// `$2000-$2007` register state minus OAM, which the sprite unit owns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub(crate) struct Registers {
    pub(crate) control: Control,
    pub(crate) mask: Mask,
    pub(crate) status: Status,
    pub(crate) vram: VramRegisters,
    /// Delayed `$2007` read latch.
    pub(crate) read_buffer: u8,
}

impl Registers {
    /// PPUCTRL write; the nametable bits also land in `t`.
    pub(crate) fn write_control(&mut self, value: u8) {
        self.control = Control::from_bits_retain(value);
        self.vram.t.set_nametable(self.control.nametable_index());
    }

    /// PPUSTATUS read: returns the flags, then clears vblank and the write toggle.
    pub(crate) fn read_status(&mut self) -> u8 {
        let value = self.status.bits();
        self.status.remove(Status::VERTICAL_BLANK);
        self.vram.w = false;
        value
    }
}
