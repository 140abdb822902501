use std::fmt::Debug;

use crate::memory;

pub mod cpu;
#[cfg(test)]
pub(crate) mod mock;

/// Expose the CPU stack page start address for stack helpers.
pub(crate) const STACK_ADDR: u16 = memory::cpu::STACK_PAGE_START;

/// The CPU's view of the machine.
///
/// Every CPU memory access and every elapsed CPU cycle goes through this
/// trait, so the implementation decides what the PPU and other devices see
/// and when.
pub trait Bus: Debug {
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, data: u8);

    /// Side-effect-free read for vectors, tracing and debuggers.
    fn peek(&self, addr: u16) -> u8;

    /// Accounts for `cycles` CPU cycles, clocking the PPU three dots per cycle.
    fn tick(&mut self, cycles: u32);

    /// CPU cycles elapsed since power-on.
    fn total_cycles(&self) -> u64;

    /// Drains stall cycles requested by devices (OAM DMA).
    fn take_stall_cycles(&mut self) -> u32 {
        0
    }

    /// Level of the PPU's NMI output: vblank flag and NMI enable both set.
    fn nmi_line(&self) -> bool {
        false
    }

    /// Whether the PPU vblank status bit is currently set.
    fn in_vblank(&self) -> bool {
        false
    }
}

// Allow mutable references to Bus implementors (including trait objects) to be used
// wherever a Bus is expected.
impl<T: Bus + ?Sized> Bus for &mut T {
    fn read(&mut self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        (**self).write(addr, data)
    }

    fn peek(&self, addr: u16) -> u8 {
        (**self).peek(addr)
    }

    fn tick(&mut self, cycles: u32) {
        (**self).tick(cycles)
    }

    fn total_cycles(&self) -> u64 {
        (**self).total_cycles()
    }

    fn take_stall_cycles(&mut self) -> u32 {
        (**self).take_stall_cycles()
    }

    fn nmi_line(&self) -> bool {
        (**self).nmi_line()
    }

    fn in_vblank(&self) -> bool {
        (**self).in_vblank()
    }
}
