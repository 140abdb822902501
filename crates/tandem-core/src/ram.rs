use core::ops::{Deref, DerefMut};

/// Fixed-size, heap-backed byte array.
///
/// The CPU address space alone is 64 KiB, so storage is always boxed to keep
/// the console struct small enough to move around freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ram<const N: usize>(Box<[u8; N]>);

pub mod cpu {
    use crate::memory::cpu as cpu_mem;

    /// The whole CPU-visible address space backing store.
    pub type AddressSpace = super::Ram<{ cpu_mem::ADDRESS_SPACE_SIZE }>;
}

pub mod ppu {
    use crate::memory::ppu as ppu_mem;

    /// The whole PPU-visible address space backing store.
    pub type Vram = super::Ram<{ ppu_mem::ADDRESS_SPACE_SIZE }>;
    pub type OamRam = super::Ram<{ ppu_mem::OAM_RAM_SIZE }>;
    pub type SecondaryOamRam = super::Ram<{ ppu_mem::SECONDARY_OAM_RAM_SIZE }>;
}

impl<const N: usize> Ram<N> {
    pub fn new() -> Self {
        Self(Box::new([0; N]))
    }

    /// Creates storage with every byte set to `value`.
    pub fn filled(value: u8) -> Self {
        Self(Box::new([value; N]))
    }

    pub fn read(&self, addr: usize) -> u8 {
        self.0[addr % N]
    }

    pub fn write(&mut self, addr: usize, value: u8) {
        self.0[addr % N] = value;
    }

    /// Copies `data` into the storage starting at `offset`, clipping at the end.
    pub fn load(&mut self, offset: usize, data: &[u8]) {
        let end = (offset + data.len()).min(N);
        if offset < end {
            self.0[offset..end].copy_from_slice(&data[..end - offset]);
        }
    }
}

impl<const N: usize> Default for Ram<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Deref for Ram<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl<const N: usize> DerefMut for Ram<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut_slice()
    }
}
