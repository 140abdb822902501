use tracing::trace;

use crate::{cartridge::header::Mirroring, memory::ppu as ppu_mem, ram::ppu::Vram};

/// The PPU's 16 KiB address space with nametable and palette folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VideoMemory {
    cells: Vram,
    mirroring: Mirroring,
    /// Pattern tables are CHR RAM rather than ROM.
    chr_writable: bool,
}

impl Default for VideoMemory {
    fn default() -> Self {
        Self {
            cells: Vram::new(),
            mirroring: Mirroring::default(),
            chr_writable: true,
        }
    }
}

impl VideoMemory {
    /// Installs cartridge CHR. An empty slice means the board carries CHR RAM.
    pub(crate) fn attach_chr(&mut self, chr: &[u8]) {
        self.cells[..ppu_mem::CHR_SIZE].fill(0);
        self.cells.load(0, chr);
        self.chr_writable = chr.is_empty();
    }

    pub(crate) fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub(crate) fn set_mirroring(&mut self, mirroring: Mirroring) {
        self.mirroring = mirroring;
    }

    pub(crate) fn read(&self, addr: u16) -> u8 {
        self.cells.read(self.map(addr) as usize)
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        let addr = self.map(addr);
        if addr < ppu_mem::PATTERN_TABLE_END && !self.chr_writable {
            trace!(addr = format_args!("{addr:#06X}"), "write to CHR ROM ignored");
            return;
        }
        self.cells.write(addr as usize, value);
    }

    /// Folds an address onto the cell that actually backs it.
    pub(crate) fn map(&self, addr: u16) -> u16 {
        let addr = addr & ppu_mem::VRAM_MIRROR_MASK;
        match addr {
            0x0000..0x2000 => addr,
            0x2000..0x3F00 => self.map_nametable(addr),
            _ => {
                let mut index = addr % ppu_mem::PALETTE_STRIDE;
                // Sprite backdrop entries alias the background ones.
                if index & 0x13 == 0x10 {
                    index &= 0x0F;
                }
                ppu_mem::PALETTE_BASE + index
            }
        }
    }

    fn map_nametable(&self, addr: u16) -> u16 {
        let addr = if addr >= ppu_mem::NAMETABLE_MIRROR_START {
            addr - 0x1000
        } else {
            addr
        };
        let offset = addr % ppu_mem::NAMETABLE_SIZE;
        let table = (addr - ppu_mem::NAMETABLE_BASE) / ppu_mem::NAMETABLE_SIZE;
        let physical = match self.mirroring {
            Mirroring::Horizontal => table >> 1,
            Mirroring::Vertical => table & 1,
            Mirroring::FourScreen => table,
        };
        ppu_mem::NAMETABLE_BASE + physical * ppu_mem::NAMETABLE_SIZE + offset
    }
}
