//! Shared definitions for the NES memory map.
//!
//! Address ranges and vector locations live here so the bus, CPU and PPU agree
//! on one layout and no other module carries raw addresses.

/// CPU memory map details.
pub mod cpu {
    /// Size of the flat CPU address space.
    pub const ADDRESS_SPACE_SIZE: usize = 0x1_0000;

    /// First address of the hardware stack page.
    pub const STACK_PAGE_START: u16 = 0x0100;

    /// Reset vector low byte address (`$FFFC`).
    pub const RESET_VECTOR_LO: u16 = 0xFFFC;
    /// Reset vector high byte address (`$FFFD`).
    pub const RESET_VECTOR_HI: u16 = 0xFFFD;
    /// NMI vector low byte address (`$FFFA`).
    pub const NMI_VECTOR_LO: u16 = 0xFFFA;
    /// NMI vector high byte address (`$FFFB`).
    pub const NMI_VECTOR_HI: u16 = 0xFFFB;
    /// IRQ/BRK vector low byte address (`$FFFE`).
    pub const IRQ_VECTOR_LO: u16 = 0xFFFE;
    /// IRQ/BRK vector high byte address (`$FFFF`).
    pub const IRQ_VECTOR_HI: u16 = 0xFFFF;

    /// Last mirrored internal RAM address visible to the CPU (`$1FFF`).
    pub const INTERNAL_RAM_MIRROR_END: u16 = 0x1FFF;
    /// Size of the CPU internal RAM block (2 KiB mirrored through `$1FFF`).
    pub const INTERNAL_RAM_SIZE: usize = 0x0800;
    /// Mask applied to mirror CPU RAM accesses within `$0000-$1FFF`.
    pub const INTERNAL_RAM_MASK: u16 = (INTERNAL_RAM_SIZE as u16) - 1;

    /// First CPU address mapped to the PPU register mirror.
    pub const PPU_REGISTER_BASE: u16 = 0x2000;
    /// Last CPU address mirrored to the PPU register set.
    pub const PPU_REGISTER_END: u16 = 0x3FFF;

    /// First CPU-visible APU register.
    pub const APU_REGISTER_BASE: u16 = 0x4000;
    /// Sprite DMA trigger (`$4014`).
    pub const OAM_DMA: u16 = 0x4014;
    /// APU status register (`$4015`).
    pub const APU_STATUS: u16 = 0x4015;
    /// Controller port 1 strobe/read address (`$4016`).
    pub const CONTROLLER_PORT_1: u16 = 0x4016;
    /// Controller port 2 read address, frame counter on write (`$4017`).
    pub const CONTROLLER_PORT_2: u16 = 0x4017;

    /// Trainer load address (`$7000`).
    pub const TRAINER_START: u16 = 0x7000;
    /// PRG ROM window start address (`$8000`).
    pub const PRG_ROM_START: u16 = 0x8000;
    /// Upper 16 KiB PRG bank (`$C000`).
    pub const PRG_ROM_UPPER_START: u16 = 0xC000;
}

/// PPU register layout and VRAM mirror rules.
pub mod ppu {
    /// Mask for decoding register mirrors (`addr & 0x0007`).
    pub const REGISTER_SELECT_MASK: u16 = 0x0007;

    /// Size of the PPU address space.
    pub const ADDRESS_SPACE_SIZE: usize = 0x4000;
    /// Address mask applied to every VRAM access to wrap to the 16 KiB space.
    pub const VRAM_MIRROR_MASK: u16 = 0x3FFF;

    /// End of the pattern tables (exclusive).
    pub const PATTERN_TABLE_END: u16 = 0x2000;
    /// Pattern table base address for table 1.
    pub const PATTERN_TABLE_1: u16 = 0x1000;
    /// Total size of both pattern tables ($0000-$1FFF = 8 KiB).
    pub const CHR_SIZE: usize = 0x2000;

    /// Base address of nametable 0.
    pub const NAMETABLE_BASE: u16 = 0x2000;
    /// Size of a single nametable in bytes.
    pub const NAMETABLE_SIZE: u16 = 0x0400;
    /// Offset of the attribute table within a nametable.
    pub const ATTRIBUTE_OFFSET: u16 = 0x03C0;
    /// `$3000-$3EFF` mirrors `$2000-$2EFF`.
    pub const NAMETABLE_MIRROR_START: u16 = 0x3000;

    /// Palette RAM base address (`$3F00`).
    pub const PALETTE_BASE: u16 = 0x3F00;
    /// Palette mirroring period.
    pub const PALETTE_STRIDE: u16 = 0x20;

    /// Primary Object Attribute Memory (OAM) byte count.
    pub const OAM_RAM_SIZE: usize = 0x100;
    /// Secondary OAM byte count used during sprite evaluation.
    pub const SECONDARY_OAM_RAM_SIZE: usize = 0x20;

    /// CPU-visible PPU register identifiers.
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Register {
        /// `$2000` - PPUCTRL
        Control = 0x2000,
        /// `$2001` - PPUMASK
        Mask = 0x2001,
        /// `$2002` - PPUSTATUS
        Status = 0x2002,
        /// `$2003` - OAMADDR
        OamAddr = 0x2003,
        /// `$2004` - OAMDATA
        OamData = 0x2004,
        /// `$2005` - PPUSCROLL
        Scroll = 0x2005,
        /// `$2006` - PPUADDR
        Addr = 0x2006,
        /// `$2007` - PPUDATA
        Data = 0x2007,
    }

    impl Register {
        /// Raw address backing the register.
        pub const fn addr(self) -> u16 {
            self as u16
        }

        /// Resolves the register selected by a CPU address in `$2000-$3FFF`.
        pub const fn from_cpu_addr(addr: u16) -> Self {
            match addr & REGISTER_SELECT_MASK {
                0 => Self::Control,
                1 => Self::Mask,
                2 => Self::Status,
                3 => Self::OamAddr,
                4 => Self::OamData,
                5 => Self::Scroll,
                6 => Self::Addr,
                _ => Self::Data,
            }
        }
    }
}
