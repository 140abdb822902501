//! iNES header parsing.
//!
//! The first 16 bytes of every `.nes` ROM describe how much PRG/CHR data
//! follows, which mapper the board uses, and how the nametables are wired:
//!
//! ```text
//! 0-3  "NES" 0x1A
//! 4    PRG ROM size in 16 KiB units
//! 5    CHR ROM size in 8 KiB units (0 = board carries CHR RAM)
//! 6    flags 6: mirroring, battery, trainer, four-screen, mapper low nibble
//! 7    flags 7: console type, NES 2.0 marker, mapper high nibble
//! 8-15 unused by this core
//! ```

use bitflags::bitflags;

use crate::error::Error;

pub(crate) const NES_MAGIC: &[u8; 4] = b"NES\x1A";

/// Size of the fixed iNES header in bytes.
pub const NES_HEADER_LEN: usize = 16;

/// Size of one PRG ROM bank.
pub const PRG_BANK_SIZE: usize = 0x4000;
/// Size of one CHR ROM bank.
pub const CHR_BANK_SIZE: usize = 0x2000;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags6: u8 {
        const MIRRORING        = 0b0000_0001;
        const BATTERY          = 0b0000_0010;
        const TRAINER          = 0b0000_0100;
        const FOUR_SCREEN      = 0b0000_1000;
        const MAPPER_LOW_MASK  = 0b1111_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags7: u8 {
        const VS_UNISYSTEM     = 0b0000_0001;
        const PLAYCHOICE_10    = 0b0000_0010;
        const NES2_DETECTION   = 0b0000_1100;
        const MAPPER_HIGH_MASK = 0b1111_0000;
    }
}

/// Layout mirroring type for the PPU nametables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mirroring {
    /// `$2000`/`$2400` share a page, as do `$2800`/`$2C00`. Used by vertically scrolling games.
    #[default]
    Horizontal,
    /// `$2000`/`$2800` share a page, as do `$2400`/`$2C00`. Used by horizontally scrolling games.
    Vertical,
    /// Cartridge supplies its own four nametables.
    FourScreen,
}

/// Decoded iNES header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Number of 16 KiB PRG banks (1 or 2).
    pub prg_banks: u8,
    /// Number of 8 KiB CHR banks (0 or 1).
    pub chr_banks: u8,
    pub mirroring: Mirroring,
    pub trainer_present: bool,
    pub battery_backed: bool,
    /// iNES mapper number. Only 0 (NROM) is emulated.
    pub mapper: u8,
}

impl Header {
    /// Parses and validates the 16-byte header.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < NES_HEADER_LEN {
            return Err(Error::TooShort {
                actual: bytes.len(),
            });
        }
        if &bytes[..4] != NES_MAGIC {
            return Err(Error::InvalidMagic);
        }

        let prg_banks = bytes[4];
        let chr_banks = bytes[5];
        let flags6 = Flags6::from_bits_retain(bytes[6]);
        let flags7 = Flags7::from_bits_retain(bytes[7]);

        match prg_banks {
            1 | 2 => {}
            0 => return Err(Error::MissingPrgRom),
            banks => return Err(Error::PrgTooLarge { banks }),
        }
        if chr_banks > 1 {
            return Err(Error::ChrTooLarge { banks: chr_banks });
        }

        let mirroring = if flags6.contains(Flags6::FOUR_SCREEN) {
            Mirroring::FourScreen
        } else if flags6.contains(Flags6::MIRRORING) {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let mapper = (flags7 & Flags7::MAPPER_HIGH_MASK).bits()
            | ((flags6 & Flags6::MAPPER_LOW_MASK).bits() >> 4);

        Ok(Self {
            prg_banks,
            chr_banks,
            mirroring,
            trainer_present: flags6.contains(Flags6::TRAINER),
            battery_backed: flags6.contains(Flags6::BATTERY),
            mapper,
        })
    }

    /// PRG ROM payload length in bytes.
    pub fn prg_rom_size(&self) -> usize {
        self.prg_banks as usize * PRG_BANK_SIZE
    }

    /// CHR ROM payload length in bytes.
    pub fn chr_rom_size(&self) -> usize {
        self.chr_banks as usize * CHR_BANK_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(prg: u8, chr: u8, flags6: u8, flags7: u8) -> [u8; NES_HEADER_LEN] {
        let mut bytes = [0u8; NES_HEADER_LEN];
        bytes[..4].copy_from_slice(NES_MAGIC);
        bytes[4] = prg;
        bytes[5] = chr;
        bytes[6] = flags6;
        bytes[7] = flags7;
        bytes
    }

    #[test]
    fn parses_nrom_header() {
        let parsed = Header::parse(&header(2, 1, 0b0000_0101, 0)).expect("valid header");
        assert_eq!(parsed.prg_banks, 2);
        assert_eq!(parsed.chr_banks, 1);
        assert_eq!(parsed.mirroring, Mirroring::Vertical);
        assert!(parsed.trainer_present);
        assert_eq!(parsed.mapper, 0);
        assert_eq!(parsed.prg_rom_size(), 0x8000);
        assert_eq!(parsed.chr_rom_size(), 0x2000);
    }

    #[test]
    fn mapper_nibbles_combine() {
        let parsed = Header::parse(&header(1, 0, 0x10, 0x40)).expect("valid header");
        assert_eq!(parsed.mapper, 0x41);
        assert_eq!(parsed.mirroring, Mirroring::Horizontal);
    }

    #[test]
    fn four_screen_overrides_mirroring_bit() {
        let parsed = Header::parse(&header(1, 1, 0b0000_1001, 0)).expect("valid header");
        assert_eq!(parsed.mirroring, Mirroring::FourScreen);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = header(1, 1, 0, 0);
        bytes[3] = 0x1B;
        assert!(matches!(Header::parse(&bytes), Err(Error::InvalidMagic)));
    }

    #[test]
    fn rejects_oversized_sections() {
        assert!(matches!(
            Header::parse(&header(3, 1, 0, 0)),
            Err(Error::PrgTooLarge { banks: 3 })
        ));
        assert!(matches!(
            Header::parse(&header(2, 2, 0, 0)),
            Err(Error::ChrTooLarge { banks: 2 })
        ));
        assert!(matches!(
            Header::parse(&header(0, 1, 0, 0)),
            Err(Error::MissingPrgRom)
        ));
    }

    #[test]
    fn rejects_short_input() {
        assert!(matches!(
            Header::parse(&[0x4E, 0x45, 0x53]),
            Err(Error::TooShort { actual: 3 })
        ));
    }
}
