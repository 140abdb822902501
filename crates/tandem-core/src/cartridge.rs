use std::{fs, path::Path};

use tracing::{debug, warn};

use crate::{
    cartridge::header::{Header, Mirroring, NES_HEADER_LEN, PRG_BANK_SIZE},
    error::Error,
    memory::cpu as cpu_mem,
    ram::cpu::AddressSpace,
};

pub mod header;

/// Size of the optional trainer block that precedes PRG ROM.
pub const TRAINER_SIZE: usize = 512;

/// A parsed NROM cartridge image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cartridge {
    header: Header,
    trainer: Option<Box<[u8]>>,
    prg_rom: Box<[u8]>,
    chr_rom: Box<[u8]>,
}

impl Cartridge {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn mirroring(&self) -> Mirroring {
        self.header.mirroring
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    /// CHR ROM contents; empty when the board uses CHR RAM.
    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn trainer(&self) -> Option<&[u8]> {
        self.trainer.as_deref()
    }

    /// Copies the trainer and PRG ROM into the CPU address space.
    ///
    /// A single 16 KiB bank is visible at both `$8000` and `$C000`.
    pub(crate) fn map_prg(&self, space: &mut AddressSpace) {
        if let Some(trainer) = self.trainer() {
            space.load(cpu_mem::TRAINER_START as usize, trainer);
        }
        space.load(cpu_mem::PRG_ROM_START as usize, &self.prg_rom);
        if self.prg_rom.len() == PRG_BANK_SIZE {
            space.load(cpu_mem::PRG_ROM_UPPER_START as usize, &self.prg_rom);
        }
    }
}

/// Load a cartridge from an in-memory byte slice.
pub fn load_cartridge(bytes: &[u8]) -> Result<Cartridge, Error> {
    let header = Header::parse(bytes)?;
    if header.mapper != 0 {
        warn!(
            mapper = header.mapper,
            "mapper is not emulated; running the image with NROM wiring"
        );
    }

    let mut cursor = NES_HEADER_LEN;
    let trainer = if header.trainer_present {
        Some(section(bytes, &mut cursor, TRAINER_SIZE, "trainer")?)
    } else {
        None
    };
    let prg_rom = section(bytes, &mut cursor, header.prg_rom_size(), "PRG ROM")?;
    let chr_rom = section(bytes, &mut cursor, header.chr_rom_size(), "CHR ROM")?;

    debug!(
        prg_banks = header.prg_banks,
        chr_banks = header.chr_banks,
        mirroring = ?header.mirroring,
        trainer = header.trainer_present,
        "parsed iNES image"
    );

    Ok(Cartridge {
        header,
        trainer,
        prg_rom,
        chr_rom,
    })
}

/// Load a cartridge directly from disk.
pub fn load_cartridge_from_file<P>(path: P) -> Result<Cartridge, Error>
where
    P: AsRef<Path>,
{
    let bytes = fs::read(path)?;
    load_cartridge(&bytes)
}

fn section(
    bytes: &[u8],
    cursor: &mut usize,
    len: usize,
    name: &'static str,
) -> Result<Box<[u8]>, Error> {
    let start = *cursor;
    let end = start + len;
    let slice = bytes.get(start..end).ok_or(Error::SectionTooShort {
        section: name,
        expected: len,
        actual: bytes.len().saturating_sub(start),
    })?;
    *cursor = end;
    Ok(slice.into())
}
