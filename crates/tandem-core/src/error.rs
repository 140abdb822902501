use thiserror::Error;

use crate::cartridge::header::NES_HEADER_LEN;

/// Failures raised while turning a ROM image into a cartridge.
#[derive(Debug, Error)]
pub enum Error {
    /// Provided buffer is shorter than the 16-byte header.
    #[error("header expected {expected} bytes, got {actual}", expected = NES_HEADER_LEN)]
    TooShort { actual: usize },
    /// Magic number ("NES<EOF>") is missing.
    #[error("missing NES magic bytes")]
    InvalidMagic,
    /// Header advertises no PRG ROM at all.
    #[error("header declares zero PRG ROM banks")]
    MissingPrgRom,
    /// More than two 16 KiB PRG banks; NROM tops out at 32 KiB.
    #[error("PRG ROM of {banks} x 16 KiB banks exceeds the 32 KiB NROM window")]
    PrgTooLarge { banks: u8 },
    /// More than one 8 KiB CHR bank.
    #[error("CHR ROM of {banks} x 8 KiB banks exceeds the 8 KiB pattern table space")]
    ChrTooLarge { banks: u8 },
    /// A ROM section (trainer/PRG/CHR) is shorter than advertised.
    #[error("{section} section expected {expected} bytes, got {actual}")]
    SectionTooShort {
        section: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Wrapper for I/O errors raised while reading ROMs from disk.
    #[error("i/o error while reading cartridge: {0}")]
    Io(#[from] std::io::Error),
}
