#![allow(dead_code)]

use anyhow::{Context, Result, ensure};
use tandem_core::Nes;

pub const HEADER_LEN: usize = 16;
pub const PRG_BANK: usize = 0x4000;
pub const CHR_BANK: usize = 0x2000;

/// Where the reset vector points unless a test says otherwise.
pub const ENTRY: u16 = 0xC000;
/// NMI and IRQ/BRK handlers installed by [`RomBuilder::new`].
pub const NMI_HANDLER: u16 = 0xC100;
pub const IRQ_HANDLER: u16 = 0xC200;

/// Builds iNES images in memory.
#[derive(Debug, Clone)]
pub struct RomBuilder {
    prg: Vec<u8>,
    chr: Vec<u8>,
    trainer: Option<Vec<u8>>,
    flags6: u8,
}

impl Default for RomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RomBuilder {
    /// One PRG bank, one zeroed CHR bank, vectors at the standard handlers.
    pub fn new() -> Self {
        let mut builder = Self {
            prg: vec![0xEA; PRG_BANK],
            chr: vec![0; CHR_BANK],
            trainer: None,
            flags6: 0,
        };
        builder.vector(0xFFFA, NMI_HANDLER);
        builder.vector(0xFFFC, ENTRY);
        builder.vector(0xFFFE, IRQ_HANDLER);
        builder
    }

    /// Switches to 32 KiB of PRG; bank 1 keeps the vectors.
    pub fn two_banks(mut self) -> Self {
        let mut prg = vec![0xEA; PRG_BANK];
        prg.extend_from_slice(&self.prg);
        self.prg = prg;
        self
    }

    pub fn chr_ram(mut self) -> Self {
        self.chr.clear();
        self
    }

    pub fn chr(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.chr[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn vertical(mut self) -> Self {
        self.flags6 |= 0b0000_0001;
        self
    }

    pub fn trainer(mut self, bytes: &[u8]) -> Self {
        let mut trainer = vec![0; 512];
        trainer[..bytes.len()].copy_from_slice(bytes);
        self.trainer = Some(trainer);
        self.flags6 |= 0b0000_0100;
        self
    }

    /// Places `code` at CPU address `addr`.
    pub fn code(mut self, addr: u16, code: &[u8]) -> Self {
        let offset = self.offset(addr);
        self.prg[offset..offset + code.len()].copy_from_slice(code);
        self
    }

    pub fn vector(&mut self, addr: u16, target: u16) {
        let offset = self.offset(addr);
        self.prg[offset..offset + 2].copy_from_slice(&target.to_le_bytes());
    }

    pub fn build(&self) -> Vec<u8> {
        let mut image = vec![0u8; HEADER_LEN];
        image[..4].copy_from_slice(b"NES\x1A");
        image[4] = (self.prg.len() / PRG_BANK) as u8;
        image[5] = (self.chr.len() / CHR_BANK) as u8;
        image[6] = self.flags6;
        if let Some(trainer) = &self.trainer {
            image.extend_from_slice(trainer);
        }
        image.extend_from_slice(&self.prg);
        image.extend_from_slice(&self.chr);
        image
    }

    fn offset(&self, addr: u16) -> usize {
        (usize::from(addr) - 0x8000) % self.prg.len()
    }
}

/// Console with the image loaded and reset.
pub fn boot(rom: &RomBuilder) -> Result<Nes> {
    let mut nes = Nes::new();
    nes.load_cartridge(&rom.build())
        .context("loading generated image")?;
    Ok(nes)
}

/// Steps until the program counter reaches `pc`, giving up after `limit` instructions.
pub fn run_until_pc(nes: &mut Nes, pc: u16, limit: usize) -> Result<()> {
    for _ in 0..limit {
        if nes.cpu().pc == pc {
            return Ok(());
        }
        nes.step();
    }
    ensure!(
        nes.cpu().pc == pc,
        "PC {:#06X} never reached {pc:#06X}",
        nes.cpu().pc
    );
    Ok(())
}
