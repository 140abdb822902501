mod common;

use std::fs;

use anyhow::{Context, Result};
use common::{ENTRY, RomBuilder, boot};
use tandem_core::{Nes, cartridge::header::Mirroring, error::Error};

#[test]
fn loads_image_from_disk() -> Result<()> {
    let rom = RomBuilder::new().code(ENTRY, &[0xA9, 0x42]);
    let path = std::env::temp_dir().join(format!("tandem-load-{}.nes", std::process::id()));
    fs::write(&path, rom.build()).context("writing temp image")?;

    let mut nes = Nes::new();
    let loaded = nes.load_cartridge_from_file(&path);
    fs::remove_file(&path).ok();
    loaded?;

    nes.step();
    assert_eq!(nes.cpu().a, 0x42);
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let mut nes = Nes::new();
    let err = nes
        .load_cartridge_from_file("/nonexistent/tandem/rom.nes")
        .expect_err("no such file");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn malformed_images_are_rejected() {
    let mut nes = Nes::new();

    let mut bad_magic = RomBuilder::new().build();
    bad_magic[0] = b'X';
    let err = nes.load_cartridge(&bad_magic).expect_err("bad magic");
    assert!(matches!(err, Error::InvalidMagic));
    assert_eq!(err.to_string(), "missing NES magic bytes");

    let mut big_prg = RomBuilder::new().build();
    big_prg[4] = 4;
    assert!(matches!(
        nes.load_cartridge(&big_prg),
        Err(Error::PrgTooLarge { banks: 4 })
    ));

    let mut big_chr = RomBuilder::new().build();
    big_chr[5] = 2;
    assert!(matches!(
        nes.load_cartridge(&big_chr),
        Err(Error::ChrTooLarge { banks: 2 })
    ));

    let mut truncated = RomBuilder::new().build();
    truncated.truncate(truncated.len() - 1);
    let err = nes.load_cartridge(&truncated).expect_err("short CHR");
    assert!(matches!(err, Error::SectionTooShort { section: "CHR ROM", .. }));
}

#[test]
fn two_banks_and_trainer_are_mapped() -> Result<()> {
    let rom = RomBuilder::new()
        .two_banks()
        .trainer(&[0xDE, 0xAD])
        .code(0x8000, &[0x01])
        .code(ENTRY, &[0xEA]);
    let mut nes = boot(&rom)?;
    assert_eq!(nes.peek(0x8000), 0x01);
    assert_eq!(nes.peek(0xC000), 0xEA);
    assert_eq!(nes.peek(0x7000), 0xDE);
    assert_eq!(nes.peek(0x7001), 0xAD);
    assert_eq!(nes.cpu().pc, ENTRY);
    Ok(())
}

#[test]
fn vertical_mirroring_folds_nametables() -> Result<()> {
    let program = [
        0xA9, 0x28, 0x8D, 0x06, 0x20, // LDA #$28; STA $2006
        0xA9, 0x05, 0x8D, 0x06, 0x20, // LDA #$05; STA $2006
        0xA9, 0x9C, 0x8D, 0x07, 0x20, // LDA #$9C; STA $2007
    ];
    let mut nes = boot(&RomBuilder::new().vertical().code(ENTRY, &program))?;
    assert_eq!(nes.ppu().mirroring(), Mirroring::Vertical);
    for _ in 0..6 {
        nes.step();
    }
    assert_eq!(nes.ppu().peek_vram(0x2805), 0x9C);
    assert_eq!(nes.ppu().peek_vram(0x2005), 0x9C);
    assert_eq!(nes.ppu().peek_vram(0x2405), 0x00);
    Ok(())
}

#[test]
fn reset_keeps_ram_and_restarts_program() -> Result<()> {
    let rom = RomBuilder::new().code(ENTRY, &[0xA9, 0x01, 0x85, 0x20]);
    let mut nes = boot(&rom)?;
    nes.step();
    nes.step();
    assert_eq!(nes.peek(0x0020), 0x01);

    nes.reset();
    assert_eq!(nes.cpu().pc, ENTRY);
    assert_eq!(nes.cpu().a, 0);
    assert_eq!(nes.peek(0x0020), 0x01);
    assert_eq!(nes.ppu().frame(), 0);
    Ok(())
}
