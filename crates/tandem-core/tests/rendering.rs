mod common;

use std::{cell::RefCell, rc::Rc};

use anyhow::Result;
use common::{ENTRY, RomBuilder, boot, run_until_pc};
use tandem_core::{
    Nes,
    controller::Unplugged,
    display::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH},
};

/// Writes the palette, puts tile 1 in the top-left nametable slot and turns
/// the background on. Ends in `JMP *` at the returned address.
fn background_program() -> (Vec<u8>, u16) {
    let code = vec![
        0xA9, 0x3F, 0x8D, 0x06, 0x20, // LDA #$3F; STA $2006
        0xA9, 0x00, 0x8D, 0x06, 0x20, // LDA #$00; STA $2006
        0xA9, 0x01, 0x8D, 0x07, 0x20, // backdrop = $01
        0xA9, 0x21, 0x8D, 0x07, 0x20, // color 1 = $21
        0xA9, 0x20, 0x8D, 0x06, 0x20, // LDA #$20; STA $2006
        0xA9, 0x00, 0x8D, 0x06, 0x20, // LDA #$00; STA $2006
        0xA9, 0x01, 0x8D, 0x07, 0x20, // nametable[0] = tile 1
        0xA9, 0x00, 0x8D, 0x05, 0x20, // scroll x = 0
        0x8D, 0x05, 0x20, //             scroll y = 0
        0xA9, 0x0A, 0x8D, 0x01, 0x20, // PPUMASK: background + left column
        0x4C, 0x00, 0x00, //             JMP * (patched below)
    ];
    let halt = ENTRY + code.len() as u16 - 3;
    let mut code = code;
    let len = code.len();
    code[len - 2..].copy_from_slice(&halt.to_le_bytes());
    (code, halt)
}

#[test]
fn background_tile_reaches_the_frame_buffer() -> Result<()> {
    let (code, halt) = background_program();
    // Tile 1: low plane solid, high plane clear, so every pixel is color 1.
    let rom = RomBuilder::new()
        .code(ENTRY, &code)
        .chr(0x10, &[0xFF; 8]);

    let screen = Rc::new(RefCell::new(FrameBuffer::new()));
    let mut nes = Nes::with_devices(Box::new(screen.clone()), Box::new(Unplugged));
    nes.load_cartridge(&rom.build())?;
    run_until_pc(&mut nes, halt, 64)?;

    // The warm-up frame is never presented; the next one carries the picture.
    nes.run_frame();
    assert_eq!(screen.borrow().frames(), 0);
    nes.run_frame();

    let screen = screen.borrow();
    assert_eq!(screen.frames(), 1);
    assert_eq!(screen.color_index(3, 4), 0x21);
    assert_eq!(screen.color_index(7, 7), 0x21);
    assert_eq!(screen.color_index(12, 4), 0x01, "tile 0 is blank");
    assert_eq!(screen.color_index(3, 12), 0x01, "second tile row is blank");
    assert_eq!(
        screen.color_index(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1),
        0x01
    );
    Ok(())
}

#[test]
fn rendering_off_shows_backdrop_only() -> Result<()> {
    let (mut code, halt) = background_program();
    // Leave PPUMASK at zero.
    let mask_value = code.len() - 7;
    code[mask_value] = 0x00;
    let rom = RomBuilder::new().code(ENTRY, &code).chr(0x10, &[0xFF; 8]);

    let screen = Rc::new(RefCell::new(FrameBuffer::new()));
    let mut nes = Nes::with_devices(Box::new(screen.clone()), Box::new(Unplugged));
    nes.load_cartridge(&rom.build())?;
    run_until_pc(&mut nes, halt, 64)?;
    nes.run_frame();
    nes.run_frame();

    let screen = screen.borrow();
    assert_eq!(screen.color_index(3, 4), 0x01);
    assert!(!nes.ppu().rendering_enabled());
    Ok(())
}

#[test]
fn chr_ram_accepts_ppudata_writes() -> Result<()> {
    let program = [
        0xA9, 0x00, 0x8D, 0x06, 0x20, // LDA #$00; STA $2006
        0x8D, 0x06, 0x20, //             STA $2006
        0xA9, 0xAB, 0x8D, 0x07, 0x20, // LDA #$AB; STA $2007
    ];
    let mut with_ram = boot(&RomBuilder::new().chr_ram().code(ENTRY, &program))?;
    run_until_pc(&mut with_ram, ENTRY + program.len() as u16, 10)?;
    assert_eq!(with_ram.ppu().peek_vram(0x0000), 0xAB);

    let mut with_rom = boot(&RomBuilder::new().chr(0, &[0x11]).code(ENTRY, &program))?;
    run_until_pc(&mut with_rom, ENTRY + program.len() as u16, 10)?;
    assert_eq!(with_rom.ppu().peek_vram(0x0000), 0x11);
    Ok(())
}
