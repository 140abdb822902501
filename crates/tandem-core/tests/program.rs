mod common;

use anyhow::Result;
use common::{ENTRY, IRQ_HANDLER, NMI_HANDLER, RomBuilder, boot, run_until_pc};
use tandem_core::{cpu::status::Status, cpu::RESET_CYCLES};

#[test]
fn load_store_then_break() -> Result<()> {
    // LDA #$05; STA $0200; BRK
    let rom = RomBuilder::new().code(ENTRY, &[0xA9, 0x05, 0x8D, 0x00, 0x02, 0x00]);
    let mut nes = boot(&rom)?;
    assert_eq!(nes.cpu().s, 0xFD);

    let cycles: u32 = (0..3).map(|_| nes.step()).sum();
    assert_eq!(cycles, 2 + 4 + 7);
    assert_eq!(nes.total_cycles(), RESET_CYCLES + 13);

    let cpu = nes.cpu();
    assert_eq!(nes.peek(0x0200), 0x05);
    assert_eq!(cpu.a, 0x05);
    assert!(!cpu.p.contains(Status::ZERO));
    assert!(cpu.p.contains(Status::INTERRUPT));
    assert_eq!(cpu.pc, IRQ_HANDLER);
    assert_eq!(cpu.s, 0xFA);

    // BRK pushes the address after its padding byte, then status with B set.
    assert_eq!(nes.peek(0x01FD), 0xC0);
    assert_eq!(nes.peek(0x01FC), 0x07);
    let pushed = Status::from_bits_retain(nes.peek(0x01FB));
    assert!(pushed.contains(Status::BREAK | Status::UNUSED));
    Ok(())
}

#[test]
fn subroutine_round_trip() -> Result<()> {
    let rom = RomBuilder::new()
        // JSR $C010; LDX #$01
        .code(ENTRY, &[0x20, 0x10, 0xC0, 0xA2, 0x01])
        // LDY #$07; RTS
        .code(0xC010, &[0xA0, 0x07, 0x60]);
    let mut nes = boot(&rom)?;
    nes.step();
    assert_eq!(nes.peek(0x01FD), 0xC0);
    assert_eq!(nes.peek(0x01FC), 0x02, "return address minus one");
    run_until_pc(&mut nes, 0xC005, 10)?;
    let cpu = nes.cpu();
    assert_eq!((cpu.x, cpu.y, cpu.s), (0x01, 0x07, 0xFD));
    Ok(())
}

#[test]
fn unknown_opcode_is_a_one_cycle_skip() -> Result<()> {
    // $02 is not an official opcode; LDA #$09 follows.
    let rom = RomBuilder::new().code(ENTRY, &[0x02, 0xA9, 0x09]);
    let mut nes = boot(&rom)?;
    assert_eq!(nes.step(), 1);
    assert_eq!(nes.cpu().pc, ENTRY + 1);
    nes.step();
    assert_eq!(nes.cpu().a, 0x09);
    Ok(())
}

#[test]
fn prg_rom_is_read_only() -> Result<()> {
    // LDA #$55; STA $8000; STA $6000
    let rom = RomBuilder::new().code(ENTRY, &[0xA9, 0x55, 0x8D, 0x00, 0x80, 0x8D, 0x00, 0x60]);
    let mut nes = boot(&rom)?;
    (0..3).for_each(|_| {
        nes.step();
    });
    // $8000 mirrors the single bank, so it still holds the first opcode.
    assert_eq!(nes.peek(0x8000), 0xA9);
    assert_eq!(nes.peek(0x6000), 0x55);
    Ok(())
}

#[test]
fn oam_dma_stalls_the_cpu() -> Result<()> {
    // LDA #$02; STA $4014
    let rom = RomBuilder::new().code(ENTRY, &[0xA9, 0x02, 0x8D, 0x14, 0x40]);
    let mut nes = boot(&rom)?;
    for i in 0..=0xFFu8 {
        nes.poke(0x0200 | u16::from(i), i ^ 0x5A);
    }
    nes.step();
    // The write lands after STA's four cycles: 7 + 2 + 4 is odd.
    assert_eq!(nes.step(), 4 + 514);
    let oam = nes.ppu().oam();
    assert_eq!(oam[0], 0x5A);
    assert_eq!(oam[0x80], 0x80 ^ 0x5A);
    assert_eq!(oam[0xFF], 0xFF ^ 0x5A);
    Ok(())
}

#[test]
fn vblank_nmi_enters_handler_once_per_frame() -> Result<()> {
    let rom = RomBuilder::new()
        // LDA #$80; STA $2000; JMP *
        .code(ENTRY, &[0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0xC0])
        // BIT $2002; INC $10; RTI
        .code(NMI_HANDLER, &[0x2C, 0x02, 0x20, 0xE6, 0x10, 0x40]);
    let mut nes = boot(&rom)?;

    for _ in 0..3 {
        nes.run_frame();
    }
    // The third vblank has just begun; its NMI is taken on the next step.
    assert_eq!(nes.peek(0x0010), 2);
    assert_eq!(nes.step(), 7);
    assert_eq!(nes.cpu().pc, NMI_HANDLER);
    let pushed = Status::from_bits_retain(nes.peek(0x0100 | u16::from(nes.cpu().s + 1)));
    assert!(!pushed.contains(Status::BREAK));
    assert!(pushed.contains(Status::UNUSED));

    run_until_pc(&mut nes, 0xC005, 10)?;
    assert_eq!(nes.peek(0x0010), 3);
    Ok(())
}

#[test]
fn controller_bits_reach_the_program() -> Result<()> {
    use std::{cell::RefCell, rc::Rc};
    use tandem_core::{
        Nes,
        controller::{Button, Controller},
        display::NullDisplay,
    };

    let pad = Rc::new(RefCell::new(Controller::new()));
    pad.borrow_mut().set_button(Button::A, true);
    pad.borrow_mut().set_button(Button::Select, true);

    let rom = RomBuilder::new().code(
        ENTRY,
        &[
            0xA9, 0x01, 0x8D, 0x16, 0x40, // LDA #1; STA $4016
            0xA9, 0x00, 0x8D, 0x16, 0x40, // LDA #0; STA $4016
            0xAD, 0x16, 0x40, 0x85, 0x10, // LDA $4016; STA $10
            0xAD, 0x16, 0x40, 0x85, 0x11, // LDA $4016; STA $11
            0xAD, 0x16, 0x40, 0x85, 0x12, // LDA $4016; STA $12
            0xAD, 0x17, 0x40, 0x85, 0x13, // LDA $4017; STA $13
        ],
    );
    let mut nes = Nes::with_devices(Box::new(NullDisplay), Box::new(pad.clone()));
    nes.load_cartridge(&rom.build())?;
    run_until_pc(&mut nes, ENTRY + 30, 20)?;

    assert_eq!(nes.peek(0x0010), 0x41);
    assert_eq!(nes.peek(0x0011), 0x40);
    assert_eq!(nes.peek(0x0012), 0x41);
    assert_eq!(nes.peek(0x0013), 0x40);
    Ok(())
}
