use std::path::Path;

use tracing::debug;

use crate::{
    bus::{Bus, cpu::CpuBus},
    cartridge::Cartridge,
    controller::{InputSource, Unplugged},
    cpu::{Cpu, RESET_CYCLES},
    display::{Display, NullDisplay},
    error::Error,
    ppu::Ppu,
    ram::cpu::AddressSpace,
};

pub mod bits;
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod display;
pub mod error;
pub mod memory;
pub mod ppu;
pub mod ram;

pub use cpu::CpuSnapshot;

/// A console: CPU and PPU sharing one clock, plus the devices they talk to.
#[derive(Debug)]
pub struct Nes {
    cpu: Cpu,
    ppu: Ppu,
    memory: AddressSpace,
    /// CPU cycles since the last reset, including the reset sequence itself.
    total_cycles: u64,
    display: Box<dyn Display>,
    input: Box<dyn InputSource>,
}

impl Default for Nes {
    fn default() -> Self {
        Self::new()
    }
}

impl Nes {
    /// Console with no picture output and nothing plugged into port 1.
    pub fn new() -> Self {
        Self::with_devices(Box::new(NullDisplay), Box::new(Unplugged))
    }

    pub fn with_devices(display: Box<dyn Display>, input: Box<dyn InputSource>) -> Self {
        Self {
            cpu: Cpu::new(),
            ppu: Ppu::new(),
            memory: AddressSpace::new(),
            total_cycles: 0,
            display,
            input,
        }
    }

    /// Parses an iNES image, inserts it and resets.
    pub fn load_cartridge(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let cartridge = cartridge::load_cartridge(bytes)?;
        self.insert_cartridge(&cartridge);
        Ok(())
    }

    pub fn load_cartridge_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let cartridge = cartridge::load_cartridge_from_file(path)?;
        self.insert_cartridge(&cartridge);
        Ok(())
    }

    /// Maps PRG into CPU space, CHR into the pattern tables, and resets.
    pub fn insert_cartridge(&mut self, cartridge: &Cartridge) {
        cartridge.map_prg(&mut self.memory);
        self.ppu
            .attach_cartridge(cartridge.chr_rom(), cartridge.mirroring());
        debug!(
            prg_len = cartridge.prg_rom().len(),
            chr_len = cartridge.chr_rom().len(),
            mirroring = ?cartridge.mirroring(),
            "cartridge inserted"
        );
        self.reset();
    }

    /// Runs the CPU reset sequence and returns the PPU to its power-on state.
    ///
    /// CPU memory and pattern/nametable contents survive.
    pub fn reset(&mut self) {
        self.ppu.reset();
        self.total_cycles = RESET_CYCLES;
        let mut bus = self.bus();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        self.cpu = cpu;
        debug!(pc = format_args!("{:#06X}", self.cpu.pc()), "console reset");
    }

    /// Executes one instruction (or NMI entry) and returns the CPU cycles it took.
    pub fn step(&mut self) -> u32 {
        let Self {
            cpu,
            ppu,
            memory,
            total_cycles,
            display,
            input,
        } = self;
        let mut bus = CpuBus::new(memory, ppu, display.as_mut(), input.as_mut(), total_cycles);
        cpu.step(&mut bus)
    }

    /// Steps until the PPU enters the next vblank. Returns the CPU cycles spent.
    pub fn run_frame(&mut self) -> u64 {
        let start_frame = self.ppu.frame();
        let start_cycles = self.total_cycles;
        self.input.reset_read();
        while self.ppu.frame() == start_frame {
            self.step();
        }
        self.total_cycles - start_cycles
    }

    pub fn cpu(&self) -> CpuSnapshot {
        self.cpu.snapshot()
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Reads CPU address space without side effects.
    pub fn peek(&mut self, addr: u16) -> u8 {
        self.bus().peek(addr)
    }

    /// Stores straight into CPU memory, ignoring the bus decode (ROM included).
    pub fn poke(&mut self, addr: u16, value: u8) {
        let addr = if addr <= memory::cpu::INTERNAL_RAM_MIRROR_END {
            addr & memory::cpu::INTERNAL_RAM_MASK
        } else {
            addr
        };
        self.memory.write(usize::from(addr), value);
    }

    /// Moves the program counter, for tools that start execution mid-ROM.
    pub fn set_pc(&mut self, pc: u16) {
        self.cpu.set_pc(pc);
    }

    pub fn display(&self) -> &dyn Display {
        self.display.as_ref()
    }

    pub fn display_mut(&mut self) -> &mut dyn Display {
        self.display.as_mut()
    }

    pub fn input_mut(&mut self) -> &mut dyn InputSource {
        self.input.as_mut()
    }

    fn bus(&mut self) -> CpuBus<'_> {
        CpuBus::new(
            &mut self.memory,
            &mut self.ppu,
            self.display.as_mut(),
            self.input.as_mut(),
            &mut self.total_cycles,
        )
    }
}

#[cfg(test)]
mod tests {
    use ctor::ctor;
    use rand::Rng;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use super::*;
    use crate::cpu::status::Status;

    pub(crate) const TEST_COUNT: usize = 1000;

    #[ctor]
    fn init_tracing() {
        let subscriber = FmtSubscriber::builder()
            .with_file(true)
            .with_line_number(true)
            .with_max_level(Level::DEBUG)
            .pretty()
            .finish();
        tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
    }

    /// 16 KiB NROM image with `program` at `$C000` and the reset vector on it.
    fn image(program: &[u8]) -> Vec<u8> {
        let mut rom = vec![0u8; 16 + 0x4000 + 0x2000];
        rom[..4].copy_from_slice(b"NES\x1A");
        rom[4] = 1;
        rom[5] = 1;
        rom[16..16 + program.len()].copy_from_slice(program);
        // $FFFC within a mirrored 16 KiB bank.
        rom[16 + 0x3FFC] = 0x00;
        rom[16 + 0x3FFD] = 0xC0;
        rom
    }

    #[test]
    fn reset_state() {
        let mut nes = Nes::new();
        nes.load_cartridge(&image(&[0xEA])).expect("valid image");
        let cpu = nes.cpu();
        assert_eq!(cpu.pc, 0xC000);
        assert_eq!(cpu.s, 0xFD);
        assert_eq!(cpu.p, Status::INTERRUPT | Status::UNUSED);
        assert_eq!(nes.total_cycles(), RESET_CYCLES);
        assert_eq!(nes.peek(0x8000), 0xEA, "single bank mirrors at $8000");
    }

    #[test]
    fn step_advances_ppu_three_dots_per_cycle() {
        let mut nes = Nes::new();
        nes.load_cartridge(&image(&[0xEA, 0xEA])).expect("valid image");
        let cycles = nes.step();
        assert_eq!(cycles, 2);
        assert_eq!(nes.cpu().pc, 0xC001);
        // First dot wraps the power-on position to (0, 0).
        assert_eq!((nes.ppu().scanline(), nes.ppu().cycle()), (0, 5));
    }

    #[test]
    fn poke_and_peek_fold_internal_ram() {
        let mut nes = Nes::new();
        let mut rng = rand::rng();
        for _ in 0..TEST_COUNT {
            let addr: u16 = rng.random_range(0..=0x1FFF);
            let value: u8 = rng.random();
            nes.poke(addr, value);
            assert_eq!(nes.peek(addr & 0x07FF), value);
            assert_eq!(nes.peek((addr & 0x07FF) | 0x1800), value);
        }
    }

    #[test]
    fn run_frame_stops_at_vblank() {
        let mut nes = Nes::new();
        // JMP $C000
        nes.load_cartridge(&image(&[0x4C, 0x00, 0xC0]))
            .expect("valid image");
        nes.run_frame();
        assert_eq!(nes.ppu().frame(), 1);
        assert!(nes.ppu().in_vblank());
        nes.run_frame();
        assert_eq!(nes.ppu().frame(), 2);
    }
}
