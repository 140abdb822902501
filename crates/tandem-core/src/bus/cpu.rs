use tracing::{trace, warn};

use crate::{
    bus::Bus,
    controller::InputSource,
    display::Display,
    memory::cpu as cpu_mem,
    ppu::{DOTS_PER_CPU_CYCLE, Ppu},
    ram::cpu::AddressSpace,
};

/// OAM DMA stall when started on an even CPU cycle; odd cycles add one more.
const OAM_DMA_CYCLES: u32 = 513;
const OAM_DMA_LEN: usize = 256;
/// Upper bits left on the data bus by controller reads.
const CONTROLLER_OPEN_BUS: u8 = 0x40;

/// CPU-visible bus. Borrows the console hardware for the duration of one
/// CPU step and keeps the PPU three dots per CPU cycle behind every tick.
#[derive(Debug)]
pub struct CpuBus<'a> {
    memory: &'a mut AddressSpace,
    ppu: &'a mut Ppu,
    display: &'a mut dyn Display,
    input: &'a mut dyn InputSource,
    cycles: &'a mut u64,
    /// Stall cycles requested by OAM DMA, drained by the CPU after the instruction.
    stall: u32,
}

impl<'a> CpuBus<'a> {
    pub(crate) fn new(
        memory: &'a mut AddressSpace,
        ppu: &'a mut Ppu,
        display: &'a mut dyn Display,
        input: &'a mut dyn InputSource,
        cycles: &'a mut u64,
    ) -> Self {
        Self {
            memory,
            ppu,
            display,
            input,
            cycles,
            stall: 0,
        }
    }

    pub fn ppu(&self) -> &Ppu {
        &*self.ppu
    }

    /// Copies CPU page `page` into OAM and schedules the stall.
    fn oam_dma(&mut self, page: u8) {
        let base = u16::from(page) << 8;
        let mut buffer = [0u8; OAM_DMA_LEN];
        for (offset, byte) in buffer.iter_mut().enumerate() {
            *byte = self.memory.read(usize::from(fold_ram(base + offset as u16)));
        }
        self.ppu.oam_dma(&buffer);

        let stall = OAM_DMA_CYCLES + u32::from(*self.cycles % 2 == 1);
        trace!(page = format_args!("{page:#04X}"), stall, "OAM DMA");
        self.stall += stall;
    }
}

impl Bus for CpuBus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=cpu_mem::INTERNAL_RAM_MIRROR_END => self.memory.read(usize::from(fold_ram(addr))),
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => self.ppu.cpu_read(addr),
            cpu_mem::CONTROLLER_PORT_1 => CONTROLLER_OPEN_BUS | u8::from(self.input.read_input()),
            cpu_mem::CONTROLLER_PORT_2 => CONTROLLER_OPEN_BUS,
            cpu_mem::APU_REGISTER_BASE..=cpu_mem::APU_STATUS => {
                trace!(addr = format_args!("{addr:#06X}"), "APU read, returning 0");
                0
            }
            _ => self.memory.read(usize::from(addr)),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=cpu_mem::INTERNAL_RAM_MIRROR_END => {
                self.memory.write(usize::from(fold_ram(addr)), data);
            }
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => self.ppu.cpu_write(addr, data),
            cpu_mem::OAM_DMA => self.oam_dma(data),
            cpu_mem::CONTROLLER_PORT_1 => {
                if data & 0x01 != 0 {
                    self.input.start_polling();
                } else {
                    self.input.stop_polling();
                }
            }
            cpu_mem::APU_REGISTER_BASE..=cpu_mem::CONTROLLER_PORT_2 => {
                trace!(
                    addr = format_args!("{addr:#06X}"),
                    data = format_args!("{data:#04X}"),
                    "APU write ignored"
                );
            }
            cpu_mem::PRG_ROM_START.. => {
                warn!(
                    addr = format_args!("{addr:#06X}"),
                    data = format_args!("{data:#04X}"),
                    "write to PRG ROM ignored"
                );
            }
            _ => self.memory.write(usize::from(addr), data),
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=cpu_mem::INTERNAL_RAM_MIRROR_END => self.memory.read(usize::from(fold_ram(addr))),
            cpu_mem::PPU_REGISTER_BASE..=cpu_mem::PPU_REGISTER_END => self.ppu.peek_register(addr),
            cpu_mem::CONTROLLER_PORT_1 | cpu_mem::CONTROLLER_PORT_2 => CONTROLLER_OPEN_BUS,
            cpu_mem::APU_REGISTER_BASE..=cpu_mem::APU_STATUS => 0,
            _ => self.memory.read(usize::from(addr)),
        }
    }

    fn tick(&mut self, cycles: u32) {
        *self.cycles += u64::from(cycles);
        for _ in 0..cycles * DOTS_PER_CPU_CYCLE {
            self.ppu.clock(&mut *self.display);
        }
    }

    fn total_cycles(&self) -> u64 {
        *self.cycles
    }

    fn take_stall_cycles(&mut self) -> u32 {
        std::mem::take(&mut self.stall)
    }

    fn nmi_line(&self) -> bool {
        self.ppu.nmi_line()
    }

    fn in_vblank(&self) -> bool {
        self.ppu.in_vblank()
    }
}

/// Folds `$0000-$1FFF` onto the 2 KiB of internal RAM; other addresses pass through.
fn fold_ram(addr: u16) -> u16 {
    if addr <= cpu_mem::INTERNAL_RAM_MIRROR_END {
        addr & cpu_mem::INTERNAL_RAM_MASK
    } else {
        addr
    }
}
