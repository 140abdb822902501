//! 2C02 picture processing unit.
//!
//! The PPU is clocked one dot at a time by the CPU bus (three dots per CPU
//! cycle). Each [`Ppu::clock`] first advances the `(scanline, cycle)` position
//! and then performs the work scheduled for that dot:
//!
//! | Scanline | Work                                                          |
//! |----------|---------------------------------------------------------------|
//! | 0-239    | pixel output, background fetches, sprite evaluation          |
//! | 240      | idle                                                          |
//! | 241      | dot 1: vblank flag, frame handed to the display               |
//! | 242-260  | idle                                                          |
//! | 261      | dot 1: flags cleared; dots 280-304: vertical scroll reload   |
//!
//! Odd frames with rendering enabled are one dot shorter: the pre-render
//! line ends at dot 339.

use tracing::{trace, warn};

use crate::{
    cartridge::header::Mirroring,
    display::Display,
    memory::ppu::{self as ppu_mem, Register},
    ppu::{
        background::BackgroundPipeline,
        registers::{Mask, Registers, Status},
        sprite::{Dot, SpriteUnit},
        vram::VideoMemory,
    },
};

mod background;
pub(crate) mod registers;
mod render;
mod sprite;
pub mod viewer;
mod vram;

/// Dots per scanline.
pub const DOTS_PER_SCANLINE: u16 = 341;
/// Scanlines per frame, including post-render, vblank and pre-render.
pub const SCANLINES_PER_FRAME: u16 = 262;
/// NTSC dot clock ratio.
pub const DOTS_PER_CPU_CYCLE: u32 = 3;
/// Dots in an even frame, or an odd frame with rendering disabled.
pub const DOTS_PER_FRAME: u32 = DOTS_PER_SCANLINE as u32 * SCANLINES_PER_FRAME as u32;

const VISIBLE_SCANLINES: u16 = 240;
const POST_RENDER_SCANLINE: u16 = 240;
const VBLANK_SCANLINE: u16 = 241;
const PRE_RENDER_SCANLINE: u16 = 261;
/// Last dot of the power-on warm-up; normal sequencing resumes after it.
const WARM_UP_END_CYCLE: u16 = 320;
/// NMI is not signalled on the first two dots of a scanline.
const NMI_MIN_CYCLE: u16 = 2;

#[derive(Debug, Clone)]
pub struct Ppu {
    pub(crate) registers: Registers,
    memory: VideoMemory,
    background: BackgroundPipeline,
    sprites: SpriteUnit,
    cycle: u16,
    scanline: u16,
    even_frame: bool,
    /// Vblank entries since reset.
    frame: u64,
    /// A PPUSTATUS read on the dot before vblank cancels the next vblank flag.
    suppress_vblank: bool,
    /// First frame after reset: only the vblank flag is sequenced.
    warming_up: bool,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            registers: Registers::default(),
            memory: VideoMemory::default(),
            background: BackgroundPipeline::default(),
            sprites: SpriteUnit::default(),
            // The first clock wraps to scanline 0, dot 0 of an even frame.
            cycle: DOTS_PER_SCANLINE - 1,
            scanline: PRE_RENDER_SCANLINE,
            even_frame: false,
            frame: 0,
            suppress_vblank: false,
            warming_up: true,
        }
    }

    /// Power-on state for everything except VRAM contents and mirroring.
    pub fn reset(&mut self) {
        let memory = std::mem::take(&mut self.memory);
        *self = Self {
            memory,
            ..Self::new()
        };
    }

    pub(crate) fn attach_cartridge(&mut self, chr: &[u8], mirroring: Mirroring) {
        self.memory.attach_chr(chr);
        self.memory.set_mirroring(mirroring);
    }

    pub fn cycle(&self) -> u16 {
        self.cycle
    }

    pub fn scanline(&self) -> u16 {
        self.scanline
    }

    /// Number of vblank entries since reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_even_frame(&self) -> bool {
        self.even_frame
    }

    pub fn mirroring(&self) -> Mirroring {
        self.memory.mirroring()
    }

    pub fn status(&self) -> u8 {
        self.registers.status.bits()
    }

    pub fn control(&self) -> u8 {
        self.registers.control.bits()
    }

    pub fn mask(&self) -> u8 {
        self.registers.mask.bits()
    }

    /// Current VRAM address `v`.
    pub fn vram_addr(&self) -> u16 {
        self.registers.vram.v.raw()
    }

    /// Primary OAM.
    pub fn oam(&self) -> &[u8] {
        self.sprites.primary()
    }

    /// Reads PPU memory with mirroring applied and no side effects.
    pub fn peek_vram(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    pub fn rendering_enabled(&self) -> bool {
        self.registers.mask.rendering_enabled()
    }

    /// Vblank flag and NMI enable both set, sampled past the second dot of a line.
    pub fn nmi_line(&self) -> bool {
        self.in_vblank() && self.registers.control.nmi_enabled() && self.cycle > NMI_MIN_CYCLE
    }

    pub fn in_vblank(&self) -> bool {
        self.registers.status.contains(Status::VERTICAL_BLANK)
    }

    /// CPU read from `$2000-$3FFF`; `addr` is decoded modulo 8.
    pub fn cpu_read(&mut self, addr: u16) -> u8 {
        match Register::from_cpu_addr(addr) {
            Register::Status => {
                if self.scanline == POST_RENDER_SCANLINE && self.cycle == DOTS_PER_SCANLINE - 1 {
                    self.suppress_vblank = true;
                }
                self.registers.read_status()
            }
            Register::OamData => self.sprites.read_data(),
            Register::Data => self.read_data(),
            register => {
                trace!(?register, "read from write-only PPU register");
                0
            }
        }
    }

    /// Side-effect-free view of what [`Ppu::cpu_read`] would return.
    pub fn peek_register(&self, addr: u16) -> u8 {
        match Register::from_cpu_addr(addr) {
            Register::Status => self.registers.status.bits(),
            Register::OamData => self.sprites.read_data(),
            Register::Data => self.registers.read_buffer,
            _ => 0,
        }
    }

    /// CPU write to `$2000-$3FFF`; `addr` is decoded modulo 8.
    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        match Register::from_cpu_addr(addr) {
            Register::Control => self.registers.write_control(value),
            Register::Mask => self.registers.mask = Mask::from_bits_retain(value),
            Register::Status => {
                warn!(value = format_args!("{value:#04X}"), "write to PPUSTATUS ignored");
            }
            Register::OamAddr => self.sprites.write_addr(value),
            Register::OamData => self.sprites.write_data(value),
            Register::Scroll => self.registers.vram.write_scroll(value),
            Register::Addr => self.registers.vram.write_addr(value),
            Register::Data => {
                let addr = self.registers.vram.v.raw() & ppu_mem::VRAM_MIRROR_MASK;
                self.memory.write(addr, value);
                self.increment_v();
            }
        }
    }

    /// Copies a 256-byte CPU page into OAM starting at OAMADDR.
    pub(crate) fn oam_dma(&mut self, page: &[u8]) {
        self.sprites.dma(page);
    }

    /// Advances one dot.
    pub fn clock(&mut self, display: &mut dyn Display) {
        self.advance();

        if self.warming_up {
            // Only the flag and frame count; nothing has been drawn yet.
            if self.scanline == VBLANK_SCANLINE && self.cycle == 1 {
                self.enter_vblank();
            }
            if self.scanline == PRE_RENDER_SCANLINE && self.cycle == WARM_UP_END_CYCLE {
                self.warming_up = false;
            }
            return;
        }

        match self.scanline {
            0..VISIBLE_SCANLINES => self.visible_dot(display),
            VBLANK_SCANLINE if self.cycle == 1 => {
                self.enter_vblank();
                display.update_screen();
                display.clear_buffer();
            }
            PRE_RENDER_SCANLINE => self.pre_render_dot(),
            _ => {}
        }
    }

    fn advance(&mut self) {
        self.cycle += 1;
        if self.cycle == DOTS_PER_SCANLINE {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline == SCANLINES_PER_FRAME {
                self.scanline = 0;
                self.even_frame = !self.even_frame;
            }
        }
    }

    fn visible_dot(&mut self, display: &mut dyn Display) {
        let rendering = self.rendering_enabled();
        if !rendering {
            self.sprites.idle();
        }
        match self.cycle {
            1..=256 => {
                if self.cycle == 1 {
                    self.background.skip(self.registers.vram.x);
                }
                self.output_pixel(display);
                if self.cycle % 8 == 0 {
                    self.fetch_tile(rendering);
                }
                if self.cycle == 256 && rendering {
                    self.registers.vram.v.increment_y();
                }
            }
            257 => self.end_of_line_fetches(rendering),
            321..=336 if self.cycle % 8 == 0 => self.fetch_tile(rendering),
            _ => {}
        }

        if rendering {
            let dot = Dot {
                scanline: self.scanline,
                cycle: self.cycle,
                control: self.registers.control,
            };
            self.sprites
                .tick(dot, &mut self.registers.status, &self.memory);
        }
    }

    fn pre_render_dot(&mut self) {
        let rendering = self.rendering_enabled();
        match self.cycle {
            1 => {
                self.registers.status = Status::empty();
                self.sprites.clear_line();
            }
            257 => self.end_of_line_fetches(rendering),
            280..=304 if rendering => {
                let t = self.registers.vram.t;
                self.registers.vram.v.copy_vertical(t);
            }
            321..=336 if self.cycle % 8 == 0 => self.fetch_tile(rendering),
            340 if rendering && !self.even_frame => {
                // Odd frame: skip scanline 0 dot 0.
                self.cycle = 0;
                self.scanline = 0;
                self.even_frame = true;
            }
            _ => {}
        }
    }

    fn end_of_line_fetches(&mut self, rendering: bool) {
        if rendering {
            let t = self.registers.vram.t;
            self.registers.vram.v.copy_horizontal(t);
        }
        self.background.clear();
    }

    fn fetch_tile(&mut self, rendering: bool) {
        self.background.fetch_tile(
            &mut self.registers.vram.v,
            self.registers.control,
            rendering,
            &self.memory,
        );
    }

    fn output_pixel(&mut self, display: &mut dyn Display) {
        let x = self.cycle - 1;
        let background = self.background.pop();
        let sprite = self.sprites.take_pixel(usize::from(x));
        let mask = self.registers.mask;
        let index = render::composite(x, background, sprite, mask, &mut self.registers.status);
        let palette_byte = self.memory.read(ppu_mem::PALETTE_BASE | u16::from(index));
        display.draw_pixel(x as u8, self.scanline as u8, palette_byte, mask.bits());
    }

    fn enter_vblank(&mut self) {
        if self.suppress_vblank {
            trace!("vblank flag suppressed by PPUSTATUS read");
        } else {
            self.registers.status.insert(Status::VERTICAL_BLANK);
        }
        self.suppress_vblank = false;
        self.frame += 1;
    }

    fn read_data(&mut self) -> u8 {
        let addr = self.registers.vram.v.raw() & ppu_mem::VRAM_MIRROR_MASK;
        let value = if addr >= ppu_mem::PALETTE_BASE {
            // Palette reads are immediate; the buffer picks up the nametable
            // byte hidden underneath.
            self.registers.read_buffer = self.memory.read(addr - 0x1000);
            self.memory.read(addr)
        } else {
            let buffered = self.registers.read_buffer;
            self.registers.read_buffer = self.memory.read(addr);
            buffered
        };
        self.increment_v();
        value
    }

    fn increment_v(&mut self) {
        let step = self.registers.control.vram_increment();
        self.registers.vram.v.increment(step);
    }
}
