//! 6502 (2A03) instruction engine.
//!
//! The engine runs one whole instruction per [`Cpu::step`]. Timing is kept
//! honest by telling the bus how many cycles each instruction took: the base
//! count is ticked before the instruction's effects land, then page-cross,
//! branch and DMA penalties are ticked afterwards.

use std::fmt::Display;

use tracing::{trace, warn};

use crate::{
    bus::{Bus, STACK_ADDR},
    cpu::{addressing::Operand, instruction::Instruction, lookup::LOOKUP_TABLE, status::Status},
    memory::cpu as cpu_mem,
};

pub mod addressing;
pub mod instruction;
mod lookup;
mod mnemonic;
pub mod status;

/// Cycles taken to push state and enter the NMI handler.
pub const NMI_CYCLES: u32 = 7;
/// Cycles the reset sequence accounts for before the first instruction.
pub const RESET_CYCLES: u64 = 7;
/// Stack pointer after the reset sequence.
const RESET_STACK_POINTER: u8 = 0xFD;

/// Whether an instruction left the program counter for the engine to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Advance,
    Jump,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cpu {
    pub(crate) a: u8,
    pub(crate) x: u8,
    pub(crate) y: u8,
    /// Stack pointer, offset into page `$01`.
    pub(crate) s: u8,
    pub(crate) p: Status,
    pub(crate) pc: u16,
    /// Set while an NMI is being serviced; cleared once vblank ends.
    nmi_latched: bool,
    /// Penalty cycles accumulated by the current instruction.
    penalty: u32,
}

/// Copy of the architectural registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CpuSnapshot {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub s: u8,
    pub p: Status,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: RESET_STACK_POINTER,
            p: Status::new(),
            pc: 0,
            nmi_latched: false,
            penalty: 0,
        }
    }

    /// Runs the reset sequence: interrupts off, stack at `$FD`, PC from `$FFFC`.
    pub fn reset(&mut self, bus: &mut impl Bus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.s = RESET_STACK_POINTER;
        self.p = Status::new();
        self.nmi_latched = false;
        self.penalty = 0;
        self.pc = read_vector(bus, cpu_mem::RESET_VECTOR_LO, cpu_mem::RESET_VECTOR_HI);
    }

    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            pc: self.pc,
            a: self.a,
            x: self.x,
            y: self.y,
            s: self.s,
            p: self.p,
        }
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    pub fn status(&self) -> Status {
        self.p
    }

    /// Executes one instruction, or enters the NMI handler when the PPU
    /// asserts NMI. Returns the CPU cycles consumed.
    pub fn step(&mut self, bus: &mut impl Bus) -> u32 {
        if bus.nmi_line() && !self.nmi_latched {
            self.service_nmi(bus);
            return NMI_CYCLES;
        }
        if self.nmi_latched && !bus.in_vblank() {
            self.nmi_latched = false;
        }

        let opcode = bus.read(self.pc);
        let Some(instruction) = LOOKUP_TABLE[opcode as usize] else {
            warn!(
                pc = format_args!("{:#06X}", self.pc),
                opcode = format_args!("{opcode:#04X}"),
                "unknown opcode, skipping as a one-cycle NOP"
            );
            bus.tick(1);
            self.pc = self.pc.wrapping_add(1);
            return 1;
        };

        let lo = if instruction.size() > 1 {
            bus.read(self.pc.wrapping_add(1))
        } else {
            0
        };
        let hi = if instruction.size() > 2 {
            bus.read(self.pc.wrapping_add(2))
        } else {
            0
        };
        trace!(
            "{:04X}  {:02X} {:02X} {:02X}  {:<16} {} CYC:{}",
            self.pc,
            opcode,
            lo,
            hi,
            instruction.to_string(),
            self,
            bus.total_cycles()
        );

        let base = u32::from(instruction.cycles);
        bus.tick(base);

        self.penalty = 0;
        let flow = self.execute(bus, instruction, lo, hi);
        let extra = self.penalty + bus.take_stall_cycles();
        if extra > 0 {
            bus.tick(extra);
        }

        if flow == Flow::Advance {
            self.pc = self.pc.wrapping_add(instruction.size());
        }
        base + extra
    }

    fn execute(&mut self, bus: &mut impl Bus, instruction: Instruction, lo: u8, hi: u8) -> Flow {
        let resolved = self.resolve(bus, instruction.addressing, lo, hi);
        if resolved.page_crossed && instruction.mnemonic.pays_page_cross() {
            self.penalty += 1;
        }
        self.dispatch(bus, instruction.mnemonic, resolved.operand)
    }

    fn service_nmi(&mut self, bus: &mut impl Bus) {
        self.push_word(bus, self.pc);
        let pushed = self.p.to_pushed_byte() & !Status::BREAK.bits();
        self.push(bus, pushed);
        self.p.insert(Status::INTERRUPT);
        self.pc = read_vector(bus, cpu_mem::NMI_VECTOR_LO, cpu_mem::NMI_VECTOR_HI);
        self.nmi_latched = true;
        bus.tick(NMI_CYCLES);
        trace!(pc = format_args!("{:#06X}", self.pc), "entered NMI handler");
    }

    pub(crate) fn push(&mut self, bus: &mut impl Bus, value: u8) {
        bus.write(STACK_ADDR | u16::from(self.s), value);
        self.s = self.s.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self, bus: &mut impl Bus) -> u8 {
        if self.s == 0xFF {
            warn!("stack underflow, pulling 0");
            self.s = 0x00;
            return 0;
        }
        self.s = self.s.wrapping_add(1);
        bus.read(STACK_ADDR | u16::from(self.s))
    }

    pub(crate) fn push_word(&mut self, bus: &mut impl Bus, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(bus, hi);
        self.push(bus, lo);
    }

    pub(crate) fn pop_word(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = self.pop(bus);
        let hi = self.pop(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Takes a relative branch when `condition` holds.
    ///
    /// Costs one extra cycle when taken and another when the target lies on a
    /// different page than the following instruction.
    pub(crate) fn branch(&mut self, operand: Operand, condition: bool) -> Flow {
        let Operand::Relative(offset) = operand else {
            return Flow::Advance;
        };
        if !condition {
            return Flow::Advance;
        }
        let next = self.pc.wrapping_add(2);
        let target = next.wrapping_add_signed(i16::from(offset));
        self.penalty += 1;
        if Self::check_cross_page(next, target) {
            self.penalty += 1;
        }
        self.pc = target;
        Flow::Jump
    }

    pub(crate) fn check_cross_page(base: u16, addr: u16) -> bool {
        (base & 0xFF00) != (addr & 0xFF00)
    }
}

pub(crate) fn read_vector(bus: &mut impl Bus, lo: u16, hi: u16) -> u16 {
    u16::from_le_bytes([bus.peek(lo), bus.peek(hi)])
}

impl Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            self.a,
            self.x,
            self.y,
            self.p.bits(),
            self.s
        )
    }
}
