use std::fmt::Display;

use crate::{bus::Bus, cpu::Cpu};

/// Represents the addressing modes supported by the 6502 CPU.
///
/// Addressing modes define how the CPU interprets the operand bytes
/// of an instruction to determine the effective memory address or
/// immediate value for the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// No additional data required. The instruction operates implicitly.
    ///
    /// # Examples
    /// - `CLC` (Clear Carry Flag)
    /// - `NOP` (No Operation)
    Implied,

    /// The operation is performed on the accumulator register.
    ///
    /// # Examples
    /// - `ASL A` (Arithmetic Shift Left Accumulator)
    Accumulator,

    /// The byte following the opcode is the operand value itself.
    ///
    /// # Examples
    /// - `LDA #$42`
    Immediate,

    /// Uses the full 16-bit address specified by the two bytes following the opcode.
    ///
    /// # Examples
    /// - `STA $0200`
    Absolute,

    /// Absolute address indexed by the X register.
    ///
    /// Reads take an extra cycle when `address + X` leaves the base page.
    AbsoluteX,

    /// Absolute address indexed by the Y register.
    ///
    /// Reads take an extra cycle when `address + Y` leaves the base page.
    AbsoluteY,

    /// Indirect addressing used exclusively by `JMP ($nnnn)`.
    ///
    /// The pointer's high byte is fetched without carrying into the next
    /// page, so `JMP ($10FF)` reads `$10FF` and `$1000`.
    Indirect,

    /// Single byte address in the zero page (`$0000-$00FF`).
    ZeroPage,

    /// Zero page address indexed by X, wrapping within the zero page.
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within the zero page.
    ZeroPageY,

    /// Pre-indexed indirect, `(zp,X)`. The pointer fetch wraps within the zero page.
    IndirectX,

    /// Post-indexed indirect, `(zp),Y`. Reads take an extra cycle on a page cross.
    IndirectY,

    /// Signed 8-bit branch offset relative to the next instruction.
    Relative,
}

impl Addressing {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            Addressing::Implied | Addressing::Accumulator => 0,
            Addressing::Absolute
            | Addressing::AbsoluteX
            | Addressing::AbsoluteY
            | Addressing::Indirect => 2,
            _ => 1,
        }
    }
}

impl Display for Addressing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Addressing::Implied => "implied",
            Addressing::Accumulator => "accumulator",
            Addressing::Immediate => "immediate",
            Addressing::Absolute => "absolute",
            Addressing::AbsoluteX => "absolute_x",
            Addressing::AbsoluteY => "absolute_y",
            Addressing::Indirect => "indirect",
            Addressing::ZeroPage => "zero_page",
            Addressing::ZeroPageX => "zero_page_x",
            Addressing::ZeroPageY => "zero_page_y",
            Addressing::IndirectX => "indirect_x",
            Addressing::IndirectY => "indirect_y",
            Addressing::Relative => "relative",
        };
        write!(f, "{name}")
    }
}

/// Where an instruction's data lives once its addressing mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    Implied,
    Accumulator,
    Immediate(u8),
    Memory(u16),
    Relative(i8),
}

/// Resolved operand plus whether indexing crossed a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub(crate) operand: Operand,
    pub(crate) page_crossed: bool,
}

impl Resolved {
    fn new(operand: Operand) -> Self {
        Self {
            operand,
            page_crossed: false,
        }
    }

    fn indexed(base: u16, index: u8) -> Self {
        let addr = base.wrapping_add(u16::from(index));
        Self {
            operand: Operand::Memory(addr),
            page_crossed: Cpu::check_cross_page(base, addr),
        }
    }
}

impl Cpu {
    /// Computes the effective operand for `mode` from the instruction bytes.
    pub(crate) fn resolve(&self, bus: &mut impl Bus, mode: Addressing, lo: u8, hi: u8) -> Resolved {
        let absolute = u16::from_le_bytes([lo, hi]);
        match mode {
            Addressing::Implied => Resolved::new(Operand::Implied),
            Addressing::Accumulator => Resolved::new(Operand::Accumulator),
            Addressing::Immediate => Resolved::new(Operand::Immediate(lo)),
            Addressing::Relative => Resolved::new(Operand::Relative(lo as i8)),
            Addressing::ZeroPage => Resolved::new(Operand::Memory(u16::from(lo))),
            Addressing::ZeroPageX => {
                Resolved::new(Operand::Memory(u16::from(lo.wrapping_add(self.x))))
            }
            Addressing::ZeroPageY => {
                Resolved::new(Operand::Memory(u16::from(lo.wrapping_add(self.y))))
            }
            Addressing::Absolute => Resolved::new(Operand::Memory(absolute)),
            Addressing::AbsoluteX => Resolved::indexed(absolute, self.x),
            Addressing::AbsoluteY => Resolved::indexed(absolute, self.y),
            Addressing::Indirect => {
                let hi_ptr = (absolute & 0xFF00) | (absolute.wrapping_add(1) & 0x00FF);
                let target = u16::from_le_bytes([bus.read(absolute), bus.read(hi_ptr)]);
                Resolved::new(Operand::Memory(target))
            }
            Addressing::IndirectX => {
                let ptr = lo.wrapping_add(self.x);
                Resolved::new(Operand::Memory(read_zp_word(bus, ptr)))
            }
            Addressing::IndirectY => {
                let base = read_zp_word(bus, lo);
                Resolved::indexed(base, self.y)
            }
        }
    }

    /// Reads the value an operand refers to.
    pub(crate) fn load(&self, bus: &mut impl Bus, operand: Operand) -> u8 {
        match operand {
            Operand::Immediate(value) => value,
            Operand::Memory(addr) => bus.read(addr),
            Operand::Accumulator => self.a,
            Operand::Implied | Operand::Relative(_) => 0,
        }
    }

    /// Writes back to the location an operand refers to.
    pub(crate) fn store(&mut self, bus: &mut impl Bus, operand: Operand, value: u8) {
        match operand {
            Operand::Memory(addr) => bus.write(addr, value),
            Operand::Accumulator => self.a = value,
            Operand::Implied | Operand::Immediate(_) | Operand::Relative(_) => {}
        }
    }
}

/// Little-endian pointer fetch whose high byte wraps inside the zero page.
fn read_zp_word(bus: &mut impl Bus, ptr: u8) -> u16 {
    let lo = bus.read(u16::from(ptr));
    let hi = bus.read(u16::from(ptr.wrapping_add(1)));
    u16::from_le_bytes([lo, hi])
}
