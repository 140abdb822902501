use crate::cpu::addressing::Addressing as A;
use crate::cpu::instruction::{Instruction as I, Mnemonic as M};

// Short aliases for addressing modes (to keep the 16x16 table readable)
const IMP: A = A::Implied;
const ACC: A = A::Accumulator;
const IMM: A = A::Immediate;
const REL: A = A::Relative;
const ZP: A = A::ZeroPage;
const ZPX: A = A::ZeroPageX;
const ZPY: A = A::ZeroPageY;
const ABS: A = A::Absolute;
const ABX: A = A::AbsoluteX;
const ABY: A = A::AbsoluteY;
const IND: A = A::Indirect;
const INX: A = A::IndirectX;
const INY: A = A::IndirectY;

/// Undocumented opcode slot.
const ___: Option<I> = None;

macro_rules! op {
    ($ins:ident, $addr:ident, $cycles:literal) => {
        Some(I {
            mnemonic: M::$ins,
            addressing: $addr,
            cycles: $cycles,
        })
    };
}

#[rustfmt::skip]
pub(crate) static LOOKUP_TABLE: [Option<I>; 256] = [
    // 0                  1                  2                  3                  4                  5                  6                  7
    // 8                  9                  A                  B                  C                  D                  E                  F

    // 0x00
    op!(BRK, IMP, 7),    op!(ORA, INX, 6),    ___,                 ___,                 ___,                 op!(ORA, ZP, 3),     op!(ASL, ZP, 5),     ___,
    op!(PHP, IMP, 3),    op!(ORA, IMM, 2),    op!(ASL, ACC, 2),    ___,                 ___,                 op!(ORA, ABS, 4),    op!(ASL, ABS, 6),    ___,

    // 0x10
    op!(BPL, REL, 2),    op!(ORA, INY, 5),    ___,                 ___,                 ___,                 op!(ORA, ZPX, 4),    op!(ASL, ZPX, 6),    ___,
    op!(CLC, IMP, 2),    op!(ORA, ABY, 4),    ___,                 ___,                 ___,                 op!(ORA, ABX, 4),    op!(ASL, ABX, 7),    ___,

    // 0x20
    op!(JSR, ABS, 6),    op!(AND, INX, 6),    ___,                 ___,                 op!(BIT, ZP, 3),     op!(AND, ZP, 3),     op!(ROL, ZP, 5),     ___,
    op!(PLP, IMP, 4),    op!(AND, IMM, 2),    op!(ROL, ACC, 2),    ___,                 op!(BIT, ABS, 4),    op!(AND, ABS, 4),    op!(ROL, ABS, 6),    ___,

    // 0x30
    op!(BMI, REL, 2),    op!(AND, INY, 5),    ___,                 ___,                 ___,                 op!(AND, ZPX, 4),    op!(ROL, ZPX, 6),    ___,
    op!(SEC, IMP, 2),    op!(AND, ABY, 4),    ___,                 ___,                 ___,                 op!(AND, ABX, 4),    op!(ROL, ABX, 7),    ___,

    // 0x40
    op!(RTI, IMP, 6),    op!(EOR, INX, 6),    ___,                 ___,                 ___,                 op!(EOR, ZP, 3),     op!(LSR, ZP, 5),     ___,
    op!(PHA, IMP, 3),    op!(EOR, IMM, 2),    op!(LSR, ACC, 2),    ___,                 op!(JMP, ABS, 3),    op!(EOR, ABS, 4),    op!(LSR, ABS, 6),    ___,

    // 0x50
    op!(BVC, REL, 2),    op!(EOR, INY, 5),    ___,                 ___,                 ___,                 op!(EOR, ZPX, 4),    op!(LSR, ZPX, 6),    ___,
    op!(CLI, IMP, 2),    op!(EOR, ABY, 4),    ___,                 ___,                 ___,                 op!(EOR, ABX, 4),    op!(LSR, ABX, 7),    ___,

    // 0x60
    op!(RTS, IMP, 6),    op!(ADC, INX, 6),    ___,                 ___,                 ___,                 op!(ADC, ZP, 3),     op!(ROR, ZP, 5),     ___,
    op!(PLA, IMP, 4),    op!(ADC, IMM, 2),    op!(ROR, ACC, 2),    ___,                 op!(JMP, IND, 5),    op!(ADC, ABS, 4),    op!(ROR, ABS, 6),    ___,

    // 0x70
    op!(BVS, REL, 2),    op!(ADC, INY, 5),    ___,                 ___,                 ___,                 op!(ADC, ZPX, 4),    op!(ROR, ZPX, 6),    ___,
    op!(SEI, IMP, 2),    op!(ADC, ABY, 4),    ___,                 ___,                 ___,                 op!(ADC, ABX, 4),    op!(ROR, ABX, 7),    ___,

    // 0x80
    ___,                 op!(STA, INX, 6),    ___,                 ___,                 op!(STY, ZP, 3),     op!(STA, ZP, 3),     op!(STX, ZP, 3),     ___,
    op!(DEY, IMP, 2),    ___,                 op!(TXA, IMP, 2),    ___,                 op!(STY, ABS, 4),    op!(STA, ABS, 4),    op!(STX, ABS, 4),    ___,

    // 0x90
    op!(BCC, REL, 2),    op!(STA, INY, 6),    ___,                 ___,                 op!(STY, ZPX, 4),    op!(STA, ZPX, 4),    op!(STX, ZPY, 4),    ___,
    op!(TYA, IMP, 2),    op!(STA, ABY, 5),    op!(TXS, IMP, 2),    ___,                 ___,                 op!(STA, ABX, 5),    ___,                 ___,

    // 0xA0
    op!(LDY, IMM, 2),    op!(LDA, INX, 6),    op!(LDX, IMM, 2),    ___,                 op!(LDY, ZP, 3),     op!(LDA, ZP, 3),     op!(LDX, ZP, 3),     ___,
    op!(TAY, IMP, 2),    op!(LDA, IMM, 2),    op!(TAX, IMP, 2),    ___,                 op!(LDY, ABS, 4),    op!(LDA, ABS, 4),    op!(LDX, ABS, 4),    ___,

    // 0xB0
    op!(BCS, REL, 2),    op!(LDA, INY, 5),    ___,                 ___,                 op!(LDY, ZPX, 4),    op!(LDA, ZPX, 4),    op!(LDX, ZPY, 4),    ___,
    op!(CLV, IMP, 2),    op!(LDA, ABY, 4),    op!(TSX, IMP, 2),    ___,                 op!(LDY, ABX, 4),    op!(LDA, ABX, 4),    op!(LDX, ABY, 4),    ___,

    // 0xC0
    op!(CPY, IMM, 2),    op!(CMP, INX, 6),    ___,                 ___,                 op!(CPY, ZP, 3),     op!(CMP, ZP, 3),     op!(DEC, ZP, 5),     ___,
    op!(INY, IMP, 2),    op!(CMP, IMM, 2),    op!(DEX, IMP, 2),    ___,                 op!(CPY, ABS, 4),    op!(CMP, ABS, 4),    op!(DEC, ABS, 6),    ___,

    // 0xD0
    op!(BNE, REL, 2),    op!(CMP, INY, 5),    ___,                 ___,                 ___,                 op!(CMP, ZPX, 4),    op!(DEC, ZPX, 6),    ___,
    op!(CLD, IMP, 2),    op!(CMP, ABY, 4),    ___,                 ___,                 ___,                 op!(CMP, ABX, 4),    op!(DEC, ABX, 7),    ___,

    // 0xE0
    op!(CPX, IMM, 2),    op!(SBC, INX, 6),    ___,                 ___,                 op!(CPX, ZP, 3),     op!(SBC, ZP, 3),     op!(INC, ZP, 5),     ___,
    op!(INX, IMP, 2),    op!(SBC, IMM, 2),    op!(NOP, IMP, 2),    ___,                 op!(CPX, ABS, 4),    op!(SBC, ABS, 4),    op!(INC, ABS, 6),    ___,

    // 0xF0
    op!(BEQ, REL, 2),    op!(SBC, INY, 5),    ___,                 ___,                 ___,                 op!(SBC, ZPX, 4),    op!(INC, ZPX, 6),    ___,
    op!(SED, IMP, 2),    op!(SBC, ABY, 4),    ___,                 ___,                 ___,                 op!(SBC, ABX, 4),    op!(INC, ABX, 7),    ___,
];
