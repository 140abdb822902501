use std::fmt::Display;

use crate::cpu::addressing::Addressing;

/// The 56 documented 6502 mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    //Load/Store
    LDA,
    LDX,
    LDY,
    STA,
    STX,
    STY,
    //Transfer
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
    //Stack
    PHA,
    PHP,
    PLA,
    PLP,
    //Shift
    ASL,
    LSR,
    ROL,
    ROR,
    //Logic
    AND,
    BIT,
    EOR,
    ORA,
    //Arithmetic
    ADC,
    CMP,
    CPX,
    CPY,
    SBC,
    //Increment/Decrement
    DEC,
    DEX,
    DEY,
    INC,
    INX,
    INY,
    //Control Flow
    BRK,
    JMP,
    JSR,
    RTI,
    RTS,
    //Branch
    BCC,
    BCS,
    BEQ,
    BMI,
    BNE,
    BPL,
    BVC,
    BVS,
    //Flags
    CLC,
    CLD,
    CLI,
    CLV,
    SEC,
    SED,
    SEI,
    //NOP
    NOP,
}

impl Mnemonic {
    /// Read instructions pay one cycle when indexing crosses a page. Stores
    /// and read-modify-write instructions already budget for it.
    pub const fn pays_page_cross(self) -> bool {
        matches!(
            self,
            Mnemonic::LDA
                | Mnemonic::LDX
                | Mnemonic::LDY
                | Mnemonic::AND
                | Mnemonic::EOR
                | Mnemonic::ORA
                | Mnemonic::ADC
                | Mnemonic::SBC
                | Mnemonic::CMP
        )
    }
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One entry of the opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub addressing: Addressing,
    /// Base cycle count before page-cross and branch penalties.
    pub cycles: u8,
}

impl Instruction {
    /// Encoded size in bytes, opcode included.
    pub const fn size(&self) -> u16 {
        1 + self.addressing.operand_len()
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.mnemonic, self.addressing)
    }
}
