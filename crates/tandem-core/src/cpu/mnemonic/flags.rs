use crate::cpu::{Cpu, instruction::Mnemonic, status::Status};

impl Cpu {
    /// CLC, CLD, CLI, CLV, SEC, SED and SEI.
    pub(super) fn flag_op(&mut self, mnemonic: Mnemonic) {
        let (flag, value) = match mnemonic {
            Mnemonic::CLC => (Status::CARRY, false),
            Mnemonic::SEC => (Status::CARRY, true),
            Mnemonic::CLD => (Status::DECIMAL, false),
            Mnemonic::SED => (Status::DECIMAL, true),
            Mnemonic::CLI => (Status::INTERRUPT, false),
            Mnemonic::SEI => (Status::INTERRUPT, true),
            Mnemonic::CLV => (Status::OVERFLOW, false),
            _ => return,
        };
        self.p.set(flag, value);
    }
}
