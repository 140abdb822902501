use crate::{
    bus::Bus,
    cpu::{Cpu, Flow, addressing::Operand, instruction::Mnemonic},
};

mod arith;
mod bra;
mod ctrl;
mod flags;
mod inc;
mod load;
mod logic;
mod shift;
mod stack;
mod trans;

impl Cpu {
    /// Runs the handler for `mnemonic` against an already resolved operand.
    pub(crate) fn dispatch(
        &mut self,
        bus: &mut impl Bus,
        mnemonic: Mnemonic,
        operand: Operand,
    ) -> Flow {
        match mnemonic {
            //Load/Store
            Mnemonic::LDA => self.lda(bus, operand),
            Mnemonic::LDX => self.ldx(bus, operand),
            Mnemonic::LDY => self.ldy(bus, operand),
            Mnemonic::STA => self.sta(bus, operand),
            Mnemonic::STX => self.stx(bus, operand),
            Mnemonic::STY => self.sty(bus, operand),
            //Transfer
            Mnemonic::TAX => self.tax(),
            Mnemonic::TAY => self.tay(),
            Mnemonic::TSX => self.tsx(),
            Mnemonic::TXA => self.txa(),
            Mnemonic::TXS => self.txs(),
            Mnemonic::TYA => self.tya(),
            //Stack
            Mnemonic::PHA => self.pha(bus),
            Mnemonic::PHP => self.php(bus),
            Mnemonic::PLA => self.pla(bus),
            Mnemonic::PLP => self.plp(bus),
            //Shift
            Mnemonic::ASL => self.asl(bus, operand),
            Mnemonic::LSR => self.lsr(bus, operand),
            Mnemonic::ROL => self.rol(bus, operand),
            Mnemonic::ROR => self.ror(bus, operand),
            //Logic
            Mnemonic::AND => self.and(bus, operand),
            Mnemonic::BIT => self.bit(bus, operand),
            Mnemonic::EOR => self.eor(bus, operand),
            Mnemonic::ORA => self.ora(bus, operand),
            //Arithmetic
            Mnemonic::ADC => self.adc(bus, operand),
            Mnemonic::SBC => self.sbc(bus, operand),
            Mnemonic::CMP => self.compare(bus, operand, self.a),
            Mnemonic::CPX => self.compare(bus, operand, self.x),
            Mnemonic::CPY => self.compare(bus, operand, self.y),
            //Increment/Decrement
            Mnemonic::INC => self.inc(bus, operand),
            Mnemonic::INX => self.inx(),
            Mnemonic::INY => self.iny(),
            Mnemonic::DEC => self.dec(bus, operand),
            Mnemonic::DEX => self.dex(),
            Mnemonic::DEY => self.dey(),
            //Control Flow
            Mnemonic::BRK => return self.brk(bus),
            Mnemonic::JMP => return self.jmp(operand),
            Mnemonic::JSR => return self.jsr(bus, operand),
            Mnemonic::RTI => return self.rti(bus),
            Mnemonic::RTS => return self.rts(bus),
            //Branch
            Mnemonic::BCC
            | Mnemonic::BCS
            | Mnemonic::BEQ
            | Mnemonic::BMI
            | Mnemonic::BNE
            | Mnemonic::BPL
            | Mnemonic::BVC
            | Mnemonic::BVS => return self.branch_on(mnemonic, operand),
            //Flags
            Mnemonic::CLC
            | Mnemonic::CLD
            | Mnemonic::CLI
            | Mnemonic::CLV
            | Mnemonic::SEC
            | Mnemonic::SED
            | Mnemonic::SEI => self.flag_op(mnemonic),
            //NOP
            Mnemonic::NOP => {}
        }
        Flow::Advance
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{bus::mock::MockBus, cpu::Cpu};

    /// Boots a CPU on `program` at `$8000` and runs `steps` instructions.
    pub(crate) fn run(program: &[u8], steps: usize, setup: impl FnOnce(&mut Cpu, &mut MockBus)) -> (Cpu, MockBus) {
        let mut bus = MockBus::with_program(0x8000, program);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        setup(&mut cpu, &mut bus);
        for _ in 0..steps {
            cpu.step(&mut bus);
        }
        (cpu, bus)
    }
}
