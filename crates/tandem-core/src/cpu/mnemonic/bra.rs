use crate::cpu::{Cpu, Flow, addressing::Operand, instruction::Mnemonic, status::Status};

impl Cpu {
    /// BCC, BCS, BEQ, BMI, BNE, BPL, BVC and BVS.
    pub(super) fn branch_on(&mut self, mnemonic: Mnemonic, operand: Operand) -> Flow {
        let p = self.p;
        let condition = match mnemonic {
            Mnemonic::BCC => !p.contains(Status::CARRY),
            Mnemonic::BCS => p.contains(Status::CARRY),
            Mnemonic::BNE => !p.contains(Status::ZERO),
            Mnemonic::BEQ => p.contains(Status::ZERO),
            Mnemonic::BPL => !p.contains(Status::NEGATIVE),
            Mnemonic::BMI => p.contains(Status::NEGATIVE),
            Mnemonic::BVC => !p.contains(Status::OVERFLOW),
            Mnemonic::BVS => p.contains(Status::OVERFLOW),
            _ => false,
        };
        self.branch(operand, condition)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bus::mock::MockBus,
        cpu::{Cpu, status::Status},
    };

    fn boot_at(origin: u16, program: &[u8]) -> (Cpu, MockBus) {
        let mut bus = MockBus::with_program(origin, program);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        (cpu, bus)
    }

    #[test]
    fn not_taken_costs_base_cycles() {
        // BEQ +4 with Z clear
        let (mut cpu, mut bus) = boot_at(0x8000, &[0xF0, 0x04]);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.pc, 0x8002);
    }

    #[test]
    fn taken_same_page_costs_one_extra() {
        let (mut cpu, mut bus) = boot_at(0x8000, &[0xD0, 0x04]);
        assert_eq!(cpu.step(&mut bus), 3);
        assert_eq!(cpu.pc, 0x8006);
    }

    #[test]
    fn taken_across_page_costs_two_extra() {
        // BCS -4 from $8100: next is $8102, target $80FE.
        let (mut cpu, mut bus) = boot_at(0x8100, &[0xB0, 0xFC]);
        cpu.p.insert(Status::CARRY);
        assert_eq!(cpu.step(&mut bus), 4);
        assert_eq!(cpu.pc, 0x80FE);
    }

    #[test]
    fn every_condition_reads_its_flag() {
        let cases: [(u8, Status, bool); 8] = [
            (0x10, Status::NEGATIVE, false), // BPL
            (0x30, Status::NEGATIVE, true),  // BMI
            (0x50, Status::OVERFLOW, false), // BVC
            (0x70, Status::OVERFLOW, true),  // BVS
            (0x90, Status::CARRY, false),    // BCC
            (0xB0, Status::CARRY, true),     // BCS
            (0xD0, Status::ZERO, false),     // BNE
            (0xF0, Status::ZERO, true),      // BEQ
        ];
        for (opcode, flag, when_set) in cases {
            for set in [false, true] {
                let (mut cpu, mut bus) = boot_at(0x8000, &[opcode, 0x10]);
                cpu.p.set(flag, set);
                cpu.step(&mut bus);
                let taken = set == when_set;
                assert_eq!(cpu.pc, if taken { 0x8012 } else { 0x8002 }, "opcode {opcode:#04X}");
            }
        }
    }
}
