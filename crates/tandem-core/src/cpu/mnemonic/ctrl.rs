use crate::{
    bus::Bus,
    cpu::{Cpu, Flow, addressing::Operand, read_vector, status::Status},
    memory::cpu as cpu_mem,
};

impl Cpu {
    /// BRK - Force Break
    ///
    /// Pushes the address after the padding byte (`PC + 2`) and a status copy
    /// with B and bit 5 set, disables interrupts and jumps through `$FFFE`.
    pub(super) fn brk(&mut self, bus: &mut impl Bus) -> Flow {
        self.push_word(bus, self.pc.wrapping_add(2));
        let pushed = self.p.to_pushed_byte() | Status::BREAK.bits();
        self.push(bus, pushed);
        self.p.insert(Status::INTERRUPT);
        self.pc = read_vector(bus, cpu_mem::IRQ_VECTOR_LO, cpu_mem::IRQ_VECTOR_HI);
        Flow::Jump
    }

    pub(super) fn jmp(&mut self, operand: Operand) -> Flow {
        match operand {
            Operand::Memory(target) => {
                self.pc = target;
                Flow::Jump
            }
            _ => Flow::Advance,
        }
    }

    /// JSR - Jump to New Location Saving Return Address
    ///
    /// The pushed address is that of the last byte of the JSR itself; RTS adds one.
    pub(super) fn jsr(&mut self, bus: &mut impl Bus, operand: Operand) -> Flow {
        let Operand::Memory(target) = operand else {
            return Flow::Advance;
        };
        self.push_word(bus, self.pc.wrapping_add(2));
        self.pc = target;
        Flow::Jump
    }

    pub(super) fn rts(&mut self, bus: &mut impl Bus) -> Flow {
        self.pc = self.pop_word(bus).wrapping_add(1);
        Flow::Jump
    }

    /// RTI - Return from Interrupt. Restores status (minus B) then PC.
    pub(super) fn rti(&mut self, bus: &mut impl Bus) -> Flow {
        let status = self.pop(bus);
        self.p = Status::from_pulled_byte(status);
        self.pc = self.pop_word(bus);
        Flow::Jump
    }
}
