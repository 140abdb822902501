use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand, status::Status},
};

impl Cpu {
    /// NV-BDIZC
    /// ✓-----✓✓
    ///
    /// ASL - Arithmetic Shift Left
    /// Operation: C ← /M7...M0/ ← 0
    ///
    /// Addressing Mode                     | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// ----------------------------------- | ---------------------- | ------ | --------- | ----------
    /// Accumulator                         | ASL A                  | $0A    | 1         | 2
    /// Absolute                            | ASL $nnnn              | $0E    | 3         | 6
    /// X-Indexed Absolute                  | ASL $nnnn,X            | $1E    | 3         | 7
    /// Zero Page                           | ASL $nn                | $06    | 2         | 5
    /// X-Indexed Zero Page                 | ASL $nn,X              | $16    | 2         | 6
    pub(super) fn asl(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.modify(bus, operand, |_, value| (value << 1, value & 0x80 != 0));
    }

    /// LSR - Logical Shift Right. Bit 0 goes to carry, N is always cleared.
    pub(super) fn lsr(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.modify(bus, operand, |_, value| (value >> 1, value & 0x01 != 0));
    }

    /// ROL - Rotate Left through carry.
    pub(super) fn rol(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.modify(bus, operand, |carry, value| {
            ((value << 1) | u8::from(carry), value & 0x80 != 0)
        });
    }

    /// ROR - Rotate Right through carry.
    pub(super) fn ror(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.modify(bus, operand, |carry, value| {
            ((value >> 1) | (u8::from(carry) << 7), value & 0x01 != 0)
        });
    }

    /// Read-modify-write helper: `op(carry_in, value) -> (result, carry_out)`.
    fn modify(&mut self, bus: &mut impl Bus, operand: Operand, op: impl Fn(bool, u8) -> (u8, bool)) {
        let value = self.load(bus, operand);
        let (result, carry) = op(self.p.contains(Status::CARRY), value);
        self.p.set(Status::CARRY, carry);
        self.p.set_zn(result);
        self.store(bus, operand, result);
    }
}
