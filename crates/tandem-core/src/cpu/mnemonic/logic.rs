use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand, status::Status},
};

impl Cpu {
    pub(super) fn and(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.a &= self.load(bus, operand);
        self.p.set_zn(self.a);
    }

    pub(super) fn eor(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.a ^= self.load(bus, operand);
        self.p.set_zn(self.a);
    }

    pub(super) fn ora(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.a |= self.load(bus, operand);
        self.p.set_zn(self.a);
    }

    /// NV-BDIZC
    /// ✓✓----✓-
    ///
    /// BIT - Test Bits in Memory with Accumulator
    ///
    /// Z reflects `A & M`; N and V are copied from bits 7 and 6 of memory.
    pub(super) fn bit(&mut self, bus: &mut impl Bus, operand: Operand) {
        let m = self.load(bus, operand);
        self.p.set(Status::ZERO, self.a & m == 0);
        self.p.set(Status::NEGATIVE, m & 0x80 != 0);
        self.p.set(Status::OVERFLOW, m & 0x40 != 0);
    }
}
