use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand, status::Status},
};

impl Cpu {
    /// NV-BDIZC
    /// ✓✓----✓✓
    ///
    /// ADC - Add Memory to Accumulator with Carry
    /// Operation: A + M + C → A, C
    ///
    /// The decimal flag is ignored; the 2A03 always adds in binary.
    pub(super) fn adc(&mut self, bus: &mut impl Bus, operand: Operand) {
        let m = self.load(bus, operand);
        self.add_with_carry(m);
    }

    /// NV-BDIZC
    /// ✓✓----✓✓
    ///
    /// SBC - Subtract Memory from Accumulator with Borrow
    /// Operation: A - M - ~C → A
    pub(super) fn sbc(&mut self, bus: &mut impl Bus, operand: Operand) {
        let m = self.load(bus, operand);
        self.add_with_carry(!m);
    }

    /// CMP, CPX and CPY: `reg - M` for flags only. C is set when `reg >= M`.
    pub(super) fn compare(&mut self, bus: &mut impl Bus, operand: Operand, reg: u8) {
        let m = self.load(bus, operand);
        self.p.set(Status::CARRY, reg >= m);
        self.p.set_zn(reg.wrapping_sub(m));
    }

    fn add_with_carry(&mut self, m: u8) {
        let a = self.a;
        let sum = u16::from(a) + u16::from(m) + u16::from(self.p.contains(Status::CARRY));
        let result = sum as u8;
        self.p.set(Status::CARRY, sum > 0xFF);
        self.p.set(Status::OVERFLOW, (!(a ^ m) & (a ^ result) & 0x80) != 0);
        self.a = result;
        self.p.set_zn(result);
    }
}
