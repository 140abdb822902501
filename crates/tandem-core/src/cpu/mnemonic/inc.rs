use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand},
};

impl Cpu {
    /// INC - Increment Memory by One. Sets N and Z.
    pub(super) fn inc(&mut self, bus: &mut impl Bus, operand: Operand) {
        let value = self.load(bus, operand).wrapping_add(1);
        self.store(bus, operand, value);
        self.p.set_zn(value);
    }

    /// DEC - Decrement Memory by One. Sets N and Z.
    pub(super) fn dec(&mut self, bus: &mut impl Bus, operand: Operand) {
        let value = self.load(bus, operand).wrapping_sub(1);
        self.store(bus, operand, value);
        self.p.set_zn(value);
    }

    pub(super) fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.p.set_zn(self.x);
    }

    pub(super) fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.p.set_zn(self.y);
    }

    pub(super) fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.p.set_zn(self.x);
    }

    pub(super) fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.p.set_zn(self.y);
    }
}
