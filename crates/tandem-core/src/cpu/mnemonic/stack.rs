use crate::{
    bus::Bus,
    cpu::{Cpu, status::Status},
};

impl Cpu {
    pub(super) fn pha(&mut self, bus: &mut impl Bus) {
        self.push(bus, self.a);
    }

    /// NV-BDIZC
    /// --------
    ///
    /// PHP - Push Processor Status On Stack
    ///
    /// The pushed copy always has bit 5 set.
    pub(super) fn php(&mut self, bus: &mut impl Bus) {
        self.push(bus, self.p.to_pushed_byte());
    }

    pub(super) fn pla(&mut self, bus: &mut impl Bus) {
        self.a = self.pop(bus);
        self.p.set_zn(self.a);
    }

    /// NV-BDIZC
    /// ✓✓--✓✓✓✓
    ///
    /// PLP - Pull Processor Status From Stack
    ///
    /// Bits 4 and 5 of the pulled byte are ignored.
    pub(super) fn plp(&mut self, bus: &mut impl Bus) {
        let value = self.pop(bus);
        self.p = Status::from_pulled_byte(value);
    }
}
