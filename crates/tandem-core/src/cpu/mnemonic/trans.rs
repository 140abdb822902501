use crate::cpu::Cpu;

impl Cpu {
    pub(super) fn tax(&mut self) {
        self.x = self.a;
        self.p.set_zn(self.x);
    }

    pub(super) fn tay(&mut self) {
        self.y = self.a;
        self.p.set_zn(self.y);
    }

    pub(super) fn tsx(&mut self) {
        self.x = self.s;
        self.p.set_zn(self.x);
    }

    pub(super) fn txa(&mut self) {
        self.a = self.x;
        self.p.set_zn(self.a);
    }

    /// TXS is the only transfer that leaves the flags alone.
    pub(super) fn txs(&mut self) {
        self.s = self.x;
    }

    pub(super) fn tya(&mut self) {
        self.a = self.y;
        self.p.set_zn(self.a);
    }
}
