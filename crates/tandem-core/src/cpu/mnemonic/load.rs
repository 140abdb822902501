use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Operand},
};

impl Cpu {
    /// NV-BDIZC
    /// ✓-----✓-
    ///
    /// LDA - Load Accumulator with Memory
    /// Operation: M → A
    ///
    /// Addressing Mode                     | Assembly Language Form | Opcode | No. Bytes | No. Cycles
    /// ----------------------------------- | ---------------------- | ------ | --------- | ----------
    /// Immediate                           | LDA #$nn               | $A9    | 2         | 2
    /// Absolute                            | LDA $nnnn              | $AD    | 3         | 4
    /// X-Indexed Absolute                  | LDA $nnnn,X            | $BD    | 3         | 4+p
    /// Y-Indexed Absolute                  | LDA $nnnn,Y            | $B9    | 3         | 4+p
    /// Zero Page                           | LDA $nn                | $A5    | 2         | 3
    /// X-Indexed Zero Page                 | LDA $nn,X              | $B5    | 2         | 4
    /// X-Indexed Zero Page Indirect        | LDA ($nn,X)            | $A1    | 2         | 6
    /// Zero Page Indirect Y-Indexed        | LDA ($nn),Y            | $B1    | 2         | 5+p
    ///
    /// p: =1 if page is crossed.
    pub(super) fn lda(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.a = self.load(bus, operand);
        self.p.set_zn(self.a);
    }

    /// LDX - Load Index Register X From Memory. Sets N and Z.
    pub(super) fn ldx(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.x = self.load(bus, operand);
        self.p.set_zn(self.x);
    }

    /// LDY - Load Index Register Y From Memory. Sets N and Z.
    pub(super) fn ldy(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.y = self.load(bus, operand);
        self.p.set_zn(self.y);
    }

    /// STA - Store Accumulator in Memory. No flags change.
    pub(super) fn sta(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.store(bus, operand, self.a);
    }

    pub(super) fn stx(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.store(bus, operand, self.x);
    }

    pub(super) fn sty(&mut self, bus: &mut impl Bus, operand: Operand) {
        self.store(bus, operand, self.y);
    }
}
