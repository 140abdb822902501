use bitflags::bitflags;

bitflags! {
    /// Represents the 8-bit processor status register (P) of the NES CPU.
    ///
    /// Bit layout:
    /// 7 6 5 4 3 2 1 0
    /// N V _ B D I Z C
    ///
    /// B and bit 5 only exist in the copies pushed to the stack; the live
    /// register keeps B clear and bit 5 set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry flag (C)
        /// Set when an addition produces a carry out of bit 7,
        /// or a subtraction does not need a borrow.
        const CARRY     = 0b0000_0001;

        /// Zero flag (Z)
        /// Set when the result of an operation is zero.
        const ZERO      = 0b0000_0010;

        /// Interrupt Disable flag (I)
        /// When set, maskable interrupts (IRQ) are disabled.
        const INTERRUPT = 0b0000_0100;

        /// Decimal Mode flag (D)
        /// Stored and restored, but the 2A03 has no BCD unit so arithmetic
        /// ignores it.
        const DECIMAL   = 0b0000_1000;

        /// Break Command flag (B)
        /// Marks a status byte pushed by BRK.
        const BREAK     = 0b0001_0000;

        /// Unused bit (always 1)
        const UNUSED    = 0b0010_0000;

        /// Overflow flag (V)
        /// Set when signed arithmetic overflows.
        const OVERFLOW  = 0b0100_0000;

        /// Negative flag (N)
        /// Reflects the sign bit (bit 7) of the result of the last operation.
        const NEGATIVE  = 0b1000_0000;
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

impl Status {
    /// Power-up state: interrupts disabled, bit 5 set.
    pub fn new() -> Self {
        Status::INTERRUPT | Status::UNUSED
    }

    /// Set or clear the Zero and Negative flags from a result byte.
    pub fn set_zn(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
        self.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// Byte pushed by PHP and interrupts (bit 5 forced on).
    pub fn to_pushed_byte(self) -> u8 {
        (self | Status::UNUSED).bits()
    }

    /// Status restored by PLP/RTI. Bits 4 and 5 of the pulled byte are ignored.
    pub fn from_pulled_byte(byte: u8) -> Self {
        (Status::from_bits_retain(byte) - Status::BREAK) | Status::UNUSED
    }
}
