use crate::bus::Bus;

/// Flat 64 KiB memory with scriptable interrupt lines.
#[derive(Debug)]
pub(crate) struct MockBus {
    pub(crate) mem: Box<[u8; 0x1_0000]>,
    pub(crate) cycles: u64,
    /// PPU dots that would have been clocked.
    pub(crate) dots: u64,
    pub(crate) stall: u32,
    pub(crate) nmi: bool,
    pub(crate) vblank: bool,
}

impl Default for MockBus {
    fn default() -> Self {
        Self {
            mem: Box::new([0; 0x1_0000]),
            cycles: 0,
            dots: 0,
            stall: 0,
            nmi: false,
            vblank: false,
        }
    }
}

impl MockBus {
    /// Places `program` at `origin` and points the reset vector at it.
    pub(crate) fn with_program(origin: u16, program: &[u8]) -> Self {
        let mut bus = Self::default();
        let start = origin as usize;
        bus.mem[start..start + program.len()].copy_from_slice(program);
        let [lo, hi] = origin.to_le_bytes();
        bus.mem[0xFFFC] = lo;
        bus.mem[0xFFFD] = hi;
        bus
    }
}

impl Bus for MockBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.mem[addr as usize] = data;
    }

    fn peek(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn tick(&mut self, cycles: u32) {
        self.cycles += u64::from(cycles);
        self.dots += u64::from(cycles) * 3;
    }

    fn total_cycles(&self) -> u64 {
        self.cycles
    }

    fn take_stall_cycles(&mut self) -> u32 {
        std::mem::take(&mut self.stall)
    }

    fn nmi_line(&self) -> bool {
        self.nmi
    }

    fn in_vblank(&self) -> bool {
        self.vblank
    }
}
