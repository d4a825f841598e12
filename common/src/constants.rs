
pub const WORD_SIZE: u8 = 4; // Bytes

// Register offsets within the peripheral's address window.
pub const INPUT: u8 = 0x00;
pub const CONTROL: u8 = 0x04;
pub const POSITION: u8 = 0x08;
pub const INTERRUPT_ACK: u8 = 0x10;

pub const ADDR_BITS: u8 = 6;
pub const ADDR_END: u8 = 1 << ADDR_BITS; // Exclusive

// Clock edges from a write to 0x00 until the position register shows its
// effect, counting the edge that accepts the write.
pub const COMMIT_LATENCY: usize = 2;

// How long the host holds reset.
pub const RESET_CYCLES: usize = 10;

pub const MOVEMENT_LIMIT: u32 = 1000;
pub const SPIKE_LIMIT: u32 = u16::MAX as u32;
