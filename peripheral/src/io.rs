pub mod slam;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    #[error("No register at {0:#04x}")]
    Unmapped(u8),

    #[error("Register at {0:#04x} is read-only")]
    ReadOnly(u8),

    #[error("Register at {0:#04x} is write-only")]
    WriteOnly(u8),

    #[error("{0:?} access not supported at {1:#04x}")]
    Width(Width, u8),

    #[error("Word access at {0:#04x} not aligned")]
    Unaligned(u8),
}

// A device on the host bus. Writes are captured by the device and take effect
// on the next call to tick().
pub trait MMIOHandler: Send {
    fn reset(&mut self) {}
    fn tick(&mut self) {}
    fn interrupt_asserted(&self) -> bool {
        false
    }
    fn output_port(&self) -> u8 {
        0
    }
    fn default_addrs(&self) -> &[u8] {
        &[]
    }

    fn read_byte(&mut self, addr: u8) -> Result<u8, BusError>;
    fn read_word(&mut self, addr: u8) -> Result<u32, BusError>;

    fn write_byte(&mut self, addr: u8, val: u8) -> Result<(), BusError>;
    fn write_word(&mut self, addr: u8, val: u32) -> Result<(), BusError>;
}
