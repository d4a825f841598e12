
use common::command::Command;
use common::constants::*;
use common::mem::{is_word_aligned, word_addr};

use crate::io::{BusError, MMIOHandler, Width};
use crate::peripheral_state::Position;

use std::collections::HashSet;

use delegate::delegate;
use log::{debug, trace};

// Drives one device the way the host SoC does: every register access is one
// bus transaction followed by one clock edge.
pub struct Host<D: MMIOHandler> {
    device: D,
    mapped: HashSet<u8>,
    cycles: usize,
}

impl<D: MMIOHandler> Host<D> {
    pub fn new(device: D) -> Self {
        let addrs = device.default_addrs().to_vec();
        Self::with_addrs(device, addrs)
    }

    pub fn with_addrs<I>(device: D, addrs: I) -> Self
    where
        I: IntoIterator<Item = u8> {

        let mut host = Host {
            device,
            mapped: HashSet::new(),
            cycles: 0,
        };
        for addr in addrs.into_iter() {
            host.register(addr);
        }
        host
    }

    fn register(&mut self, addr: u8) {
        assert!(addr < ADDR_END, "Register {addr:#04x} outside peripheral window");
        assert!(is_word_aligned(addr), "Register {addr:#04x} not aligned");
        let fresh = self.mapped.insert(addr);
        assert!(fresh, "Duplicate register {addr:#04x}");
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    delegate! {
        to self.device {
            #[call(interrupt_asserted)]
            pub fn is_interrupt_asserted(&self) -> bool;
            #[call(output_port)]
            pub fn uo_out(&self) -> u8;
        }
    }

    // Hold reset long enough for the device to settle.
    pub fn reset(&mut self) {
        debug!("Host: reset at cycle {}", self.cycles);
        for _ in 0..RESET_CYCLES {
            self.device.reset();
            self.tick();
        }
    }

    pub fn clock_cycles(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    fn tick(&mut self) {
        self.cycles += 1;
        self.device.tick();
    }

    fn check(&self, addr: u8, width: Width) -> Result<(), BusError> {
        if width == Width::Word && !is_word_aligned(addr) {
            return Err(BusError::Unaligned(addr));
        }
        if !self.mapped.contains(&word_addr(addr)) {
            return Err(BusError::Unmapped(addr));
        }
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    pub fn write_word_reg(&mut self, addr: u8, val: u32) -> Result<(), BusError> {
        self.check(addr, Width::Word)?;
        trace!("Host: writing {val:#x} to {addr:#04x} (word)");
        self.device.write_word(addr, val)?;
        self.tick();
        Ok(())
    }

    pub fn write_byte_reg(&mut self, addr: u8, val: u8) -> Result<(), BusError> {
        self.check(addr, Width::Byte)?;
        trace!("Host: writing {val:#x} to {addr:#04x} (byte)");
        self.device.write_byte(addr, val)?;
        self.tick();
        Ok(())
    }

    pub fn read_word_reg(&mut self, addr: u8) -> Result<u32, BusError> {
        self.check(addr, Width::Word)?;
        let val = self.device.read_word(addr)?;
        trace!("Host: read {val:#x} from {addr:#04x} (word)");
        self.tick();
        Ok(val)
    }

    pub fn read_byte_reg(&mut self, addr: u8) -> Result<u8, BusError> {
        self.check(addr, Width::Byte)?;
        let val = self.device.read_byte(addr)?;
        trace!("Host: read {val:#x} from {addr:#04x} (byte)");
        self.tick();
        Ok(val)
    }

    pub fn write_command(&mut self, cmd: Command) -> Result<(), BusError> {
        self.write_word_reg(INPUT, cmd.encode())
    }

    pub fn read_position(&mut self) -> Result<Position, BusError> {
        self.read_word_reg(POSITION).map(Position::from_packed)
    }

    pub fn acknowledge(&mut self) -> Result<(), BusError> {
        self.write_word_reg(INTERRUPT_ACK, 0x1)
    }
}
