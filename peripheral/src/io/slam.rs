//! The SLAM position unit.
//!
//! Registers:
//!
//! | Offset | Access              | Contents                                  |
//! |--------|---------------------|-------------------------------------------|
//! | `0x00` | word write          | Command: `[17:16]` direction, `[15:0]` magnitude |
//! | `0x04` | word/byte write, read | Control flags, bit 0 enables updates    |
//! | `0x08` | word/byte read      | Position: `[15:0]` x, `[31:16]` y         |
//! | `0x10` | word/byte write     | Writing bit 0 acknowledges the interrupt  |
//!
//! A command is decoded on the edge that accepts the write and committed on the
//! edge after, so it shows up in `0x08` two cycles after it was written.

use common::command::{Axis, Command, Encoding};
use common::constants::*;
use common::decoder::decode;
use common::mem::{byte_lane, is_word_aligned, word_addr};

use crate::io::{BusError, MMIOHandler, Width};
use crate::peripheral_state::{ControlFlags, PeripheralState, Position};

use delegate::delegate;
use log::{debug, info, trace, warn};

/// Interrupt comparator: a commit qualifies when it carries `axis` across
/// `limit`, from at or below it to above it. The result is taken before
/// truncation to 16 bits, so a commit that wraps past the top also crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    pub axis: Axis,
    pub limit: u32,
}

impl Monitor {
    pub fn new(axis: Axis, limit: u32) -> Self {
        Monitor { axis, limit }
    }

    pub fn qualifies(&self, before: &Position, cmd: &Command) -> bool {
        let limit = self.limit as i64;
        before.get(self.axis) as i64 <= limit && before.reach(self.axis, cmd) > limit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlamConfig {
    pub encoding: Encoding,
    pub monitor: Monitor,
}

impl SlamConfig {
    pub fn movement() -> Self {
        SlamConfig {
            encoding: Encoding::Movement,
            monitor: Monitor::new(Axis::X, MOVEMENT_LIMIT),
        }
    }

    pub fn spike() -> Self {
        SlamConfig {
            encoding: Encoding::Spike,
            monitor: Monitor::new(Axis::X, SPIKE_LIMIT),
        }
    }

    pub fn for_encoding(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Movement => Self::movement(),
            Encoding::Spike => Self::spike(),
        }
    }

    pub fn with_monitor(self, monitor: Monitor) -> Self {
        SlamConfig { monitor, ..self }
    }
}

impl Default for SlamConfig {
    fn default() -> Self {
        Self::movement()
    }
}

////////////////////////////////////////////////////////////////////////////////

// A bus write waiting for the next clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strobe {
    Input(u32),
    Control(u32),
    Ack(u32),
}

pub struct Slam {
    config: SlamConfig,
    state: PeripheralState,
    strobe: Option<Strobe>,
    pending: Option<Command>,
}

impl Default for Slam {
    fn default() -> Self {
        Slam::new(SlamConfig::default())
    }
}

impl Slam {
    pub const ADDRS: &[u8] = &[INPUT, CONTROL, POSITION, INTERRUPT_ACK];

    const ACK_MASK: u32 = 0x1;

    pub fn new(config: SlamConfig) -> Self {
        Slam {
            config,
            state: PeripheralState::new(),
            strobe: None,
            pending: None,
        }
    }

    pub fn config(&self) -> &SlamConfig {
        &self.config
    }

    delegate! {
        to self.state {
            pub fn position(&self) -> Position;
            pub fn flags(&self) -> ControlFlags;
            pub fn cycles(&self) -> usize;
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn latch(&mut self, strobe: Strobe) {
        if let Some(prev) = self.strobe.replace(strobe) {
            warn!("Slam: {prev:?} overwritten by {strobe:?} before a clock edge");
        }
    }

    fn acknowledge(&mut self, val: u32) {
        if val & Self::ACK_MASK == 0 {
            trace!("Slam: acknowledge write of {val:#x} without bit 0");
            return;
        }
        if self.state.interrupt() {
            info!("Slam: interrupt acknowledged at cycle {}", self.state.cycles());
        }
        self.state.set_interrupt(false);
    }

    fn commit(&mut self, cmd: Command) {
        if !self.state.flags().get_enable() {
            debug!("Slam: updates disabled, dropping {cmd}");
            return;
        }

        let mut position = self.state.position();
        let crossed = self.config.monitor.qualifies(&position, &cmd);
        position.apply(&cmd);
        debug!("Slam: commit {cmd}, position now ({}, {})", position.x, position.y);
        self.state.set_position(position);

        if crossed {
            if !self.state.interrupt() {
                info!("Slam: {} passed {} at cycle {}, raising interrupt",
                    self.config.monitor.axis, self.config.monitor.limit, self.state.cycles());
            }
            self.state.set_interrupt(true);
        }
    }

    fn decode_input(&mut self, word: u32) {
        let wired = self.config.encoding.wired();
        self.pending = decode(word, wired);
        let what = if self.config.encoding.is_spike() { "spike" } else { "command" };
        match &self.pending {
            Some(cmd) => debug!("Slam: decoded {what} {word:#x} as {cmd}"),
            None => debug!("Slam: {word:#x} has a direction outside the {} wired, ignoring",
                wired.count()),
        }
    }
}

impl MMIOHandler for Slam {
    fn reset(&mut self) {
        self.state.reset();
        self.strobe = None;
        self.pending = None;
    }

    fn tick(&mut self) {
        self.state.inc_cycles();
        let strobe = self.strobe.take();

        // Flags and acknowledge land ahead of this edge's commit.
        match strobe {
            Some(Strobe::Control(val)) => self.state.set_flags(ControlFlags::from_raw(val)),
            Some(Strobe::Ack(val)) => self.acknowledge(val),
            _ => (),
        }

        if let Some(cmd) = self.pending.take() {
            self.commit(cmd);
        }

        if let Some(Strobe::Input(word)) = strobe {
            self.decode_input(word);
        }
    }

    fn interrupt_asserted(&self) -> bool {
        self.state.interrupt()
    }

    fn output_port(&self) -> u8 {
        self.state.position().nibbles()
    }

    fn default_addrs(&self) -> &[u8] {
        Self::ADDRS
    }

    fn read_word(&mut self, addr: u8) -> Result<u32, BusError> {
        if !is_word_aligned(addr) {
            return Err(BusError::Unaligned(addr));
        }
        match addr {
            POSITION => Ok(self.state.position().pack()),
            CONTROL => Ok(self.state.flags().to_raw()),
            INPUT | INTERRUPT_ACK => Err(BusError::WriteOnly(addr)),
            _ => Err(BusError::Unmapped(addr)),
        }
    }

    fn read_byte(&mut self, addr: u8) -> Result<u8, BusError> {
        match word_addr(addr) {
            POSITION => Ok(byte_lane(self.state.position().pack(), addr)),
            CONTROL => Ok(byte_lane(self.state.flags().to_raw(), addr)),
            INPUT | INTERRUPT_ACK => Err(BusError::WriteOnly(addr)),
            _ => Err(BusError::Unmapped(addr)),
        }
    }

    fn write_word(&mut self, addr: u8, val: u32) -> Result<(), BusError> {
        if !is_word_aligned(addr) {
            return Err(BusError::Unaligned(addr));
        }
        match addr {
            INPUT => self.latch(Strobe::Input(val)),
            CONTROL => self.latch(Strobe::Control(val)),
            INTERRUPT_ACK => self.latch(Strobe::Ack(val)),
            POSITION => return Err(BusError::ReadOnly(addr)),
            _ => return Err(BusError::Unmapped(addr)),
        }
        Ok(())
    }

    fn write_byte(&mut self, addr: u8, val: u8) -> Result<(), BusError> {
        match addr {
            CONTROL => self.latch(Strobe::Control(val as u32)),
            INTERRUPT_ACK => self.latch(Strobe::Ack(val as u32)),
            _ => {
                return Err(match word_addr(addr) {
                    POSITION => BusError::ReadOnly(addr),
                    INPUT | CONTROL | INTERRUPT_ACK => BusError::Width(Width::Byte, addr),
                    _ => BusError::Unmapped(addr),
                });
            }
        }
        Ok(())
    }
}
