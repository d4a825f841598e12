use common::command::{Axis, Command, Direction};
use common::mem::{lower_half, pack_halves, upper_half};

use log::trace;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlFlags(u32);

impl ControlFlags {
    pub const ENABLE_SHIFT: u32 = 0;
    pub const ENABLE: u32 = 0x1 << Self::ENABLE_SHIFT;

    pub fn new() -> ControlFlags {
        Default::default()
    }

    pub fn from_raw(raw: u32) -> Self {
        ControlFlags(raw)
    }

    pub fn to_raw(&self) -> u32 {
        self.0
    }

    pub fn get_enable(&self) -> bool {
        (self.0 & Self::ENABLE) != 0
    }
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    const NIBBLE_MASK: u16 = 0xf;

    pub fn new(x: u16, y: u16) -> Self {
        Position { x, y }
    }

    pub fn from_packed(word: u32) -> Self {
        Position { x: lower_half(word), y: upper_half(word) }
    }

    pub fn pack(&self) -> u32 {
        pack_halves(self.x, self.y)
    }

    pub fn get(&self, axis: Axis) -> u16 {
        if axis.is_x() { self.x } else { self.y }
    }

    // What `axis` would hold after `cmd` if it weren't truncated to 16 bits.
    pub fn reach(&self, axis: Axis, cmd: &Command) -> i64 {
        self.get(axis) as i64 + cmd.delta(axis)
    }

    pub fn apply(&mut self, cmd: &Command) {
        let m = cmd.magnitude;
        match cmd.dir {
            Direction::East => self.x = self.x.wrapping_add(m),
            Direction::North => self.y = self.y.wrapping_add(m),
            Direction::West => self.x = self.x.wrapping_sub(m),
            Direction::South => self.y = self.y.wrapping_sub(m),
        }
    }

    // Low nibble of y over low nibble of x, as driven on the output port.
    pub fn nibbles(&self) -> u8 {
        (((self.y & Self::NIBBLE_MASK) << 4) | (self.x & Self::NIBBLE_MASK)) as u8
    }
}

////////////////////////////////////////////////////////////////////////////////

pub struct PeripheralState {
    cycles: usize,
    position: Position,
    flags: ControlFlags,
    interrupt: bool,
}

impl PeripheralState {
    pub fn new() -> Self {
        PeripheralState {
            cycles: 0usize,
            position: Position::default(),
            flags: ControlFlags::new(),
            interrupt: false,
        }
    }

    // Everything but the cycle count.
    pub fn reset(&mut self) {
        trace!("State: reset at cycle {}", self.cycles);
        self.position = Position::default();
        self.flags = ControlFlags::new();
        self.interrupt = false;
    }

    pub fn inc_cycles(&mut self) {
        self.cycles += 1;
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        trace!("State: position ({}, {}) -> ({}, {})",
            self.position.x, self.position.y, position.x, position.y);
        self.position = position;
    }

    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: ControlFlags) {
        trace!("State: writing {:#x} to control flags", flags.to_raw());
        self.flags = flags;
    }

    pub fn interrupt(&self) -> bool {
        self.interrupt
    }

    pub fn set_interrupt(&mut self, val: bool) {
        trace!("State: interrupt latch {} -> {}", self.interrupt, val);
        self.interrupt = val;
    }
}

impl Default for PeripheralState {
    fn default() -> Self {
        Self::new()
    }
}
