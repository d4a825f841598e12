use std::fmt;

use derive_more::IsVariant;
use num_derive::FromPrimitive;


#[derive(Debug, Clone, Copy, FromPrimitive, PartialEq, Eq, Hash, IsVariant)]
pub enum Direction {
    East = 0,
    North,
    West,
    South,
}

impl Direction {
    pub const SHIFT: u32 = 16;
    pub const NUM_BITS: u32 = 2;
    pub const MASK: u32 = (1u32 << Self::NUM_BITS) - 1;

    pub const ALL: [Direction; 4] = [Direction::East, Direction::North, Direction::West, Direction::South];

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn axis(self) -> Axis {
        match self {
            Direction::East | Direction::West => Axis::X,
            Direction::North | Direction::South => Axis::Y,
        }
    }

    pub fn from_name(name: &str) -> Option<Direction> {
        Self::ALL.into_iter().find(|dir| dir.to_string().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

// Bitmask over direction codes; bit n set means code n is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const ALL: DirectionSet = DirectionSet(0b1111);
    pub const EAST_NORTH: DirectionSet = DirectionSet(0b0011);

    pub fn contains(self, dir: Direction) -> bool {
        (self.0 >> dir.code()) & 0x1 != 0
    }

    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }
}

////////////////////////////////////////////////////////////////////////////////

/// How the peripheral interprets words written to its input register.
///
/// Both encodings share one wire format; they differ only in which direction
/// codes are wired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IsVariant)]
pub enum Encoding {
    /// Direction + step commands, all four headings.
    #[default]
    Movement,
    /// Spike packets, direction + weight, East and North only.
    Spike,
}

impl Encoding {
    pub fn wired(self) -> DirectionSet {
        match self {
            Encoding::Movement => DirectionSet::ALL,
            Encoding::Spike => DirectionSet::EAST_NORTH,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub dir: Direction,
    pub magnitude: u16,
}

impl Command {
    pub const MAGNITUDE_MASK: u32 = 0xffff;

    pub fn new(dir: Direction, magnitude: u16) -> Command {
        Command { dir, magnitude }
    }

    pub fn east(magnitude: u16) -> Command {
        Self::new(Direction::East, magnitude)
    }

    pub fn north(magnitude: u16) -> Command {
        Self::new(Direction::North, magnitude)
    }

    pub fn west(magnitude: u16) -> Command {
        Self::new(Direction::West, magnitude)
    }

    pub fn south(magnitude: u16) -> Command {
        Self::new(Direction::South, magnitude)
    }

    pub fn encode(&self) -> u32 {
        (self.dir.code() << Direction::SHIFT) | (self.magnitude as u32)
    }

    // Signed change this command makes along `axis`.
    pub fn delta(&self, axis: Axis) -> i64 {
        if self.dir.axis() != axis {
            return 0;
        }
        let magnitude = self.magnitude as i64;
        if self.dir.is_east() || self.dir.is_north() { magnitude } else { -magnitude }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {:#x}", self.dir, self.magnitude)
    }
}
