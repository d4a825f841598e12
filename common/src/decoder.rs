
use num_traits::FromPrimitive;

use super::command::*;

fn decode_direction(word: u32) -> Option<Direction> {
    Direction::from_u32((word >> Direction::SHIFT) & Direction::MASK)
}

fn decode_magnitude(word: u32) -> u16 {
    (word & Command::MAGNITUDE_MASK) as u16
}

// Bits [31:18] are ignored. A direction code that isn't wired decodes to None,
// which the peripheral treats as a no-op rather than a fault.
pub fn decode(word: u32, wired: DirectionSet) -> Option<Command> {
    let dir = decode_direction(word)?;
    if !wired.contains(dir) {
        return None;
    }
    Some(Command::new(dir, decode_magnitude(word)))
}
