use crate::constants::WORD_SIZE;

pub fn pack_halves(lower: u16, upper: u16) -> u32 {
    (lower as u32) | ((upper as u32) << u16::BITS)
}

pub fn lower_half(word: u32) -> u16 {
    word as u16
}

pub fn upper_half(word: u32) -> u16 {
    (word >> u16::BITS) as u16
}

pub fn is_word_aligned(addr: u8) -> bool {
    addr % WORD_SIZE == 0
}

pub fn word_addr(addr: u8) -> u8 {
    addr & !(WORD_SIZE - 1)
}

// Byte of `word` that a byte access at `addr` sees; words are little-endian.
pub fn byte_lane(word: u32, addr: u8) -> u8 {
    let lane = (addr % WORD_SIZE) as u32;
    (word >> (lane * u8::BITS)) as u8
}
