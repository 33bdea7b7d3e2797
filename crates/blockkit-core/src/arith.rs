//! Unsigned 32-bit word arithmetic for Feistel rounds.
//!
//! All operations wrap modulo 2^32 so results are identical on every
//! platform regardless of how the caller obtained its operands.

use crate::block::Block;

/// Reinterprets a two's-complement 32-bit value as unsigned.
#[inline]
pub fn to_unsigned32(value: i32) -> u32 {
    value as u32
}

/// XOR of two words.
#[inline]
pub fn xor32(a: u32, b: u32) -> u32 {
    a ^ b
}

/// Wraparound addition, `(a + b) mod 2^32`.
#[inline]
pub fn add_mod32(a: u32, b: u32) -> u32 {
    a.wrapping_add(b)
}

/// Packs four octets into a word, `b1` most significant.
#[inline]
pub fn pack_bytes_be(b1: u8, b2: u8, b3: u8, b4: u8) -> u32 {
    u32::from_be_bytes([b1, b2, b3, b4])
}

/// Splits a word into four octets, most significant first.
#[inline]
pub fn unpack_bytes_be(word: u32) -> [u8; 4] {
    word.to_be_bytes()
}

/// Splits a block into its left and right halves.
pub fn words_from_block(block: &Block) -> (u32, u32) {
    let left = pack_bytes_be(block[0], block[1], block[2], block[3]);
    let right = pack_bytes_be(block[4], block[5], block[6], block[7]);
    (left, right)
}

/// Joins left and right halves back into a block.
pub fn block_from_words(left: u32, right: u32) -> Block {
    let mut block = [0u8; 8];
    block[..4].copy_from_slice(&unpack_bytes_be(left));
    block[4..].copy_from_slice(&unpack_bytes_be(right));
    block
}
