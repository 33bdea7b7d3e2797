//! Block representation helpers.

/// Cipher block size in bytes.
pub const BLOCK_SIZE: usize = 8;

/// A single 64-bit cipher block.
pub type Block = [u8; BLOCK_SIZE];
