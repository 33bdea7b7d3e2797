//! Byte-level building blocks for an 8-byte-block Feistel cipher.
//!
//! This crate provides:
//! - Unsigned 32-bit word arithmetic and big-endian byte packing for round functions.
//! - Cyclic key expansion up to the 576-bit minimum key length.
//! - Block padding and unpadding under five interoperable policies.
//! - The configuration types shared across the workspace.
//!
//! Everything here is a pure function of its arguments. The round function,
//! key schedule and chaining modes live with the cipher that consumes these
//! primitives.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod arith;
mod block;
pub mod config;
mod key;
mod padding;

pub use crate::block::{Block, BLOCK_SIZE};
pub use crate::config::{CodecConfig, PaddingPolicy, PolicyParseError};
pub use crate::key::{expand_key, KeyMaterial, MIN_KEY_BYTES};
pub use crate::padding::{pad, unpad};
