//! Text codecs and input normalisation for the blockkit cipher toolkit.
//!
//! This crate provides:
//! - Base64 with 76-column CRLF wrapping and lenient, block-aligned decoding.
//! - An extended UTF-8 codec that keeps the legacy 5- and 6-byte forms.
//! - Normalisation of text, buffer-like and byte inputs into byte sequences.
//! - A best-effort recovery parser for almost-JSON text.
//!
//! All functions are pure and allocate only their own output.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod base64;
mod error;
pub mod normalize;
mod recovery;
pub mod utf8;

pub use crate::error::CodecError;
pub use crate::normalize::{to_byte_sequence, to_byte_sequence_from_value, ByteBuffer, ByteSource};
pub use crate::recovery::{parse_lenient, parse_lenient_as};
