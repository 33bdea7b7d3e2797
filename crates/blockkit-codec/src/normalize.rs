//! Coercion of caller input into a canonical byte sequence.

use std::collections::VecDeque;

use serde_json::Value;
use tracing::trace;

use crate::error::CodecError;
use crate::utf8;

/// A binary buffer that exposes its length and indexable bytes but is not
/// necessarily contiguous in memory.
pub trait ByteBuffer {
    /// Number of bytes in the buffer.
    fn byte_length(&self) -> usize;

    /// Byte at `index`, which is below [`ByteBuffer::byte_length`].
    fn byte_at(&self, index: usize) -> u8;
}

impl ByteBuffer for VecDeque<u8> {
    fn byte_length(&self) -> usize {
        self.len()
    }

    fn byte_at(&self, index: usize) -> u8 {
        self[index]
    }
}

/// Accepted input shapes.
#[derive(Clone, Copy)]
pub enum ByteSource<'a> {
    /// Text, encoded with the extended UTF-8 encoder.
    Text(&'a str),
    /// A buffer-like object, copied byte by byte.
    Buffer(&'a dyn ByteBuffer),
    /// Bytes that are already canonical.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for ByteSource<'a> {
    fn from(value: &'a str) -> Self {
        ByteSource::Text(value)
    }
}

impl<'a> From<&'a [u8]> for ByteSource<'a> {
    fn from(value: &'a [u8]) -> Self {
        ByteSource::Bytes(value)
    }
}

impl<'a> From<&'a dyn ByteBuffer> for ByteSource<'a> {
    fn from(value: &'a dyn ByteBuffer) -> Self {
        ByteSource::Buffer(value)
    }
}

/// Returns a freshly allocated byte sequence for `source`.
pub fn to_byte_sequence(source: ByteSource<'_>) -> Vec<u8> {
    match source {
        ByteSource::Text(text) => {
            trace!(bytes = text.len(), "normalizing text input");
            utf8::encode(text)
        }
        ByteSource::Buffer(buffer) => {
            trace!(len = buffer.byte_length(), "normalizing buffer input");
            (0..buffer.byte_length()).map(|i| buffer.byte_at(i)).collect()
        }
        ByteSource::Bytes(bytes) => bytes.to_vec(),
    }
}

/// Normalises a dynamically typed JSON value.
///
/// Strings are text and arrays of integers in `0..=255` are bytes. Objects
/// of the form `{"byteLength": n, "data": [..]}` are buffers whose `data`
/// must hold exactly `n` bytes. Anything else is a
/// [`CodecError::TypeMismatch`].
pub fn to_byte_sequence_from_value(value: &Value) -> Result<Vec<u8>, CodecError> {
    match value {
        Value::String(text) => Ok(to_byte_sequence(ByteSource::Text(text))),
        Value::Array(items) => {
            let buffer = JsonBytes::new(items)?;
            Ok(to_byte_sequence(ByteSource::Buffer(&buffer)))
        }
        Value::Object(map) => {
            let declared = map
                .get("byteLength")
                .and_then(Value::as_u64)
                .ok_or(CodecError::TypeMismatch {
                    found: "object without byteLength",
                })?;
            let items = map
                .get("data")
                .and_then(Value::as_array)
                .ok_or(CodecError::TypeMismatch {
                    found: "object without data array",
                })?;
            if items.len() as u64 != declared {
                return Err(CodecError::TypeMismatch {
                    found: "buffer whose byteLength disagrees with its data",
                });
            }
            let buffer = JsonBytes::new(items)?;
            Ok(to_byte_sequence(ByteSource::Buffer(&buffer)))
        }
        Value::Null => Err(CodecError::TypeMismatch { found: "null" }),
        Value::Bool(_) => Err(CodecError::TypeMismatch { found: "boolean" }),
        Value::Number(_) => Err(CodecError::TypeMismatch { found: "number" }),
    }
}

// JSON array validated to hold only byte values.
struct JsonBytes<'a>(&'a [Value]);

impl<'a> JsonBytes<'a> {
    fn new(items: &'a [Value]) -> Result<Self, CodecError> {
        let all_bytes = items
            .iter()
            .all(|item| item.as_u64().is_some_and(|n| n <= u64::from(u8::MAX)));
        if !all_bytes {
            return Err(CodecError::TypeMismatch {
                found: "array with a non-byte element",
            });
        }
        Ok(Self(items))
    }
}

impl ByteBuffer for JsonBytes<'_> {
    fn byte_length(&self) -> usize {
        self.0.len()
    }

    fn byte_at(&self, index: usize) -> u8 {
        self.0[index].as_u64().map_or(0, |n| n as u8)
    }
}
