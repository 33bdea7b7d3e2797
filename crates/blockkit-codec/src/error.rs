//! Error types for the codec crate.

use thiserror::Error;

/// Errors produced by the normaliser, the strict UTF-8 decoder and the
/// recovery parser. The Base64 codec and the permissive UTF-8 decoder never
/// fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value cannot be turned into bytes.
    #[error("type mismatch: expected text, a byte buffer or a byte array, found {found}")]
    TypeMismatch {
        /// Short description of the rejected shape.
        found: &'static str,
    },
    /// Text could not be parsed even after repair.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A decoded code point has no `char` representation.
    #[error("code point {0:#x} is not a Unicode scalar value")]
    InvalidCodePoint(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_type_mismatch() {
        let err = CodecError::TypeMismatch { found: "boolean" };
        assert_eq!(
            err.to_string(),
            "type mismatch: expected text, a byte buffer or a byte array, found boolean"
        );
    }

    #[test]
    fn display_invalid_code_point() {
        assert_eq!(
            CodecError::InvalidCodePoint(0x11_0000).to_string(),
            "code point 0x110000 is not a Unicode scalar value"
        );
    }
}
