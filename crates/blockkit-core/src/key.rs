//! Key material expansion.

/// Minimum key length consumed by the key schedule (576 bits).
pub const MIN_KEY_BYTES: usize = 72;

/// Stretches `key` to at least [`MIN_KEY_BYTES`] by repeating it whole.
///
/// Keys already at or above the minimum are returned unchanged, never
/// truncated. Shorter keys are repeated in full copies, so the result length
/// is the smallest multiple of `key.len()` that reaches the minimum: a
/// 5-byte key expands to 75 bytes, not 72. The key schedule indexes the
/// expanded key with that length, so it must not be trimmed.
///
/// An empty key expands to an empty sequence.
pub fn expand_key(key: &[u8]) -> Vec<u8> {
    if key.len() >= MIN_KEY_BYTES || key.is_empty() {
        return key.to_vec();
    }
    let copies = MIN_KEY_BYTES.div_ceil(key.len());
    key.repeat(copies)
}

/// Expanded key bytes ready for a key schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMaterial(Vec<u8>);

impl KeyMaterial {
    /// Expands raw key bytes with [`expand_key`].
    pub fn expand(key: &[u8]) -> Self {
        Self(expand_key(key))
    }

    /// Returns the expanded bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the expanded key in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the source key was empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the key byte at `index`, wrapping around the expanded length.
    ///
    /// # Panics
    /// Panics if the key material is empty.
    #[inline]
    pub fn byte_at(&self, index: usize) -> u8 {
        self.0[index % self.0.len()]
    }
}

impl From<&[u8]> for KeyMaterial {
    fn from(value: &[u8]) -> Self {
        Self::expand(value)
    }
}

impl AsRef<[u8]> for KeyMaterial {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
