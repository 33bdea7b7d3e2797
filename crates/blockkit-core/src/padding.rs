//! Block padding and best-effort unpadding.
//!
//! No length field travels with the ciphertext, so [`unpad`] only looks at
//! the final block's worth of bytes and recognises padding by shape. It is
//! the inverse of [`pad`] for data `pad` produced, not for arbitrary input.

use crate::block::BLOCK_SIZE;
use crate::config::PaddingPolicy;

const ONE_AND_ZEROS_MARKER: u8 = 0x80;
const SPACE: u8 = 0x20;

/// Pads `bytes` to a multiple of [`BLOCK_SIZE`].
///
/// Non-empty input that is already aligned is returned unchanged, except
/// under [`PaddingPolicy::Pkcs5`], which always appends a full pad block.
/// Empty input always receives one full block of padding.
pub fn pad(bytes: &[u8], policy: PaddingPolicy) -> Vec<u8> {
    let count = BLOCK_SIZE - bytes.len() % BLOCK_SIZE;
    if count == BLOCK_SIZE && !bytes.is_empty() && policy != PaddingPolicy::Pkcs5 {
        return bytes.to_vec();
    }

    let total = bytes.len() + count;
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(bytes);
    match policy {
        PaddingPolicy::Pkcs5 => out.resize(total, count as u8),
        PaddingPolicy::OneAndZeros => {
            out.push(ONE_AND_ZEROS_MARKER);
            out.resize(total, 0x00);
        }
        PaddingPolicy::Spaces => out.resize(total, SPACE),
        PaddingPolicy::Null => out.resize(total, 0x00),
        PaddingPolicy::LastByte => {
            out.resize(total - 1, 0x00);
            out.push(count as u8);
        }
    }
    out
}

/// Strips padding added by [`pad`] with the same policy.
///
/// For [`PaddingPolicy::Pkcs5`] and [`PaddingPolicy::LastByte`] a final byte
/// of 8 or less is taken as the pad length, so a genuine trailing plaintext
/// byte in that range is indistinguishable from padding.
pub fn unpad(bytes: &[u8], policy: PaddingPolicy) -> Vec<u8> {
    let cut = match policy {
        PaddingPolicy::Pkcs5 | PaddingPolicy::LastByte => length_byte(bytes),
        PaddingPolicy::OneAndZeros => marker_run(bytes),
        PaddingPolicy::Spaces => trailing_run(bytes, SPACE),
        PaddingPolicy::Null => trailing_run(bytes, 0x00),
    };
    bytes[..bytes.len().saturating_sub(cut)].to_vec()
}

fn length_byte(bytes: &[u8]) -> usize {
    match bytes.last() {
        Some(&last) if usize::from(last) <= BLOCK_SIZE => usize::from(last),
        _ => 0,
    }
}

// Zeros terminated by the marker, within the last block.
fn marker_run(bytes: &[u8]) -> usize {
    for (i, &byte) in bytes.iter().rev().take(BLOCK_SIZE).enumerate() {
        match byte {
            ONE_AND_ZEROS_MARKER => return i + 1,
            0x00 => continue,
            _ => break,
        }
    }
    0
}

fn trailing_run(bytes: &[u8], pad_byte: u8) -> usize {
    bytes
        .iter()
        .rev()
        .take(BLOCK_SIZE)
        .take_while(|&&byte| byte == pad_byte)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const FIVE: [u8; 5] = [1, 2, 3, 4, 5];

    #[test]
    fn pad_vectors_for_each_policy() {
        assert_eq!(
            pad(&FIVE, PaddingPolicy::Pkcs5),
            [1, 2, 3, 4, 5, 3, 3, 3]
        );
        assert_eq!(
            pad(&FIVE, PaddingPolicy::OneAndZeros),
            [1, 2, 3, 4, 5, 0x80, 0, 0]
        );
        assert_eq!(
            pad(&FIVE, PaddingPolicy::Spaces),
            [1, 2, 3, 4, 5, 0x20, 0x20, 0x20]
        );
        assert_eq!(pad(&FIVE, PaddingPolicy::Null), [1, 2, 3, 4, 5, 0, 0, 0]);
        assert_eq!(
            pad(&FIVE, PaddingPolicy::LastByte),
            [1, 2, 3, 4, 5, 0, 0, 3]
        );
    }

    #[test]
    fn single_pad_byte_edge() {
        let seven = [9u8; 7];
        assert_eq!(pad(&seven, PaddingPolicy::OneAndZeros)[7], 0x80);
        assert_eq!(pad(&seven, PaddingPolicy::LastByte)[7], 1);
        assert_eq!(pad(&seven, PaddingPolicy::Pkcs5)[7], 1);
    }

    #[test]
    fn aligned_input_is_left_alone_except_pkcs5() {
        let aligned = [0xabu8; 16];
        for policy in PaddingPolicy::ALL {
            let padded = pad(&aligned, policy);
            if policy == PaddingPolicy::Pkcs5 {
                assert_eq!(padded.len(), 24);
                assert!(padded[16..].iter().all(|&b| b == 8));
            } else {
                assert_eq!(padded, aligned, "policy={}", policy);
            }
        }
    }

    #[test]
    fn empty_input_gets_a_full_block() {
        for policy in PaddingPolicy::ALL {
            assert_eq!(pad(&[], policy).len(), BLOCK_SIZE, "policy={}", policy);
        }
        assert_eq!(pad(&[], PaddingPolicy::LastByte), [0, 0, 0, 0, 0, 0, 0, 8]);
    }

    #[test]
    fn unpad_one_and_zeros_vector() {
        assert_eq!(
            unpad(&[1, 2, 3, 4, 5, 0x80, 0, 0], PaddingPolicy::OneAndZeros),
            FIVE
        );
    }

    #[test]
    fn unpad_one_and_zeros_without_marker_strips_nothing() {
        let data = [1, 2, 3, 4, 5, 6, 0, 0];
        assert_eq!(unpad(&data, PaddingPolicy::OneAndZeros), data);
        let zeros = [0u8; 12];
        assert_eq!(unpad(&zeros, PaddingPolicy::OneAndZeros), zeros);
    }

    #[test]
    fn unpad_one_and_zeros_ignores_marker_beyond_a_block() {
        let mut data = vec![0x80];
        data.extend_from_slice(&[0u8; 8]);
        assert_eq!(unpad(&data, PaddingPolicy::OneAndZeros), data);
    }

    #[test]
    fn unpad_length_byte_policies() {
        assert_eq!(unpad(&[1, 2, 3, 4, 5, 3, 3, 3], PaddingPolicy::Pkcs5), FIVE);
        assert_eq!(unpad(&[1, 2, 3, 4, 5, 0, 0, 3], PaddingPolicy::LastByte), FIVE);
        // Above the block size: treated as data.
        assert_eq!(unpad(&[1, 2, 9], PaddingPolicy::Pkcs5), [1, 2, 9]);
        // Zero is a valid length.
        assert_eq!(unpad(&[1, 2, 0], PaddingPolicy::LastByte), [1, 2, 0]);
        // Ambiguous trailing plaintext byte is stripped.
        assert_eq!(unpad(&[10, 11, 2], PaddingPolicy::Pkcs5), [10]);
    }

    #[test]
    fn unpad_length_byte_saturates() {
        assert_eq!(unpad(&[7, 5], PaddingPolicy::Pkcs5), Vec::<u8>::new());
        assert_eq!(unpad(&[], PaddingPolicy::Pkcs5), Vec::<u8>::new());
    }

    #[test]
    fn unpad_trailing_runs() {
        assert_eq!(unpad(b"abc     ", PaddingPolicy::Spaces), b"abc");
        assert_eq!(unpad(&[7, 0, 0], PaddingPolicy::Null), [7]);
        assert_eq!(unpad(&[0u8; 8], PaddingPolicy::Null), Vec::<u8>::new());
        // Never more than one block.
        assert_eq!(unpad(&[0x20u8; 10], PaddingPolicy::Spaces), [0x20, 0x20]);
        assert_eq!(unpad(b"abc", PaddingPolicy::Spaces), b"abc");
    }

    #[test]
    fn unpad_inverts_pad_for_random_data() {
        let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
        for _ in 0..500 {
            let len = rng.gen_range(0..64);
            let mut data = vec![0u8; len];
            rng.fill_bytes(&mut data);
            // Keep the final byte clear of every policy's pad alphabet so the
            // shape-based unpadding cannot mistake data for padding.
            if let Some(last) = data.last_mut() {
                *last = rng.gen_range(0x21..0x80);
            }
            for policy in PaddingPolicy::ALL {
                let padded = pad(&data, policy);
                assert_eq!(padded.len() % BLOCK_SIZE, 0);
                assert_eq!(unpad(&padded, policy), data, "policy={} len={}", policy, len);
            }
        }
    }
}
