//! Base64 with MIME-style line wrapping.
//!
//! Encoding inserts CRLF after every 76 output characters. Decoding ignores
//! anything outside the standard alphabet, including `=` and line breaks,
//! and never rejects input.

/// Output characters per line before a CRLF is inserted.
pub const LINE_WIDTH: usize = 76;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

// Input groups (3 bytes each) that fill one line.
const GROUPS_PER_LINE: usize = LINE_WIDTH / 4;

/// Length of `encode` output for `len` input bytes, line breaks included.
pub fn encoded_len(len: usize) -> usize {
    let groups = len.div_ceil(3);
    let breaks = groups.saturating_sub(1) / GROUPS_PER_LINE;
    groups * 4 + breaks * 2
}

/// Encodes `bytes` as wrapped Base64 text.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(bytes.len()));
    for (index, chunk) in bytes.chunks(3).enumerate() {
        if index > 0 && index % GROUPS_PER_LINE == 0 {
            out.push_str("\r\n");
        }
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied().unwrap_or(0);
        let b2 = chunk.get(2).copied().unwrap_or(0);
        let group = (u32::from(b0) << 16) | (u32::from(b1) << 8) | u32::from(b2);

        out.push(sextet_char(group >> 18));
        out.push(sextet_char(group >> 12));
        if chunk.len() > 1 {
            out.push(sextet_char(group >> 6));
        } else {
            out.push('=');
        }
        if chunk.len() > 2 {
            out.push(sextet_char(group));
        } else {
            out.push('=');
        }
    }
    out
}

/// Decodes Base64 text, skipping characters outside the alphabet.
pub fn decode(text: &str) -> Vec<u8> {
    decode_with_block_size(text, 0)
}

/// Decodes Base64 text and zero-extends the output to a multiple of
/// `block_size`. A `block_size` of 0 disables the rounding.
///
/// When rounding is active, a trailing partial group may leave its residual
/// bits in the byte after the last complete one.
pub fn decode_with_block_size(text: &str, block_size: usize) -> Vec<u8> {
    let sextets: Vec<u8> = text
        .bytes()
        .filter(|c| c.is_ascii_alphanumeric() || *c == b'+' || *c == b'/')
        .map(sextet_value)
        .collect();

    let mut out_len = (sextets.len() * 3 + 1) >> 2;
    if block_size > 0 {
        out_len = out_len.div_ceil(block_size) * block_size;
    }
    let mut out = vec![0u8; out_len];

    let mut written = 0;
    for group in sextets.chunks(4) {
        let mut acc: u32 = 0;
        for (i, &sextet) in group.iter().enumerate() {
            acc |= u32::from(sextet) << (6 * (3 - i));
        }
        for shift in [16, 8, 0] {
            if written == out_len {
                break;
            }
            out[written] = (acc >> shift) as u8;
            written += 1;
        }
    }
    out
}

#[inline]
fn sextet_char(value: u32) -> char {
    char::from(ALPHABET[(value & 0x3f) as usize])
}

#[inline]
fn sextet_value(c: u8) -> u8 {
    match c {
        b'A'..=b'Z' => c - b'A',
        b'a'..=b'z' => c - b'a' + 26,
        b'0'..=b'9' => c - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => 0,
    }
}
