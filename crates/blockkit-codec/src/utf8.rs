//! UTF-8 codec that keeps the pre-RFC 3629 long forms.
//!
//! Code points up to `0x7FFF_FFFF` are encoded in one to six bytes. Values
//! below `0x11_0000` produce exactly the bytes of standard UTF-8; larger values
//! use the retired 4-, 5- and 6-byte layouts so that payloads written by
//! older encoders still decode. Decoding is permissive and never fails.

use crate::error::CodecError;

/// Largest code point the six-byte form can carry.
pub const MAX_CODE_POINT: u32 = 0x7fff_ffff;

// Lead byte marker indexed by sequence length.
const LEAD_MARKS: [u8; 7] = [0, 0, 0xc0, 0xe0, 0xf0, 0xf8, 0xfc];

/// Number of bytes used to encode `code_point`.
pub fn sequence_len(code_point: u32) -> usize {
    match code_point {
        0..=0x7f => 1,
        0x80..=0x7ff => 2,
        0x800..=0xffff => 3,
        0x1_0000..=0x1f_ffff => 4,
        0x20_0000..=0x3ff_ffff => 5,
        _ => 6,
    }
}

/// Encodes a string. Identical to `text.as_bytes()` for every `&str`.
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        push_code_point(&mut out, u32::from(c));
    }
    out
}

/// Encodes raw code points, including values beyond the Unicode range.
pub fn encode_code_points(code_points: &[u32]) -> Vec<u8> {
    let len = code_points.iter().map(|&cp| sequence_len(cp)).sum();
    let mut out = Vec::with_capacity(len);
    for &cp in code_points {
        push_code_point(&mut out, cp);
    }
    out
}

fn push_code_point(out: &mut Vec<u8>, code_point: u32) {
    let len = sequence_len(code_point);
    if len == 1 {
        out.push(code_point as u8);
        return;
    }
    let continuation = len - 1;
    out.push(LEAD_MARKS[len] | (code_point >> (6 * continuation)) as u8);
    for i in (0..continuation).rev() {
        out.push(0x80 | ((code_point >> (6 * i)) & 0x3f) as u8);
    }
}

/// Number of continuation bytes announced by `lead`, or 0 for bytes that
/// stand alone.
fn continuation_len(lead: u8) -> usize {
    match lead {
        0xc0..=0xdf => 1,
        0xe0..=0xef => 2,
        0xf0..=0xf7 => 3,
        0xf8..=0xfb => 4,
        0xfc..=0xfd => 5,
        _ => 0,
    }
}

/// Decodes bytes into code points without validation.
///
/// A lead byte whose sequence would run past the end of input is emitted as
/// its own code point, as are ASCII bytes, stray continuation bytes and
/// `0xFE`/`0xFF`. Continuation bytes contribute their low six bits
/// whatever their high bits are.
pub fn decode_code_points(bytes: &[u8]) -> Vec<u32> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        let lead = bytes[idx];
        let continuation = continuation_len(lead);
        if continuation == 0 || idx + continuation >= bytes.len() {
            out.push(u32::from(lead));
            idx += 1;
            continue;
        }
        let mut code_point = u32::from(lead & (0xff >> (continuation + 2)));
        for &byte in &bytes[idx + 1..=idx + continuation] {
            code_point = (code_point << 6) | u32::from(byte & 0x3f);
        }
        out.push(code_point);
        idx += continuation + 1;
    }
    out
}

/// Decodes bytes into a string, substituting U+FFFD for code points that are
/// surrogates or lie beyond `0x10FFFF`.
pub fn decode(bytes: &[u8]) -> String {
    decode_code_points(bytes)
        .into_iter()
        .map(|cp| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Like [`decode`], but reports the first code point with no `char` form.
pub fn decode_strict(bytes: &[u8]) -> Result<String, CodecError> {
    decode_code_points(bytes)
        .into_iter()
        .map(|cp| char::from_u32(cp).ok_or(CodecError::InvalidCodePoint(cp)))
        .collect()
}
