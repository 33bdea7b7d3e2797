//! Pads a message, wraps it in Base64 and recovers it again.

use blockkit_codec::{base64, to_byte_sequence, utf8, ByteSource};
use blockkit_core::{expand_key, pad, unpad, PaddingPolicy, BLOCK_SIZE};

fn main() {
    let key = expand_key(b"demo key");
    println!("expanded key: {} bytes", key.len());

    let message = "first block here, second block here";
    let bytes = to_byte_sequence(ByteSource::Text(message));

    for policy in PaddingPolicy::ALL {
        let padded = pad(&bytes, policy);
        assert_eq!(padded.len() % BLOCK_SIZE, 0);
        let wire = base64::encode(&padded);
        let decoded = base64::decode_with_block_size(&wire, BLOCK_SIZE);
        let text = utf8::decode(&unpad(&decoded, policy));
        assert_eq!(text, message);
        println!("{:>14}: {}", policy, wire);
    }

    println!("example succeeded; every policy round-trips");
}
