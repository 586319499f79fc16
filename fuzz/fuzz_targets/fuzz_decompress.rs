#![no_main]

use libfuzzer_sys::fuzz_target;
use palmdoc::{decompress, max_decompressed_len};

fuzz_target!(|data: &[u8]| {
    if data.len() > 65536 {
        return;
    }

    // Arbitrary bytes are a decodable token stream: truncated runs,
    // dangling control bytes, and out-of-range references all have
    // defined fallbacks and must stay within the documented bound.
    let unpacked = decompress(data).expect("reserve failed");
    assert!(unpacked.len() <= max_decompressed_len(data.len()));
});
