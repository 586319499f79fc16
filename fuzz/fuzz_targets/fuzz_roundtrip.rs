#![no_main]

use libfuzzer_sys::fuzz_target;
use palmdoc::{compress, decompress};

fuzz_target!(|data: &[u8]| {
    // Record-sized cap: the backward match search is quadratic on
    // adversarial input
    let data = if data.len() > 4096 { &data[..4096] } else { data };

    let packed = compress(data).expect("reserve failed");
    let unpacked = decompress(&packed).expect("reserve failed");
    assert_eq!(unpacked, data, "round-trip mismatch");
});
