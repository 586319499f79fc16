use crate::error::Result;
use crate::tokens::BackRef;

/// Upper bound on the decompressed size of `input_len` bytes, including
/// the trailing NUL marker.
///
/// A two-byte back-reference expands to at most 10 bytes; every other
/// token expands to at most two.
pub fn max_decompressed_len(input_len: usize) -> usize {
    input_len * 5 + 1
}

/// Decompress `input` into a freshly allocated buffer holding exactly the
/// decoded bytes.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let len = decompress_into(input, &mut out)?;
    out.truncate(len);
    Ok(out)
}

/// Decompress `input`, appending the decoded bytes to `out`, then a single
/// NUL marker for callers that treat the buffer as a bounded string.
///
/// Returns the decoded length, which does not count the marker. Truncated
/// or malformed token streams decode to their valid prefix; they are not
/// errors. The worst case is reserved before any byte is produced, so the
/// reservation is the only failure point.
pub fn decompress_into(input: &[u8], out: &mut Vec<u8>) -> Result<usize> {
    out.try_reserve(max_decompressed_len(input.len()))?;
    let start = out.len();

    let mut pos = 0;
    while pos < input.len() {
        let byte = input[pos];
        pos += 1;

        match byte {
            // Raw run: the control byte counts the bytes that follow. A
            // truncated stream copies what remains.
            0x01..=0x08 => {
                let end = input.len().min(pos + byte as usize);
                out.extend_from_slice(&input[pos..end]);
                pos = end;
            }
            // Pass-through literal
            0x00 | 0x09..=0x7F => out.push(byte),
            // Back-reference into the output produced so far
            0x80..=0xBF => {
                if pos >= input.len() {
                    break;
                }
                let token = BackRef::decode(byte, input[pos]);
                pos += 1;

                let distance = token.distance as usize;
                // A distance of zero or beyond the bytes this call has
                // produced names no source byte; drop the token.
                if distance == 0 || distance > out.len() - start {
                    continue;
                }

                // Byte-at-a-time so the copy may read bytes it just
                // wrote (distance < length repeats the trailing pattern).
                let mut src = out.len() - distance;
                for _ in 0..token.length {
                    let copied = out[src];
                    out.push(copied);
                    src += 1;
                }
            }
            // Space + ASCII pair
            0xC0..=0xFF => {
                out.push(b' ');
                out.push(byte ^ 0x80);
            }
        }
    }

    out.push(0);
    Ok(out.len() - start - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_pass_through() {
        assert_eq!(decompress(b"0123456789").unwrap(), b"0123456789");
        assert_eq!(decompress(&[0x00]).unwrap(), [0x00]);
    }

    #[test]
    fn test_space_pair() {
        assert_eq!(decompress(&[0xC1]).unwrap(), b" A");
        assert_eq!(decompress(&[0xFF]).unwrap(), b" \x7F");
    }

    #[test]
    fn test_raw_run() {
        assert_eq!(decompress(&[0x03, 0x01, 0x01, 0x01]).unwrap(), [0x01, 0x01, 0x01]);
    }

    #[test]
    fn test_truncated_run_copies_remainder() {
        assert_eq!(decompress(&[0x05, 0xFF, 0xFE]).unwrap(), [0xFF, 0xFE]);
    }

    #[test]
    fn test_truncated_backref_stops() {
        // Control byte present, second byte missing
        assert_eq!(decompress(&[0x41, 0x80]).unwrap(), b"A");
    }

    #[test]
    fn test_self_overlap_repeats() {
        // distance=1, length=5 after a single 'x' produces five more
        assert_eq!(decompress(&[b'x', 0x80, 0x0A]).unwrap(), b"xxxxxx");
    }

    #[test]
    fn test_backref_copy() {
        // "abc" then copy all three from distance 3
        let token = BackRef { distance: 3, length: 3 }.encode();
        let input = [b'a', b'b', b'c', token[0], token[1]];
        assert_eq!(decompress(&input).unwrap(), b"abcabc");
    }

    #[test]
    fn test_out_of_range_distance_skipped() {
        // distance=127 with one byte produced: dropped, decoding continues
        assert_eq!(decompress(&[0x41, 0x83, 0xFF, 0x42]).unwrap(), b"AB");
    }

    #[test]
    fn test_zero_distance_skipped() {
        assert_eq!(decompress(&[0x41, 0x80, 0x07]).unwrap(), b"A");
    }

    #[test]
    fn test_into_appends_nul_marker() {
        let mut out = Vec::new();
        let len = decompress_into(&[0x41], &mut out).unwrap();
        assert_eq!(len, 1);
        assert_eq!(out, [0x41, 0x00]);
    }

    #[test]
    fn test_into_does_not_reach_prior_contents() {
        // A reference cannot resolve against bytes that were in the
        // buffer before this call.
        let mut out = vec![b'x'];
        let token = BackRef { distance: 1, length: 3 }.encode();
        let len = decompress_into(&[token[0], token[1]], &mut out).unwrap();
        assert_eq!(len, 0);
        assert_eq!(out, [b'x', 0x00]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decompress(b"").unwrap(), Vec::<u8>::new());
    }
}
