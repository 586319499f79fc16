use memchr::memrchr_iter;

use crate::error::Result;
use crate::tokens::{
    is_literal, is_pairable, BackRef, MATCH_MARGIN, MAX_MATCH_DISTANCE, MAX_MATCH_LEN, MAX_RUN_LEN,
    MIN_MATCH_LEN,
};

/// Upper bound on the compressed size of `input_len` bytes.
///
/// Literals, space pairs, and back-references never expand. An isolated
/// non-literal byte costs a one-byte run prefix plus the byte itself, and
/// two one-byte runs are never adjacent, so the stream stays within three
/// output bytes per two input bytes, plus one for a trailing one-byte run.
pub fn max_compressed_len(input_len: usize) -> usize {
    input_len + input_len / 2 + 1
}

/// Compress `input` into a freshly allocated buffer.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress_into(input, &mut out)?;
    Ok(out)
}

/// Compress `input`, appending the token stream to `out`.
///
/// Returns the number of bytes written. The worst case is reserved before
/// any byte is produced, so the reservation is the only failure point.
pub fn compress_into(input: &[u8], out: &mut Vec<u8>) -> Result<usize> {
    out.try_reserve(max_compressed_len(input.len()))?;
    let start = out.len();

    let mut pos = 0;
    while pos < input.len() {
        // Back-references are only attempted away from the buffer edges.
        if pos > MATCH_MARGIN && input.len() - pos > MATCH_MARGIN {
            if let Some(m) = find_match(input, pos) {
                out.extend_from_slice(&m.encode());
                pos += m.length as usize;
                continue;
            }
        }

        let byte = input[pos];
        pos += 1;

        if byte == b' ' && pos < input.len() && is_pairable(input[pos]) {
            out.push(input[pos] ^ 0x80);
            pos += 1;
        } else if is_literal(byte) {
            out.push(byte);
        } else {
            // Binary run: up to 8 bytes, ending before the next byte that
            // can stand alone as a literal.
            let run_start = pos - 1;
            while pos < input.len() && pos - run_start < MAX_RUN_LEN && !is_literal(input[pos]) {
                pos += 1;
            }
            out.push((pos - run_start) as u8);
            out.extend_from_slice(&input[run_start..pos]);
        }
    }

    Ok(out.len() - start)
}

/// Longest-first backward search at `pos`.
///
/// Chunk lengths are tried from 10 down to 3; for each, the nearest earlier
/// occurrence is taken and accepted if its distance fits the token field.
/// A nearest occurrence that is out of range falls through to the next
/// shorter length, which may sit closer.
///
/// The caller guarantees more than `MATCH_MARGIN` bytes on both sides of
/// `pos`.
fn find_match(input: &[u8], pos: usize) -> Option<BackRef> {
    for len in (MIN_MATCH_LEN..=MAX_MATCH_LEN).rev() {
        if let Some(at) = rfind_chunk(input, pos, len) {
            let distance = pos - at;
            if distance <= MAX_MATCH_DISTANCE {
                return Some(BackRef { distance: distance as u16, length: len as u16 });
            }
        }
    }
    None
}

/// Nearest earlier occurrence of `input[pos..pos + len]` that lies wholly
/// before `pos`, scanning candidate offsets from `pos - len` down to 1.
fn rfind_chunk(input: &[u8], pos: usize, len: usize) -> Option<usize> {
    let chunk = &input[pos..pos + len];
    // Offset 0 is not a candidate; the scan bounds keep every distance
    // at most pos - 1.
    for hit in memrchr_iter(chunk[0], &input[1..=pos - len]) {
        let at = hit + 1;
        if &input[at..at + len] == chunk {
            return Some(at);
        }
    }
    None
}
