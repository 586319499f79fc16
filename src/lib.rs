//! PalmDoc compression: the byte-oriented LZ77 codec used for the text
//! records of PalmDOC/MOBI documents.
//!
//! Two pure transforms over byte buffers, with no container parsing, no
//! record chunking, and no I/O: callers slice their payload into records
//! (conventionally at most 4096 bytes each) and hand them here.
//!
//! ```
//! let record: &[u8] = b"the quick brown fox jumps over the lazy dog";
//!
//! let packed = palmdoc::compress(record)?;
//! assert_eq!(palmdoc::decompress(&packed)?, record);
//! # Ok::<(), palmdoc::Error>(())
//! ```

pub mod compress;
pub mod decompress;
pub mod error;
pub mod tokens;

pub use compress::{compress, compress_into, max_compressed_len};
pub use decompress::{decompress, decompress_into, max_decompressed_len};
pub use error::{Error, Result};
pub use tokens::BackRef;
