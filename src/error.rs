use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // The codec's only failure mode. Malformed or truncated token streams
    // are handled by defined fallback behavior, never surfaced as errors.
    #[error("failed to reserve space for the output buffer")]
    OutOfMemory(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, Error>;
