// crates/iploc-core/src/error.rs

use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IplocError>;

/// Errors produced while opening or scanning a dataset.
///
/// `Io` is fatal for the whole run: without a readable dataset no query can
/// be answered. `Format` is local to one row; whether it aborts the scan or
/// is skipped is decided by the running [`QueryProcess`](crate::QueryProcess).
#[derive(Debug, Error)]
pub enum IplocError {
    #[error("dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad record at line {line}: {reason}")]
    Format { line: u64, reason: String },
}
