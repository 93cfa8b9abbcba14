//! Error types for the safe list library
//!
//! Every fallible operation in the crate reports one of these variants. They can be
//! distinguished programmatically, and none of them is fatal to the process.

use std::fmt;
use std::io;

/// The main error type for list, input and block operations
#[derive(Debug)]
pub enum Error {
    /// The heap could not provide memory for a node or a block
    ///
    /// The operation that hit this error made no change to the structure it was
    /// working on.
    AllocationFailed {
        /// Number of bytes that were requested
        size: usize,
    },

    /// A payload does not fit the block it was meant to be copied into
    ///
    /// The length includes the trailing terminator byte.
    PayloadTooLarge {
        /// Bytes needed, terminator included
        needed: usize,
        /// Capacity of the destination block
        capacity: usize,
    },

    /// A buffer capacity that cannot hold even the terminator
    InvalidCapacity {
        /// The rejected capacity
        capacity: usize,
    },

    /// IO error wrapper
    ///
    /// Wraps standard IO errors raised by the underlying reader or writer.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailed { size } => {
                write!(f, "Memory allocation failed ({} bytes requested)", size)
            }
            Error::PayloadTooLarge { needed, capacity } => write!(
                f,
                "Payload needs {} bytes but the block only holds {}",
                needed, capacity
            ),
            Error::InvalidCapacity { capacity } => write!(
                f,
                "Buffer capacity {} is too small; at least 1 byte is needed for the terminator",
                capacity
            ),
            Error::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

// Lets callers that already speak io::Result use `?` on our errors
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(io_err) => io_err,
            Error::AllocationFailed { .. } => io::Error::new(io::ErrorKind::OutOfMemory, err),
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
