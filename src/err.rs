// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Error Codes
//!
//! Status codes and the error type returned by the platform glue. The
//! numeric codes follow the kernel's `RX_ERR_*` convention so that an
//! [`Error`] can be handed back to C-style callers unchanged.

use core::fmt;

pub use crate::rustux::types::Status;

/// Success status code
pub const RX_OK: Status = 0;

/// Busy error
pub const RX_ERR_BUSY: Status = -1;

/// Not implemented error
pub const RX_ERR_NOT_IMPLEMENTED: Status = -2;

/// Not found error
pub const RX_ERR_NOT_FOUND: Status = -3;

/// Timeout error
pub const RX_ERR_TIMED_OUT: Status = -5;

/// Invalid arguments error
pub const RX_ERR_INVALID_ARGS: Status = -10;

/// No memory error
pub const RX_ERR_NO_MEMORY: Status = -12;

/// I/O error
pub const RX_ERR_IO: Status = -40;

/// Bad state error
pub const RX_ERR_BAD_STATE: Status = -20;

/// Internal error
pub const RX_ERR_INTERNAL: Status = -114;

/// Result type for operations that can fail
pub type Result<T = ()> = core::result::Result<T, Error>;

/// Common error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The coprocessor or peer did not answer within the poll budget
    TimedOut,
    /// An argument is out of range (e.g. watchdog id above 15)
    InvalidArgs,
    /// A named resource (clock, queue) does not exist
    NotFound,
    /// Allocation of a kernel object failed
    NoMemory,
    /// The resource is held elsewhere
    Busy,
    /// The object is not in a state that allows the operation
    BadState,
    /// The transport failed to move the bytes
    Io,
    /// The operation is not provided by this platform
    NotSupported,
    /// An invariant of the glue itself was broken
    Internal,
}

impl Error {
    /// Convert error to status code
    pub fn to_status(self) -> Status {
        match self {
            Error::TimedOut => RX_ERR_TIMED_OUT,
            Error::InvalidArgs => RX_ERR_INVALID_ARGS,
            Error::NotFound => RX_ERR_NOT_FOUND,
            Error::NoMemory => RX_ERR_NO_MEMORY,
            Error::Busy => RX_ERR_BUSY,
            Error::BadState => RX_ERR_BAD_STATE,
            Error::Io => RX_ERR_IO,
            Error::NotSupported => RX_ERR_NOT_IMPLEMENTED,
            Error::Internal => RX_ERR_INTERNAL,
        }
    }

    /// Convert status code to error
    ///
    /// Returns `None` for `RX_OK`; unknown negative codes map to `Internal`.
    pub fn from_status(status: Status) -> Option<Self> {
        let err = match status {
            RX_OK => return None,
            RX_ERR_TIMED_OUT => Error::TimedOut,
            RX_ERR_INVALID_ARGS => Error::InvalidArgs,
            RX_ERR_NOT_FOUND => Error::NotFound,
            RX_ERR_NO_MEMORY => Error::NoMemory,
            RX_ERR_BUSY => Error::Busy,
            RX_ERR_BAD_STATE => Error::BadState,
            RX_ERR_IO => Error::Io,
            RX_ERR_NOT_IMPLEMENTED => Error::NotSupported,
            _ => Error::Internal,
        };
        Some(err)
    }

    /// Short name used in log lines
    pub fn as_str(self) -> &'static str {
        match self {
            Error::TimedOut => "timed out",
            Error::InvalidArgs => "invalid arguments",
            Error::NotFound => "not found",
            Error::NoMemory => "out of memory",
            Error::Busy => "busy",
            Error::BadState => "bad state",
            Error::Io => "i/o error",
            Error::NotSupported => "not supported",
            Error::Internal => "internal error",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.to_status())
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        err.to_status()
    }
}

/// Collapse a result into a C-style status code
pub fn to_status(result: Result) -> Status {
    match result {
        Ok(()) => RX_OK,
        Err(err) => err.to_status(),
    }
}
