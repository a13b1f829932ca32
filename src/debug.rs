// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Logging and Diagnostics
//!
//! Kernel-style logging macros for the platform glue. The glue does not own
//! a console: every message is handed to the `log` facade and the host
//! kernel's logger decides where it goes. With the `log` feature disabled
//! the macros still type-check their arguments but emit nothing.
//!
//! # Usage
//!
//! ```rust,ignore
//! log_info!("boot watchdog enabled on id {}", id);
//! log_error!("mailbox 4 not acknowledged: {}", err);
//! ```

/// Target string attached to every record
pub const LOG_TARGET: &str = "ux500";

/// Log levels
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Trace-level logging (very verbose)
    Trace = 0,

    /// Debug-level logging (verbose)
    Debug = 1,

    /// Informational logging
    Info = 2,

    /// Warning-level logging
    Warning = 3,

    /// Error-level logging
    Error = 4,

    /// Critical boot progress (`pr_crit` in the host kernel)
    Critical = 5,
}

impl LogLevel {
    /// Get the log level name as a string
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRIT",
        }
    }
}

#[cfg(feature = "log")]
impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            // `log` has no level above error
            LogLevel::Error | LogLevel::Critical => log::Level::Error,
        }
    }
}

/// Print a formatted message at a specific log level
#[inline]
pub fn log_print(level: LogLevel, args: core::fmt::Arguments) {
    #[cfg(feature = "log")]
    log::log!(target: LOG_TARGET, log::Level::from(level), "{}", args);

    #[cfg(not(feature = "log"))]
    let _ = (level, args);
}

/// Log a trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::debug::log_print($crate::debug::LogLevel::Trace, format_args!($($arg)*))
    };
}

/// Log a debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::debug::log_print($crate::debug::LogLevel::Debug, format_args!($($arg)*))
    };
}

/// Log an info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::debug::log_print($crate::debug::LogLevel::Info, format_args!($($arg)*))
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::debug::log_print($crate::debug::LogLevel::Warning, format_args!($($arg)*))
    };
}

/// Log an error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::debug::log_print($crate::debug::LogLevel::Error, format_args!($($arg)*))
    };
}

/// Log a critical boot-progress message
#[macro_export]
macro_rules! log_crit {
    ($($arg:tt)*) => {
        $crate::debug::log_print($crate::debug::LogLevel::Critical, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Error < LogLevel::Critical);
        assert_eq!(LogLevel::Warning.as_str(), "WARN");
    }

    #[cfg(feature = "log")]
    #[test]
    fn test_critical_maps_to_error() {
        assert_eq!(log::Level::from(LogLevel::Critical), log::Level::Error);
        assert_eq!(log::Level::from(LogLevel::Warning), log::Level::Warn);
    }

    #[test]
    fn test_macros_accept_format_args() {
        log_info!("value {}", 1);
        log_crit!("before {}", "timer init");
    }
}
