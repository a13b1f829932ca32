// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Trace Support
//!
//! Function-level tracing for the mailbox and worker hot paths. These are
//! compiled out unless the `kernel-debug` feature is enabled, since the
//! mailbox poll loop runs during early boot where every cycle counts.

/// Function entry trace macro
#[macro_export]
macro_rules! LTRACEF {
    ($($arg:tt)*) => {
        #[cfg(feature = "kernel-debug")]
        {
            $crate::log_trace!($($arg)*);
        }
    };
}

/// Function entry macro
#[macro_export]
macro_rules! TRACE_ENTRY {
    () => {
        #[cfg(feature = "kernel-debug")]
        {
            $crate::log_trace!("enter {}:{}", file!(), line!());
        }
    };
}

/// Function exit macro
#[macro_export]
macro_rules! TRACE_EXIT {
    () => {
        #[cfg(feature = "kernel-debug")]
        {
            $crate::log_trace!("exit {}:{}", file!(), line!());
        }
    };
}
