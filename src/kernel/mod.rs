// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Kernel-side support for the ux500 glue
//!
//! Boot configuration, deferred work, delays and the device drivers that
//! sit on top of them.

pub mod cmdline;
pub mod dpc;
pub mod timer;

// Device drivers
pub mod dev;

#[cfg(test)]
pub mod tests;
