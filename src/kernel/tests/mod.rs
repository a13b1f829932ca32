// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Kernel Test Suite
//!
//! Host-side tests that drive the glue end to end through fakes.
//!
//! # Organization
//!
//! - [`fakes`] - PRCMU firmware model and host kernel service doubles
//! - [`boot_tests`] - Timer bring-up with the boot watchdog
//! - [`client_tests`] - Modem sysclk2 dispatcher and worker


mod client_tests;
