// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Device Drivers
//!
//! - [`prcmu`]: PRCMU mailbox 4 and the A9 watchdog requests it carries
//! - [`timer`]: system timer bring-up, including the boot watchdog
//! - [`clk`]: clock framework interface
//! - [`modem`]: modem sysclk2 kernel client

pub mod clk;
pub mod modem;
pub mod prcmu;
pub mod timer;
