// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! ux500 Platform Glue
//!
//! Platform code for the ST-Ericsson ux500 family (DB5500, DB8500, DB9540)
//! that plugs into the host kernel's timer, clock and shared-memory IPC
//! subsystems.
//!
//! # Components
//!
//! - **Boot watchdog**: arms the A9 watchdog through PRCMU mailbox 4 before
//!   the system timers are registered ([`kernel::dev::prcmu`],
//!   [`kernel::dev::timer`])
//! - **sysclk2 kernel client**: services clock enable/disable requests sent
//!   by the modem over SHRM ([`kernel::dev::modem`])
//!
//! Everything the host kernel owns (timer framework, cache maintenance,
//! clock framework, SHRM transport) is reached through traits so the glue
//! can be exercised off-target.

#![cfg_attr(not(test), no_std)]

// Common types
pub mod rustux;

// Register access and error codes
pub mod err;
pub mod reg;

// Logging and tracing
#[macro_use]
pub mod debug;
#[macro_use]
pub mod trace;

// SoC descriptors
pub mod platform;

// Kernel-side subsystems and drivers
pub mod kernel;

pub use err::{Error, Result};
pub use platform::{SocDescriptor, SocVariant};
