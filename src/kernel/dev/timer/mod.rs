// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! System Timer Bring-up
//!
//! The ux500 registers several timer blocks with the host timer framework:
//!
//! - **MTU**: clocksource, clockevent and sched_clock during boot. It lives
//!   in the APE power domain and loses state in sleep, so it is only the
//!   tick used to calibrate delay until the TWD local timers start.
//! - **TWD**: per-CPU local timers, started once the secondaries are up
//! - **PRCMU timer**: always-on clocksource and sched_clock, rated above
//!   the MTU
//! - **MTIMER** (DB5500 only): preferred clocksource, unlike the PRCMU timer
//!   it never goes backwards
//!
//! Before any of them is registered, the PRCMU is asked to arm an A9
//! watchdog so that a hang during early boot resets the board.

pub mod ux500;

// Re-exports
pub use ux500::*;
