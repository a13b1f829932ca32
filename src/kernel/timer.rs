// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Delays and Bounded Polling
//!
//! Early boot code cannot sleep: the scheduler is not up and neither are
//! the timers being configured. Waiting on hardware is therefore a bounded
//! poll with a busy-wait between attempts.
//!
//! # Design
//!
//! - **[`Delay`]**: how to burn a number of microseconds
//! - **[`PollPolicy`]**: how many attempts and how long between them
//! - **[`poll_until`]**: the loop itself, returning `TimedOut` once the
//!   attempt budget is spent
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut delay = SpinDelay::new(SpinDelay::DEFAULT_LOOPS_PER_US);
//! poll_until(&PollPolicy::MAILBOX, &mut delay, || !doorbell_busy())?;
//! ```

use crate::err::{Error, Result};
use crate::rustux::types::Microseconds;

/// Something that can wait for a number of microseconds
pub trait Delay {
    /// Block the calling CPU for at least `us` microseconds
    fn delay_us(&mut self, us: Microseconds);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_us(&mut self, us: Microseconds) {
        (**self).delay_us(us)
    }
}

/// Calibrated busy loop
///
/// Usable before any clocksource exists. The calibration is coarse; it only
/// has to keep the worst-case poll bound in the right order of magnitude.
#[derive(Debug, Clone, Copy)]
pub struct SpinDelay {
    loops_per_us: u32,
}

impl SpinDelay {
    /// Coarse default; boards that measured their loop rate pass it to `new`
    pub const DEFAULT_LOOPS_PER_US: u32 = 800;

    pub const fn new(loops_per_us: u32) -> Self {
        Self { loops_per_us }
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOOPS_PER_US)
    }
}

impl Delay for SpinDelay {
    #[inline(never)]
    fn delay_us(&mut self, us: Microseconds) {
        let loops = u64::from(us) * u64::from(self.loops_per_us);
        for _ in 0..loops {
            #[cfg(target_arch = "aarch64")]
            aarch64_cpu::asm::nop();

            #[cfg(target_arch = "arm")]
            // SAFETY: `nop` has no effects.
            unsafe {
                core::arch::asm!("nop", options(nomem, nostack, preserves_flags))
            };

            #[cfg(not(any(target_arch = "aarch64", target_arch = "arm")))]
            core::hint::spin_loop();
        }
    }
}

/// Attempt budget for a bounded poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Number of delays before giving up
    pub max_attempts: u32,
    /// Delay between two checks
    pub delay_us: Microseconds,
}

impl PollPolicy {
    /// PRCMU mailbox acknowledge budget: 20000 x 25 us, about half a second
    pub const MAILBOX: PollPolicy = PollPolicy {
        max_attempts: 20_000,
        delay_us: 25,
    };

    /// Worst-case time spent waiting, in microseconds
    pub fn worst_case_us(&self) -> u64 {
        u64::from(self.max_attempts) * u64::from(self.delay_us)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::MAILBOX
    }
}

/// Poll `done` until it reports true or the budget runs out
///
/// `done` is checked before each delay and once more after the last one,
/// so a condition that never becomes true costs exactly
/// `policy.max_attempts` delays.
pub fn poll_until<D, F>(policy: &PollPolicy, delay: &mut D, mut done: F) -> Result
where
    D: Delay + ?Sized,
    F: FnMut() -> bool,
{
    for _ in 0..policy.max_attempts {
        if done() {
            return Ok(());
        }
        delay.delay_us(policy.delay_us);
    }

    if done() {
        Ok(())
    } else {
        Err(Error::TimedOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingDelay {
        calls: u32,
        total_us: u64,
    }

    impl Delay for CountingDelay {
        fn delay_us(&mut self, us: Microseconds) {
            self.calls += 1;
            self.total_us += u64::from(us);
        }
    }

    #[test]
    fn test_poll_immediate_success() {
        let mut delay = CountingDelay { calls: 0, total_us: 0 };
        assert_eq!(poll_until(&PollPolicy::MAILBOX, &mut delay, || true), Ok(()));
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn test_poll_succeeds_after_k_checks() {
        let mut delay = CountingDelay { calls: 0, total_us: 0 };
        let mut checks = 0;
        let policy = PollPolicy { max_attempts: 10, delay_us: 3 };
        let res = poll_until(&policy, &mut delay, || {
            checks += 1;
            checks > 4
        });
        assert_eq!(res, Ok(()));
        assert_eq!(delay.calls, 4);
        assert_eq!(delay.total_us, 12);
    }

    #[test]
    fn test_poll_times_out_after_exact_budget() {
        let mut delay = CountingDelay { calls: 0, total_us: 0 };
        let policy = PollPolicy { max_attempts: 7, delay_us: 1 };
        assert_eq!(poll_until(&policy, &mut delay, || false), Err(Error::TimedOut));
        assert_eq!(delay.calls, 7);
    }

    #[test]
    fn test_poll_last_chance_check() {
        // Condition flips during the final delay
        let mut delay = CountingDelay { calls: 0, total_us: 0 };
        let policy = PollPolicy { max_attempts: 3, delay_us: 1 };
        let mut checks = 0;
        let res = poll_until(&policy, &mut delay, || {
            checks += 1;
            checks == 4
        });
        assert_eq!(res, Ok(()));
        assert_eq!(delay.calls, 3);
    }

    #[test]
    fn test_mailbox_worst_case() {
        assert_eq!(PollPolicy::MAILBOX.worst_case_us(), 500_000);
        assert_eq!(PollPolicy::default(), PollPolicy::MAILBOX);
    }

    #[test]
    fn test_spin_delay_zero_returns() {
        SpinDelay::default().delay_us(0);
        SpinDelay::new(1).delay_us(2);
    }
}
