// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Kernel Command Line Parsing
//!
//! Lookup of `key=value` boot arguments and the boot options the platform
//! glue understands.
//!
//! # Design
//!
//! - Entries are separated by spaces, tabs or newlines
//! - A key without `=` has an empty value
//! - When a key repeats, the last occurrence wins
//! - Booleans are false only for `0`, `false` and `off`
//! - Integers are decimal, or hex with a `0x`/`0X` prefix
//!
//! # Usage
//!
//! ```rust,ignore
//! let cmdline = Cmdline::new("console=ttyAMA2 ux500.boot_wdt=off");
//! let config = BootConfig::from_cmdline(&cmdline);
//! ```

use crate::kernel::dev::prcmu::{WdogId, A9WDOG_TIMEOUT_MASK};
use crate::kernel::timer::PollPolicy;
use crate::rustux::types::Milliseconds;

/// Borrowed view over the kernel command line
#[derive(Debug, Clone, Copy)]
pub struct Cmdline<'a> {
    data: &'a str,
}

impl<'a> Cmdline<'a> {
    pub const fn new(data: &'a str) -> Self {
        Self { data }
    }

    /// Iterate over `(key, value)` pairs in order
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.data
            .split(|c: char| c == ' ' || c == '\t' || c == '\n' || c == '\r')
            .filter(|arg| !arg.is_empty())
            .map(|arg| match arg.split_once('=') {
                Some((key, value)) => (key, value),
                None => (arg, ""),
            })
    }

    /// Get a value from the command line
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .last()
    }

    /// Get a boolean value from the command line
    ///
    /// Returns false if the value is "0", "false", or "off", true for any
    /// other value, and `default` if the key is absent.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            None => default,
            Some(v) => !matches!(v, "0" | "false" | "off"),
        }
    }

    /// Get a uint32 value from the command line
    ///
    /// Missing keys, empty values and malformed numbers yield `default`.
    pub fn get_u32(&self, key: &str, default: u32) -> u32 {
        self.get(key).and_then(parse_u32).unwrap_or(default)
    }

    /// Number of entries
    pub fn count(&self) -> usize {
        self.entries().count()
    }
}

fn parse_u32(v: &str) -> Option<u32> {
    if v.is_empty() {
        return None;
    }
    match v.strip_prefix("0x").or_else(|| v.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => v.parse().ok(),
    }
}

/// Enables the boot-time A9 watchdog
pub const ARG_BOOT_WDT: &str = "ux500.boot_wdt";

/// Watchdog instance armed at boot
pub const ARG_BOOT_WDT_ID: &str = "ux500.boot_wdt_id";

/// Boot watchdog timeout in milliseconds
pub const ARG_BOOT_WDT_TIMEOUT_MS: &str = "ux500.boot_wdt_timeout_ms";

/// Mailbox 4 acknowledge poll attempts
pub const ARG_MB4_POLL_ATTEMPTS: &str = "ux500.mb4_poll_attempts";

/// Delay between mailbox 4 acknowledge polls
pub const ARG_MB4_POLL_DELAY_US: &str = "ux500.mb4_poll_delay_us";

/// Boot watchdog timeout (30 sec)
pub const BOOT_PRCMU_WD_TIMEOUT: Milliseconds = 30 * 1000;

/// Watchdog instance used during boot
pub const BOOT_PRCMU_WD_ID: u8 = 1;

/// Boot options for the timer and watchdog bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootConfig {
    /// Arm the A9 watchdog before the timers are registered
    pub boot_watchdog: bool,
    pub watchdog_id: WdogId,
    pub watchdog_timeout_ms: Milliseconds,
    /// Mailbox 4 acknowledge budget
    pub mailbox_poll: PollPolicy,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            boot_watchdog: true,
            watchdog_id: WdogId::BOOT,
            watchdog_timeout_ms: BOOT_PRCMU_WD_TIMEOUT,
            mailbox_poll: PollPolicy::MAILBOX,
        }
    }
}

impl BootConfig {
    /// Build the boot options from the command line
    ///
    /// Out-of-range values are reported and replaced by the default.
    pub fn from_cmdline(cmdline: &Cmdline<'_>) -> Self {
        let defaults = Self::default();

        let raw_id = cmdline.get_u32(ARG_BOOT_WDT_ID, u32::from(BOOT_PRCMU_WD_ID));
        let watchdog_id = match u8::try_from(raw_id).ok().and_then(WdogId::new) {
            Some(id) => id,
            None => {
                log_warn!("{}={} out of range, using {}", ARG_BOOT_WDT_ID, raw_id, BOOT_PRCMU_WD_ID);
                defaults.watchdog_id
            }
        };

        let mut watchdog_timeout_ms =
            cmdline.get_u32(ARG_BOOT_WDT_TIMEOUT_MS, defaults.watchdog_timeout_ms);
        if watchdog_timeout_ms & !A9WDOG_TIMEOUT_MASK != 0 {
            log_warn!(
                "{}={} does not fit in 28 bits, using {}",
                ARG_BOOT_WDT_TIMEOUT_MS,
                watchdog_timeout_ms,
                BOOT_PRCMU_WD_TIMEOUT
            );
            watchdog_timeout_ms = defaults.watchdog_timeout_ms;
        }

        Self {
            boot_watchdog: cmdline.get_bool(ARG_BOOT_WDT, defaults.boot_watchdog),
            watchdog_id,
            watchdog_timeout_ms,
            mailbox_poll: PollPolicy {
                max_attempts: cmdline
                    .get_u32(ARG_MB4_POLL_ATTEMPTS, defaults.mailbox_poll.max_attempts),
                delay_us: cmdline.get_u32(ARG_MB4_POLL_DELAY_US, defaults.mailbox_poll.delay_us),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
