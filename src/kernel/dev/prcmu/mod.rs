// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! PRCMU Mailbox Driver
//!
//! The PRCMU (Power, Reset and Clock Management Unit) is a coprocessor
//! running its own firmware. The application CPU talks to it through eight
//! mailboxes: a request buffer in the PRCMU's TCDM, a header byte naming
//! the request, and a doorbell bit per mailbox in the PRCMU register block.
//!
//! Only mailbox 4 is driven here, and only for the A9 watchdog commands the
//! boot path needs before the full PRCMU driver is probed.
//!
//! # Handshake
//!
//! 1. Write the four request bytes into the TCDM
//! 2. Write the request header byte
//! 3. Set the mailbox bit in `MBOX_CPU_SET` (doorbell)
//! 4. Poll `MBOX_CPU_VAL` until the firmware clears the bit
//!
//! # Register Map
//!
//! | Block | Offset          | Name                | Description            |
//! |-------|-----------------|---------------------|------------------------|
//! | PRCMU | 0x0FC           | MBOX_CPU_VAL        | Doorbell status        |
//! | PRCMU | 0x100           | MBOX_CPU_SET        | Doorbell set           |
//! | TCDM  | 0xE48..=0xE4B   | REQ_MB4_A9WDOG_0..3 | Watchdog request bytes |
//! | TCDM  | 0xFEC           | MBOX_HEADER_REQ_MB4 | Mailbox 4 header       |

use bitflags::bitflags;

pub mod mailbox;
pub mod watchdog;

// Re-exports
pub use mailbox::*;
pub use watchdog::*;

// ============================================================================
// PRCMU Register Offsets
// ============================================================================

/// Doorbell status: a set bit means the request is still being served
pub const PRCM_MBOX_CPU_VAL: usize = 0x0FC;

/// Doorbell set: writing a bit rings the corresponding mailbox
pub const PRCM_MBOX_CPU_SET: usize = 0x100;

// ============================================================================
// TCDM Offsets
// ============================================================================

/// Mailbox 4 request header
pub const PRCM_MBOX_HEADER_REQ_MB4: usize = 0xFE8 + 0x4;

/// Mailbox 4 request buffer
pub const PRCM_REQ_MB4: usize = 0xE48;

bitflags! {
    /// One doorbell bit per PRCMU mailbox
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MboxBits: u32 {
        const MB0 = 1 << 0;
        const MB1 = 1 << 1;
        const MB2 = 1 << 2;
        const MB3 = 1 << 3;
        const MB4 = 1 << 4;
        const MB5 = 1 << 5;
        const MB6 = 1 << 6;
        const MB7 = 1 << 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mb4_bit() {
        assert_eq!(MboxBits::MB4.bits(), 0x10);
        assert!(MboxBits::from_bits_truncate(0x13).contains(MboxBits::MB4));
        assert!(!MboxBits::from_bits_truncate(0x0f).contains(MboxBits::MB4));
    }

    #[test]
    fn test_header_offset() {
        assert_eq!(PRCM_MBOX_HEADER_REQ_MB4, 0xFEC);
    }
}
