// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Platform Descriptors
//!
//! The ux500 family ships in three variants that differ in where their
//! timer blocks live. Instead of asking "is this a u5500?" throughout the
//! boot path, the variant is resolved once into a [`SocDescriptor`] and that
//! descriptor is handed to whatever needs a base address.
//!
//! # Register Map
//!
//! | Block        | DB5500        | DB8500 / DB9540 |
//! |--------------|---------------|-----------------|
//! | MTU0         | `0xA03C_6000` | `0xA03C_6000`   |
//! | TWD          | `0xA041_0600` | `0xA041_0600`   |
//! | PRCMU timer  | timer 3       | timer 4         |
//! | MTIMER       | `0xA03C_9000` | -               |
//! | PRCMU        | `0x8015_7000` | `0x8015_7000`   |
//! | PRCMU TCDM   | `0x801B_8000` | `0x801B_8000`   |

use crate::rustux::types::PAddr;

/// PRCMU register block
pub const U8500_PRCMU_BASE: PAddr = 0x8015_7000;

/// PRCMU tightly coupled data memory (mailbox buffers)
pub const U8500_PRCMU_TCDM_BASE: PAddr = 0x801B_8000;

/// Multi-timer unit 0
pub const U8500_MTU0_BASE: PAddr = 0xA03C_6000;

/// Cortex-A9 private timer/watchdog
pub const U8500_TWD_BASE: PAddr = 0xA041_0600;

/// Always-on PRCMU timer 4
pub const U8500_PRCMU_TIMER_4_BASE: PAddr = U8500_PRCMU_BASE + 0x450;

pub const U5500_MTU0_BASE: PAddr = 0xA03C_6000;
pub const U5500_TWD_BASE: PAddr = 0xA041_0600;
pub const U5500_PRCMU_TIMER_3_BASE: PAddr = U8500_PRCMU_BASE + 0x338;
pub const U5500_MTIMER_BASE: PAddr = 0xA03C_9000;

/// SoC variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocVariant {
    /// DB5500 (u5500)
    Db5500,
    /// DB8500 (u8500)
    Db8500,
    /// DB9540 (u9540), timer layout identical to DB8500
    Db9540,
}

impl SocVariant {
    /// Get the variant name as a string
    pub fn as_str(self) -> &'static str {
        match self {
            SocVariant::Db5500 => "u5500",
            SocVariant::Db8500 => "u8500",
            SocVariant::Db9540 => "u9540",
        }
    }

    /// Resolve a variant from its marketing name (`u8500`, `db8500`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "u5500" | "db5500" => Some(SocVariant::Db5500),
            "u8500" | "db8500" => Some(SocVariant::Db8500),
            "u9540" | "db9540" => Some(SocVariant::Db9540),
            _ => None,
        }
    }
}

/// Capability descriptor for one SoC variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocDescriptor {
    pub variant: SocVariant,

    /// MTU0: clocksource, clockevent and sched_clock during boot
    pub mtu_base: PAddr,

    /// Per-CPU TWD local timers, started once secondaries are up
    pub twd_base: PAddr,

    /// Always-on PRCMU timer used as the high-rated clocksource
    pub prcmu_timer_base: PAddr,

    /// MTIMER clocksource, present on DB5500 only
    pub mtimer_base: Option<PAddr>,

    /// PRCMU registers (mailbox doorbells)
    pub prcmu_base: PAddr,

    /// PRCMU TCDM (mailbox buffers)
    pub tcdm_base: PAddr,

    /// Every timer setup step must be bracketed by a full L1 flush and L2
    /// clean on parts with the outer-cache coherency erratum.
    pub l2_flush_erratum: bool,
}

impl SocDescriptor {
    /// Descriptor for a DB5500
    pub const fn db5500() -> Self {
        Self {
            variant: SocVariant::Db5500,
            mtu_base: U5500_MTU0_BASE,
            twd_base: U5500_TWD_BASE,
            prcmu_timer_base: U5500_PRCMU_TIMER_3_BASE,
            mtimer_base: Some(U5500_MTIMER_BASE),
            // The boot watchdog mailbox sits at the DB8500 addresses on
            // every variant.
            prcmu_base: U8500_PRCMU_BASE,
            tcdm_base: U8500_PRCMU_TCDM_BASE,
            l2_flush_erratum: true,
        }
    }

    /// Descriptor for a DB8500
    pub const fn db8500() -> Self {
        Self {
            variant: SocVariant::Db8500,
            mtu_base: U8500_MTU0_BASE,
            twd_base: U8500_TWD_BASE,
            prcmu_timer_base: U8500_PRCMU_TIMER_4_BASE,
            mtimer_base: None,
            prcmu_base: U8500_PRCMU_BASE,
            tcdm_base: U8500_PRCMU_TCDM_BASE,
            l2_flush_erratum: true,
        }
    }

    /// Descriptor for a DB9540
    pub const fn db9540() -> Self {
        let mut desc = Self::db8500();
        desc.variant = SocVariant::Db9540;
        desc
    }

    /// Descriptor for `variant`
    pub const fn for_variant(variant: SocVariant) -> Self {
        match variant {
            SocVariant::Db5500 => Self::db5500(),
            SocVariant::Db8500 => Self::db8500(),
            SocVariant::Db9540 => Self::db9540(),
        }
    }

    /// Same descriptor with the cache erratum workaround switched off
    pub const fn without_l2_flush(mut self) -> Self {
        self.l2_flush_erratum = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db5500_uses_timer3_and_mtimer() {
        let desc = SocDescriptor::for_variant(SocVariant::Db5500);
        assert_eq!(desc.prcmu_timer_base, U5500_PRCMU_TIMER_3_BASE);
        assert_eq!(desc.mtimer_base, Some(U5500_MTIMER_BASE));
    }

    #[test]
    fn test_db9540_matches_db8500_layout() {
        let a = SocDescriptor::db8500();
        let b = SocDescriptor::db9540();
        assert_eq!(b.variant, SocVariant::Db9540);
        assert_eq!(a.prcmu_timer_base, b.prcmu_timer_base);
        assert_eq!(a.mtu_base, b.mtu_base);
        assert!(b.mtimer_base.is_none());
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(SocVariant::from_name("db8500"), Some(SocVariant::Db8500));
        assert_eq!(SocVariant::from_name("u5500"), Some(SocVariant::Db5500));
        assert_eq!(SocVariant::from_name("u8540"), None);
        assert_eq!(SocVariant::Db9540.as_str(), "u9540");
    }

    #[test]
    fn test_without_l2_flush() {
        assert!(!SocDescriptor::db8500().without_l2_flush().l2_flush_erratum);
    }
}
