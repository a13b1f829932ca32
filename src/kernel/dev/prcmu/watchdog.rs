// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! A9 Watchdog
//!
//! The Cortex-A9 watchdogs are owned by the PRCMU firmware; the kernel can
//! only ask for them to be configured, loaded, started, kicked or stopped
//! through mailbox 4. Up to sixteen instances are addressed by a 4-bit id.
//!
//! # Timeout Encoding
//!
//! A load request carries the id and a 28-bit timeout in milliseconds:
//!
//! | Byte  | Bits 7..4            | Bits 3..0     |
//! |-------|----------------------|---------------|
//! | data0 | timeout\[3:0\]       | id            |
//! | data1 | timeout\[11:4\]      |               |
//! | data2 | timeout\[19:12\]     |               |
//! | data3 | timeout\[27:20\]     |               |

use super::mailbox::{Mb4Header, Mb4Mailbox, Mb4Request};
use crate::err::{Error, Result};
use crate::kernel::timer::Delay;
use crate::reg::RegisterIo;
use crate::rustux::types::Milliseconds;

/// Watchdog id field in data0
pub const A9WDOG_ID_MASK: u8 = 0xf;

/// Largest timeout a load request can carry
pub const A9WDOG_TIMEOUT_MASK: u32 = 0x0fff_ffff;

/// Sleep auto-off flag in a configure request
pub const A9WDOG_AUTO_OFF_EN: u8 = 1 << 7;
pub const A9WDOG_AUTO_OFF_DIS: u8 = 0;

/// A9 watchdog instance id (0..=15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WdogId(u8);

impl WdogId {
    /// Instance armed during boot
    pub const BOOT: WdogId = WdogId(1);

    /// Validate a raw id
    pub const fn new(raw: u8) -> Option<Self> {
        if raw <= A9WDOG_ID_MASK {
            Some(WdogId(raw))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for WdogId {
    type Error = Error;

    fn try_from(raw: u8) -> Result<Self> {
        WdogId::new(raw).ok_or(Error::InvalidArgs)
    }
}

/// Pack an id and a timeout into the four request bytes
///
/// Timeout bits above bit 27 are dropped.
pub fn encode_load(id: WdogId, timeout_ms: Milliseconds) -> [u8; 4] {
    [
        (id.get() & A9WDOG_ID_MASK) | ((timeout_ms << 4) & 0xf0) as u8,
        ((timeout_ms >> 4) & 0xff) as u8,
        ((timeout_ms >> 12) & 0xff) as u8,
        ((timeout_ms >> 20) & 0xff) as u8,
    ]
}

/// Unpack the four request bytes of a load request
pub fn decode_load(data: [u8; 4]) -> (WdogId, Milliseconds) {
    let id = WdogId(data[0] & A9WDOG_ID_MASK);
    let timeout = u32::from(data[0] >> 4)
        | u32::from(data[1]) << 4
        | u32::from(data[2]) << 12
        | u32::from(data[3]) << 20;
    (id, timeout)
}

impl Mb4Request {
    /// Start watchdog `id`
    pub fn a9wdog_enable(id: WdogId) -> Self {
        Self::id_only(Mb4Header::A9WdogEn, id)
    }

    /// Stop watchdog `id`
    pub fn a9wdog_disable(id: WdogId) -> Self {
        Self::id_only(Mb4Header::A9WdogDis, id)
    }

    /// Kick watchdog `id`
    pub fn a9wdog_kick(id: WdogId) -> Self {
        Self::id_only(Mb4Header::A9WdogKick, id)
    }

    /// Load `timeout_ms` into watchdog `id`
    pub fn a9wdog_load(id: WdogId, timeout_ms: Milliseconds) -> Self {
        Self {
            header: Mb4Header::A9WdogLoad,
            data: encode_load(id, timeout_ms),
        }
    }

    /// Configure whether watchdog `id` is stopped automatically in sleep
    pub fn a9wdog_config(id: WdogId, sleep_auto_off: bool) -> Self {
        let auto_off = if sleep_auto_off {
            A9WDOG_AUTO_OFF_EN
        } else {
            A9WDOG_AUTO_OFF_DIS
        };
        Self {
            header: Mb4Header::A9WdogConf,
            data: [id.get(), 0, 0, auto_off],
        }
    }

    fn id_only(header: Mb4Header, id: WdogId) -> Self {
        Self {
            header,
            data: [id.get(), 0, 0, 0],
        }
    }
}

/// A9 watchdog front end over PRCMU mailbox 4
///
/// Every operation sends one request and blocks until the firmware
/// acknowledges it or the poll budget is exhausted.
pub struct A9Watchdog<T, P, D> {
    mbox: Mb4Mailbox<T, P, D>,
}

impl<T: RegisterIo, P: RegisterIo, D: Delay> A9Watchdog<T, P, D> {
    pub fn new(mbox: Mb4Mailbox<T, P, D>) -> Self {
        Self { mbox }
    }

    /// Start watchdog `id`
    pub fn enable(&mut self, id: WdogId) -> Result {
        log_debug!("a9wdog {}: enable", id.get());
        self.mbox.send(&Mb4Request::a9wdog_enable(id))
    }

    /// Stop watchdog `id`
    pub fn disable(&mut self, id: WdogId) -> Result {
        log_debug!("a9wdog {}: disable", id.get());
        self.mbox.send(&Mb4Request::a9wdog_disable(id))
    }

    /// Load a timeout into watchdog `id`
    ///
    /// The timeout must fit in 28 bits.
    pub fn load(&mut self, id: WdogId, timeout_ms: Milliseconds) -> Result {
        if timeout_ms & !A9WDOG_TIMEOUT_MASK != 0 {
            log_error!("a9wdog {}: timeout {} ms does not fit in 28 bits", id.get(), timeout_ms);
            return Err(Error::InvalidArgs);
        }
        log_debug!("a9wdog {}: load {} ms", id.get(), timeout_ms);
        self.mbox.send(&Mb4Request::a9wdog_load(id, timeout_ms))
    }

    /// Kick watchdog `id`
    pub fn kick(&mut self, id: WdogId) -> Result {
        self.mbox.send(&Mb4Request::a9wdog_kick(id))
    }

    /// Configure sleep auto-off for watchdog `id`
    pub fn config(&mut self, id: WdogId, sleep_auto_off: bool) -> Result {
        log_debug!("a9wdog {}: config auto_off={}", id.get(), sleep_auto_off);
        self.mbox.send(&Mb4Request::a9wdog_config(id, sleep_auto_off))
    }

    /// Give the mailbox back
    pub fn into_mailbox(self) -> Mb4Mailbox<T, P, D> {
        self.mbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::tests::fakes::{CountingDelay, SimPrcmu};
    use crate::kernel::timer::PollPolicy;

    #[test]
    fn test_wdog_id_range() {
        assert_eq!(WdogId::new(0).map(WdogId::get), Some(0));
        assert_eq!(WdogId::new(15).map(WdogId::get), Some(15));
        assert_eq!(WdogId::new(16), None);
        assert_eq!(WdogId::try_from(200u8), Err(Error::InvalidArgs));
    }

    #[test]
    fn test_encode_boot_timeout() {
        // 30000 ms = 0x7530
        let data = encode_load(WdogId::BOOT, 30_000);
        assert_eq!(data, [0x01, 0x53, 0x07, 0x00]);
    }

    #[test]
    fn test_encode_decode_all_ids_edge_timeouts() {
        let timeouts = [0, 1, 0xf, 0x10, 0xfff, 0x1000, 0xf_ffff, 0x10_0000, 30_000, A9WDOG_TIMEOUT_MASK];
        for raw in 0..=A9WDOG_ID_MASK {
            let id = WdogId::new(raw).unwrap();
            for &timeout in &timeouts {
                assert_eq!(decode_load(encode_load(id, timeout)), (id, timeout));
            }
        }
    }

    #[test]
    fn test_encode_decode_sweep() {
        // Stride through the 28-bit space with an odd step so every nibble
        // position sees varied values.
        let id = WdogId::new(9).unwrap();
        let mut timeout = 0u32;
        while timeout <= A9WDOG_TIMEOUT_MASK {
            assert_eq!(decode_load(encode_load(id, timeout)), (id, timeout));
            timeout += 0x1_2345;
        }
    }

    #[test]
    fn test_encode_drops_high_bits() {
        let (_, timeout) = decode_load(encode_load(WdogId::BOOT, 0xf000_0001));
        assert_eq!(timeout, 1);
    }

    #[test]
    fn test_request_builders() {
        let id = WdogId::new(3).unwrap();
        assert_eq!(Mb4Request::a9wdog_enable(id).data, [3, 0, 0, 0]);
        assert_eq!(Mb4Request::a9wdog_enable(id).header, Mb4Header::A9WdogEn);
        assert_eq!(Mb4Request::a9wdog_disable(id).header, Mb4Header::A9WdogDis);
        assert_eq!(Mb4Request::a9wdog_kick(id).header, Mb4Header::A9WdogKick);
        assert_eq!(Mb4Request::a9wdog_config(id, true).data, [3, 0, 0, 0x80]);
        assert_eq!(Mb4Request::a9wdog_config(id, false).data, [3, 0, 0, 0]);
    }

    #[test]
    fn test_watchdog_commands_reach_firmware() {
        let sim = SimPrcmu::acking_after(2);
        let mbox = Mb4Mailbox::new(sim.tcdm(), sim.prcmu(), CountingDelay::new(), PollPolicy::MAILBOX);
        let mut wdog = A9Watchdog::new(mbox);

        assert_eq!(wdog.disable(WdogId::BOOT), Ok(()));
        assert_eq!(wdog.load(WdogId::BOOT, 30_000), Ok(()));
        assert_eq!(wdog.enable(WdogId::BOOT), Ok(()));
        assert_eq!(wdog.kick(WdogId::BOOT), Ok(()));

        let headers: Vec<_> = sim.requests().iter().map(|r| r.header).collect();
        assert_eq!(
            headers,
            vec![Mb4Header::A9WdogDis, Mb4Header::A9WdogLoad, Mb4Header::A9WdogEn, Mb4Header::A9WdogKick]
        );
    }

    #[test]
    fn test_load_rejects_wide_timeout_without_touching_mailbox() {
        let sim = SimPrcmu::acking_after(0);
        let mbox = Mb4Mailbox::new(sim.tcdm(), sim.prcmu(), CountingDelay::new(), PollPolicy::MAILBOX);
        let mut wdog = A9Watchdog::new(mbox);

        assert_eq!(wdog.load(WdogId::BOOT, 1 << 28), Err(Error::InvalidArgs));
        assert!(sim.tcdm_writes().is_empty());
        assert!(sim.doorbell_writes().is_empty());
    }
}
