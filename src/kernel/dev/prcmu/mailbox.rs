// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Mailbox 4 request/acknowledge handshake

use memoffset::offset_of;

use super::{MboxBits, PRCM_MBOX_CPU_SET, PRCM_MBOX_CPU_VAL, PRCM_MBOX_HEADER_REQ_MB4, PRCM_REQ_MB4};
use crate::err::Result;
use crate::kernel::timer::{poll_until, Delay, PollPolicy};
use crate::platform::SocDescriptor;
use crate::reg::{self, IoMap, Mmio, RegisterIo};

/// Mailbox 4 request headers
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mb4Header {
    /// Configure a watchdog (sleep auto-off)
    A9WdogConf = 0x16,
    /// Start a watchdog
    A9WdogEn = 0x17,
    /// Stop a watchdog
    A9WdogDis = 0x18,
    /// Load a watchdog timeout
    A9WdogLoad = 0x19,
    /// Kick a watchdog
    A9WdogKick = 0x20,
}

impl Mb4Header {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0x16 => Some(Mb4Header::A9WdogConf),
            0x17 => Some(Mb4Header::A9WdogEn),
            0x18 => Some(Mb4Header::A9WdogDis),
            0x19 => Some(Mb4Header::A9WdogLoad),
            0x20 => Some(Mb4Header::A9WdogKick),
            _ => None,
        }
    }
}

/// Layout of the A9 watchdog request inside the mailbox 4 buffer
#[repr(C)]
struct ReqMb4A9Wdog {
    data0: u8,
    data1: u8,
    data2: u8,
    data3: u8,
}

/// TCDM offsets of the four request bytes, in write order
fn a9wdog_data_offsets() -> [usize; 4] {
    [
        PRCM_REQ_MB4 + offset_of!(ReqMb4A9Wdog, data0),
        PRCM_REQ_MB4 + offset_of!(ReqMb4A9Wdog, data1),
        PRCM_REQ_MB4 + offset_of!(ReqMb4A9Wdog, data2),
        PRCM_REQ_MB4 + offset_of!(ReqMb4A9Wdog, data3),
    ]
}

/// One mailbox 4 request: a header and four data bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mb4Request {
    pub header: Mb4Header,
    pub data: [u8; 4],
}

/// PRCMU mailbox 4
///
/// Owns the two register blocks and the poll budget. Methods take
/// `&mut self`: a request must be acknowledged before the next one is
/// written, so the mailbox is not reentrant.
pub struct Mb4Mailbox<T, P, D> {
    tcdm: T,
    prcmu: P,
    delay: D,
    poll: PollPolicy,
}

impl<D: Delay> Mb4Mailbox<Mmio, Mmio, D> {
    /// Mailbox 4 at the addresses named by `desc`
    ///
    /// # Safety
    ///
    /// `map` must return live device mappings covering the PRCMU register
    /// block and the TCDM, and nothing else may drive mailbox 4 while the
    /// returned value exists.
    pub unsafe fn from_descriptor<M: IoMap>(
        desc: &SocDescriptor,
        map: &M,
        delay: D,
        poll: PollPolicy,
    ) -> Self {
        let tcdm = Mmio::new(map.io_address(desc.tcdm_base));
        let prcmu = Mmio::new(map.io_address(desc.prcmu_base));
        Self::new(tcdm, prcmu, delay, poll)
    }
}

impl<T: RegisterIo, P: RegisterIo, D: Delay> Mb4Mailbox<T, P, D> {
    pub fn new(tcdm: T, prcmu: P, delay: D, poll: PollPolicy) -> Self {
        Self {
            tcdm,
            prcmu,
            delay,
            poll,
        }
    }

    /// Poll budget used for acknowledges
    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    /// Whether the firmware is still serving a mailbox 4 request
    pub fn busy(&self) -> bool {
        MboxBits::from_bits_truncate(self.prcmu.read32(PRCM_MBOX_CPU_VAL)).contains(MboxBits::MB4)
    }

    /// Send one request and wait for the firmware to acknowledge it
    ///
    /// Returns `Err(Error::TimedOut)` if the doorbell is still set after the
    /// whole poll budget. Nothing is retried here.
    pub fn send(&mut self, req: &Mb4Request) -> Result {
        LTRACEF!("mb4 header {:#x} data {:02x?}", req.header as u8, req.data);

        for (offset, byte) in a9wdog_data_offsets().into_iter().zip(req.data) {
            self.tcdm.write8(offset, byte);
        }
        self.tcdm.write8(PRCM_MBOX_HEADER_REQ_MB4, req.header as u8);

        reg::wmb();
        self.prcmu.write32(PRCM_MBOX_CPU_SET, MboxBits::MB4.bits());

        self.wait_for_ack().map_err(|err| {
            log_error!(
                "prcmu: mailbox 4 request {:#x} not acknowledged after {} polls: {}",
                req.header as u8,
                self.poll.max_attempts,
                err
            );
            err
        })
    }

    fn wait_for_ack(&mut self) -> Result {
        let prcmu = &self.prcmu;
        poll_until(&self.poll, &mut self.delay, || {
            !MboxBits::from_bits_truncate(prcmu.read32(PRCM_MBOX_CPU_VAL)).contains(MboxBits::MB4)
        })
    }

    /// Release the register blocks and the delay
    pub fn into_parts(self) -> (T, P, D) {
        (self.tcdm, self.prcmu, self.delay)
    }
}
