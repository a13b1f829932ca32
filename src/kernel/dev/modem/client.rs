// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! sysclk2 request dispatcher and worker
//!
//! # Design
//!
//! - **Dispatcher** ([`KernelClient::dispatch`]): runs in the SHRM delivery
//!   context. Filters on the L2 header, copies the message into the single
//!   pending slot and queues the worker. Never touches the clock.
//! - **Worker** ([`KernelClient::run_pending`]): runs on the client's own
//!   [`Dpc`] lane, so at most one request is served at a time. Takes the
//!   pending slot, gates the clock and answers the modem.
//!
//! The slot holds one request. A second request arriving before the worker
//! has taken the first replaces it and only the newer one is served; the
//! dispatcher reports this as [`Dispatch::Overwritten`].

use spin::Mutex;

use super::shrm::ShmTransport;
use super::{
    SysClkMsg, SysClkMsgType, SysClkParam, KERNEL_CLIENT_WORKER, SYSCLK2_CLOCK_NAME,
    SYSCLK2_MESSAGING,
};
use crate::err::Result;
use crate::kernel::dev::clk::{Clock, ClockProvider};
use crate::kernel::dpc::Dpc;
use crate::rustux::types::L2Header;

/// Client parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Clock looked up at init
    pub clock_name: &'static str,
    /// SHRM channel served by this client
    pub l2_header: L2Header,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            clock_name: SYSCLK2_CLOCK_NAME,
            l2_header: SYSCLK2_MESSAGING,
        }
    }
}

/// What the dispatcher did with a delivered message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Stored and the worker was queued
    Queued,
    /// Stored over a request the worker had not taken yet
    Overwritten,
    /// Not a sysclk2 message; ignored
    UnknownChannel,
    /// Shorter than a sysclk2 message; ignored
    Malformed,
}

/// A request waiting for the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRequest {
    l2_header: L2Header,
    msg: SysClkMsg,
}

/// Kernel side of the modem sysclk2 protocol
///
/// Shared between the SHRM delivery context (`dispatch`) and the worker
/// thread (`run_pending`); both take `&self`.
pub struct KernelClient<C, T> {
    config: ClientConfig,
    worker: Dpc,
    pending: Mutex<Option<PendingRequest>>,
    clock: Mutex<C>,
    transport: T,
}

impl<C: Clock, T: ShmTransport> KernelClient<C, T> {
    /// Look up the clock and start the worker lane
    ///
    /// Fails if the clock cannot be acquired; nothing is left behind.
    pub fn init<P>(config: ClientConfig, provider: &mut P, transport: T) -> Result<Self>
    where
        P: ClockProvider<Clock = C>,
    {
        let clock = provider.acquire(config.clock_name).map_err(|err| {
            log_error!("request for {} failed: {}", config.clock_name, err);
            err
        })?;

        log_info!(
            "modem kernel client ready: channel {:#x}, clock {}",
            config.l2_header,
            config.clock_name
        );

        Ok(Self {
            config,
            worker: Dpc::new(KERNEL_CLIENT_WORKER),
            pending: Mutex::new(None),
            clock: Mutex::new(clock),
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether the worker has a run queued
    pub fn has_pending(&self) -> bool {
        self.worker.is_queued()
    }

    /// SHRM delivery callback
    ///
    /// Must not block: stores the message and queues the worker.
    pub fn dispatch(&self, l2_header: L2Header, payload: &[u8]) -> Dispatch {
        if l2_header != self.config.l2_header {
            log_error!("unknown l2 header {:#x}", l2_header);
            return Dispatch::UnknownChannel;
        }

        let Some(msg) = SysClkMsg::from_bytes(payload) else {
            log_error!("short sysclk message: {} bytes", payload.len());
            return Dispatch::Malformed;
        };

        LTRACEF!("sysclk msg type {} param {}", msg.msg_type, msg.param);

        let replaced = self
            .pending
            .lock()
            .replace(PendingRequest { l2_header, msg })
            .is_some();

        if let Err(err) = self.worker.queue() {
            log_error!("{}: cannot queue request: {}", self.worker.name(), err);
        }

        if replaced {
            log_warn!("sysclk request overwritten before it was served");
            Dispatch::Overwritten
        } else {
            Dispatch::Queued
        }
    }

    /// Worker entry point
    ///
    /// Serves the pending request if the worker is queued. Returns whether
    /// a run happened.
    pub fn run_pending(&self) -> bool {
        self.worker.process(|| self.serve_pending())
    }

    fn serve_pending(&self) {
        TRACE_ENTRY!();
        let Some(req) = self.pending.lock().take() else {
            return;
        };

        match req.msg.kind() {
            Some(SysClkMsgType::EnableRequest) => {
                let param = match self.clock.lock().enable() {
                    Ok(()) => SysClkParam::Success,
                    Err(err) => {
                        log_error!("{} enable failed: {}", self.config.clock_name, err);
                        SysClkParam::Failure
                    }
                };
                self.respond(req.l2_header, SysClkMsgType::EnableResponse, param);
            }
            Some(SysClkMsgType::DisableRequest) => {
                self.clock.lock().disable();
                self.respond(req.l2_header, SysClkMsgType::DisableResponse, SysClkParam::Success);
            }
            _ => {
                log_error!("unknown message type {}", req.msg.msg_type);
            }
        }
    }

    fn respond(&self, l2_header: L2Header, msg_type: SysClkMsgType, param: SysClkParam) {
        let resp = SysClkMsg::response(msg_type, param);
        log_debug!("sysclk response {:?} {:?}", msg_type, param);

        if let Err(err) = self.transport.write_message(l2_header, &resp.to_bytes()) {
            log_error!("sysclk response {:?} not sent: {}", msg_type, err);
        }
    }

    /// Tear down the client
    ///
    /// A queued request is served before the worker stops, then the clock
    /// is returned to the framework. Returns the transport.
    pub fn exit(self) -> T {
        self.worker.shutdown(|| self.serve_pending());

        let Self {
            clock, transport, ..
        } = self;
        clock.into_inner().release();

        log_info!("modem kernel client stopped");
        transport
    }
}
