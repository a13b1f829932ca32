// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Modem Kernel Client
//!
//! The modem asks the application side to gate the `sysclk2` clock over a
//! dedicated SHRM channel. Requests arrive in the transport's delivery
//! context, where the clock framework may not be called, so the client
//! stores the request and hands it to a single deferred worker that
//! drives the clock and answers the modem.
//!
//! # Message Format
//!
//! Both directions carry the same two bytes:
//!
//! | Byte | Field      | Values                                   |
//! |------|------------|------------------------------------------|
//! | 0    | `msg_type` | 0 enable req, 1 enable resp, 2 disable req, 3 disable resp |
//! | 1    | `param`    | 0 success, 1 failure (responses only)    |

pub mod client;
pub mod shrm;

// Re-exports
pub use client::*;
pub use shrm::ShmTransport;

use crate::rustux::types::L2Header;

/// SHRM channel carrying sysclk2 requests
pub const SYSCLK2_MESSAGING: L2Header = 0xE6;

/// Clock the modem is allowed to gate
pub const SYSCLK2_CLOCK_NAME: &str = "sysclk2";

/// Name of the worker serving sysclk2 requests
pub const KERNEL_CLIENT_WORKER: &str = "u8500_kernel_client";

/// Size of a sysclk2 message on the wire
pub const SYSCLK_MSG_LEN: usize = 2;

/// Message kind
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysClkMsgType {
    EnableRequest = 0,
    EnableResponse = 1,
    DisableRequest = 2,
    DisableResponse = 3,
}

impl SysClkMsgType {
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(SysClkMsgType::EnableRequest),
            1 => Some(SysClkMsgType::EnableResponse),
            2 => Some(SysClkMsgType::DisableRequest),
            3 => Some(SysClkMsgType::DisableResponse),
            _ => None,
        }
    }
}

/// Response status
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysClkParam {
    Success = 0,
    Failure = 1,
}

/// One sysclk2 message
///
/// Fields stay raw so that values outside the known set survive decoding
/// and can be reported by the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysClkMsg {
    pub msg_type: u8,
    pub param: u8,
}

impl SysClkMsg {
    /// Response to a request
    pub const fn response(msg_type: SysClkMsgType, param: SysClkParam) -> Self {
        Self {
            msg_type: msg_type as u8,
            param: param as u8,
        }
    }

    /// Decode the leading two bytes of `payload`
    ///
    /// Returns `None` if the payload is too short. Trailing bytes are
    /// ignored.
    pub fn from_bytes(payload: &[u8]) -> Option<Self> {
        match payload {
            [msg_type, param, ..] => Some(Self {
                msg_type: *msg_type,
                param: *param,
            }),
            _ => None,
        }
    }

    pub const fn to_bytes(self) -> [u8; SYSCLK_MSG_LEN] {
        [self.msg_type, self.param]
    }

    /// Known message kind, if any
    pub fn kind(&self) -> Option<SysClkMsgType> {
        SysClkMsgType::from_u8(self.msg_type)
    }
}
