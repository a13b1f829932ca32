// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! SHRM Transport Interface
//!
//! SHRM is the shared-memory link between the application CPU and the
//! modem. Every message carries an L2 header naming the logical channel it
//! belongs to. Delivery towards the kernel is a callback into the client's
//! dispatcher; the reverse direction is [`ShmTransport::write_message`].

use crate::err::Result;
use crate::rustux::types::L2Header;

/// Sending side of the SHRM link
pub trait ShmTransport {
    /// Queue `msg` to the modem on channel `l2_header`
    ///
    /// Delivery is not confirmed; `Ok` only means the bytes were accepted
    /// by the link.
    fn write_message(&self, l2_header: L2Header, msg: &[u8]) -> Result;
}

impl<T: ShmTransport + ?Sized> ShmTransport for &T {
    fn write_message(&self, l2_header: L2Header, msg: &[u8]) -> Result {
        (**self).write_message(l2_header, msg)
    }
}
