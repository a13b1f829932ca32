// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Deferred Procedure Calls
//!
//! A [`Dpc`] is one piece of deferred work bound to its own execution lane.
//! Interrupt-time code calls [`Dpc::queue`]; a dedicated worker thread owned
//! by the host kernel calls [`Dpc::process`] whenever it is woken.
//!
//! # Design
//!
//! - **Single lane**: at most one execution of the body at a time, even if
//!   several threads call `process`
//! - **Coalescing**: queueing an already-queued DPC is a no-op, the body
//!   runs once for any number of `queue` calls made before it starts
//! - **Re-arm while running**: the queued flag is cleared before the body
//!   runs, so a `queue` issued from inside (or during) the body schedules
//!   another run
//!
//! # Usage
//!
//! ```rust,ignore
//! static DPC: Dpc = Dpc::new("u8500_kernel_client");
//!
//! // Interrupt context
//! DPC.queue();
//!
//! // Worker thread
//! DPC.process(|| handle_request());
//! ```

use core::sync::atomic::{AtomicBool, Ordering};
use spin::Mutex;

use crate::err::{Error, Result};

/// Deferred work item with its own single-concurrency lane
pub struct Dpc {
    /// Name of the lane (for debugging)
    name: &'static str,

    /// Held for the whole duration of a body execution
    lane: Mutex<()>,

    /// Whether the body is waiting to run
    queued: AtomicBool,

    /// Cleared by `shutdown`; a dead DPC refuses new work
    alive: AtomicBool,
}

impl Dpc {
    /// Create a single-threaded deferred work lane
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            lane: Mutex::new(()),
            queued: AtomicBool::new(false),
            alive: AtomicBool::new(true),
        }
    }

    /// Name of the lane
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Queue the DPC for execution
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the DPC was idle and is now queued
    /// - `Ok(false)` if it was already queued (the pending run will cover it)
    /// - `Err(Error::BadState)` after `shutdown`
    pub fn queue(&self) -> Result<bool> {
        if !self.alive.load(Ordering::Acquire) {
            log_warn!("dpc {}: queue after shutdown", self.name);
            return Err(Error::BadState);
        }

        let newly_queued = !self.queued.swap(true, Ordering::AcqRel);
        Ok(newly_queued)
    }

    /// Cancel the DPC if queued
    ///
    /// Returns true if a queued run was removed.
    pub fn cancel(&self) -> bool {
        self.queued.swap(false, Ordering::AcqRel)
    }

    /// Check if DPC is queued
    pub fn is_queued(&self) -> bool {
        self.queued.load(Ordering::Acquire)
    }

    /// Check if the lane still accepts work
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Run the body if the DPC is queued
    ///
    /// Called by the worker thread. Blocks while another thread is inside
    /// the body. Returns whether the body ran.
    pub fn process<F: FnOnce()>(&self, body: F) -> bool {
        let _lane = self.lane.lock();

        if !self.queued.swap(false, Ordering::AcqRel) {
            return false;
        }

        log_debug!("dpc {}: running", self.name);
        body();
        true
    }

    /// Shutdown the lane
    ///
    /// Work already queued is flushed through `body` before the lane is
    /// marked dead, matching `destroy_workqueue` semantics.
    pub fn shutdown<F: FnOnce()>(&self, body: F) {
        self.process(body);
        self.alive.store(false, Ordering::Release);
        log_debug!("dpc {}: shut down", self.name);
    }
}

// ============================================================================
// Tests
// ============================================================================
