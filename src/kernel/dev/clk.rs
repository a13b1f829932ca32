// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Clock Framework Interface
//!
//! The host kernel's clock framework, as seen by platform drivers: look a
//! clock up by name, gate it, and put it back.

use crate::err::Result;

/// A gateable clock
pub trait Clock {
    /// Ungate the clock
    fn enable(&mut self) -> Result;

    /// Gate the clock
    fn disable(&mut self);

    /// Return the clock to the framework
    fn release(self)
    where
        Self: Sized,
    {
    }
}

/// Clock lookup
pub trait ClockProvider {
    type Clock: Clock;

    /// Look up the clock called `name`
    fn acquire(&mut self, name: &str) -> Result<Self::Clock>;
}
