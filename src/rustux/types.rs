// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Common type aliases used throughout the glue

/// Virtual address type
pub type VAddr = usize;

/// Physical address type
pub type PAddr = u64;

/// Error code type (negative values indicate errors)
pub type Status = i32;

/// Time value in microseconds
pub type Microseconds = u32;

/// Time value in milliseconds
pub type Milliseconds = u32;

/// L2 header tagging a SHRM message with its logical channel
pub type L2Header = u8;
