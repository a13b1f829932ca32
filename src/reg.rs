// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Register Access
//!
//! Byte and word access to memory-mapped register blocks. Drivers talk to a
//! [`RegisterIo`] rather than to raw pointers so the same handshake code can
//! run against the real PRCMU or against a simulated one.
//!
//! Peripheral bases in [`crate::platform`] are physical; [`IoMap`] turns
//! them into the kernel virtual addresses handed to [`Mmio::new`].

use crate::rustux::types::{PAddr, VAddr};

/// Register block accessed by offset from its base
pub trait RegisterIo {
    /// Read an 8-bit register
    fn read8(&self, offset: usize) -> u8;

    /// Write an 8-bit register
    fn write8(&self, offset: usize, val: u8);

    /// Read a 32-bit register
    fn read32(&self, offset: usize) -> u32;

    /// Write a 32-bit register
    fn write32(&self, offset: usize, val: u32);
}

impl<R: RegisterIo + ?Sized> RegisterIo for &R {
    fn read8(&self, offset: usize) -> u8 {
        (**self).read8(offset)
    }

    fn write8(&self, offset: usize, val: u8) {
        (**self).write8(offset, val)
    }

    fn read32(&self, offset: usize) -> u32 {
        (**self).read32(offset)
    }

    fn write32(&self, offset: usize, val: u32) {
        (**self).write32(offset, val)
    }
}

/// Volatile access to a mapped register block
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    base: VAddr,
}

impl Mmio {
    /// Wrap a mapped register block
    ///
    /// # Safety
    ///
    /// `base` must be the virtual address of a device mapping that stays
    /// valid for the lifetime of the returned value and covers every offset
    /// the driver will touch.
    pub const unsafe fn new(base: VAddr) -> Self {
        Self { base }
    }

    /// Base address of the block
    pub fn base(&self) -> VAddr {
        self.base
    }
}

impl RegisterIo for Mmio {
    #[inline]
    fn read8(&self, offset: usize) -> u8 {
        // SAFETY: `Mmio::new` requires the mapping to cover `offset`.
        unsafe { core::ptr::read_volatile((self.base + offset) as *const u8) }
    }

    #[inline]
    fn write8(&self, offset: usize, val: u8) {
        // SAFETY: see `read8`.
        unsafe { core::ptr::write_volatile((self.base + offset) as *mut u8, val) }
    }

    #[inline]
    fn read32(&self, offset: usize) -> u32 {
        // SAFETY: see `read8`.
        unsafe { core::ptr::read_volatile((self.base + offset) as *const u32) }
    }

    #[inline]
    fn write32(&self, offset: usize, val: u32) {
        // SAFETY: see `read8`.
        unsafe { core::ptr::write_volatile((self.base + offset) as *mut u32, val) }
    }
}

/// Write barrier ordering earlier device writes before the next one
///
/// Needed between filling the mailbox and ringing the doorbell so the
/// coprocessor never sees the doorbell ahead of the data.
#[inline]
pub fn wmb() {
    #[cfg(target_arch = "aarch64")]
    aarch64_cpu::asm::barrier::dsb(aarch64_cpu::asm::barrier::SY);

    // Cortex-A9 (ARMv7-A)
    #[cfg(target_arch = "arm")]
    // SAFETY: `dsb` only waits for outstanding memory accesses.
    unsafe {
        core::arch::asm!("dsb sy", options(nostack, preserves_flags))
    };

    #[cfg(not(any(target_arch = "aarch64", target_arch = "arm")))]
    core::sync::atomic::fence(core::sync::atomic::Ordering::SeqCst);
}

/// Translation of peripheral physical bases to kernel virtual addresses
pub trait IoMap {
    /// Virtual address of the static device mapping covering `phys`
    fn io_address(&self, phys: PAddr) -> VAddr;
}

/// Mapping for platforms that run with peripherals identity mapped
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityMap;

impl IoMap for IdentityMap {
    fn io_address(&self, phys: PAddr) -> VAddr {
        phys as VAddr
    }
}

/// Fixed-offset static mapping (`IO_ADDRESS(x)` style)
#[derive(Debug, Clone, Copy)]
pub struct OffsetMap {
    /// Physical start of the mapped peripheral window
    pub phys_base: PAddr,
    /// Virtual address the window is mapped at
    pub virt_base: VAddr,
}

impl IoMap for OffsetMap {
    fn io_address(&self, phys: PAddr) -> VAddr {
        self.virt_base + (phys - self.phys_base) as VAddr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mmio_round_trip_on_plain_memory() {
        let mut block = [0u32; 4];
        let mmio = unsafe { Mmio::new(block.as_mut_ptr() as VAddr) };

        mmio.write32(4, 0xdead_beef);
        assert_eq!(mmio.read32(4), 0xdead_beef);

        mmio.write8(8, 0x5a);
        assert_eq!(mmio.read8(8), 0x5a);
        assert_eq!(block[1], 0xdead_beef);
    }

    #[test]
    fn test_data_visible_before_doorbell() {
        let mut block = [0u32; 4];
        let mmio = unsafe { Mmio::new(block.as_mut_ptr() as VAddr) };

        mmio.write8(0, 0x19);
        wmb();
        mmio.write32(8, 1 << 4);

        assert_eq!(mmio.read8(0), 0x19);
        assert_eq!(mmio.read32(8), 0x10);
    }

    #[test]
    fn test_offset_map() {
        let map = OffsetMap {
            phys_base: 0x8000_0000,
            virt_base: 0xf800_0000,
        };
        assert_eq!(map.io_address(0x8015_7000), 0xf815_7000);
        assert_eq!(IdentityMap.io_address(0x1234), 0x1234);
    }
}
