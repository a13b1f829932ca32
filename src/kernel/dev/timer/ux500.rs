// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! ux500 Timer Init
//!
//! # Boot Order
//!
//! 1. Publish the TWD base for the local timers
//! 2. Arm the boot watchdog: disable, load, enable. Any failing step skips
//!    the watchdog and boot carries on (fail open).
//! 3. MTU timer, then MTIMER (DB5500), then the PRCMU timer clocksource.
//!    On parts with the L2 coherency erratum the caches are flushed before
//!    and after the MTU setup and before and after the PRCMU timer setup.
//! 4. Register the APE context notifier

use crate::err::Error;
use crate::kernel::cmdline::BootConfig;
use crate::kernel::dev::prcmu::{A9Watchdog, Mb4Mailbox, WdogId};
use crate::kernel::timer::Delay;
use crate::platform::SocDescriptor;
use crate::reg::{IoMap, Mmio, RegisterIo};
use crate::rustux::types::{Milliseconds, VAddr};

/// Host timer framework
pub trait TimerFramework {
    /// Record where the TWD local timers live
    fn set_local_timer_base(&mut self, twd_base: VAddr);

    /// Register the MTU clocksource, clockevent and sched_clock
    fn register_mtu_timer(&mut self, mtu_base: VAddr);

    /// Register the DB5500 MTIMER clocksource
    fn register_mtimer(&mut self, mtimer_base: VAddr);

    /// Register the always-on PRCMU timer clocksource and sched_clock
    fn register_prcmu_timer(&mut self, prcmu_timer_base: VAddr);

    /// Reprogram the MTU clocksource after its power domain was restored
    fn reset_clock_source(&mut self);

    /// Reprogram the MTU clockevent on resume
    fn reset_clock_event(&mut self);

    /// Subscribe to APE context save/restore notifications
    fn register_context_notifier(&mut self) -> crate::err::Result;
}

/// Host cache maintenance
pub trait CacheMaintenance {
    /// Clean and invalidate the L1 caches
    fn flush_cache_all(&mut self);

    /// Clean the whole outer L2 cache
    fn clean_l2_cache_all(&mut self);
}

/// Power-domain context events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextEvent {
    ApeSave,
    ApeRestore,
    ArmSave,
    ArmRestore,
}

/// Notifier chain verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyResult {
    Ok,
}

/// Watchdog arming step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmStep {
    Disable,
    Load,
    Enable,
}

/// What happened to the boot watchdog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootWatchdog {
    /// Switched off on the command line
    Disabled,
    /// Running with the given timeout
    Armed { id: WdogId, timeout_ms: Milliseconds },
    /// A step failed and the watchdog was skipped
    Bypassed { step: ArmStep, error: Error },
}

/// Outcome of [`Ux500Timer::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    pub watchdog: BootWatchdog,
    pub context_notifier: bool,
}

/// Arm the boot watchdog: disable, load, enable
///
/// Stops at the first failing step.
pub fn arm_boot_watchdog<T, P, D>(
    wdog: &mut A9Watchdog<T, P, D>,
    id: WdogId,
    timeout_ms: Milliseconds,
) -> BootWatchdog
where
    T: RegisterIo,
    P: RegisterIo,
    D: Delay,
{
    let steps = [ArmStep::Disable, ArmStep::Load, ArmStep::Enable];
    for step in steps {
        let res = match step {
            ArmStep::Disable => wdog.disable(id),
            ArmStep::Load => wdog.load(id, timeout_ms),
            ArmStep::Enable => wdog.enable(id),
        };
        if let Err(error) = res {
            log_warn!("boot watchdog bypassed: {:?} failed: {}", step, error);
            return BootWatchdog::Bypassed { step, error };
        }
    }

    log_info!("boot watchdog {} enabled, {} ms", id.get(), timeout_ms);
    BootWatchdog::Armed { id, timeout_ms }
}

/// ux500 system timer
pub struct Ux500Timer<F, C, M> {
    desc: SocDescriptor,
    config: BootConfig,
    framework: F,
    cache: C,
    map: M,
}

impl<F: TimerFramework, C: CacheMaintenance, M: IoMap> Ux500Timer<F, C, M> {
    pub fn new(desc: SocDescriptor, config: BootConfig, framework: F, cache: C, map: M) -> Self {
        Self {
            desc,
            config,
            framework,
            cache,
            map,
        }
    }

    pub fn descriptor(&self) -> &SocDescriptor {
        &self.desc
    }

    /// Bring up the system timers
    ///
    /// `wdog` is the mailbox 4 front end; `None` skips the boot watchdog
    /// the same way `ux500.boot_wdt=off` does.
    pub fn init<T, P, D>(&mut self, wdog: Option<&mut A9Watchdog<T, P, D>>) -> BootReport
    where
        T: RegisterIo,
        P: RegisterIo,
        D: Delay,
    {
        log_info!("{} timer init", self.desc.variant.as_str());

        let twd = self.map.io_address(self.desc.twd_base);
        self.framework.set_local_timer_base(twd);

        let watchdog = match wdog {
            Some(wdog) if self.config.boot_watchdog => {
                arm_boot_watchdog(wdog, self.config.watchdog_id, self.config.watchdog_timeout_ms)
            }
            _ => BootWatchdog::Disabled,
        };

        self.register_timer_providers();

        let context_notifier = match self.framework.register_context_notifier() {
            Ok(()) => true,
            Err(err) => {
                log_warn!("context notifier registration failed: {}", err);
                false
            }
        };

        BootReport {
            watchdog,
            context_notifier,
        }
    }

    /// Bring up the system timers, driving mailbox 4 at the descriptor's
    /// PRCMU and TCDM bases
    ///
    /// The mailbox uses the poll budget from the boot options.
    ///
    /// # Safety
    ///
    /// The timer's `IoMap` must return live device mappings covering the
    /// PRCMU register block and the TCDM, and nothing else may drive
    /// mailbox 4 during the call.
    pub unsafe fn init_with_mailbox<D: Delay>(&mut self, delay: D) -> BootReport {
        let mbox = Mb4Mailbox::from_descriptor(&self.desc, &self.map, delay, self.config.mailbox_poll);
        let mut wdog: A9Watchdog<Mmio, Mmio, D> = A9Watchdog::new(mbox);
        self.init(Some(&mut wdog))
    }

    /// Hand the timer blocks to the host timer framework
    pub fn register_timer_providers(&mut self) {
        TRACE_ENTRY!();
        let mtu = self.map.io_address(self.desc.mtu_base);
        let prcmu_timer = self.map.io_address(self.desc.prcmu_timer_base);

        log_crit!("before mtu timer init");
        self.flush_caches();
        self.framework.register_mtu_timer(mtu);
        log_crit!("after mtu timer init");
        self.flush_caches();

        if let Some(mtimer) = self.desc.mtimer_base {
            let mtimer = self.map.io_address(mtimer);
            self.framework.register_mtimer(mtimer);
        }

        log_crit!("before prcmu timer init");
        self.flush_caches();
        self.framework.register_prcmu_timer(prcmu_timer);
        log_crit!("after prcmu timer init");
        self.flush_caches();
        TRACE_EXIT!();
    }

    /// Resume hook: the MTU clockevent lost its state
    pub fn resume(&mut self) {
        self.framework.reset_clock_event();
    }

    /// APE context notifier
    pub fn context_event(&mut self, event: ContextEvent) -> NotifyResult {
        if event == ContextEvent::ApeRestore {
            self.framework.reset_clock_source();
        }
        NotifyResult::Ok
    }

    fn flush_caches(&mut self) {
        if self.desc.l2_flush_erratum {
            self.cache.flush_cache_all();
            self.cache.clean_l2_cache_all();
        }
    }

    /// Release the collaborators
    pub fn into_parts(self) -> (F, C, M) {
        (self.framework, self.cache, self.map)
    }
}
