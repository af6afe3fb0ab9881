// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running millisecond tick.
//!
//! [`MillisClock::tick`] is called from the 1 kHz SysTick exception; the main loop reads the
//! count with [`MillisClock::now_ms`]. The counter wraps after ~49.7 days, which every
//! consumer tolerates through wrapping arithmetic.

use core::sync::atomic::{AtomicU32, Ordering};

pub struct MillisClock {
    ms: AtomicU32,
}

impl MillisClock {
    pub const fn new() -> Self {
        Self {
            ms: AtomicU32::new(0),
        }
    }

    /// Advance by one millisecond. Called from the SysTick handler.
    #[inline]
    pub fn tick(&self) {
        self.ms.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn now_ms(&self) -> u32 {
        self.ms.load(Ordering::Relaxed)
    }

    /// Milliseconds elapsed since `since_ms`.
    #[inline]
    pub fn elapsed_ms(&self, since_ms: u32) -> u32 {
        self.now_ms().wrapping_sub(since_ms)
    }
}

impl Default for MillisClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure SysTick for a 1 ms interrupt from the core clock.
#[cfg(feature = "stm32f7")]
pub fn start_systick(mut syst: cortex_m::peripheral::SYST, sysclk_hz: u32) {
    use cortex_m::peripheral::syst::SystClkSource;

    let ticks_per_ms = sysclk_hz / 1_000;
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(ticks_per_ms - 1);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();
}

/// Sleep until `clock` has advanced `ms` milliseconds past `since_ms`.
#[cfg(feature = "stm32f7")]
pub fn wait_until(clock: &MillisClock, since_ms: u32, ms: u32) {
    while clock.elapsed_ms(since_ms) < ms {
        cortex_m::asm::wfi();
    }
}

/// Microsecond-resolution timestamps from the DWT cycle counter.
#[cfg(feature = "stm32f7")]
pub mod cycles {
    use cortex_m::peripheral::{DCB, DWT};

    /// Enable the cycle counter. Must run once before [`now`] is meaningful.
    pub fn enable(dcb: &mut DCB, dwt: &mut DWT) {
        dcb.enable_trace();
        dwt.enable_cycle_counter();
    }

    /// Raw core cycle count.
    #[inline]
    pub fn now() -> u32 {
        DWT::cycle_count()
    }

    /// Busy-wait delay on the cycle counter, for drivers that want `DelayNs`.
    pub struct CycleDelay {
        cycles_per_us: u32,
    }

    impl CycleDelay {
        pub fn new(sysclk_hz: u32) -> Self {
            Self {
                cycles_per_us: (sysclk_hz / 1_000_000).max(1),
            }
        }
    }

    impl embedded_hal_1::delay::DelayNs for CycleDelay {
        fn delay_ns(&mut self, ns: u32) {
            let cycles = (ns as u64 * self.cycles_per_us as u64).div_ceil(1_000);
            let cycles = cycles.min(u32::MAX as u64) as u32;
            let start = now();
            while now().wrapping_sub(start) < cycles {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_ticks() {
        let clock = MillisClock::new();
        for _ in 0..25 {
            clock.tick();
        }
        assert_eq!(clock.now_ms(), 25);
        assert_eq!(clock.elapsed_ms(10), 15);
    }

    #[test]
    fn elapsed_survives_rollover() {
        let clock = MillisClock::new();
        clock.ms.store(u32::MAX - 4, Ordering::Relaxed);
        let start = clock.now_ms();
        for _ in 0..10 {
            clock.tick();
        }
        assert_eq!(clock.now_ms(), 5);
        assert_eq!(clock.elapsed_ms(start), 10);
    }
}
