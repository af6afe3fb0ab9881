// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Elapsed-time gate for periodic work inside the fixed-tick loop.
//!
//! An [`Interval`] fires when *at least* its period has passed since it last fired, measured on a
//! free-running millisecond counter. Loop jitter therefore delays a firing instead of skipping
//! it. Arithmetic wraps, so a counter rollover is harmless.

#[derive(Copy, Clone, Debug)]
pub struct Interval {
    period_ms: u32,
    last_ms: u32,
}

impl Interval {
    /// New interval whose reference point is t = 0.
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: 0,
        }
    }

    /// Whether the period has elapsed at `now_ms`, without consuming the firing.
    #[inline]
    pub fn is_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_ms) >= self.period_ms
    }

    /// Fire if due, restarting the period from `now_ms`.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if self.is_due(now_ms) {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_elapsed_period() {
        let mut iv = Interval::new(300);
        assert!(!iv.poll(0));
        assert!(!iv.poll(299));
        assert!(iv.poll(300));
        assert!(!iv.poll(310));
        assert!(iv.poll(600));
    }

    #[test]
    fn late_tick_restarts_from_actual_fire_time() {
        let mut iv = Interval::new(200);
        assert!(iv.poll(215));
        // Next firing is measured from 215, not 200.
        assert!(!iv.poll(405));
        assert!(iv.poll(415));
    }

    #[test]
    fn survives_counter_rollover() {
        let mut iv = Interval::new(100);
        assert!(iv.poll(u32::MAX - 20));
        assert!(!iv.poll(u32::MAX));
        assert!(iv.poll(79));
    }
}
