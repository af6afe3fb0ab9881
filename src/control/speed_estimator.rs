// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Rotational rate estimate from the interrupt-driven pulse counter.
//!
//! Once per interval the counter is drained atomically and the count converted to revolutions per
//! minute. The result is telemetry only; no control decision reads it.

use crate::config::ControllerConfig;
use crate::control::Interval;
use crate::hw::PulseCounter;

/// Convert one interval's pulse count into RPM-equivalent units: `pulses * 60 / pulses_per_rev`.
///
/// Exact RPM only for a 1000 ms interval.
#[inline]
pub fn pulses_to_rpm(pulses: u32, pulses_per_rev: u16) -> f32 {
    (pulses as f32 * 60.0) / pulses_per_rev as f32
}

pub struct SpeedEstimator {
    interval: Interval,
    pulses_per_rev: u16,
    rate_rpm: f32,
}

impl SpeedEstimator {
    pub fn new(interval_ms: u32, pulses_per_rev: u16) -> Self {
        Self {
            interval: Interval::new(interval_ms),
            pulses_per_rev,
            rate_rpm: 0.0,
        }
    }

    pub fn from_config(cfg: &ControllerConfig) -> Self {
        Self::new(cfg.estimator_interval_ms, cfg.pulses_per_rev)
    }

    /// If the interval has elapsed, drain `counter` and return the fresh estimate.
    pub fn poll(&mut self, now_ms: u32, counter: &PulseCounter) -> Option<f32> {
        if !self.interval.poll(now_ms) {
            return None;
        }

        let pulses = counter.take();
        self.rate_rpm = pulses_to_rpm(pulses, self.pulses_per_rev);
        log_debug!("rate {} rpm from {} pulses", self.rate_rpm, pulses);
        Some(self.rate_rpm)
    }

    /// Most recent estimate (0 until the first interval elapses).
    #[inline]
    pub fn rate_rpm(&self) -> f32 {
        self.rate_rpm
    }
}
