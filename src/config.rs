// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Controller tuning constants and the validated runtime configuration.
//!
//! The constants are the values the rig was commissioned with. [`ControllerConfig::default`]
//! reproduces them exactly; the `with_*` builders exist for bench setups and tests.

use thiserror::Error;

use crate::control::Button;

/// Raw input level above which a control counts as pressed (10-bit scale).
pub const PRESS_THRESHOLD: u16 = 600;

/// Raw input level below which a held control counts as released (10-bit scale).
pub const RELEASE_THRESHOLD: u16 = 100;

/// ACC slows down while the forward distance is at or below this value.
pub const SAFE_DISTANCE_CM: f32 = 20.0;

/// Hazard blink half-period while ACC is braking for an obstacle.
pub const BLINK_INTERVAL_MS: u32 = 200;

/// Telemetry refresh period.
pub const DISPLAY_INTERVAL_MS: u32 = 300;

/// Pulse counter drain period for the rate estimate.
pub const ESTIMATOR_INTERVAL_MS: u32 = 1000;

/// Fixed delay at the end of every control loop iteration.
pub const TICK_MS: u32 = 10;

/// Raw rotation-sensor edges per counted pulse.
pub const EDGE_DIVISOR: u8 = 8;

/// Counted pulses per shaft revolution.
pub const PULSES_PER_REV: u16 = 20;

/// Commanded speed range.
pub const SPEED_MIN: i32 = 0;
pub const SPEED_MAX: i32 = 100;

/// Full-scale drive intensity.
pub const DRIVE_MAX: u8 = 255;

/// Motor PWM carrier frequency.
pub const PWM_FREQ_HZ: u32 = 1_000;

/// How long the startup banner is shown before the loop starts.
pub const STARTUP_DELAY_MS: u32 = 1000;

/// Shown on the console and the LCD at power-up.
pub const STARTUP_BANNER: &str = "ACC System Start";

/// I2C bus clock for the status LCD.
pub const LCD_I2C_HZ: u32 = 100_000;

/// ADC channel assignment for the five discrete controls, indexed by [`Button`].
pub const BUTTON_CHANNELS: [u8; Button::COUNT] = [
    0, // increase  (PA0, ADC123_IN0)
    3, // decrease  (PA3, ADC123_IN3)
    10, // cancel   (PC0, ADC123_IN10)
    13, // set      (PC3, ADC123_IN13)
    9, // engage    (PB1, ADC12_IN9)
];

/// Reasons a [`ControllerConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The release threshold must sit strictly below the press threshold.
    #[error("release threshold {release} must be below press threshold {press}")]
    ThresholdOrder { press: u16, release: u16 },

    /// Rate conversion divides by pulses per revolution.
    #[error("pulses per revolution must be non-zero")]
    ZeroPulsesPerRev,

    /// A zero divisor would never count a pulse.
    #[error("edge divisor must be non-zero")]
    ZeroEdgeDivisor,

    /// Every periodic task needs a non-zero period.
    #[error("interval `{0}` must be non-zero")]
    ZeroInterval(&'static str),
}

/// Tunables for one controller instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    pub press_threshold: u16,
    pub release_threshold: u16,
    pub safe_distance_cm: f32,
    pub blink_interval_ms: u32,
    pub display_interval_ms: u32,
    pub estimator_interval_ms: u32,
    pub pulses_per_rev: u16,
    pub edge_divisor: u8,
    pub button_channels: [u8; Button::COUNT],
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            press_threshold: PRESS_THRESHOLD,
            release_threshold: RELEASE_THRESHOLD,
            safe_distance_cm: SAFE_DISTANCE_CM,
            blink_interval_ms: BLINK_INTERVAL_MS,
            display_interval_ms: DISPLAY_INTERVAL_MS,
            estimator_interval_ms: ESTIMATOR_INTERVAL_MS,
            pulses_per_rev: PULSES_PER_REV,
            edge_divisor: EDGE_DIVISOR,
            button_channels: BUTTON_CHANNELS,
        }
    }
}

impl ControllerConfig {
    /// Set press/release thresholds.
    pub fn with_thresholds(mut self, press: u16, release: u16) -> Self {
        self.press_threshold = press;
        self.release_threshold = release;
        self
    }

    /// Set the ACC safety distance.
    pub fn with_safe_distance_cm(mut self, cm: f32) -> Self {
        self.safe_distance_cm = cm;
        self
    }

    /// Set the blink, display and estimator periods.
    pub fn with_intervals_ms(mut self, blink: u32, display: u32, estimator: u32) -> Self {
        self.blink_interval_ms = blink;
        self.display_interval_ms = display;
        self.estimator_interval_ms = estimator;
        self
    }

    /// Set the rotation sensor geometry.
    pub fn with_pulse_geometry(mut self, edge_divisor: u8, pulses_per_rev: u16) -> Self {
        self.edge_divisor = edge_divisor;
        self.pulses_per_rev = pulses_per_rev;
        self
    }

    /// Reassign ADC channels.
    pub fn with_button_channels(mut self, channels: [u8; Button::COUNT]) -> Self {
        self.button_channels = channels;
        self
    }

    /// ADC channel wired to `button`.
    #[inline]
    pub fn channel(&self, button: Button) -> u8 {
        self.button_channels[button as usize]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.release_threshold >= self.press_threshold {
            return Err(ConfigError::ThresholdOrder {
                press: self.press_threshold,
                release: self.release_threshold,
            });
        }
        if self.pulses_per_rev == 0 {
            return Err(ConfigError::ZeroPulsesPerRev);
        }
        if self.edge_divisor == 0 {
            return Err(ConfigError::ZeroEdgeDivisor);
        }

        let intervals = [
            ("blink", self.blink_interval_ms),
            ("display", self.display_interval_ms),
            ("estimator", self.estimator_interval_ms),
        ];
        for (name, ms) in intervals {
            if ms == 0 {
                return Err(ConfigError::ZeroInterval(name));
            }
        }

        Ok(())
    }
}
