// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-period control loop.
//!
//! One [`ControlLoop::step`] is one loop iteration:
//!
//! 1. sample distance
//! 2. poll and debounce the buttons
//! 3. mode transitions, then mode behaviour
//! 4. clamp, map and drive the motor and status lamps
//! 5. drain the pulse counter if the estimator interval elapsed
//! 6. publish telemetry if the display interval elapsed
//!
//! The caller supplies the millisecond tick and performs the fixed delay between iterations.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut ctl = ControlLoop::new(ControllerConfig::default())?;
//!
//! loop {
//!     ctl.step(clock.now_ms(), &mut rig, &PULSES);
//!     wait_ms(TICK_MS);
//! }
//! ```

use crate::config::{ConfigError, ControllerConfig};
use crate::control::{
    AdcRead, ButtonEvents, Debouncer, DistanceSensor, DriveCommand, IndicatorState, Interval,
    ModeController, MotorDriver, SpeedEstimator, StatusLamp, Telemetry, TelemetrySink,
};
use crate::hw::PulseCounter;

/// The external collaborators one loop iteration talks to.
pub struct Rig<S, A, M, L1, L2, T> {
    pub distance: S,
    pub inputs: A,
    pub motor: M,
    pub primary_lamp: L1,
    pub secondary_lamp: L2,
    pub telemetry: T,
}

/// What happened during one iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CycleReport {
    pub distance_cm: f32,
    pub events: ButtonEvents,
    pub drive: DriveCommand,
    pub indicators: IndicatorState,
    /// Fresh estimate if the estimator ran this iteration.
    pub rate_rpm: Option<f32>,
    /// Snapshot if telemetry was published this iteration.
    pub telemetry: Option<Telemetry>,
}

pub struct ControlLoop {
    config: ControllerConfig,
    debouncer: Debouncer,
    modes: ModeController,
    estimator: SpeedEstimator,
    display: Interval,
}

impl ControlLoop {
    /// Build a loop from a validated configuration.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            log_warn!("controller config rejected");
            return Err(e);
        }

        Ok(Self {
            debouncer: Debouncer::new(config.press_threshold, config.release_threshold),
            modes: ModeController::from_config(&config),
            estimator: SpeedEstimator::from_config(&config),
            display: Interval::new(config.display_interval_ms),
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[inline]
    pub fn modes(&self) -> &ModeController {
        &self.modes
    }

    #[inline]
    pub fn modes_mut(&mut self) -> &mut ModeController {
        &mut self.modes
    }

    #[inline]
    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    #[inline]
    pub fn estimator(&self) -> &SpeedEstimator {
        &self.estimator
    }

    /// Run one loop iteration at tick `now_ms`.
    pub fn step<S, A, M, L1, L2, T>(
        &mut self,
        now_ms: u32,
        rig: &mut Rig<S, A, M, L1, L2, T>,
        pulses: &PulseCounter,
    ) -> CycleReport
    where
        S: DistanceSensor,
        A: AdcRead,
        M: MotorDriver,
        L1: StatusLamp,
        L2: StatusLamp,
        T: TelemetrySink,
    {
        let distance_cm = rig.distance.read_cm();

        let events = self
            .debouncer
            .poll(&mut rig.inputs, &self.config.button_channels);

        self.modes.step(events, distance_cm, now_ms);

        let drive = self.modes.actuate();
        drive.apply(&mut rig.motor);

        let indicators = self.modes.indicators();
        rig.primary_lamp.set_steady(indicators.primary);
        rig.secondary_lamp.set_steady(indicators.secondary);

        let rate_rpm = self.estimator.poll(now_ms, pulses);

        let telemetry = if self.display.poll(now_ms) {
            let snapshot = Telemetry {
                mode: self.modes.mode(),
                commanded_speed: drive.speed,
                rate_rpm: self.estimator.rate_rpm(),
                drive_intensity: drive.intensity,
                distance_cm,
            };
            rig.telemetry.publish(&snapshot);
            Some(snapshot)
        } else {
            None
        };

        CycleReport {
            distance_cm,
            events,
            drive,
            indicators,
            rate_rpm,
            telemetry,
        }
    }
}
