// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! Decision logic for the rig. Nothing here touches registers; hardware is reached through the
//! collaborator traits in [`io`].
//!
//! ## Modules
//!
//! - [`io`] - Collaborator traits (distance, analog inputs, motor, lamps, telemetry).
//! - [`debounce`] - Hysteresis debouncer turning raw input levels into one-shot button events.
//! - [`mode`] - Normal / Cruise / ACC state machine and indicator outputs.
//! - [`actuation`] - Speed clamp and mapping to a drive direction and intensity.
//! - [`speed_estimator`] - Periodic pulse-count drain and rate conversion.
//! - [`interval`] - "At least this long since last fired" timers.
//! - [`scheduler`] - Fixed-period loop sequencing all of the above.

pub mod actuation;
pub mod debounce;
pub mod interval;
pub mod io;
pub mod mode;
pub mod scheduler;
pub mod speed_estimator;

pub use actuation::{Direction, DriveCommand};
pub use debounce::{Button, ButtonEvents, Debouncer};
pub use interval::Interval;
pub use io::{AdcRead, DistanceSensor, MotorDriver, StatusLamp, Telemetry, TelemetrySink};
pub use mode::{ControlMode, IndicatorState, ModeController};
pub use scheduler::{ControlLoop, CycleReport, Rig};
pub use speed_estimator::SpeedEstimator;
