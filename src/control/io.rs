// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Collaborator interfaces the control loop is written against.
//!
//! Board support implements these on real peripherals; tests implement them on plain structs.

use core::fmt;

use crate::control::{ControlMode, Direction};

/// Forward distance sensor. Returns a best-effort reading; there is no error channel.
pub trait DistanceSensor {
    fn read_cm(&mut self) -> f32;
}

/// Trait for reading a single channel from an ADC peripheral.
pub trait AdcRead {
    fn read_channel(&mut self, ch: u8) -> u16;
}

/// Motor power stage.
pub trait MotorDriver {
    fn set_direction(&mut self, dir: Direction);

    /// Drive intensity on the 0..=255 scale.
    fn set_drive_intensity(&mut self, intensity: u8);
}

/// A single steady on/off status lamp.
pub trait StatusLamp {
    fn set_steady(&mut self, on: bool);
}

/// Fire-and-forget status output (serial console, display, ...).
pub trait TelemetrySink {
    fn publish(&mut self, telemetry: &Telemetry);
}

/// Fan-out: every snapshot goes to both sinks, first then second.
impl<A: TelemetrySink, B: TelemetrySink> TelemetrySink for (A, B) {
    fn publish(&mut self, telemetry: &Telemetry) {
        self.0.publish(telemetry);
        self.1.publish(telemetry);
    }
}

/// Snapshot published once per display interval.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Telemetry {
    pub mode: ControlMode,
    pub commanded_speed: u8,
    pub rate_rpm: f32,
    pub drive_intensity: u8,
    pub distance_cm: f32,
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mode: {} | Speed: {} | RPM: {:.2} | PWM: {} | Distance: {:.2} cm",
            self.mode, self.commanded_speed, self.rate_rpm, self.drive_intensity, self.distance_cm
        )
    }
}
