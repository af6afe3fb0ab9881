// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Maps a commanded speed onto the motor power stage.
//!
//! The speed is clamped to [0, 100] and scaled linearly onto the 0..=255 drive range, rounding to
//! the nearest step. Zero speed is a full stop: direction outputs released *and* zero drive, never
//! a forward direction with zero duty.

// Unit tests build with std, whose inherent `f32::round` wins over the trait method.
#[cfg(not(test))]
use micromath::F32Ext;

use crate::config::{DRIVE_MAX, SPEED_MAX, SPEED_MIN};
use crate::control::MotorDriver;

/// Direction outputs of the power stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "stm32f7", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Stop,
}

/// One cycle's output to the motor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "stm32f7", derive(defmt::Format))]
pub struct DriveCommand {
    /// Clamped commanded speed, 0..=100.
    pub speed: u8,
    pub direction: Direction,
    /// Drive intensity, 0..=255.
    pub intensity: u8,
}

/// Clamp any running speed value into the valid commanded range.
#[inline]
pub fn clamp_speed(speed: i32) -> u8 {
    speed.clamp(SPEED_MIN, SPEED_MAX) as u8
}

/// Linear map of a clamped speed onto the drive range, rounded to nearest.
pub fn drive_intensity(speed: u8) -> u8 {
    let scaled = speed as f32 * DRIVE_MAX as f32 / SPEED_MAX as f32;
    scaled.round().clamp(0.0, DRIVE_MAX as f32) as u8
}

impl DriveCommand {
    /// Full stop.
    pub const STOP: Self = Self {
        speed: 0,
        direction: Direction::Stop,
        intensity: 0,
    };

    pub fn from_speed(speed: i32) -> Self {
        let speed = clamp_speed(speed);
        if speed > 0 {
            Self {
                speed,
                direction: Direction::Forward,
                intensity: drive_intensity(speed),
            }
        } else {
            Self::STOP
        }
    }

    /// Drive the power stage. Direction is always written before intensity.
    pub fn apply<M: MotorDriver>(&self, motor: &mut M) {
        motor.set_direction(self.direction);
        motor.set_drive_intensity(self.intensity);
    }
}
