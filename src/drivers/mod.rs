// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! control logic. They are written against `embedded-hal` traits so they run on the host in tests.
//!
//! ## Existing drivers
//!
//! - [`hbridge`] – Two-input H-bridge with PWM enable (motor power stage)
//! - [`hcsr04`] – HC-SR04 ultrasonic ranger (forward distance)
//! - [`lcd1602`] – 16x2 I2C character LCD (status display)

pub mod hbridge;
pub mod hcsr04;
pub mod lcd1602;

pub use hbridge::HBridge;
pub use hcsr04::Hcsr04;
pub use lcd1602::{Lcd1602Panel, StatusDisplay, TwoLineDisplay};
