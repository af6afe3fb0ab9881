// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Cruise Rig Firmware
//!
//! Closed-loop motor speed controller for the cruise/ACC demo rig: manual speed control, a
//! cruise-hold mode, and a distance-throttled adaptive cruise mode, all running in a fixed-period
//! loop on an STM32F767 MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Named thresholds, intervals and the validated [`ControllerConfig`](config::ControllerConfig) |
//! | [`control`] | Debouncer, mode state machine, actuation mapper, speed estimator, loop scheduler |
//! | [`hw`] | MCU-level wrappers: pulse counter, LEDs, ADC, USART, I2C bridge, clock, pins |
//! | [`drivers`] | Device-level drivers (H-bridge motor, ultrasonic ranger, status LCD) |
//!
//! Everything outside `hw` board support compiles on the host, so the control logic is tested
//! with plain `cargo test`. Board support is gated behind the `stm32f7` feature.
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features stm32f7 --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
pub mod logging;

pub mod config;
pub mod control;
pub mod drivers;
pub mod hw;

pub use config::{ConfigError, ControllerConfig};
pub use control::{ControlLoop, ControlMode, CycleReport, Rig};
pub use hw::PulseCounter;
