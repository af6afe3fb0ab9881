// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! MCU-level building blocks.
//!
//! The pulse counter, clock, I2C bridge and LED wrapper are target-independent. Everything that
//! touches STM32F7 registers is gated behind the `stm32f7` feature.

pub mod clock;
pub mod i2c;
pub mod led;
pub mod pulse_counter;

#[cfg(feature = "stm32f7")]
pub mod adc;
#[cfg(feature = "stm32f7")]
pub mod exti;
#[cfg(feature = "stm32f7")]
pub mod pins;
#[cfg(feature = "stm32f7")]
pub mod pwm;
#[cfg(feature = "stm32f7")]
pub mod usart;

pub use clock::MillisClock;
pub use i2c::I2cCompat;
pub use led::Led;
pub use pulse_counter::PulseCounter;

#[cfg(feature = "stm32f7")]
pub use adc::Adc;
#[cfg(feature = "stm32f7")]
pub use exti::RotationEdge;
#[cfg(feature = "stm32f7")]
pub use pwm::Tim4Pwm;
#[cfg(feature = "stm32f7")]
pub use usart::Usart;
