// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-input H-bridge (L298N-style) with a separate PWM enable line.
//!
//! Wiring:
//! - IN1: direction A, push-pull output
//! - IN2: direction B, push-pull output
//! - ENA: PWM speed input
//!
//! Forward drives IN1 high / IN2 low. Stop releases both inputs *and* zeroes the PWM, so the motor
//! coasts rather than being held forward at zero duty.

use embedded_hal::{digital::v2::OutputPin, PwmPin};

use crate::config::DRIVE_MAX;
use crate::control::{Direction, MotorDriver};

pub struct HBridge<In1, In2, Pwm> {
    in1: In1,
    in2: In2,
    pwm: Pwm,
}

impl<In1, In2, Pwm> HBridge<In1, In2, Pwm>
where
    In1: OutputPin,
    In2: OutputPin,
    Pwm: PwmPin<Duty = u16>,
{
    /// Take the pins and start stopped with the PWM output enabled at zero duty.
    pub fn new(in1: In1, in2: In2, mut pwm: Pwm) -> Self {
        pwm.set_duty(0);
        pwm.enable();

        let mut bridge = Self { in1, in2, pwm };
        bridge.set_direction(Direction::Stop);
        bridge
    }

    /// Scale a 0..=255 intensity onto the PWM's duty range.
    pub fn duty_for(&self, intensity: u8) -> u16 {
        let max = self.pwm.get_max_duty() as u32;
        (intensity as u32 * max / DRIVE_MAX as u32) as u16
    }

    #[inline]
    pub fn duty(&self) -> u16 {
        self.pwm.get_duty()
    }

    pub fn free(self) -> (In1, In2, Pwm) {
        (self.in1, self.in2, self.pwm)
    }
}

impl<In1, In2, Pwm> MotorDriver for HBridge<In1, In2, Pwm>
where
    In1: OutputPin,
    In2: OutputPin,
    Pwm: PwmPin<Duty = u16>,
{
    fn set_direction(&mut self, dir: Direction) {
        match dir {
            Direction::Forward => {
                self.in1.set_high().ok();
                self.in2.set_low().ok();
            }
            Direction::Stop => {
                self.in1.set_low().ok();
                self.in2.set_low().ok();
            }
        }
    }

    fn set_drive_intensity(&mut self, intensity: u8) {
        let duty = self.duty_for(intensity);
        self.pwm.set_duty(duty);
    }
}
