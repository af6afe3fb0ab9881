// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HC-SR04 ultrasonic ranger.
//!
//! Blocking measurement: a 10 µs trigger pulse, then the echo pulse width is timed against a
//! free-running tick source. Distance is `width_us / 58` cm (round trip at ~343 m/s).
//!
//! A missing or over-long echo reads as 0.0 cm. The control loop treats that as "obstacle at
//! zero distance", so a disconnected ranger makes ACC brake.
//!
//! Wiring:
//! - VCC: 5 V
//! - TRIG: push-pull output
//! - ECHO: input through a 5 V to 3.3 V divider
//! - GND

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::control::DistanceSensor;

/// Echo wait limit, for both the rising and the falling edge.
pub const ECHO_TIMEOUT_US: u32 = 20_000;

/// Microseconds of echo per centimetre of range.
pub const US_PER_CM: f32 = 58.0;

/// `Ticks` is a closure returning a free-running, wrapping tick count at `ticks_per_us` ticks per
/// microsecond (e.g. the DWT cycle counter).
pub struct Hcsr04<Trig, Echo, Ticks> {
    trig: Trig,
    echo: Echo,
    ticks: Ticks,
    ticks_per_us: u32,
    last_cm: f32,
}

impl<Trig, Echo, Ticks> Hcsr04<Trig, Echo, Ticks>
where
    Trig: OutputPin,
    Echo: InputPin,
    Ticks: FnMut() -> u32,
{
    pub fn new(mut trig: Trig, echo: Echo, ticks: Ticks, ticks_per_us: u32) -> Self {
        trig.set_low().ok();
        Self {
            trig,
            echo,
            ticks,
            ticks_per_us: ticks_per_us.max(1),
            last_cm: 0.0,
        }
    }

    /// Fire one ping and return the echo width in µs, or `None` on timeout.
    pub fn measure_echo_us(&mut self) -> Option<u32> {
        self.trig.set_low().ok();
        self.delay_us(2);
        self.trig.set_high().ok();
        self.delay_us(10);
        self.trig.set_low().ok();

        let start = (self.ticks)();
        while !self.echo_high() {
            if self.elapsed_us(start) > ECHO_TIMEOUT_US {
                log_debug!("echo never started");
                return None;
            }
        }

        let rise = (self.ticks)();
        while self.echo_high() {
            if self.elapsed_us(rise) > ECHO_TIMEOUT_US {
                log_debug!("echo too long");
                return None;
            }
        }

        Some(self.elapsed_us(rise))
    }

    /// One measurement in centimetres; 0.0 on timeout.
    pub fn measure_cm(&mut self) -> f32 {
        let cm = match self.measure_echo_us() {
            Some(width_us) => width_us as f32 / US_PER_CM,
            None => 0.0,
        };
        self.last_cm = cm;
        cm
    }

    /// Result of the most recent measurement.
    #[inline]
    pub fn last_cm(&self) -> f32 {
        self.last_cm
    }

    pub fn free(self) -> (Trig, Echo) {
        (self.trig, self.echo)
    }

    #[inline]
    fn echo_high(&self) -> bool {
        self.echo.is_high().unwrap_or(false)
    }

    #[inline]
    fn elapsed_us(&mut self, since: u32) -> u32 {
        (self.ticks)().wrapping_sub(since) / self.ticks_per_us
    }

    fn delay_us(&mut self, us: u32) {
        let start = (self.ticks)();
        while self.elapsed_us(start) < us {}
    }
}

impl<Trig, Echo, Ticks> DistanceSensor for Hcsr04<Trig, Echo, Ticks>
where
    Trig: OutputPin,
    Echo: InputPin,
    Ticks: FnMut() -> u32,
{
    #[inline]
    fn read_cm(&mut self) -> f32 {
        self.measure_cm()
    }
}
