// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single-channel motor PWM on TIM4 CH1 (PD12, AF2) via direct PAC register access.
//!
//! The auto-reload is fixed at 255 so one duty step equals one drive-intensity step.

use embedded_hal::PwmPin;
use stm32f7xx_hal::pac;

/// Counter top; duty range is 0..=PWM_TOP.
pub const PWM_TOP: u16 = 255;

pub struct Tim4Pwm {
    tim: pac::TIM4,
}

impl Tim4Pwm {
    /// Configure TIM4 CH1 for edge-aligned PWM mode 1 at roughly `freq_hz`.
    ///
    /// `timer_clk_hz` is the TIM4 kernel clock (APB1 timer clock).
    pub fn tim4_ch1(tim4: pac::TIM4, timer_clk_hz: u32, freq_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let tim = tim4;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let ticks_per_period = PWM_TOP as u32 + 1;
        let psc = (timer_clk_hz / (freq_hz.max(1) * ticks_per_period)).clamp(1, 0x1_0000) - 1;
        tim.psc.write(|w| unsafe { w.bits(psc) });
        tim.arr.write(|w| unsafe { w.bits(PWM_TOP as u32) });

        // OC1M = 110 (PWM mode 1), OC1PE = 1 (preload)
        tim.ccmr1_output().modify(|r, w| unsafe {
            w.bits((r.bits() & !0x0000_00FF) | (0b110 << 4) | (1 << 3))
        });

        // Start at zero duty, output disabled until enable()
        tim.ccr1.write(|w| unsafe { w.bits(0) });
        tim.ccer.modify(|r, w| unsafe { w.bits(r.bits() & !0b11) });

        // Auto-reload preload, latch registers, start
        tim.cr1.modify(|_, w| w.arpe().set_bit());
        tim.egr.write(|w| w.ug().set_bit());
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> pac::TIM4 {
        self.tim
    }
}

impl PwmPin for Tim4Pwm {
    type Duty = u16;

    fn disable(&mut self) {
        self.tim
            .ccer
            .modify(|r, w| unsafe { w.bits(r.bits() & !0b1) });
    }

    fn enable(&mut self) {
        self.tim
            .ccer
            .modify(|r, w| unsafe { w.bits(r.bits() | 0b1) });
    }

    fn get_duty(&self) -> u16 {
        self.tim.ccr1.read().bits() as u16
    }

    fn get_max_duty(&self) -> u16 {
        PWM_TOP
    }

    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(PWM_TOP) as u32;
        self.tim.ccr1.write(|w| unsafe { w.bits(duty) });
    }
}
