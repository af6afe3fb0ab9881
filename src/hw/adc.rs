// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Blocking single-channel ADC1 reads using direct PAC register access.
//!
//! The converter runs at 10-bit resolution so raw readings land on the 0..=1023 scale the button
//! thresholds are expressed in.

use stm32f7xx_hal::pac;

use crate::control::AdcRead;

/// Longest sample time (480 cycles) for stable readings off the button dividers.
const SAMPLE_TIME: u32 = 0b111;

pub struct Adc {
    adc: pac::ADC1,
}

impl Adc {
    /// Enable and configure ADC1.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        // ADC prescaler: PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        // Power off to configure
        adc1.cr2.modify(|_, w| w.adon().clear_bit());

        // 10-bit, right-aligned, software trigger
        adc1.cr1.modify(|_, w| w.res().bits(0b01));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });

        // Single-conversion sequence
        adc1.sqr1.modify(|_, w| w.l().bits(0));

        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Read a single channel (0..=18).
    pub fn read(&mut self, channel: u8) -> u16 {
        let adc = &self.adc;
        let channel = channel & 0x1F;

        // Channels 0..=9 live in SMPR2, 10..=18 in SMPR1, three bits each.
        if channel <= 9 {
            let shift = channel as u32 * 3;
            adc.smpr2.modify(|r, w| unsafe {
                w.bits((r.bits() & !(0b111 << shift)) | (SAMPLE_TIME << shift))
            });
        } else {
            let shift = (channel as u32 - 10) * 3;
            adc.smpr1.modify(|r, w| unsafe {
                w.bits((r.bits() & !(0b111 << shift)) | (SAMPLE_TIME << shift))
            });
        }

        adc.sqr3.modify(|_, w| unsafe { w.sq1().bits(channel) });

        adc.cr2.modify(|_, w| w.swstart().set_bit());
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits()
    }

    #[inline]
    pub fn free(self) -> pac::ADC1 {
        self.adc
    }
}

impl AdcRead for Adc {
    #[inline]
    fn read_channel(&mut self, ch: u8) -> u16 {
        self.read(ch)
    }
}
