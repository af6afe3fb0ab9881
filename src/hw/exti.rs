// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Falling-edge external interrupt for the rotation sensor on PE7 (EXTI line 7, `EXTI9_5`).
//!
//! The pin itself is configured as a pull-up input in [`crate::hw::pins`]; this module only routes
//! it into the EXTI controller and manages the pending flag.

use stm32f7xx_hal::pac;

const LINE: u32 = 7;
const LINE_MASK: u32 = 1 << LINE;

/// SYSCFG_EXTICR port code for GPIOE.
const PORT_E: u32 = 0b0100;

pub struct RotationEdge {
    exti: pac::EXTI,
}

impl RotationEdge {
    /// Route PE7 to EXTI7, trigger on falling edges only and unmask the line.
    ///
    /// The caller unmasks `EXTI9_5` in the NVIC once the shared counter is ready.
    pub fn pe7(exti: pac::EXTI, syscfg: pac::SYSCFG) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.syscfgen().set_bit());

        // EXTICR2 holds lines 4..=7, four bits each; line 7 is bits 15:12.
        let shift = (LINE - 4) * 4;
        syscfg.exticr2.modify(|r, w| unsafe {
            w.bits((r.bits() & !(0xF << shift)) | (PORT_E << shift))
        });

        exti.rtsr.modify(|r, w| unsafe { w.bits(r.bits() & !LINE_MASK) });
        exti.ftsr.modify(|r, w| unsafe { w.bits(r.bits() | LINE_MASK) });
        exti.pr.write(|w| unsafe { w.bits(LINE_MASK) });
        exti.imr.modify(|r, w| unsafe { w.bits(r.bits() | LINE_MASK) });

        Self { exti }
    }

    /// Whether line 7 has a pending edge.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.exti.pr.read().bits() & LINE_MASK != 0
    }

    /// Acknowledge the pending edge (write-one-to-clear).
    #[inline]
    pub fn clear_pending(&mut self) {
        self.exti.pr.write(|w| unsafe { w.bits(LINE_MASK) });
    }
}
