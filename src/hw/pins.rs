// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the cruise rig on the STM32F767ZI devboard.

use stm32f7xx_hal::{
    gpio::{
        gpioa, gpiob, gpioc, gpiod, gpioe, Alternate, Analog, Floating, Input, OpenDrain, Output,
        PullUp, PushPull,
    },
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub usart3: Usart3Pins,
    pub i2c1: I2c1Pins,
    pub motor: MotorPins,
    pub ranger: RangerPins,
    pub rotation: gpioe::PE7<Input<PullUp>>,
    pub buttons: ButtonPins,
}

/// Status lamps
pub struct LedPins {
    pub primary: gpiob::PB0<Output<PushPull>>,   // LD1
    pub secondary: gpiob::PB7<Output<PushPull>>, // LD2
}

/// ST-LINK virtual COM port
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// Status LCD backpack
pub struct I2c1Pins {
    pub scl: gpiob::PB8<Alternate<4, OpenDrain>>,
    pub sda: gpiob::PB9<Alternate<4, OpenDrain>>,
}

/// H-bridge control pins
pub struct MotorPins {
    pub pwm: gpiod::PD12<Alternate<2>>, // TIM4_CH1
    pub in1: gpioe::PE2<Output<PushPull>>,
    pub in2: gpioe::PE4<Output<PushPull>>,
}

/// HC-SR04 ultrasonic ranger
pub struct RangerPins {
    pub trig: gpioe::PE10<Output<PushPull>>,
    pub echo: gpioe::PE12<Input<Floating>>,
}

/// Analog button inputs, ADC1 channels noted per pin
pub struct ButtonPins {
    pub increase: gpioa::PA0<Analog>, // ADC1_IN0
    pub decrease: gpioa::PA3<Analog>, // ADC1_IN3
    pub cancel: gpioc::PC0<Analog>,   // ADC1_IN10
    pub set: gpioc::PC3<Analog>,      // ADC1_IN13
    pub engage: gpiob::PB1<Analog>,   // ADC1_IN9
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpioc: pac::GPIOC,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            leds: LedPins {
                primary: gpiob.pb0.into_push_pull_output(),
                secondary: gpiob.pb7.into_push_pull_output(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            i2c1: I2c1Pins {
                scl: gpiob.pb8.into_alternate_open_drain::<4>(),
                sda: gpiob.pb9.into_alternate_open_drain::<4>(),
            },

            motor: MotorPins {
                pwm: gpiod.pd12.into_alternate::<2>(),
                in1: gpioe.pe2.into_push_pull_output(),
                in2: gpioe.pe4.into_push_pull_output(),
            },

            ranger: RangerPins {
                trig: gpioe.pe10.into_push_pull_output(),
                echo: gpioe.pe12.into_floating_input(),
            },

            rotation: gpioe.pe7.into_pull_up_input(),

            buttons: ButtonPins {
                increase: gpioa.pa0.into_analog(),
                decrease: gpioa.pa3.into_analog(),
                cancel: gpioc.pc0.into_analog(),
                set: gpioc.pc3.into_analog(),
                engage: gpiob.pb1.into_analog(),
            },
        }
    }
}
